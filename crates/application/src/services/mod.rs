mod packet_bus;
mod record_store;
mod responder;

pub use packet_bus::{PacketBus, PacketSubscription};
pub use record_store::RecordStore;
pub use responder::Responder;
