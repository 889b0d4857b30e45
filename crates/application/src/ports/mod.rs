mod interfaces;
mod transport;

pub use interfaces::InterfaceProvider;
pub use transport::{Datagram, PacketTransport};
