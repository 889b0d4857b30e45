mod interfaces;
mod multicast;

pub use interfaces::SystemInterfaces;
pub use multicast::MulticastTransport;
