//! Semcache mDNS Infrastructure Layer
//!
//! The real multicast UDP socket and host interface discovery behind the
//! application layer's ports.
pub mod net;

pub use net::{MulticastTransport, SystemInterfaces};
