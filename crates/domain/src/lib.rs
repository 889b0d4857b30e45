//! Semcache mDNS Domain Layer
//!
//! Protocol types and the wire codec for the multicast discovery engine.
//! This crate is free of I/O and async; everything here is plain data and
//! byte-level encode/decode.
pub mod config;
pub mod errors;
pub mod name;
pub mod packet;
pub mod record;
pub mod wire;

pub use config::{CliOverrides, Config, DiscoveryConfig, LoggingConfig, ServerConfig};
pub use errors::{DiscoveryError, ProtocolError};
pub use name::DomainName;
pub use packet::{Packet, PacketFlags, Question};
pub use record::{RecordClass, RecordType, ResourceRecord};

/// Reserved query name that enumerates every advertised service type
/// (RFC 6763 §9).
pub const SERVICE_ENUMERATION_NAME: &str = "_services._dns-sd._udp.local";
