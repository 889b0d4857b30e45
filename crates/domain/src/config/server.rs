use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// mDNS multicast group.
pub const DEFAULT_MULTICAST_GROUP: Ipv4Addr = Ipv4Addr::new(224, 0, 0, 251);

/// Default UDP port. This deliberately deviates from the IANA-assigned mDNS
/// port 5353 so the engine can coexist with an OS-level mDNS responder on
/// the same machine; it is configurable, never silently changed.
pub const DEFAULT_MDNS_PORT: u16 = 53531;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_multicast_group")]
    pub multicast_group: Ipv4Addr,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            multicast_group: default_multicast_group(),
            port: default_port(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_multicast_group() -> Ipv4Addr {
    DEFAULT_MULTICAST_GROUP
}

fn default_port() -> u16 {
    DEFAULT_MDNS_PORT
}
