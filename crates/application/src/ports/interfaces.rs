use std::net::Ipv4Addr;

/// Enumerates this host's IPv4 addresses, one A record per address at
/// registration time.
pub trait InterfaceProvider: Send + Sync {
    fn ipv4_addresses(&self) -> Vec<Ipv4Addr>;
}
