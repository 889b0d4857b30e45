use semcache_mdns_application::InterfaceProvider;
use std::net::{IpAddr, Ipv4Addr, UdpSocket};
use tracing::debug;

/// Host IPv4 discovery via the UDP-connect trick: connecting an unbound UDP
/// socket to a routable address reveals which local address would carry the
/// traffic. No packet is actually sent.
///
/// Known limitation: this yields the default-route address only, so a
/// multi-homed host advertises one A record instead of one per interface.
/// Registration accepts any [`InterfaceProvider`], so a platform-specific
/// enumerator can be swapped in without touching the engine.
#[derive(Debug, Default)]
pub struct SystemInterfaces;

impl SystemInterfaces {
    pub fn new() -> Self {
        Self
    }

    fn outbound_ipv4() -> Option<Ipv4Addr> {
        let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
        socket.connect("8.8.8.8:80").ok()?;
        match socket.local_addr().ok()?.ip() {
            IpAddr::V4(addr) => Some(addr),
            IpAddr::V6(_) => None,
        }
    }
}

impl InterfaceProvider for SystemInterfaces {
    fn ipv4_addresses(&self) -> Vec<Ipv4Addr> {
        match Self::outbound_ipv4() {
            Some(addr) => vec![addr],
            None => {
                debug!("could not determine a local IPv4 address, using loopback");
                vec![Ipv4Addr::LOCALHOST]
            }
        }
    }
}
