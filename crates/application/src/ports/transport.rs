use async_trait::async_trait;
use semcache_mdns_domain::DiscoveryError;
use std::net::SocketAddr;

/// One received UDP datagram and where it came from.
#[derive(Debug, Clone)]
pub struct Datagram {
    pub data: Vec<u8>,
    pub source: SocketAddr,
}

/// The single shared datagram socket, created once at start-up.
///
/// `send` hands bytes to the socket and returns without waiting for
/// delivery; `recv` yields inbound datagrams one at a time.
#[async_trait]
pub trait PacketTransport: Send + Sync {
    async fn send(&self, payload: &[u8], target: SocketAddr) -> Result<(), DiscoveryError>;

    async fn recv(&self) -> Result<Datagram, DiscoveryError>;
}
