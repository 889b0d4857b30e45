use async_trait::async_trait;
use semcache_mdns_application::{Datagram, PacketTransport};
use semcache_mdns_domain::{DiscoveryError, ServerConfig};
use socket2::{Domain, Protocol, Socket, Type};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use tokio::net::UdpSocket;
use tracing::info;

/// Receive buffer size: an Ethernet-MTU datagram always fits.
const MAX_DATAGRAM_SIZE: usize = 1500;

/// The one multicast UDP socket of the process: bound to
/// `0.0.0.0:<port>` and joined to the discovery group.
pub struct MulticastTransport {
    socket: UdpSocket,
}

impl MulticastTransport {
    /// Create, bind and join. Any failure here is fatal to the engine, so
    /// errors surface immediately with no retry.
    pub fn bind(config: &ServerConfig) -> Result<Self, DiscoveryError> {
        let bind_ip: Ipv4Addr = config
            .bind_address
            .parse()
            .map_err(|_| DiscoveryError::Transport(format!(
                "invalid bind address: {}",
                config.bind_address
            )))?;
        let bind_addr = SocketAddrV4::new(bind_ip, config.port);

        let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))
            .map_err(transport_err("create socket"))?;
        socket
            .set_reuse_address(true)
            .map_err(transport_err("set SO_REUSEADDR"))?;
        #[cfg(unix)]
        socket
            .set_reuse_port(true)
            .map_err(transport_err("set SO_REUSEPORT"))?;
        socket
            .bind(&SocketAddr::V4(bind_addr).into())
            .map_err(transport_err("bind"))?;
        socket
            .join_multicast_v4(&config.multicast_group, &Ipv4Addr::UNSPECIFIED)
            .map_err(transport_err("join multicast group"))?;
        socket
            .set_multicast_loop_v4(true)
            .map_err(transport_err("set multicast loopback"))?;
        socket
            .set_nonblocking(true)
            .map_err(transport_err("set nonblocking"))?;

        let std_socket: std::net::UdpSocket = socket.into();
        let socket = UdpSocket::from_std(std_socket).map_err(transport_err("register socket"))?;

        info!(
            group = %config.multicast_group,
            port = config.port,
            "multicast socket bound"
        );
        Ok(Self { socket })
    }
}

fn transport_err(context: &'static str) -> impl Fn(std::io::Error) -> DiscoveryError {
    move |e| DiscoveryError::Transport(format!("{context}: {e}"))
}

#[async_trait]
impl PacketTransport for MulticastTransport {
    async fn send(&self, payload: &[u8], target: SocketAddr) -> Result<(), DiscoveryError> {
        self.socket
            .send_to(payload, target)
            .await
            .map_err(transport_err("send"))?;
        Ok(())
    }

    async fn recv(&self) -> Result<Datagram, DiscoveryError> {
        let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];
        let (len, source) = self
            .socket
            .recv_from(&mut buf)
            .await
            .map_err(transport_err("recv"))?;
        buf.truncate(len);
        Ok(Datagram { data: buf, source })
    }
}
