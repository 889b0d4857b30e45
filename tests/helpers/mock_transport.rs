//! In-memory stand-in for the multicast group: every member sees datagrams
//! sent to the group address, and unicast targets are routed directly.
use async_trait::async_trait;
use semcache_mdns_application::{Datagram, InterfaceProvider, PacketTransport};
use semcache_mdns_domain::DiscoveryError;
use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::{mpsc, Mutex};

pub struct MockNetwork {
    group_addr: SocketAddr,
    members: StdMutex<HashMap<SocketAddr, mpsc::UnboundedSender<Datagram>>>,
}

impl MockNetwork {
    pub fn new(group_addr: SocketAddr) -> Arc<Self> {
        Arc::new(Self {
            group_addr,
            members: StdMutex::new(HashMap::new()),
        })
    }

    /// Add a member with its own source address; the returned transport
    /// behaves like a socket joined to the group.
    pub fn join(self: &Arc<Self>, addr: SocketAddr) -> MockTransport {
        let (tx, rx) = mpsc::unbounded_channel();
        self.members.lock().unwrap().insert(addr, tx);
        MockTransport {
            network: self.clone(),
            addr,
            rx: Mutex::new(rx),
        }
    }
}

pub struct MockTransport {
    network: Arc<MockNetwork>,
    addr: SocketAddr,
    rx: Mutex<mpsc::UnboundedReceiver<Datagram>>,
}

#[async_trait]
impl PacketTransport for MockTransport {
    async fn send(&self, payload: &[u8], target: SocketAddr) -> Result<(), DiscoveryError> {
        let datagram = Datagram {
            data: payload.to_vec(),
            source: self.addr,
        };
        let members = self.network.members.lock().unwrap();
        if target == self.network.group_addr {
            // Multicast loopback included: the sender hears itself.
            for tx in members.values() {
                let _ = tx.send(datagram.clone());
            }
        } else if let Some(tx) = members.get(&target) {
            let _ = tx.send(datagram);
        }
        Ok(())
    }

    async fn recv(&self) -> Result<Datagram, DiscoveryError> {
        self.rx
            .lock()
            .await
            .recv()
            .await
            .ok_or_else(|| DiscoveryError::Transport("mock network closed".to_string()))
    }
}

/// Fixed interface list instead of asking the OS.
pub struct FixedInterfaces(pub Vec<Ipv4Addr>);

impl InterfaceProvider for FixedInterfaces {
    fn ipv4_addresses(&self) -> Vec<Ipv4Addr> {
        self.0.clone()
    }
}
