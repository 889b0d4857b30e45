use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use semcache_mdns_domain::{Config, DiscoveryConfig, DiscoveryError, Packet};
use tokio::sync::Notify;
use tracing::{debug, info, warn};

use crate::ports::{Datagram, PacketTransport};
use crate::services::{PacketBus, PacketSubscription, RecordStore, Responder};

/// The engine object: owns the record store, the listener registry, and the
/// transport handle. Constructed once per process and shared by `Arc`; there
/// are no ambient singletons.
pub struct DiscoveryEngine {
    store: Arc<RecordStore>,
    bus: PacketBus,
    transport: Arc<dyn PacketTransport>,
    responder: Responder,
    discovery: DiscoveryConfig,
    group: SocketAddr,
    shutdown: Notify,
    stopped: AtomicBool,
}

impl DiscoveryEngine {
    pub fn new(transport: Arc<dyn PacketTransport>, config: &Config) -> Arc<Self> {
        let store = Arc::new(RecordStore::new());
        let group = SocketAddr::from((config.server.multicast_group, config.server.port));
        let responder = Responder::new(store.clone(), transport.clone(), group);
        Arc::new(Self {
            store,
            bus: PacketBus::new(),
            transport,
            responder,
            discovery: config.discovery.clone(),
            group,
            shutdown: Notify::new(),
            stopped: AtomicBool::new(false),
        })
    }

    pub fn store(&self) -> &Arc<RecordStore> {
        &self.store
    }

    pub fn discovery(&self) -> &DiscoveryConfig {
        &self.discovery
    }

    pub fn multicast_addr(&self) -> SocketAddr {
        self.group
    }

    /// Attach a listener that will see every inbound packet until dropped.
    pub fn subscribe(&self) -> PacketSubscription {
        self.bus.subscribe()
    }

    /// Live listener count; operations must return this to its prior value
    /// on every exit path.
    pub fn listener_count(&self) -> usize {
        self.bus.subscriber_count()
    }

    /// Encode and send a packet, to the multicast group unless a unicast
    /// target is given.
    pub async fn send_packet(
        &self,
        packet: &Packet,
        target: Option<SocketAddr>,
    ) -> Result<(), DiscoveryError> {
        let bytes = packet.encode()?;
        self.transport
            .send(&bytes, target.unwrap_or(self.group))
            .await
    }

    /// Inbound dispatch loop: decode each datagram, hand it to every live
    /// listener, and answer it if it is a query. Runs until [`shutdown`].
    ///
    /// A transport receive failure is fatal; the engine cannot operate
    /// without its socket.
    ///
    /// [`shutdown`]: DiscoveryEngine::shutdown
    pub async fn run(&self) -> Result<(), DiscoveryError> {
        info!(group = %self.group, "discovery engine running");
        while !self.stopped.load(Ordering::Relaxed) {
            tokio::select! {
                _ = self.shutdown.notified() => break,
                received = self.transport.recv() => {
                    self.handle_datagram(received?).await;
                }
            }
        }
        info!("discovery engine stopped");
        Ok(())
    }

    async fn handle_datagram(&self, datagram: Datagram) {
        let packet = match Packet::decode(&datagram.data) {
            Ok(packet) => packet,
            Err(error) => {
                debug!(%error, source = %datagram.source, "dropping undecodable datagram");
                return;
            }
        };
        let packet = Arc::new(packet);
        self.bus.publish(packet.clone());

        if packet.is_query {
            if let Err(error) = self.responder.handle_query(&packet, datagram.source).await {
                warn!(%error, source = %datagram.source, "failed to answer query");
            }
        }
    }

    /// Clear the authoritative records and stop the dispatch loop.
    pub fn shutdown(&self) {
        self.store.clear();
        self.stopped.store(true, Ordering::Relaxed);
        self.shutdown.notify_waiters();
    }
}
