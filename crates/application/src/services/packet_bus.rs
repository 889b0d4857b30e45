use std::sync::Arc;

use semcache_mdns_domain::Packet;
use tokio::sync::broadcast;
use tracing::warn;

/// Buffered packets per subscription before the slowest listener starts
/// losing packets.
const BUS_CAPACITY: usize = 64;

/// Fan-out of every decoded inbound packet to the in-flight operations.
///
/// Each probe or query holds a [`PacketSubscription`] for as long as it is
/// interested; dropping the subscription is the deregistration, so every
/// exit path (success, conflict, timeout) cleans up deterministically.
#[derive(Debug)]
pub struct PacketBus {
    tx: broadcast::Sender<Arc<Packet>>,
}

impl PacketBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BUS_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> PacketSubscription {
        PacketSubscription {
            rx: self.tx.subscribe(),
        }
    }

    pub fn publish(&self, packet: Arc<Packet>) {
        // No live subscriptions is normal; the send result is irrelevant.
        let _ = self.tx.send(packet);
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for PacketBus {
    fn default() -> Self {
        Self::new()
    }
}

/// A live listener registration. Receives every packet published while it
/// exists; the owner filters for relevance.
pub struct PacketSubscription {
    rx: broadcast::Receiver<Arc<Packet>>,
}

impl PacketSubscription {
    /// Next inbound packet, or `None` once the bus is gone.
    pub async fn recv(&mut self) -> Option<Arc<Packet>> {
        loop {
            match self.rx.recv().await {
                Ok(packet) => return Some(packet),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "listener lagged behind the packet bus");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
