use std::net::SocketAddr;
use std::sync::Arc;

use semcache_mdns_domain::{DiscoveryError, Packet};
use tracing::debug;

use super::RecordStore;
use crate::ports::PacketTransport;

/// Answers inbound queries from the authoritative record store.
pub struct Responder {
    store: Arc<RecordStore>,
    transport: Arc<dyn PacketTransport>,
    group: SocketAddr,
}

impl Responder {
    pub fn new(
        store: Arc<RecordStore>,
        transport: Arc<dyn PacketTransport>,
        group: SocketAddr,
    ) -> Self {
        Self {
            store,
            transport,
            group,
        }
    }

    /// Process each question of a query independently: one response packet
    /// per question, carrying only the records answering it. Questions with
    /// no matching records produce no response at all.
    ///
    /// Replies go to the multicast group unless the question requested a
    /// unicast response, in which case they go back to the requester.
    /// Multicast responses carry id 0; unicast responses echo the query id.
    pub async fn handle_query(
        &self,
        query: &Packet,
        source: SocketAddr,
    ) -> Result<(), DiscoveryError> {
        for question in &query.questions {
            let records =
                self.store
                    .records_for_query(&question.name, question.qtype, question.qclass);
            if records.is_empty() {
                continue;
            }

            let mut response = Packet::response(if question.unicast_response {
                query.id
            } else {
                0
            });
            response.answers = records;

            let target = if question.unicast_response {
                source
            } else {
                self.group
            };
            debug!(
                name = %question.name,
                qtype = %question.qtype,
                answers = response.answers.len(),
                %target,
                "answering query"
            );
            let bytes = response.encode()?;
            self.transport.send(&bytes, target).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use semcache_mdns_domain::{Question, RecordClass, RecordType, ResourceRecord};
    use std::net::Ipv4Addr;
    use std::sync::Mutex;

    use crate::ports::Datagram;

    /// Captures sent datagrams instead of touching a socket.
    #[derive(Default)]
    struct CaptureTransport {
        sent: Mutex<Vec<(Vec<u8>, SocketAddr)>>,
    }

    #[async_trait]
    impl PacketTransport for CaptureTransport {
        async fn send(&self, payload: &[u8], target: SocketAddr) -> Result<(), DiscoveryError> {
            self.sent
                .lock()
                .unwrap()
                .push((payload.to_vec(), target));
            Ok(())
        }

        async fn recv(&self) -> Result<Datagram, DiscoveryError> {
            std::future::pending().await
        }
    }

    fn group_addr() -> SocketAddr {
        "224.0.0.251:53531".parse().unwrap()
    }

    fn responder_with_a_record() -> (Responder, Arc<CaptureTransport>) {
        let store = Arc::new(RecordStore::new());
        store.add_record(ResourceRecord::A {
            name: "host.local".into(),
            class: RecordClass::IN,
            ttl: 120,
            addr: Ipv4Addr::new(10, 0, 0, 5),
        });
        let transport = Arc::new(CaptureTransport::default());
        let responder = Responder::new(store, transport.clone(), group_addr());
        (responder, transport)
    }

    #[tokio::test]
    async fn multicast_reply_by_default() {
        let (responder, transport) = responder_with_a_record();
        let mut query = Packet::query(0x77);
        query
            .questions
            .push(Question::new("host.local".into(), RecordType::A, RecordClass::IN));

        let source: SocketAddr = "10.0.0.9:40000".parse().unwrap();
        responder.handle_query(&query, source).await.unwrap();

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1, group_addr());
        let response = Packet::decode(&sent[0].0).unwrap();
        assert!(!response.is_query);
        assert_eq!(response.id, 0);
        assert_eq!(response.answers.len(), 1);
    }

    #[tokio::test]
    async fn unicast_reply_when_requested() {
        let (responder, transport) = responder_with_a_record();
        let mut query = Packet::query(0x77);
        let mut question = Question::new("host.local".into(), RecordType::A, RecordClass::IN);
        question.unicast_response = true;
        query.questions.push(question);

        let source: SocketAddr = "10.0.0.9:40000".parse().unwrap();
        responder.handle_query(&query, source).await.unwrap();

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent[0].1, source);
        let response = Packet::decode(&sent[0].0).unwrap();
        assert_eq!(response.id, 0x77);
    }

    #[tokio::test]
    async fn unanswerable_question_sends_nothing() {
        let (responder, transport) = responder_with_a_record();
        let mut query = Packet::query(1);
        query
            .questions
            .push(Question::new("other.local".into(), RecordType::A, RecordClass::IN));

        let source: SocketAddr = "10.0.0.9:40000".parse().unwrap();
        responder.handle_query(&query, source).await.unwrap();
        assert!(transport.sent.lock().unwrap().is_empty());
    }
}
