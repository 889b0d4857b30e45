use std::time::Duration;

use semcache_mdns_domain::{
    DiscoveryError, DomainName, Packet, Question, RecordClass, RecordType, ResourceRecord,
};

use crate::engine::DiscoveryEngine;

/// Multicast one question and wait for the first answer record matching it,
/// or `None` on timeout. Absence of an answer is not an error.
///
/// The subscription is taken before the query is sent, so an answer cannot
/// slip through the gap; it is dropped (deregistered) on every path out.
pub(crate) async fn query_first_match(
    engine: &DiscoveryEngine,
    name: &DomainName,
    qtype: RecordType,
) -> Result<Option<ResourceRecord>, DiscoveryError> {
    let mut subscription = engine.subscribe();

    let mut query = Packet::query(0);
    query
        .questions
        .push(Question::new(name.clone(), qtype, RecordClass::IN));
    engine.send_packet(&query, None).await?;

    let window = Duration::from_millis(engine.discovery().query_timeout_ms);
    let found = tokio::time::timeout(window, async {
        while let Some(packet) = subscription.recv().await {
            if packet.is_query {
                continue;
            }
            if let Some(record) = packet
                .answers
                .iter()
                .find(|r| r.name() == name && r.record_type() == qtype)
            {
                return Some(record.clone());
            }
        }
        None
    })
    .await
    .unwrap_or(None);

    Ok(found)
}
