use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use semcache_mdns_domain::{
    DiscoveryError, DomainName, Packet, Question, RecordClass, RecordType, ResourceRecord,
};
use tokio::time::Instant;
use tracing::debug;

use super::query::query_first_match;
use crate::engine::DiscoveryEngine;

/// One fully resolved service instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredService {
    pub service_type: String,
    /// Friendly instance label, e.g. `Cache1`.
    pub instance_name: String,
    /// Host domain, e.g. `node1.local`.
    pub domain: String,
    pub ip: Ipv4Addr,
    pub port: u16,
}

/// Three-stage browse: PTR enumerates instances, then SRV and A resolve each
/// one concurrently. Only instances completing all three stages are
/// reported; the rest are dropped silently.
pub struct BrowseServicesUseCase {
    engine: Arc<DiscoveryEngine>,
}

impl BrowseServicesUseCase {
    pub fn new(engine: Arc<DiscoveryEngine>) -> Self {
        Self { engine }
    }

    pub async fn execute(
        &self,
        service_type: &str,
    ) -> Result<Vec<DiscoveredService>, DiscoveryError> {
        let instances = self.collect_instances(service_type).await?;
        debug!(
            service_type,
            instances = instances.len(),
            "browse window closed"
        );

        // Stage 2 and 3 for every instance run concurrently; the browse only
        // completes once all sub-queries have settled.
        let resolutions = join_all(
            instances
                .iter()
                .map(|instance| self.resolve_instance(service_type, instance)),
        )
        .await;
        Ok(resolutions.into_iter().flatten().collect())
    }

    /// Stage 1: collect the distinct targets of matching PTR answers for the
    /// whole browse window. Zero instances is a valid outcome.
    async fn collect_instances(
        &self,
        service_type: &str,
    ) -> Result<Vec<DomainName>, DiscoveryError> {
        let type_name: DomainName = format!("{service_type}.local").as_str().into();
        let mut subscription = self.engine.subscribe();

        let mut query = Packet::query(0);
        query
            .questions
            .push(Question::new(type_name.clone(), RecordType::PTR, RecordClass::IN));
        self.engine.send_packet(&query, None).await?;

        let deadline =
            Instant::now() + Duration::from_millis(self.engine.discovery().browse_window_ms);
        let mut instances: Vec<DomainName> = Vec::new();

        loop {
            let packet = match tokio::time::timeout_at(deadline, subscription.recv()).await {
                Ok(Some(packet)) => packet,
                Ok(None) => break,
                Err(_) => break,
            };
            if packet.is_query {
                continue;
            }
            for record in &packet.answers {
                if let ResourceRecord::Ptr { name, target, .. } = record {
                    if *name == type_name && !instances.contains(target) {
                        debug!(instance = %target, "discovered instance");
                        instances.push(target.clone());
                    }
                }
            }
        }
        Ok(instances)
    }

    /// Stages 2 and 3 for one instance: SRV gives host and port, A gives the
    /// address. Either stage timing out drops the instance.
    async fn resolve_instance(
        &self,
        service_type: &str,
        instance: &DomainName,
    ) -> Option<DiscoveredService> {
        let srv = query_first_match(&self.engine, instance, RecordType::SRV)
            .await
            .ok()??;
        let (port, host) = match srv {
            ResourceRecord::Srv { port, target, .. } => (port, target),
            _ => return None,
        };

        let a = query_first_match(&self.engine, &host, RecordType::A)
            .await
            .ok()??;
        let ip = match a {
            ResourceRecord::A { addr, .. } => addr,
            _ => return None,
        };

        Some(DiscoveredService {
            service_type: service_type.to_string(),
            instance_name: instance.first_label().to_string(),
            domain: host.to_string(),
            ip,
            port,
        })
    }
}
