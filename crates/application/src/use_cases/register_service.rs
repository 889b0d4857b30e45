use std::sync::Arc;
use std::time::Duration;

use semcache_mdns_domain::{
    DiscoveryError, DomainName, Packet, Question, RecordClass, RecordType, ResourceRecord,
};
use tracing::{debug, info, warn};

use crate::engine::DiscoveryEngine;
use crate::ports::InterfaceProvider;

/// The claim produced by a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Full service instance name, `<friendly>.<type>.local`.
    pub service_name: String,
    /// Host domain the instance points at.
    pub domain: String,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProbeOutcome {
    Claimed,
    Conflicted,
}

/// Probe-then-claim registration.
///
/// Both the host name and the service instance name are probed for existing
/// holders before any record is created; a defending answer during either
/// probe aborts the whole registration with a name conflict.
pub struct RegisterServiceUseCase {
    engine: Arc<DiscoveryEngine>,
    interfaces: Arc<dyn InterfaceProvider>,
}

impl RegisterServiceUseCase {
    pub fn new(engine: Arc<DiscoveryEngine>, interfaces: Arc<dyn InterfaceProvider>) -> Self {
        Self { engine, interfaces }
    }

    pub async fn execute(
        &self,
        host: &str,
        friendly_name: &str,
        service_type: &str,
        port: u16,
    ) -> Result<Registration, DiscoveryError> {
        let host_name: DomainName = host.into();
        let instance_name: DomainName =
            format!("{friendly_name}.{service_type}.local").as_str().into();
        let type_name: DomainName = format!("{service_type}.local").as_str().into();

        if self.probe(&host_name).await? == ProbeOutcome::Conflicted {
            warn!(name = %host_name, "host name is already claimed");
            return Err(DiscoveryError::NameConflict(host_name.to_string()));
        }
        if self.probe(&instance_name).await? == ProbeOutcome::Conflicted {
            warn!(name = %instance_name, "instance name is already claimed");
            return Err(DiscoveryError::NameConflict(instance_name.to_string()));
        }

        let records = self.build_records(&host_name, &instance_name, &type_name, port);
        for record in &records {
            self.engine.store().add_record(record.clone());
        }
        self.announce(&records).await?;

        info!(
            instance = %instance_name,
            host = %host_name,
            port,
            records = records.len(),
            "service registered"
        );
        Ok(Registration {
            service_name: instance_name.to_string(),
            domain: host_name.to_string(),
            port,
        })
    }

    /// One probe cycle for `name`: up to `probe_rounds` rounds of
    /// jitter-delay, ANY-query, then listen. Any response carrying a record
    /// for the name means someone already holds it; all rounds passing
    /// silently means the name is ours.
    async fn probe(&self, name: &DomainName) -> Result<ProbeOutcome, DiscoveryError> {
        let config = self.engine.discovery();
        for round in 1..=config.probe_rounds {
            let jitter = fastrand::u64(0..=config.probe_jitter_ms);
            tokio::time::sleep(Duration::from_millis(jitter)).await;

            // Subscribe before sending so a fast defender cannot be missed.
            let mut subscription = self.engine.subscribe();

            let mut query = Packet::query(0);
            query
                .questions
                .push(Question::new(name.clone(), RecordType::ANY, RecordClass::IN));
            self.engine.send_packet(&query, None).await?;
            debug!(%name, round, "probe sent");

            let window = Duration::from_millis(config.probe_timeout_ms);
            let defended = tokio::time::timeout(window, async {
                while let Some(packet) = subscription.recv().await {
                    if packet.is_query {
                        continue;
                    }
                    if packet.answers.iter().any(|r| r.name() == name) {
                        return true;
                    }
                }
                false
            })
            .await
            .unwrap_or(false);

            if defended {
                debug!(%name, round, "probe answered, name is taken");
                return Ok(ProbeOutcome::Conflicted);
            }
        }
        Ok(ProbeOutcome::Claimed)
    }

    fn build_records(
        &self,
        host_name: &DomainName,
        instance_name: &DomainName,
        type_name: &DomainName,
        port: u16,
    ) -> Vec<ResourceRecord> {
        let ttl = self.engine.discovery().default_ttl_secs;
        let mut records: Vec<ResourceRecord> = self
            .interfaces
            .ipv4_addresses()
            .into_iter()
            .map(|addr| ResourceRecord::A {
                name: host_name.clone(),
                class: RecordClass::IN,
                ttl,
                addr,
            })
            .collect();
        records.push(ResourceRecord::Srv {
            name: instance_name.clone(),
            class: RecordClass::IN,
            ttl,
            priority: 0,
            weight: 0,
            port,
            target: host_name.clone(),
        });
        records.push(ResourceRecord::Ptr {
            name: type_name.clone(),
            class: RecordClass::IN,
            ttl,
            target: instance_name.clone(),
        });
        records
    }

    /// Two back-to-back unsolicited multicast announcements carrying every
    /// newly created record. There is no later TTL-refresh cycle.
    async fn announce(&self, records: &[ResourceRecord]) -> Result<(), DiscoveryError> {
        let mut announcement = Packet::response(0);
        announcement.answers = records.to_vec();
        self.engine.send_packet(&announcement, None).await?;
        self.engine.send_packet(&announcement, None).await?;
        Ok(())
    }
}
