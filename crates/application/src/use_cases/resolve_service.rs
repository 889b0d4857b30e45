use std::net::Ipv4Addr;
use std::sync::Arc;

use semcache_mdns_domain::{DiscoveryError, DomainName, RecordType, ResourceRecord};

use super::query::query_first_match;
use crate::engine::DiscoveryEngine;

/// Where a single service instance can be reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedService {
    pub domain: String,
    pub ip: Ipv4Addr,
    pub port: u16,
}

/// SRV-then-A resolution of one full instance name. Unlike a browse, an
/// unresolvable instance here is an error, not an empty result.
pub struct ResolveServiceUseCase {
    engine: Arc<DiscoveryEngine>,
}

impl ResolveServiceUseCase {
    pub fn new(engine: Arc<DiscoveryEngine>) -> Self {
        Self { engine }
    }

    pub async fn execute(&self, full_instance_name: &str) -> Result<ResolvedService, DiscoveryError> {
        let instance: DomainName = full_instance_name.into();

        let srv = query_first_match(&self.engine, &instance, RecordType::SRV)
            .await?
            .ok_or_else(|| DiscoveryError::NotFound(full_instance_name.to_string()))?;
        let (port, host) = match srv {
            ResourceRecord::Srv { port, target, .. } => (port, target),
            _ => return Err(DiscoveryError::NotFound(full_instance_name.to_string())),
        };

        let a = query_first_match(&self.engine, &host, RecordType::A)
            .await?
            .ok_or_else(|| DiscoveryError::NotFound(host.to_string()))?;
        let ip = match a {
            ResourceRecord::A { addr, .. } => addr,
            _ => return Err(DiscoveryError::NotFound(host.to_string())),
        };

        Ok(ResolvedService {
            domain: host.to_string(),
            ip,
            port,
        })
    }
}
