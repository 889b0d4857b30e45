use std::collections::HashMap;
use std::sync::RwLock;

use semcache_mdns_domain::{
    DomainName, RecordClass, RecordType, ResourceRecord, SERVICE_ENUMERATION_NAME,
};

/// The records this host is authoritative for, keyed by name.
///
/// Mutated only by the registration path; readers get cloned record sets.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: RwLock<HashMap<DomainName, Vec<ResourceRecord>>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_record(&self, record: ResourceRecord) {
        let mut guard = self.records.write().expect("record store poisoned");
        guard
            .entry(record.name().clone())
            .or_default()
            .push(record);
    }

    /// Records answering `(name, qtype, qclass)`.
    ///
    /// The reserved service-enumeration name matches every PTR record in the
    /// store regardless of its name (RFC 6763 §9); otherwise the name must
    /// match exactly. Type and class match exactly or via ANY.
    pub fn records_for_query(
        &self,
        name: &DomainName,
        qtype: RecordType,
        qclass: RecordClass,
    ) -> Vec<ResourceRecord> {
        let guard = self.records.read().expect("record store poisoned");

        if name.to_string() == SERVICE_ENUMERATION_NAME {
            // The reserved name satisfies only the name criterion; type and
            // class still have to match exactly or via ANY.
            return guard
                .values()
                .flatten()
                .filter(|r| {
                    r.record_type() == RecordType::PTR
                        && r.record_type().answers(qtype)
                        && r.class().answers(qclass)
                })
                .cloned()
                .collect();
        }

        guard
            .get(name)
            .map(|records| {
                records
                    .iter()
                    .filter(|r| {
                        r.record_type().answers(qtype) && r.class().answers(qclass)
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        let guard = self.records.read().expect("record store poisoned");
        guard.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.records.write().expect("record store poisoned").clear();
    }
}
