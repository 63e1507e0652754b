//! Committed record cache
//!
//! Last server-confirmed state of every loaded record, grouped by zone in
//! the order the store returned them. Only the mutation controller writes to
//! it, and only after the store confirmed the change.

use std::collections::HashMap;

use cf_dns_edit_provider::DnsRecord;
use tokio::sync::RwLock;

/// Process-wide record cache, shared through `Arc`.
#[derive(Debug, Default)]
pub struct RecordCache {
    zones: RwLock<HashMap<String, Vec<DnsRecord>>>,
}

impl RecordCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a record by id in any zone.
    pub async fn get(&self, id: &str) -> Option<DnsRecord> {
        self.zones
            .read()
            .await
            .values()
            .flatten()
            .find(|r| r.id == id)
            .cloned()
    }

    /// Records of a zone, in store order.
    pub async fn records(&self, zone_id: &str) -> Vec<DnsRecord> {
        self.zones
            .read()
            .await
            .get(zone_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Whether the zone has been loaded.
    pub async fn contains_zone(&self, zone_id: &str) -> bool {
        self.zones.read().await.contains_key(zone_id)
    }

    /// Number of cached records across all zones.
    pub async fn len(&self) -> usize {
        self.zones.read().await.values().map(Vec::len).sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Insert a record, replacing an existing one with the same id in place.
    pub(crate) async fn put(&self, record: DnsRecord) {
        let mut zones = self.zones.write().await;
        let records = zones.entry(record.zone_id.clone()).or_default();
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
    }

    /// Remove a record by id, returning it.
    pub(crate) async fn remove(&self, id: &str) -> Option<DnsRecord> {
        let mut zones = self.zones.write().await;
        zones.values_mut().find_map(|records| {
            records
                .iter()
                .position(|r| r.id == id)
                .map(|index| records.remove(index))
        })
    }

    /// Replace every record of a zone.
    pub(crate) async fn replace_zone(&self, zone_id: &str, records: Vec<DnsRecord>) {
        self.zones
            .write()
            .await
            .insert(zone_id.to_string(), records);
    }
}
