//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use cf_dns_edit_provider::{
    DnsRecord, ProviderError, RecordPayload, RecordStore, RecordType, Result, Ttl, Zone,
    ZoneStatus,
};
use chrono::Utc;
use tokio::sync::{Notify, RwLock};

use crate::services::{ControllerContext, MutationController};

pub const ZONE_ID: &str = "zone-1";

// ===== MockRecordStore =====

pub struct MockRecordStore {
    token_active: AtomicBool,
    zones: Vec<Zone>,
    records: RwLock<Vec<DnsRecord>>,
    next_id: AtomicUsize,
    /// 如果 Some，下一次调用返回此错误
    fail_next: RwLock<Option<ProviderError>>,
    /// 如果 Some，下一次写操作等待通知后再执行
    hold: RwLock<Option<Arc<Notify>>>,
    pub list_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
}

impl MockRecordStore {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<DnsRecord>) -> Self {
        Self {
            token_active: AtomicBool::new(true),
            zones: vec![test_zone()],
            records: RwLock::new(records),
            next_id: AtomicUsize::new(1),
            fail_next: RwLock::new(None),
            hold: RwLock::new(None),
            list_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
        }
    }

    pub async fn set_token_active(&self, active: bool) {
        self.token_active.store(active, Ordering::SeqCst);
    }

    pub async fn set_records(&self, records: Vec<DnsRecord>) {
        *self.records.write().await = records;
    }

    pub async fn fail_next(&self, err: ProviderError) {
        *self.fail_next.write().await = Some(err);
    }

    /// The next write blocks until the returned handle is notified.
    pub async fn hold(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.hold.write().await = Some(notify.clone());
        notify
    }

    /// Create, update and delete calls so far.
    pub fn mutation_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
            + self.update_calls.load(Ordering::SeqCst)
            + self.delete_calls.load(Ordering::SeqCst)
    }

    async fn take_failure(&self) -> Result<()> {
        match self.fail_next.write().await.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn wait_for_release(&self) {
        let hold = self.hold.write().await.take();
        if let Some(notify) = hold {
            notify.notified().await;
        }
    }

    fn not_found(record_id: &str) -> ProviderError {
        ProviderError::RecordNotFound {
            provider: "mock".to_string(),
            record_id: record_id.to_string(),
            raw_message: None,
        }
    }
}

fn apply(record: &mut DnsRecord, payload: &RecordPayload) {
    record.name.clone_from(&payload.name);
    record.record_type = payload.record_type;
    record.content.clone_from(&payload.content);
    record.ttl = payload.ttl;
    record.proxied = payload.proxied;
    record.priority = payload.priority;
    record.comment.clone_from(&payload.comment);
    record.updated_at = Utc::now();
}

#[async_trait]
impl RecordStore for MockRecordStore {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn verify_token(&self) -> Result<bool> {
        self.take_failure().await?;
        Ok(self.token_active.load(Ordering::SeqCst))
    }

    async fn list_zones(&self) -> Result<Vec<Zone>> {
        self.take_failure().await?;
        Ok(self.zones.clone())
    }

    async fn list_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.take_failure().await?;
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|r| r.zone_id == zone_id)
            .cloned()
            .collect())
    }

    async fn create_record(&self, zone_id: &str, payload: &RecordPayload) -> Result<DnsRecord> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.wait_for_release().await;
        self.take_failure().await?;

        let id = format!("mock-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let mut record = test_record(&id, "", "", false);
        record.zone_id = zone_id.to_string();
        apply(&mut record, payload);
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        payload: &RecordPayload,
    ) -> Result<DnsRecord> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.wait_for_release().await;
        self.take_failure().await?;

        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id == record_id && r.zone_id == zone_id)
            .ok_or_else(|| Self::not_found(record_id))?;
        apply(record, payload);
        Ok(record.clone())
    }

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.wait_for_release().await;
        self.take_failure().await?;

        let mut records = self.records.write().await;
        let index = records
            .iter()
            .position(|r| r.id == record_id && r.zone_id == zone_id)
            .ok_or_else(|| Self::not_found(record_id))?;
        records.remove(index);
        Ok(())
    }
}

// ===== 工厂方法 =====

pub fn test_zone() -> Zone {
    Zone {
        id: ZONE_ID.to_string(),
        name: "example.com".to_string(),
        status: ZoneStatus::Active,
    }
}

/// A record in the test zone.
pub fn test_record(id: &str, name: &str, content: &str, proxied: bool) -> DnsRecord {
    DnsRecord {
        id: id.to_string(),
        zone_id: ZONE_ID.to_string(),
        name: name.to_string(),
        record_type: RecordType::A,
        content: content.to_string(),
        ttl: Ttl::Auto,
        proxied,
        priority: None,
        comment: None,
        created_at: None,
        updated_at: Utc::now(),
    }
}

pub fn create_test_context(
    store: MockRecordStore,
) -> (Arc<ControllerContext>, Arc<MockRecordStore>) {
    let store = Arc::new(store);
    let ctx = Arc::new(ControllerContext::new(store.clone()));
    (ctx, store)
}

/// Controller for the test zone with `records` already loaded into the cache.
pub async fn create_test_controller(
    records: Vec<DnsRecord>,
) -> (MutationController, Arc<MockRecordStore>) {
    let (ctx, store) = create_test_context(MockRecordStore::with_records(records));
    let controller = MutationController::new(ctx, &test_zone());
    controller.refresh().await.unwrap();
    (controller, store)
}
