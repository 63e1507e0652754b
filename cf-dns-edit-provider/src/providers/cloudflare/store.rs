//! Cloudflare RecordStore trait 实现

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::providers::common::{full_name_to_relative, pluralize, relative_to_full_name};
use crate::traits::{ErrorContext, ProviderErrorMapper, RecordStore};
use crate::types::{DnsRecord, RecordPayload, RecordType, Ttl, Zone, ZoneStatus};

use super::types::{CloudflareDeleted, CloudflareRecordBody, CloudflareTokenStatus};
use super::{
    CloudflareDnsRecord, CloudflareStore, CloudflareZone, MAX_PAGE_SIZE_RECORDS,
    MAX_PAGE_SIZE_ZONES, PROVIDER_NAME,
};

impl CloudflareStore {
    /// Cloudflare 状态：active, pending, initializing, moved, deactivated
    pub(crate) fn zone_from_cf(zone: CloudflareZone) -> Zone {
        let status = match zone.status.as_str() {
            "active" => ZoneStatus::Active,
            "pending" | "initializing" => ZoneStatus::Pending,
            "moved" | "deactivated" => ZoneStatus::Paused,
            _ => ZoneStatus::Unknown,
        };

        Zone {
            id: zone.id,
            name: zone.name,
            status,
        }
    }

    /// 将 Cloudflare 记录转换为 `DnsRecord`；不支持的类型返回 `None`
    pub(crate) fn record_from_cf(
        cf_record: CloudflareDnsRecord,
        zone_id: &str,
        zone_name: &str,
    ) -> Option<DnsRecord> {
        let Ok(record_type) = cf_record.record_type.parse::<RecordType>() else {
            log::debug!(
                "[{PROVIDER_NAME}] Skipping {} record {} ({})",
                cf_record.record_type,
                cf_record.name,
                cf_record.id
            );
            return None;
        };

        Some(DnsRecord {
            id: cf_record.id,
            zone_id: zone_id.to_string(),
            name: full_name_to_relative(&cf_record.name, zone_name),
            record_type,
            content: cf_record.content,
            ttl: Ttl::from_wire(cf_record.ttl),
            proxied: cf_record.proxied,
            priority: cf_record.priority,
            comment: cf_record.comment.filter(|c| !c.is_empty()),
            created_at: cf_record.created_on,
            updated_at: cf_record.modified_on,
        })
    }

    fn record_body<'a>(payload: &'a RecordPayload, zone_name: &str) -> CloudflareRecordBody<'a> {
        CloudflareRecordBody {
            record_type: payload.record_type.as_str(),
            name: relative_to_full_name(&payload.name, zone_name),
            content: &payload.content,
            ttl: payload.ttl.to_wire(),
            proxied: payload
                .record_type
                .is_proxiable()
                .then_some(payload.proxied),
            priority: if payload.record_type.has_priority() {
                payload.priority
            } else {
                None
            },
            comment: payload.comment.as_deref().filter(|c| !c.is_empty()),
        }
    }

    fn record_response(
        &self,
        cf_record: CloudflareDnsRecord,
        zone_id: &str,
        zone_name: &str,
    ) -> Result<DnsRecord> {
        let record_type = cf_record.record_type.clone();
        Self::record_from_cf(cf_record, zone_id, zone_name)
            .ok_or_else(|| self.parse_error(format!("unexpected record type {record_type}")))
    }
}

#[async_trait]
impl RecordStore for CloudflareStore {
    fn id(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn verify_token(&self) -> Result<bool> {
        match self
            .get::<CloudflareTokenStatus>("/user/tokens/verify", ErrorContext::default())
            .await
        {
            Ok(token) => {
                log::info!("[{PROVIDER_NAME}] Token status: {}", token.status);
                Ok(token.status == "active")
            }
            Err(ProviderError::InvalidCredentials { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn list_zones(&self) -> Result<Vec<Zone>> {
        let zones: Vec<CloudflareZone> = self
            .get_all("/zones", MAX_PAGE_SIZE_ZONES, ErrorContext::default())
            .await?;

        for zone in &zones {
            self.remember_zone(&zone.id, &zone.name).await;
        }

        let zones: Vec<Zone> = zones.into_iter().map(Self::zone_from_cf).collect();
        log::info!(
            "[{PROVIDER_NAME}] Found {}",
            pluralize(zones.len(), "zone")
        );
        Ok(zones)
    }

    async fn list_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>> {
        let zone_name = self.zone_name(zone_id).await?;

        let cf_records: Vec<CloudflareDnsRecord> = self
            .get_all(
                &format!("/zones/{zone_id}/dns_records"),
                MAX_PAGE_SIZE_RECORDS,
                ErrorContext::zone(zone_id),
            )
            .await?;

        let records: Vec<DnsRecord> = cf_records
            .into_iter()
            .filter_map(|r| Self::record_from_cf(r, zone_id, &zone_name))
            .collect();

        log::info!(
            "[{PROVIDER_NAME}] Found {} in {zone_name}",
            pluralize(records.len(), "DNS record")
        );
        Ok(records)
    }

    async fn create_record(&self, zone_id: &str, payload: &RecordPayload) -> Result<DnsRecord> {
        let zone_name = self.zone_name(zone_id).await?;
        let body = Self::record_body(payload, &zone_name);

        let cf_record: CloudflareDnsRecord = self
            .post(
                &format!("/zones/{zone_id}/dns_records"),
                &body,
                ErrorContext::record(zone_id, None, Some(&payload.name)),
            )
            .await?;

        let record = self.record_response(cf_record, zone_id, &zone_name)?;
        log::info!(
            "[{PROVIDER_NAME}] Created {} record {} ({})",
            record.record_type,
            record.name,
            record.id
        );
        Ok(record)
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        payload: &RecordPayload,
    ) -> Result<DnsRecord> {
        let zone_name = self.zone_name(zone_id).await?;
        let body = Self::record_body(payload, &zone_name);

        let cf_record: CloudflareDnsRecord = self
            .patch(
                &format!("/zones/{zone_id}/dns_records/{record_id}"),
                &body,
                ErrorContext::record(zone_id, Some(record_id), Some(&payload.name)),
            )
            .await?;

        let record = self.record_response(cf_record, zone_id, &zone_name)?;
        log::info!(
            "[{PROVIDER_NAME}] Updated {} record {} ({})",
            record.record_type,
            record.name,
            record.id
        );
        Ok(record)
    }

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()> {
        let deleted: CloudflareDeleted = self
            .delete(
                &format!("/zones/{zone_id}/dns_records/{record_id}"),
                ErrorContext::record(zone_id, Some(record_id), None),
            )
            .await?;
        log::info!("[{PROVIDER_NAME}] Deleted record {}", deleted.id);
        Ok(())
    }
}
