use async_trait::async_trait;

#[cfg(feature = "cloudflare")]
use crate::error::ProviderError;
use crate::error::Result;
use crate::types::{DnsRecord, RecordPayload, Zone};

/// 原始 API 错误（内部使用）
#[cfg(feature = "cloudflare")]
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// 错误码（Cloudflare 为数字字符串）
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
}

#[cfg(feature = "cloudflare")]
impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// 错误上下文：映射错误时补充记录名、记录 ID、Zone
#[cfg(feature = "cloudflare")]
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    pub record_name: Option<String>,
    pub record_id: Option<String>,
    pub zone: Option<String>,
}

#[cfg(feature = "cloudflare")]
impl ErrorContext {
    pub fn zone(zone_id: &str) -> Self {
        Self {
            zone: Some(zone_id.to_string()),
            ..Self::default()
        }
    }

    pub fn record(zone_id: &str, record_id: Option<&str>, record_name: Option<&str>) -> Self {
        Self {
            record_name: record_name.map(str::to_string),
            record_id: record_id.map(str::to_string),
            zone: Some(zone_id.to_string()),
        }
    }
}

/// 将原始 API 错误映射到统一错误类型（内部使用）
#[cfg(feature = "cloudflare")]
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// The authoritative remote record store.
///
/// Every method is a single logical remote call. Implementations never
/// retry; a failed call is reported once and the caller decides whether to
/// resubmit.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Store identifier, used as the `provider` field of errors and in logs.
    fn id(&self) -> &'static str;

    /// Check that the configured token is active.
    ///
    /// Returns `Ok(false)` for a token the API rejects, and `Err` only when
    /// the check itself could not be carried out.
    async fn verify_token(&self) -> Result<bool>;

    /// List all zones visible to the token.
    async fn list_zones(&self) -> Result<Vec<Zone>>;

    /// List every record of a zone, in the order the store returns them.
    async fn list_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>>;

    /// Create a record.
    async fn create_record(&self, zone_id: &str, payload: &RecordPayload) -> Result<DnsRecord>;

    /// Overwrite the writable fields of an existing record.
    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        payload: &RecordPayload,
    ) -> Result<DnsRecord>;

    /// Delete a record.
    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()>;
}
