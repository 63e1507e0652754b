//! Cloudflare v4 record store

mod error;
mod http;
mod store;
mod types;

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::{ProviderError, Result};
use crate::providers::common::create_http_client;
use crate::traits::ErrorContext;
use crate::types::CredentialValidationError;
use crate::utils::log_sanitizer::redact_token;

pub(crate) use types::{CloudflareDnsRecord, CloudflareResponse, CloudflareZone};

pub(crate) const PROVIDER_NAME: &str = "cloudflare";
pub(crate) const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";
/// Cloudflare Zones API 单页最大记录数
pub(crate) const MAX_PAGE_SIZE_ZONES: u32 = 50;
/// Cloudflare DNS Records API 单页最大记录数
pub(crate) const MAX_PAGE_SIZE_RECORDS: u32 = 100;

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connection settings for [`CloudflareStore`].
///
/// Deserializable so the embedding application can load it from whatever
/// file or environment it uses; unset fields take their defaults.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudflareConfig {
    /// API token with `Zone.Zone:Read`, `Zone.DNS:Read` and `Zone.DNS:Edit`.
    pub api_token: String,
    /// API root, without a trailing slash.
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for CloudflareConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            base_url: CF_API_BASE.to_string(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl fmt::Debug for CloudflareConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudflareConfig")
            .field("api_token", &redact_token(&self.api_token))
            .field("base_url", &self.base_url)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl CloudflareConfig {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            ..Self::default()
        }
    }

    /// Point the store at another API root (tests, proxies).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Reject a blank token before any request is made.
    pub fn validate(&self) -> std::result::Result<(), CredentialValidationError> {
        if self.api_token.trim().is_empty() {
            return Err(CredentialValidationError::EmptyToken);
        }
        Ok(())
    }
}

/// Cloudflare record store
pub struct CloudflareStore {
    pub(crate) client: Client,
    pub(crate) api_token: String,
    pub(crate) base_url: String,
    /// zone id -> apex name, filled by `list_zones` and on demand
    zone_names: RwLock<HashMap<String, String>>,
}

impl CloudflareStore {
    pub fn new(config: CloudflareConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| ProviderError::InvalidCredentials {
                provider: PROVIDER_NAME.to_string(),
                raw_message: Some(e.to_string()),
            })?;

        let client = create_http_client(
            PROVIDER_NAME,
            Duration::from_secs(config.connect_timeout_secs),
            Duration::from_secs(config.request_timeout_secs),
        )?;

        log::debug!("Creating Cloudflare store: {config:?}");

        Ok(Self {
            client,
            api_token: config.api_token,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            zone_names: RwLock::new(HashMap::new()),
        })
    }

    /// Apex name for a zone id, fetched once per zone.
    pub(crate) async fn zone_name(&self, zone_id: &str) -> Result<String> {
        if let Some(name) = self.zone_names.read().await.get(zone_id) {
            return Ok(name.clone());
        }

        let zone: CloudflareZone = self
            .get(&format!("/zones/{zone_id}"), ErrorContext::zone(zone_id))
            .await?;
        self.remember_zone(&zone.id, &zone.name).await;
        Ok(zone.name)
    }

    pub(crate) async fn remember_zone(&self, zone_id: &str, zone_name: &str) {
        self.zone_names
            .write()
            .await
            .insert(zone_id.to_string(), zone_name.to_string());
    }
}
