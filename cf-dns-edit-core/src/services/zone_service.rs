//! Zone 管理服务

use std::sync::Arc;

use cf_dns_edit_provider::Zone;

use crate::error::{MutationError, MutationResult};
use crate::services::ControllerContext;
use crate::utils::display::pluralize;

/// Token check and zone listing for the zone picker.
pub struct ZoneService {
    ctx: Arc<ControllerContext>,
}

impl ZoneService {
    /// 创建 Zone 服务实例
    #[must_use]
    pub fn new(ctx: Arc<ControllerContext>) -> Self {
        Self { ctx }
    }

    /// Check the token before the zone list is shown.
    pub async fn verify_token(&self) -> MutationResult<bool> {
        let active = self
            .ctx
            .store
            .verify_token()
            .await
            .map_err(|e| log_remote("Token verification failed", e))?;
        if active {
            log::info!("[{}] Token verified", self.ctx.store.id());
        } else {
            log::warn!("[{}] Token is not active", self.ctx.store.id());
        }
        Ok(active)
    }

    /// 列出所有 Zone
    pub async fn list_zones(&self) -> MutationResult<Vec<Zone>> {
        log::info!("Loading zones...");
        let zones = self
            .ctx
            .store
            .list_zones()
            .await
            .map_err(|e| log_remote("Failed to load zones", e))?;

        if zones.is_empty() {
            log::info!("No zones found for this token");
        } else {
            log::info!("Found {}", pluralize(zones.len(), "zone"));
        }
        Ok(zones)
    }
}

fn log_remote(context: &str, e: cf_dns_edit_provider::ProviderError) -> MutationError {
    if e.is_expected() {
        log::warn!("{context}: {e}");
    } else {
        log::error!("{context}: {e}");
    }
    MutationError::RemoteError(e)
}
