//! 业务逻辑服务层

mod in_flight;
mod mutation_controller;
mod zone_service;

pub use mutation_controller::MutationController;
pub use zone_service::ZoneService;

use std::sync::Arc;

use cf_dns_edit_provider::RecordStore;

use crate::cache::RecordCache;
use crate::validator::ValidationRules;

use in_flight::InFlightRegistry;

/// 服务上下文 - 持有所有依赖
///
/// Shared by every controller of the process: one remote store, one record
/// cache, and one in-flight registry, so two edit screens cannot submit the
/// same record at once.
pub struct ControllerContext {
    /// 远程记录存储
    pub store: Arc<dyn RecordStore>,
    /// 已提交记录缓存
    pub cache: Arc<RecordCache>,
    /// 校验规则
    pub rules: ValidationRules,
    in_flight: InFlightRegistry,
}

impl ControllerContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            cache: Arc::new(RecordCache::new()),
            rules: ValidationRules::default(),
            in_flight: InFlightRegistry::default(),
        }
    }

    #[must_use]
    pub fn with_rules(mut self, rules: ValidationRules) -> Self {
        self.rules = rules;
        self
    }

    /// Whether a remote call for `record_id` is in progress.
    pub fn is_in_flight(&self, record_id: &str) -> bool {
        self.in_flight.contains(record_id)
    }
}
