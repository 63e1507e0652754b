//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;

use cf_dns_edit_provider::{CloudflareConfig, CloudflareStore, RecordStore};
use serde_json::{Value, json};
use wiremock::MockServer;

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("Skipping: environment variable {} is not set", $var);
                return;
            }
        )+
    };
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

pub const ZONE_ID: &str = "023e105f4ecef8ad9ca31a8372d0c353";
pub const ZONE_NAME: &str = "example.com";
pub const TOKEN: &str = "test-token-abcdef123456";

/// Start a mock API and a store pointed at it.
pub async fn mock_store() -> (MockServer, CloudflareStore) {
    let server = MockServer::start().await;
    let config = CloudflareConfig::new(TOKEN).with_base_url(server.uri());
    let store = require_store(CloudflareStore::new(config));
    (server, store)
}

fn require_store(store: cf_dns_edit_provider::Result<CloudflareStore>) -> CloudflareStore {
    match store {
        Ok(store) => store,
        Err(e) => panic!("failed to build store: {e}"),
    }
}

/// Successful API envelope.
pub fn envelope(result: Value) -> Value {
    json!({ "success": true, "errors": [], "messages": [], "result": result })
}

/// Successful paged envelope.
pub fn paged(result: Value, page: u32, total_pages: u32, total_count: u32) -> Value {
    json!({
        "success": true,
        "errors": [],
        "messages": [],
        "result": result,
        "result_info": {
            "page": page,
            "per_page": 100,
            "count": result.as_array().map_or(0, Vec::len),
            "total_count": total_count,
            "total_pages": total_pages
        }
    })
}

/// Failed API envelope with a single error.
pub fn failure(code: i64, message: &str) -> Value {
    json!({
        "success": false,
        "errors": [{ "code": code, "message": message }],
        "messages": [],
        "result": null
    })
}

pub fn zone_json() -> Value {
    json!({ "id": ZONE_ID, "name": ZONE_NAME, "status": "active" })
}

pub fn record_json(id: &str, record_type: &str, name: &str, content: &str) -> Value {
    json!({
        "id": id,
        "zone_id": ZONE_ID,
        "zone_name": ZONE_NAME,
        "name": name,
        "type": record_type,
        "content": content,
        "proxiable": true,
        "proxied": false,
        "ttl": 1,
        "comment": null,
        "tags": [],
        "created_on": "2024-01-01T00:00:00.000000Z",
        "modified_on": "2024-01-02T00:00:00.000000Z"
    })
}

/// 生成唯一的测试记录名称
pub fn generate_test_record_name() -> String {
    let nanos = chrono::Utc::now().timestamp_subsec_nanos();
    format!("_test-{nanos:08x}")
}

/// 真实 API 测试上下文
pub struct LiveContext {
    pub store: CloudflareStore,
    pub zone_name: String,
}

impl LiveContext {
    pub fn from_env() -> Option<Self> {
        let api_token = env::var("CLOUDFLARE_API_TOKEN").ok()?;
        let zone_name = env::var("TEST_ZONE").ok()?;
        let store = CloudflareStore::new(CloudflareConfig::new(api_token)).ok()?;
        Some(Self { store, zone_name })
    }

    pub async fn find_zone_id(&self) -> Option<String> {
        self.store
            .list_zones()
            .await
            .ok()?
            .into_iter()
            .find(|z| z.name == self.zone_name)
            .map(|z| z.id)
    }

    /// 查找并清理所有测试记录（以 _test- 开头的记录）
    pub async fn cleanup_test_records(&self, zone_id: &str) {
        if let Ok(records) = self.store.list_records(zone_id).await {
            for record in records.iter().filter(|r| r.name.starts_with("_test-")) {
                let _ = self.store.delete_record(zone_id, &record.id).await;
            }
        }
    }
}
