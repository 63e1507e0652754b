//! Cloudflare API 类型定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cloudflare API 通用响应
#[derive(Debug, Deserialize)]
pub struct CloudflareResponse<T> {
    pub success: bool,
    pub result: Option<T>,
    pub errors: Option<Vec<CloudflareError>>,
    pub result_info: Option<CloudflareResultInfo>,
}

#[derive(Debug, Deserialize)]
pub struct CloudflareError {
    pub code: i32,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct CloudflareResultInfo {
    pub page: u32,
    pub total_pages: Option<u32>,
    pub total_count: u32,
}

/// Cloudflare Zone 结构
#[derive(Debug, Deserialize)]
pub struct CloudflareZone {
    pub id: String,
    pub name: String,
    pub status: String,
}

/// Cloudflare DNS Record 结构（响应）
#[derive(Debug, Deserialize)]
pub struct CloudflareDnsRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    #[serde(default)]
    pub proxied: bool,
    pub priority: Option<u16>,
    pub comment: Option<String>,
    #[serde(with = "crate::utils::datetime::option", default)]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(with = "crate::utils::datetime")]
    pub modified_on: DateTime<Utc>,
}

/// 创建/更新请求体
///
/// `comment` 总是发送：`null` 清除已有备注。
#[derive(Debug, Serialize)]
pub struct CloudflareRecordBody<'a> {
    #[serde(rename = "type")]
    pub record_type: &'a str,
    pub name: String,
    pub content: &'a str,
    pub ttl: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    pub comment: Option<&'a str>,
}

/// 删除响应
#[derive(Debug, Deserialize)]
pub struct CloudflareDeleted {
    pub id: String,
}

/// `/user/tokens/verify` 响应
#[derive(Debug, Deserialize)]
pub struct CloudflareTokenStatus {
    pub status: String,
}
