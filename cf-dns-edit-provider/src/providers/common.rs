//! Provider 公共工具函数

#[cfg(feature = "cloudflare")]
use std::time::Duration;

#[cfg(feature = "cloudflare")]
use reqwest::Client;

#[cfg(feature = "cloudflare")]
use crate::error::{ProviderError, Result};

// ============ HTTP Client ============

/// 创建带超时配置的 HTTP Client
#[cfg(feature = "cloudflare")]
pub fn create_http_client(
    provider: &str,
    connect_timeout: Duration,
    request_timeout: Duration,
) -> Result<Client> {
    Client::builder()
        .connect_timeout(connect_timeout)
        .timeout(request_timeout)
        .build()
        .map_err(|e| ProviderError::NetworkError {
            provider: provider.to_string(),
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

// ============ 日志文本 ============

/// `"1 zone"`, `"3 DNS records"`.
pub fn pluralize(count: usize, word: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {word}{suffix}")
}

// ============ 域名名称处理 ============

/// 去掉域名末尾的点
pub fn normalize_domain_name(name: &str) -> String {
    name.trim_end_matches('.').to_string()
}

/// 将完整域名转换为相对名称
/// 如: "www.example.com" + "example.com" -> "www"
/// 如: "example.com" + "example.com" -> "@"
pub fn full_name_to_relative(full_name: &str, zone_name: &str) -> String {
    let full = normalize_domain_name(full_name);
    let zone = normalize_domain_name(zone_name);

    if full.eq_ignore_ascii_case(&zone) {
        "@".to_string()
    } else if let Some(subdomain) = full.strip_suffix(&format!(".{zone}")) {
        subdomain.to_string()
    } else {
        full
    }
}

/// 将相对名称转换为完整域名
/// 如: "www" + "example.com" -> "www.example.com"
/// 如: "@" + "example.com" -> "example.com"
/// 已经是 zone 下的完整域名时原样返回（去掉末尾的点）
pub fn relative_to_full_name(relative_name: &str, zone_name: &str) -> String {
    let zone = normalize_domain_name(zone_name);
    let name = normalize_domain_name(relative_name);

    if name == "@" || name.is_empty() || name.eq_ignore_ascii_case(&zone) {
        zone
    } else if name.ends_with(&format!(".{zone}")) {
        name
    } else {
        format!("{name}.{zone}")
    }
}
