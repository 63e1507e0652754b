//! Cloudflare error mapping

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::{CloudflareStore, PROVIDER_NAME};

const UNKNOWN: &str = "<unknown>";

/// Cloudflare error code mapping
/// Reference: <https://developers.cloudflare.com/fundamentals/api/troubleshooting/>
impl ProviderErrorMapper for CloudflareStore {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let provider = self.provider_name().to_string();
        match raw.code.as_deref() {
            // 6003: Invalid request headers
            // 6111: Invalid format for Authorization header
            // 9109: Invalid access token
            // 1000: Invalid API token
            // 10000: Authentication error
            Some("6003" | "6111" | "9109" | "1000" | "10000") => {
                ProviderError::InvalidCredentials {
                    provider,
                    raw_message: Some(raw.message),
                }
            }

            // 1004: DNS Validation Error
            // 9000: Invalid or missing name
            // 9005/9006: A/AAAA content is not an IP address
            // 9007: CNAME content is invalid
            // 9009: MX content must be a hostname
            // 9021: Invalid TTL
            // 9041: This DNS record cannot be proxied
            Some(code @ ("1004" | "9000" | "9005" | "9006" | "9007" | "9009" | "9021" | "9041")) => {
                let param = match code {
                    "9000" => "name",
                    "9005" | "9006" | "9007" | "9009" => "content",
                    "9021" => "ttl",
                    "9041" => "proxied",
                    _ => "general",
                };
                ProviderError::InvalidParameter {
                    provider,
                    param: param.to_string(),
                    detail: raw.message,
                }
            }

            // 81053..81058: a conflicting record already exists
            Some("81053" | "81054" | "81055" | "81056" | "81057" | "81058") => {
                ProviderError::RecordExists {
                    provider,
                    record_name: context.record_name.unwrap_or_else(|| UNKNOWN.to_string()),
                    raw_message: Some(raw.message),
                }
            }

            // 81044: Record does not exist
            Some("81044") => ProviderError::RecordNotFound {
                provider,
                record_id: context.record_id.unwrap_or_else(|| UNKNOWN.to_string()),
                raw_message: Some(raw.message),
            },

            // 81045: The record quota has been exceeded
            Some("81045") => ProviderError::QuotaExceeded {
                provider,
                raw_message: Some(raw.message),
            },

            // 7000: No route for that URI
            // 7003: Could not route to /zones/..., perhaps your object identifier is invalid?
            Some("7000" | "7003") => ProviderError::ZoneNotFound {
                provider,
                zone: context.zone.unwrap_or_else(|| UNKNOWN.to_string()),
                raw_message: Some(raw.message),
            },

            _ => self.unknown_error(raw),
        }
    }
}
