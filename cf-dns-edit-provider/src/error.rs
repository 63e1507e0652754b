use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all record store operations.
///
/// Each variant carries a `provider` field naming the store that produced it.
/// All variants are serializable so the presentation layer can render them
/// verbatim.
///
/// # Transient Errors
///
/// [`NetworkError`](Self::NetworkError), [`Timeout`](Self::Timeout) and
/// [`RateLimited`](Self::RateLimited) may succeed when the user retries.
/// Stores never retry on their own.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, 5xx gateway).
    #[error("[{provider}] Network error: {detail}")]
    NetworkError { provider: String, detail: String },

    /// The HTTP request timed out.
    #[error("[{provider}] Request timeout: {detail}")]
    Timeout { provider: String, detail: String },

    /// The API rate limit has been exceeded (HTTP 429).
    #[error("[{provider}] Rate limited{}", retry_suffix(.retry_after))]
    RateLimited {
        provider: String,
        /// Suggested wait in seconds, from the `Retry-After` header.
        retry_after: Option<u64>,
        raw_message: Option<String>,
    },

    /// The API token is invalid, expired or revoked.
    #[error("[{provider}] Invalid credentials{}", message_suffix(.raw_message))]
    InvalidCredentials {
        provider: String,
        raw_message: Option<String>,
    },

    /// The token lacks a scope required for the operation (e.g. `Zone.DNS:Edit`).
    #[error("[{provider}] Permission denied{}", message_suffix(.raw_message))]
    PermissionDenied {
        provider: String,
        raw_message: Option<String>,
    },

    /// A record with the same name/type already exists.
    #[error("[{provider}] Record '{record_name}' already exists")]
    RecordExists {
        provider: String,
        record_name: String,
        raw_message: Option<String>,
    },

    /// The record id does not exist on the server.
    #[error("[{provider}] Record '{record_id}' not found")]
    RecordNotFound {
        provider: String,
        record_id: String,
        raw_message: Option<String>,
    },

    /// The zone id does not exist or is not visible to the token.
    #[error("[{provider}] Zone '{zone}' not found{}", message_suffix(.raw_message))]
    ZoneNotFound {
        provider: String,
        zone: String,
        raw_message: Option<String>,
    },

    /// The server rejected a request field (server-side validation).
    #[error("[{provider}] Invalid parameter '{param}': {detail}")]
    InvalidParameter {
        provider: String,
        param: String,
        detail: String,
    },

    /// The zone's record quota has been exceeded.
    #[error("[{provider}] Quota exceeded")]
    QuotaExceeded {
        provider: String,
        raw_message: Option<String>,
    },

    /// The response body could not be parsed.
    #[error("[{provider}] Parse error: {detail}")]
    ParseError { provider: String, detail: String },

    /// A request body could not be serialized.
    #[error("[{provider}] Serialization error: {detail}")]
    SerializationError { provider: String, detail: String },

    /// An error code not mapped to a specific variant.
    #[error("[{provider}] {raw_message}")]
    Unknown {
        provider: String,
        raw_code: Option<String>,
        raw_message: String,
    },
}

fn message_suffix(raw_message: &Option<String>) -> String {
    raw_message
        .as_ref()
        .map_or_else(String::new, |msg| format!(": {msg}"))
}

fn retry_suffix(retry_after: &Option<u64>) -> String {
    retry_after.map_or_else(String::new, |secs| format!(" (retry after {secs}s)"))
}

impl ProviderError {
    /// Whether the error is caused by user input or server-side state rather
    /// than a failure of the store itself. Used to pick `warn` over `error`.
    ///
    /// **Update this method when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::PermissionDenied { .. }
                | Self::RecordExists { .. }
                | Self::RecordNotFound { .. }
                | Self::ZoneNotFound { .. }
                | Self::InvalidParameter { .. }
                | Self::QuotaExceeded { .. }
        )
    }

    /// Whether a user-initiated retry of the same request may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }
}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
