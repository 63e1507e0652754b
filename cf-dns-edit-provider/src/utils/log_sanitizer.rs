//! Log sanitization utilities
//!
//! Response bodies can carry TXT payloads (DKIM keys, SPF records) and
//! request headers carry the API token; neither should reach the logs whole.

/// Maximum number of bytes of a body included in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading token characters kept visible when redacting.
const TOKEN_VISIBLE_PREFIX: usize = 4;

/// Largest char boundary not greater than `index`.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    (0..=index)
        .rev()
        .find(|&i| s.is_char_boundary(i))
        .unwrap_or(0)
}

/// Truncate a body for logging, noting the original length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Redact an API token down to a short recognizable prefix.
pub fn redact_token(token: &str) -> String {
    let visible = floor_char_boundary(token, TOKEN_VISIBLE_PREFIX);
    if token.len() <= TOKEN_VISIBLE_PREFIX * 2 {
        "****".to_string()
    } else {
        format!("{}****", &token[..visible])
    }
}
