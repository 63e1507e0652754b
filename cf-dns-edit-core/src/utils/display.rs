//! List and prompt text for the presentation layer

use cf_dns_edit_provider::{DnsRecord, Zone, ZoneStatus};

use crate::gate::{ConfirmationReason, ConfirmationRequest};

/// Shared with the store's own log lines.
pub use cf_dns_edit_provider::pluralize;

/// One list line for a record: `TYPE | name | content | TTL: Auto`.
pub fn record_summary(record: &DnsRecord) -> String {
    let mut line = format!(
        "{} | {} | {}",
        record.record_type, record.name, record.content
    );
    if let Some(priority) = record.priority {
        line.push_str(&format!(" | Priority: {priority}"));
    }
    line.push_str(&format!(" | TTL: {}", record.ttl));
    if record.proxied {
        line.push_str(" | Proxied");
    }
    line
}

/// One list line for a zone: `example.com (active)`.
pub fn zone_summary(zone: &Zone) -> String {
    let status = match zone.status {
        ZoneStatus::Active => "active",
        ZoneStatus::Pending => "pending",
        ZoneStatus::Paused => "paused",
        ZoneStatus::Unknown => "unknown",
    };
    format!("{} ({status})", zone.name)
}

/// Question shown in the confirmation dialog.
pub fn confirmation_prompt(request: &ConfirmationRequest) -> String {
    let draft = request.mutation.draft();
    match request.reason {
        ConfirmationReason::Delete => format!(
            "Delete {} record {}? This cannot be undone.",
            draft.record_type, draft.name
        ),
        ConfirmationReason::ProxyToggle if draft.proxied => format!(
            "Route traffic for {} through the Cloudflare proxy?",
            draft.name
        ),
        ConfirmationReason::ProxyToggle => format!(
            "Stop proxying {}? Its origin address will be exposed in DNS answers.",
            draft.name
        ),
        ConfirmationReason::TypeChange => format!(
            "Change {} to a {} record?",
            draft.name, draft.record_type
        ),
    }
}
