//! 记录草稿与变更类型定义

use cf_dns_edit_provider::{DnsRecord, RecordPayload, RecordType, Ttl};
use serde::{Deserialize, Serialize};

/// An unsaved, user-edited record.
///
/// A draft is *new* when `origin` is `None` and *editing* when `origin`
/// holds the id of a committed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDraft {
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Relative name, `@` for the apex, or an absolute name ending in `.`.
    pub name: String,
    pub content: String,
    pub ttl: Ttl,
    pub proxied: bool,
    /// MX/SRV priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Id of the committed record being edited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

impl Default for RecordDraft {
    fn default() -> Self {
        Self {
            record_type: RecordType::A,
            name: String::new(),
            content: String::new(),
            ttl: Ttl::Auto,
            proxied: false,
            priority: None,
            comment: None,
            origin: None,
        }
    }
}

impl RecordDraft {
    /// Empty draft for a new record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft pre-populated from a committed record.
    #[must_use]
    pub fn from_record(record: &DnsRecord) -> Self {
        Self {
            record_type: record.record_type,
            name: record.name.clone(),
            content: record.content.clone(),
            ttl: record.ttl,
            proxied: record.proxied,
            priority: record.priority,
            comment: record.comment.clone(),
            origin: Some(record.id.clone()),
        }
    }

    #[must_use]
    pub fn is_new(&self) -> bool {
        self.origin.is_none()
    }

    /// Writable fields sent to the store. A blank comment clears it.
    #[must_use]
    pub fn to_payload(&self) -> RecordPayload {
        RecordPayload {
            name: self.name.clone(),
            record_type: self.record_type,
            content: self.content.trim().to_string(),
            ttl: self.ttl,
            proxied: self.record_type.is_proxiable() && self.proxied,
            priority: self.priority.filter(|_| self.record_type.has_priority()),
            comment: self
                .comment
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        }
    }
}

/// What a submitted mutation does on the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// A change requested by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "draft", rename_all = "lowercase")]
pub enum Mutation {
    /// Create when the draft is new, update when it is editing.
    Save(RecordDraft),
    /// Delete the draft's origin record.
    Delete(RecordDraft),
}

impl Mutation {
    #[must_use]
    pub fn kind(&self) -> MutationKind {
        match self {
            Self::Save(draft) if draft.is_new() => MutationKind::Create,
            Self::Save(_) => MutationKind::Update,
            Self::Delete(_) => MutationKind::Delete,
        }
    }

    #[must_use]
    pub fn draft(&self) -> &RecordDraft {
        match self {
            Self::Save(draft) | Self::Delete(draft) => draft,
        }
    }

    #[must_use]
    pub fn into_draft(self) -> RecordDraft {
        match self {
            Self::Save(draft) | Self::Delete(draft) => draft,
        }
    }

    #[must_use]
    pub fn origin(&self) -> Option<&str> {
        self.draft().origin.as_deref()
    }
}
