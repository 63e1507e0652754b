use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ============ Record Types ============

/// DNS record type.
///
/// Serialized as uppercase strings (`"A"`, `"AAAA"`, `"CNAME"`, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Text record.
    Txt,
    /// Name server record.
    Ns,
    /// Service locator record.
    Srv,
    /// Certificate Authority Authorization record.
    Caa,
}

impl RecordType {
    /// All supported types, in the order a type picker shows them.
    pub const ALL: [Self; 8] = [
        Self::A,
        Self::Aaaa,
        Self::Cname,
        Self::Mx,
        Self::Txt,
        Self::Ns,
        Self::Srv,
        Self::Caa,
    ];

    /// Wire name of the type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Ns => "NS",
            Self::Srv => "SRV",
            Self::Caa => "CAA",
        }
    }

    /// Whether traffic for this type can be routed through the provider's edge proxy.
    pub fn is_proxiable(self) -> bool {
        matches!(self, Self::A | Self::Aaaa | Self::Cname)
    }

    /// Whether the type carries a priority outside of `content`.
    pub fn has_priority(self) -> bool {
        matches!(self, Self::Mx | Self::Srv)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a wire string names a record type this crate does not handle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported record type: {0}")]
pub struct UnsupportedRecordType(pub String);

impl FromStr for RecordType {
    type Err = UnsupportedRecordType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnsupportedRecordType(s.to_string()))
    }
}

// ============ TTL ============

/// Record time to live.
///
/// On the wire, `1` means "automatic" and is mapped to [`Ttl::Auto`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ttl {
    /// Let the provider choose.
    #[default]
    Auto,
    /// Explicit TTL in seconds.
    Seconds(u32),
}

impl Ttl {
    /// Wire sentinel for automatic TTL.
    pub const AUTO_WIRE_VALUE: u32 = 1;

    /// Build from the wire value.
    pub fn from_wire(value: u32) -> Self {
        if value == Self::AUTO_WIRE_VALUE {
            Self::Auto
        } else {
            Self::Seconds(value)
        }
    }

    /// Wire value sent to the API.
    pub fn to_wire(self) -> u32 {
        match self {
            Self::Auto => Self::AUTO_WIRE_VALUE,
            Self::Seconds(secs) => secs,
        }
    }
}

impl fmt::Display for Ttl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("Auto"),
            Self::Seconds(secs) => write!(f, "{secs}"),
        }
    }
}

impl Serialize for Ttl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.to_wire())
    }
}

impl<'de> Deserialize<'de> for Ttl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u32::deserialize(deserializer).map(Self::from_wire)
    }
}

// ============ Zone Types ============

/// Status of a zone within the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneStatus {
    /// Zone is active and resolving.
    Active,
    /// Zone is waiting for nameserver activation.
    Pending,
    /// Zone is paused or moved away.
    Paused,
    /// Status could not be determined.
    Unknown,
}

/// A zone (domain) visible to the API token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    /// Provider-specific zone identifier.
    pub id: String,
    /// Apex domain name (e.g., `"example.com"`).
    pub name: String,
    /// Current zone status.
    pub status: ZoneStatus,
}

// ============ DNS Records ============

/// A DNS record as last confirmed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    /// Server-assigned record identifier.
    pub id: String,
    /// Zone this record belongs to.
    pub zone_id: String,
    /// Record name relative to the zone (`"www"`, or `"@"` for the apex).
    pub name: String,
    /// Record type.
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Type-specific content (address, target, text, ...).
    pub content: String,
    /// Time to live.
    pub ttl: Ttl,
    /// Whether the record is routed through the provider's proxy.
    pub proxied: bool,
    /// MX/SRV priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    /// Free-form record comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// When the record was created, if known.
    #[serde(with = "crate::utils::datetime::option", default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// When the record was last modified on the server.
    #[serde(with = "crate::utils::datetime")]
    pub updated_at: DateTime<Utc>,
}

/// The writable fields of a record, sent on create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPayload {
    /// Record name relative to the zone.
    pub name: String,
    /// Record type.
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Type-specific content.
    pub content: String,
    /// Time to live.
    pub ttl: Ttl,
    /// Proxy flag; only sent for proxiable types.
    pub proxied: bool,
    /// MX/SRV priority.
    pub priority: Option<u16>,
    /// Record comment; `None` clears an existing comment.
    pub comment: Option<String>,
}

impl From<&DnsRecord> for RecordPayload {
    fn from(record: &DnsRecord) -> Self {
        Self {
            name: record.name.clone(),
            record_type: record.record_type,
            content: record.content.clone(),
            ttl: record.ttl,
            proxied: record.proxied,
            priority: record.priority,
            comment: record.comment.clone(),
        }
    }
}

// ============ Credentials ============

/// Validation error for store credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CredentialValidationError {
    /// The API token is empty or whitespace.
    #[error("API token cannot be empty")]
    EmptyToken,
}
