//! Draft field validation
//!
//! [`validate`] is pure: it reads the draft and the zone apex and returns
//! every field error at once, so the edit form can mark all bad fields in
//! one pass.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;

use cf_dns_edit_provider::{RecordType, Ttl};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::{Mutation, RecordDraft};

/// Maximum length of a fully-qualified name.
const MAX_NAME_LEN: usize = 253;

static LABEL_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_](?:[A-Za-z0-9_-]{0,61}[A-Za-z0-9_])?$"));

/// `weight port target`
static SRV_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(\d+)\s+(\S+)$"));

/// `flags tag value`
static CAA_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+([A-Za-z0-9]+)\s+(.+)$"));

const CAA_TAGS: [&str; 3] = ["issue", "issuewild", "iodef"];

/// Draft field an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftField {
    Name,
    Content,
    Ttl,
    Proxied,
    Priority,
    Comment,
    Origin,
}

impl DraftField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Content => "content",
            Self::Ttl => "ttl",
            Self::Proxied => "proxied",
            Self::Priority => "priority",
            Self::Comment => "comment",
            Self::Origin => "origin",
        }
    }
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: DraftField,
    pub message: String,
}

impl FieldError {
    pub fn new(field: DraftField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.as_str(), self.message)
    }
}

/// Validation limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRules {
    pub min_ttl: u32,
    pub max_ttl: u32,
    /// Maximum TXT content length, in characters.
    pub max_txt_len: usize,
    /// Maximum comment length, in characters.
    pub max_comment_len: usize,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            min_ttl: 60,
            max_ttl: 86_400,
            max_txt_len: 2048,
            max_comment_len: 100,
        }
    }
}

/// Check every field of a draft against `rules`.
///
/// `zone_name` is the apex the draft lives under; absolute names must end in it.
pub fn validate(
    draft: &RecordDraft,
    zone_name: &str,
    rules: &ValidationRules,
) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if let Err(message) = check_name(&draft.name, zone_name) {
        errors.push(FieldError::new(DraftField::Name, message));
    }
    if let Err(message) = check_content(draft.record_type, draft.content.trim(), rules) {
        errors.push(FieldError::new(DraftField::Content, message));
    }
    if let Ttl::Seconds(secs) = draft.ttl {
        if !(rules.min_ttl..=rules.max_ttl).contains(&secs) {
            errors.push(FieldError::new(
                DraftField::Ttl,
                format!(
                    "TTL must be Auto or between {} and {} seconds",
                    rules.min_ttl, rules.max_ttl
                ),
            ));
        }
    }
    if draft.proxied && !draft.record_type.is_proxiable() {
        errors.push(FieldError::new(
            DraftField::Proxied,
            format!("{} records cannot be proxied", draft.record_type),
        ));
    }
    if draft.record_type.has_priority() && draft.priority.is_none() {
        errors.push(FieldError::new(
            DraftField::Priority,
            format!("{} records require a priority", draft.record_type),
        ));
    }
    if let Some(comment) = &draft.comment {
        if comment.chars().count() > rules.max_comment_len {
            errors.push(FieldError::new(
                DraftField::Comment,
                format!(
                    "Comment must be at most {} characters",
                    rules.max_comment_len
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a mutation: saves are field-checked, deletes only need an origin.
pub fn validate_mutation(
    mutation: &Mutation,
    zone_name: &str,
    rules: &ValidationRules,
) -> Result<(), Vec<FieldError>> {
    match mutation {
        Mutation::Save(draft) => validate(draft, zone_name, rules),
        Mutation::Delete(draft) if draft.origin.is_none() => Err(vec![missing_origin()]),
        Mutation::Delete(_) => Ok(()),
    }
}

pub(crate) fn missing_origin() -> FieldError {
    FieldError::new(DraftField::Origin, "Only existing records can be deleted")
}

fn matches(re: &LazyLock<Result<Regex, regex::Error>>, value: &str) -> bool {
    re.as_ref().is_ok_and(|re| re.is_match(value))
}

fn check_labels(name: &str, allow_wildcard: bool) -> Result<(), String> {
    for (i, label) in name.split('.').enumerate() {
        if label == "*" {
            if allow_wildcard && i == 0 {
                continue;
            }
            return Err("Wildcard '*' is only allowed as the first label".to_string());
        }
        if label.is_empty() {
            return Err("Name contains an empty label".to_string());
        }
        if label.len() > 63 {
            return Err(format!("Label '{label}' is longer than 63 characters"));
        }
        if !matches(&LABEL_RE, label) {
            return Err(format!(
                "Label '{label}' may only contain letters, digits, '_' and '-', and cannot start or end with '-'"
            ));
        }
    }
    Ok(())
}

fn check_name(name: &str, zone_name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name is required".to_string());
    }
    if name != name.trim() {
        return Err("Name cannot contain whitespace".to_string());
    }
    if name == "@" {
        return Ok(());
    }

    let zone = zone_name.trim_end_matches('.');
    let full_name = if let Some(absolute) = name.strip_suffix('.') {
        let lower = absolute.to_ascii_lowercase();
        let apex = zone.to_ascii_lowercase();
        if lower != apex && !lower.ends_with(&format!(".{apex}")) {
            return Err(format!("Absolute name must end in {zone}"));
        }
        absolute.to_string()
    } else {
        format!("{name}.{zone}")
    };

    if full_name.len() > MAX_NAME_LEN {
        return Err(format!("Name must be at most {MAX_NAME_LEN} characters"));
    }
    check_labels(&full_name, true)
}

fn check_hostname(value: &str) -> Result<(), String> {
    let host = value.strip_suffix('.').unwrap_or(value);
    if host.is_empty() {
        return Err("Hostname is required".to_string());
    }
    if host.len() > MAX_NAME_LEN {
        return Err(format!("Hostname must be at most {MAX_NAME_LEN} characters"));
    }
    check_labels(host, false)
}

fn check_content(record_type: RecordType, content: &str, rules: &ValidationRules) -> Result<(), String> {
    if content.is_empty() {
        return Err("Content is required".to_string());
    }

    match record_type {
        RecordType::A => content
            .parse::<Ipv4Addr>()
            .map(|_| ())
            .map_err(|_| "Content must be an IPv4 address".to_string()),
        RecordType::Aaaa => content
            .parse::<Ipv6Addr>()
            .map(|_| ())
            .map_err(|_| "Content must be an IPv6 address".to_string()),
        RecordType::Cname | RecordType::Ns | RecordType::Mx => check_hostname(content),
        RecordType::Txt => {
            if content.chars().count() > rules.max_txt_len {
                Err(format!(
                    "TXT content must be at most {} characters",
                    rules.max_txt_len
                ))
            } else {
                Ok(())
            }
        }
        RecordType::Srv => check_srv(content),
        RecordType::Caa => check_caa(content),
    }
}

fn check_srv(content: &str) -> Result<(), String> {
    const FORMAT: &str = "SRV content must be 'weight port target'";

    let Some(caps) = SRV_RE.as_ref().ok().and_then(|re| re.captures(content)) else {
        return Err(FORMAT.to_string());
    };
    if caps[1].parse::<u16>().is_err() {
        return Err("SRV weight must be between 0 and 65535".to_string());
    }
    if caps[2].parse::<u16>().is_err() {
        return Err("SRV port must be between 0 and 65535".to_string());
    }
    let target = &caps[3];
    if target == "." {
        return Ok(());
    }
    check_hostname(target).map_err(|e| format!("SRV target: {e}"))
}

fn check_caa(content: &str) -> Result<(), String> {
    let Some(caps) = CAA_RE.as_ref().ok().and_then(|re| re.captures(content)) else {
        return Err("CAA content must be 'flags tag value'".to_string());
    };
    if caps[1].parse::<u8>().is_err() {
        return Err("CAA flags must be between 0 and 255".to_string());
    }
    if !CAA_TAGS.contains(&&caps[2]) {
        return Err(format!("CAA tag must be one of {}", CAA_TAGS.join(", ")));
    }
    if caps[3].trim_matches('"').trim().is_empty() {
        return Err("CAA value is required".to_string());
    }
    Ok(())
}
