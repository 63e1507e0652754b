//! 类型定义模块

mod draft;
mod workflow;

pub use draft::{Mutation, MutationKind, RecordDraft};
pub use workflow::{SubmitOutcome, WorkflowState};

// Re-export provider 库的公共类型
pub use cf_dns_edit_provider::{DnsRecord, RecordPayload, RecordType, Ttl, Zone, ZoneStatus};
