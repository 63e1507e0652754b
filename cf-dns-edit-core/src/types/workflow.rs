//! 工作流状态类型定义

use serde::Serialize;

use cf_dns_edit_provider::DnsRecord;

use crate::error::MutationError;
use crate::gate::ConfirmationRequest;
use crate::types::MutationKind;

/// Result of a submit or approve call that did not fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum SubmitOutcome {
    /// The record was created or updated; the server's copy is returned.
    Committed { record: DnsRecord },
    /// The record was deleted.
    Deleted { id: String },
    /// Nothing was sent; the user must approve or cancel the request.
    NeedsConfirmation { request: ConfirmationRequest },
}

/// Workflow state published to the presentation layer.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(tag = "state", content = "details", rename_all = "camelCase")]
pub enum WorkflowState {
    /// Editing; nothing submitted.
    #[default]
    Idle,
    /// Waiting for the user to approve or cancel.
    PendingConfirmation(ConfirmationRequest),
    /// The user approved; the remote call is about to start.
    Approved,
    /// The user cancelled or dismissed the confirmation.
    Cancelled,
    /// The remote call is running.
    Submitting {
        kind: MutationKind,
        target_id: Option<String>,
    },
    /// The remote store confirmed the change.
    Succeeded {
        kind: MutationKind,
        record_id: String,
    },
    /// Validation or the remote call failed.
    Failed(MutationError),
}
