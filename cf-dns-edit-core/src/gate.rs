//! Confirmation gate
//!
//! Decides whether a mutation must be explicitly approved before it reaches
//! the remote store, and holds the request while the user decides.

use std::fmt;

use cf_dns_edit_provider::DnsRecord;
use serde::{Deserialize, Serialize};

use crate::error::{MutationError, MutationResult};
use crate::types::{Mutation, MutationKind, RecordDraft};

/// Why a mutation needs confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfirmationReason {
    /// The record will be removed.
    Delete,
    /// The proxied flag changes, rerouting the record's traffic.
    ProxyToggle,
    /// The record type changes.
    TypeChange,
}

/// A mutation held until the user approves or cancels it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationRequest {
    pub reason: ConfirmationReason,
    pub mutation: Mutation,
    /// Committed record the mutation targets.
    pub target_id: Option<String>,
}

/// One confirmation rule: returns a reason when the mutation must be confirmed.
pub type ConfirmationRule =
    fn(MutationKind, Option<&DnsRecord>, &RecordDraft) -> Option<ConfirmationReason>;

fn delete_rule(
    kind: MutationKind,
    _previous: Option<&DnsRecord>,
    _draft: &RecordDraft,
) -> Option<ConfirmationReason> {
    (kind == MutationKind::Delete).then_some(ConfirmationReason::Delete)
}

fn proxy_toggle_rule(
    _kind: MutationKind,
    previous: Option<&DnsRecord>,
    draft: &RecordDraft,
) -> Option<ConfirmationReason> {
    previous
        .filter(|p| p.proxied != draft.proxied)
        .map(|_| ConfirmationReason::ProxyToggle)
}

fn type_change_rule(
    _kind: MutationKind,
    previous: Option<&DnsRecord>,
    draft: &RecordDraft,
) -> Option<ConfirmationReason> {
    previous
        .filter(|p| p.record_type != draft.record_type)
        .map(|_| ConfirmationReason::TypeChange)
}

/// Built-in rules, in priority order.
pub const DEFAULT_RULES: &[ConfirmationRule] = &[delete_rule, proxy_toggle_rule, type_change_rule];

/// Evaluate [`DEFAULT_RULES`] against a mutation; the first matching rule wins.
pub fn needs_confirmation(
    mutation: &Mutation,
    previous: Option<&DnsRecord>,
) -> Option<ConfirmationRequest> {
    evaluate(DEFAULT_RULES, mutation, previous)
}

fn evaluate(
    rules: &[ConfirmationRule],
    mutation: &Mutation,
    previous: Option<&DnsRecord>,
) -> Option<ConfirmationRequest> {
    let kind = mutation.kind();
    let draft = mutation.draft();
    rules
        .iter()
        .find_map(|rule| rule(kind, previous, draft))
        .map(|reason| ConfirmationRequest {
            reason,
            mutation: mutation.clone(),
            target_id: mutation.origin().map(str::to_string),
        })
}

/// Gate status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GateState {
    Idle,
    PendingConfirmation,
    Approved,
    Cancelled,
}

/// Holds at most one request awaiting a decision.
///
/// `Idle → PendingConfirmation → {Approved, Cancelled}`; approve and cancel
/// are only legal while a request is pending.
pub struct ConfirmationGate {
    rules: Vec<ConfirmationRule>,
    state: GateState,
    pending: Option<ConfirmationRequest>,
}

impl fmt::Debug for ConfirmationGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfirmationGate")
            .field("rules", &self.rules.len())
            .field("state", &self.state)
            .field("pending", &self.pending)
            .finish()
    }
}

impl Default for ConfirmationGate {
    fn default() -> Self {
        Self::with_rules(DEFAULT_RULES.to_vec())
    }
}

impl ConfirmationGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gate with a custom rule list; earlier rules take precedence.
    #[must_use]
    pub fn with_rules(rules: Vec<ConfirmationRule>) -> Self {
        Self {
            rules,
            state: GateState::Idle,
            pending: None,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn pending(&self) -> Option<&ConfirmationRequest> {
        self.pending.as_ref()
    }

    /// Evaluate the mutation. When confirmation is required the request is
    /// held (replacing any earlier one) and a copy returned; otherwise the
    /// gate returns to `Idle`.
    pub fn check(
        &mut self,
        mutation: &Mutation,
        previous: Option<&DnsRecord>,
    ) -> Option<ConfirmationRequest> {
        match evaluate(&self.rules, mutation, previous) {
            Some(request) => {
                if self.pending.is_some() {
                    log::debug!("Replacing pending confirmation");
                }
                self.pending = Some(request.clone());
                self.state = GateState::PendingConfirmation;
                Some(request)
            }
            None => {
                self.pending = None;
                self.state = GateState::Idle;
                None
            }
        }
    }

    /// Consume the pending request for execution.
    pub fn approve(&mut self) -> MutationResult<ConfirmationRequest> {
        let request = self
            .pending
            .take()
            .ok_or(MutationError::NoPendingConfirmation)?;
        self.state = GateState::Approved;
        Ok(request)
    }

    /// Discard the pending request.
    pub fn cancel(&mut self) -> MutationResult<ConfirmationRequest> {
        let request = self
            .pending
            .take()
            .ok_or(MutationError::NoPendingConfirmation)?;
        self.state = GateState::Cancelled;
        Ok(request)
    }

    /// Drop any pending request and return to `Idle`.
    pub fn reset(&mut self) {
        self.pending = None;
        self.state = GateState::Idle;
    }
}
