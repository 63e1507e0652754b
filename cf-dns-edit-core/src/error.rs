//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use cf_dns_edit_provider::{CredentialValidationError, ProviderError};

use crate::validator::FieldError;

/// Workflow error type
///
/// A cancelled confirmation is not an error; it is reported through
/// [`WorkflowState::Cancelled`](crate::types::WorkflowState::Cancelled).
#[derive(Error, Debug, Clone, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum MutationError {
    /// The draft failed field validation; the store was not contacted.
    #[error("Validation failed: {}", summarize(.0))]
    ValidationFailed(Vec<FieldError>),

    /// Another submission for the same record is still running.
    #[error("A change to record {0} is already in progress")]
    AlreadyInProgress(String),

    /// The remote store rejected the change or could not be reached.
    #[error("{0}")]
    RemoteError(#[from] ProviderError),

    /// The draft's origin is not a record in the cache.
    #[error("Record not found: {0}")]
    UnknownRecord(String),

    /// `approve`/`cancel` was called with nothing awaiting confirmation.
    #[error("No change is awaiting confirmation")]
    NoPendingConfirmation,
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl MutationError {
    /// Whether it is expected behavior (user input, stale selection, server-side
    /// rejection of user data). Used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ValidationFailed(_)
            | Self::AlreadyInProgress(_)
            | Self::UnknownRecord(_)
            | Self::NoPendingConfirmation => true,
            Self::RemoteError(e) => e.is_expected(),
        }
    }

    /// Field errors of a validation failure, empty otherwise.
    #[must_use]
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::ValidationFailed(errors) => errors,
            _ => &[],
        }
    }
}

/// Workflow Result type alias
pub type MutationResult<T> = std::result::Result<T, MutationError>;
