//! DNS record editor core library
//!
//! Provides the mutation workflow behind a record edit screen:
//! - Draft validation (validator)
//! - Confirmation of destructive or traffic-affecting changes (gate)
//! - Submission to the remote store and the committed record cache (services)
//!
//! This library does no rendering; the presentation layer drives a
//! [`MutationController`] and observes its [`WorkflowState`](types::WorkflowState).

pub mod cache;
pub mod error;
pub mod gate;
pub mod services;
pub mod types;
pub mod utils;
pub mod validator;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use cache::RecordCache;
pub use error::{MutationError, MutationResult};
pub use gate::{
    needs_confirmation, ConfirmationGate, ConfirmationReason, ConfirmationRequest,
    ConfirmationRule, GateState, DEFAULT_RULES,
};
pub use services::{ControllerContext, MutationController, ZoneService};
pub use validator::{validate, validate_mutation, DraftField, FieldError, ValidationRules};
