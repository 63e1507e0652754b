//! 记录变更控制器
//!
//! Drives one edit screen: validate the draft, consult the confirmation
//! gate, call the remote store, and update the record cache only after the
//! store confirmed the change.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cf_dns_edit_provider::{DnsRecord, Zone};
use tokio::sync::watch;

use crate::error::{MutationError, MutationResult};
use crate::gate::{ConfirmationGate, ConfirmationRequest};
use crate::services::in_flight::InFlightGuard;
use crate::services::ControllerContext;
use crate::types::{Mutation, MutationKind, RecordDraft, SubmitOutcome, WorkflowState};
use crate::utils::display::{pluralize, record_summary};
use crate::validator::{missing_origin, validate_mutation, FieldError};

/// Mutation workflow for the records of one zone.
pub struct MutationController {
    ctx: Arc<ControllerContext>,
    zone_id: String,
    zone_name: String,
    gate: Mutex<ConfirmationGate>,
    field_errors: Mutex<Vec<FieldError>>,
    state_tx: watch::Sender<WorkflowState>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MutationController {
    /// 创建控制器实例
    #[must_use]
    pub fn new(ctx: Arc<ControllerContext>, zone: &Zone) -> Self {
        Self::with_gate(ctx, zone, ConfirmationGate::new())
    }

    /// Controller with a custom confirmation gate.
    #[must_use]
    pub fn with_gate(ctx: Arc<ControllerContext>, zone: &Zone, gate: ConfirmationGate) -> Self {
        let (state_tx, _) = watch::channel(WorkflowState::Idle);
        Self {
            ctx,
            zone_id: zone.id.clone(),
            zone_name: zone.name.clone(),
            gate: Mutex::new(gate),
            field_errors: Mutex::new(Vec::new()),
            state_tx,
        }
    }

    pub fn zone_id(&self) -> &str {
        &self.zone_id
    }

    pub fn zone_name(&self) -> &str {
        &self.zone_name
    }

    /// Current workflow state.
    pub fn state(&self) -> WorkflowState {
        self.state_tx.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<WorkflowState> {
        self.state_tx.subscribe()
    }

    pub fn pending_confirmation(&self) -> Option<ConfirmationRequest> {
        lock(&self.gate).pending().cloned()
    }

    /// Field errors of the last validation, empty when it passed.
    pub fn field_errors(&self) -> Vec<FieldError> {
        lock(&self.field_errors).clone()
    }

    /// Cached records of this zone.
    pub async fn records(&self) -> Vec<DnsRecord> {
        self.ctx.cache.records(&self.zone_id).await
    }

    /// Reload the zone's records from the store, replacing the cached ones.
    ///
    /// A failure leaves both the cache and the workflow state untouched.
    pub async fn refresh(&self) -> MutationResult<Vec<DnsRecord>> {
        log::info!("[{}] Loading records...", self.zone_name);
        let records = match self.ctx.store.list_records(&self.zone_id).await {
            Ok(records) => records,
            Err(e) => {
                let e = MutationError::RemoteError(e);
                log_failure(&self.zone_name, &e);
                return Err(e);
            }
        };
        log::info!(
            "[{}] Found {}",
            self.zone_name,
            pluralize(records.len(), "DNS record")
        );
        self.ctx
            .cache
            .replace_zone(&self.zone_id, records.clone())
            .await;
        Ok(records)
    }

    /// Start editing a new record.
    pub fn open_new(&self) -> RecordDraft {
        self.reset();
        RecordDraft::new()
    }

    /// Start editing a committed record of this zone.
    pub async fn open_edit(&self, record_id: &str) -> MutationResult<RecordDraft> {
        let record = self.committed(record_id).await?;
        self.reset();
        Ok(RecordDraft::from_record(&record))
    }

    /// Validate and submit a mutation.
    ///
    /// Every submit replaces a pending confirmation, including one that
    /// fails before reaching the gate.
    ///
    /// Returns [`SubmitOutcome::NeedsConfirmation`] without touching the store
    /// when the gate requires approval; resume with [`approve`](Self::approve)
    /// or [`cancel`](Self::cancel).
    pub async fn submit(&self, mutation: Mutation) -> MutationResult<SubmitOutcome> {
        if let Err(errors) = validate_mutation(&mutation, &self.zone_name, &self.ctx.rules) {
            *lock(&self.field_errors) = errors.clone();
            lock(&self.gate).reset();
            return Err(self.fail(MutationError::ValidationFailed(errors)));
        }
        lock(&self.field_errors).clear();

        let previous = match mutation.origin() {
            Some(origin) => match self.committed(origin).await {
                Ok(record) => Some(record),
                Err(e) => {
                    lock(&self.gate).reset();
                    return Err(self.fail(e));
                }
            },
            None => None,
        };

        let request = lock(&self.gate).check(&mutation, previous.as_ref());
        if let Some(request) = request {
            let draft = mutation.draft();
            log::info!(
                "[{}] {:?} needs confirmation: {} {}",
                self.zone_name,
                request.reason,
                draft.record_type,
                draft.name
            );
            self.publish(WorkflowState::PendingConfirmation(request.clone()));
            return Ok(SubmitOutcome::NeedsConfirmation { request });
        }

        let guard = self.ctx.in_flight.acquire(&self.slot_key(&mutation))?;
        self.execute(mutation, guard).await
    }

    /// Approve the pending mutation and send it to the store.
    pub async fn approve(&self) -> MutationResult<SubmitOutcome> {
        let slot = lock(&self.gate)
            .pending()
            .map(|request| self.slot_key(&request.mutation));
        let Some(slot) = slot else {
            log::warn!("[{}] Nothing to approve", self.zone_name);
            return Err(MutationError::NoPendingConfirmation);
        };
        // Claim the slot first so a busy record keeps its request pending.
        let guard = self.ctx.in_flight.acquire(&slot)?;

        let request = lock(&self.gate).approve().inspect_err(|e| {
            log::warn!("[{}] {e}", self.zone_name);
        })?;
        self.publish(WorkflowState::Approved);
        self.execute(request.mutation, guard).await
    }

    /// Discard the pending mutation. The draft is returned for further editing.
    pub fn cancel(&self) -> MutationResult<RecordDraft> {
        let request = lock(&self.gate).cancel().inspect_err(|e| {
            log::warn!("[{}] {e}", self.zone_name);
        })?;
        log::info!("[{}] Change cancelled", self.zone_name);
        self.publish(WorkflowState::Cancelled);
        Ok(request.mutation.into_draft())
    }

    /// The edit screen was closed. Cancels a pending mutation, if any.
    pub fn dismiss(&self) -> Option<RecordDraft> {
        let request = lock(&self.gate).cancel().ok()?;
        log::info!("[{}] Change dismissed", self.zone_name);
        self.publish(WorkflowState::Cancelled);
        Some(request.mutation.into_draft())
    }

    async fn execute(
        &self,
        mutation: Mutation,
        _guard: InFlightGuard,
    ) -> MutationResult<SubmitOutcome> {
        let kind = mutation.kind();
        let target_id = mutation.origin().map(str::to_string);
        self.publish(WorkflowState::Submitting {
            kind,
            target_id: target_id.clone(),
        });

        let store = &self.ctx.store;
        let result = match (&mutation, target_id.as_deref()) {
            (Mutation::Save(draft), None) => store
                .create_record(&self.zone_id, &draft.to_payload())
                .await
                .map(|record| SubmitOutcome::Committed { record }),
            (Mutation::Save(draft), Some(id)) => store
                .update_record(&self.zone_id, id, &draft.to_payload())
                .await
                .map(|record| SubmitOutcome::Committed { record }),
            (Mutation::Delete(_), Some(id)) => store
                .delete_record(&self.zone_id, id)
                .await
                .map(|()| SubmitOutcome::Deleted { id: id.to_string() }),
            (Mutation::Delete(_), None) => {
                return Err(self.fail(MutationError::ValidationFailed(vec![missing_origin()])));
            }
        };

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => return Err(self.fail(MutationError::RemoteError(e))),
        };

        match &outcome {
            SubmitOutcome::Committed { record } => {
                log::info!(
                    "[{}] Record {}d: {}",
                    self.zone_name,
                    kind.as_str(),
                    record_summary(record)
                );
                self.ctx.cache.put(record.clone()).await;
                self.publish(WorkflowState::Succeeded {
                    kind,
                    record_id: record.id.clone(),
                });
            }
            SubmitOutcome::Deleted { id } => {
                log::info!("[{}] Record deleted: {id}", self.zone_name);
                self.ctx.cache.remove(id).await;
                self.publish(WorkflowState::Succeeded {
                    kind,
                    record_id: id.clone(),
                });
            }
            SubmitOutcome::NeedsConfirmation { .. } => {}
        }
        Ok(outcome)
    }

    async fn committed(&self, record_id: &str) -> MutationResult<DnsRecord> {
        self.ctx
            .cache
            .get(record_id)
            .await
            .filter(|r| r.zone_id == self.zone_id)
            .ok_or_else(|| MutationError::UnknownRecord(record_id.to_string()))
    }

    /// New records share one slot per zone.
    fn slot_key(&self, mutation: &Mutation) -> String {
        match mutation.origin() {
            Some(origin) => origin.to_string(),
            None => format!("{}:{}", self.zone_id, MutationKind::Create.as_str()),
        }
    }

    fn reset(&self) {
        lock(&self.gate).reset();
        lock(&self.field_errors).clear();
        self.publish(WorkflowState::Idle);
    }

    fn fail(&self, e: MutationError) -> MutationError {
        log_failure(&self.zone_name, &e);
        self.publish(WorkflowState::Failed(e.clone()));
        e
    }

    fn publish(&self, state: WorkflowState) {
        self.state_tx.send_replace(state);
    }
}

fn log_failure(zone_name: &str, e: &MutationError) {
    if e.is_expected() {
        log::warn!("[{zone_name}] {e}");
    } else {
        log::error!("[{zone_name}] {e}");
    }
}
