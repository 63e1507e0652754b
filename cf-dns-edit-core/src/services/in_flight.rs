//! Per-record submission slots

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::{MutationError, MutationResult};

/// Record ids with a remote call in progress.
#[derive(Debug, Clone, Default)]
pub(crate) struct InFlightRegistry {
    ids: Arc<Mutex<HashSet<String>>>,
}

impl InFlightRegistry {
    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.ids.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Claim the slot for `id`, failing fast when it is taken.
    pub(crate) fn acquire(&self, id: &str) -> MutationResult<InFlightGuard> {
        if !self.lock().insert(id.to_string()) {
            return Err(MutationError::AlreadyInProgress(id.to_string()));
        }
        Ok(InFlightGuard {
            registry: self.clone(),
            id: id.to_string(),
        })
    }

    pub(crate) fn contains(&self, id: &str) -> bool {
        self.lock().contains(id)
    }
}

/// Releases the slot on drop.
#[derive(Debug)]
pub(crate) struct InFlightGuard {
    registry: InFlightRegistry,
    id: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.registry.lock().remove(&self.id);
    }
}
