//! Per-record serialisation of association read-modify-write cycles.

use crate::sync::domain::RecordId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Hands out one async lock per record.
///
/// Idle entries are pruned on every acquisition, so the table only holds
/// records with an operation in flight.
#[derive(Debug, Clone, Default)]
pub struct RecordLocks {
    entries: Arc<Mutex<HashMap<RecordId, Arc<AsyncMutex<()>>>>>,
}

/// Exclusive access to one record until dropped.
#[derive(Debug)]
pub struct RecordGuard {
    _guard: OwnedMutexGuard<()>,
}

impl RecordLocks {
    /// Creates an empty lock table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `record_id`.
    pub async fn acquire(&self, record_id: &RecordId) -> RecordGuard {
        let lock = {
            let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            entries.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(entries.entry(record_id.clone()).or_default())
        };
        RecordGuard {
            _guard: lock.lock_owned().await,
        }
    }

    /// Returns the number of records with an operation in flight or
    /// queued.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries
            .values()
            .filter(|lock| Arc::strong_count(lock) > 1)
            .count()
    }
}
