//! In-memory association store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::sync::{
    domain::{CardAssociation, RecordId},
    ports::{CardAssociationError, CardAssociationResult, CardAssociationStore},
};

/// Thread-safe in-memory association store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCardAssociationStore {
    state: Arc<RwLock<HashMap<RecordId, CardAssociation>>>,
}

impl InMemoryCardAssociationStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored associations.
    ///
    /// # Errors
    ///
    /// Returns [`CardAssociationError::Persistence`] when the lock is
    /// poisoned.
    pub fn len(&self) -> CardAssociationResult<usize> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.len())
    }

    /// Returns `true` when no association is stored.
    ///
    /// # Errors
    ///
    /// Returns [`CardAssociationError::Persistence`] when the lock is
    /// poisoned.
    pub fn is_empty(&self) -> CardAssociationResult<bool> {
        self.len().map(|count| count == 0)
    }
}

fn poisoned<T>(err: std::sync::PoisonError<T>) -> CardAssociationError {
    CardAssociationError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl CardAssociationStore for InMemoryCardAssociationStore {
    async fn store(&self, association: &CardAssociation) -> CardAssociationResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let record_id = association.record_id();
        if state.contains_key(record_id) {
            return Err(CardAssociationError::DuplicateRecord(record_id.clone()));
        }
        state.insert(record_id.clone(), association.clone());
        Ok(())
    }

    async fn update(&self, association: &CardAssociation) -> CardAssociationResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let slot = state
            .get_mut(association.record_id())
            .ok_or_else(|| CardAssociationError::NotFound(association.record_id().clone()))?;
        *slot = association.clone();
        Ok(())
    }

    async fn find_by_record(
        &self,
        record_id: &RecordId,
    ) -> CardAssociationResult<Option<CardAssociation>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.get(record_id).cloned())
    }

    async fn remove(
        &self,
        record_id: &RecordId,
    ) -> CardAssociationResult<Option<CardAssociation>> {
        let mut state = self.state.write().map_err(poisoned)?;
        Ok(state.remove(record_id))
    }
}
