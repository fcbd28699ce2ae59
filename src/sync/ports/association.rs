//! Storage port for record-to-card associations.

use crate::sync::domain::{CardAssociation, RecordId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for association store operations.
pub type CardAssociationResult<T> = Result<T, CardAssociationError>;

/// Association persistence contract.
///
/// Implementations hold at most one association per record. Writes are
/// expected to be durable once the call returns.
#[async_trait]
pub trait CardAssociationStore: Send + Sync {
    /// Stores a new association.
    ///
    /// # Errors
    ///
    /// Returns [`CardAssociationError::DuplicateRecord`] when the record
    /// already has an association.
    async fn store(&self, association: &CardAssociation) -> CardAssociationResult<()>;

    /// Persists changes to an existing association.
    ///
    /// # Errors
    ///
    /// Returns [`CardAssociationError::NotFound`] when the record has no
    /// association.
    async fn update(&self, association: &CardAssociation) -> CardAssociationResult<()>;

    /// Finds the association owned by `record_id`.
    async fn find_by_record(
        &self,
        record_id: &RecordId,
    ) -> CardAssociationResult<Option<CardAssociation>>;

    /// Removes and returns the association owned by `record_id`, if any.
    async fn remove(&self, record_id: &RecordId)
    -> CardAssociationResult<Option<CardAssociation>>;
}

/// Errors returned by association store implementations.
#[derive(Debug, Clone, Error)]
pub enum CardAssociationError {
    /// The record already has an association.
    #[error("record {0} already has a card")]
    DuplicateRecord(RecordId),

    /// The record has no association.
    #[error("no card association for record {0}")]
    NotFound(RecordId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CardAssociationError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
