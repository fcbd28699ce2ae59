//! Rendering port for card titles, bodies, and checklist entries.

use crate::sync::domain::RecordId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Renders a template against a record's field values.
///
/// The host supplies the implementation; the engine only ever passes
/// templates taken from its [`crate::sync::domain::CardBlueprint`].
#[async_trait]
pub trait CardRenderer: Send + Sync {
    /// Renders `template` in the context of `record_id`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when the record is unknown to the host or
    /// the template cannot be evaluated.
    async fn render(&self, record_id: &RecordId, template: &str) -> RenderResult<String>;
}

/// Errors returned by renderers.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    /// The host has no record with this identifier.
    #[error("unknown record: {0}")]
    UnknownRecord(RecordId),

    /// Template evaluation failed.
    #[error("failed to render template for record {record_id}: {reason}")]
    Template {
        /// Record being rendered.
        record_id: RecordId,
        /// Renderer diagnostic.
        reason: String,
    },

    /// Failure fetching the record's field values.
    #[error("field source error: {0}")]
    Source(Arc<dyn std::error::Error + Send + Sync>),
}

impl RenderError {
    /// Wraps a field-source error.
    pub fn field_source(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Source(Arc::new(err))
    }
}
