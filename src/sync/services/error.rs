//! Service-level errors for card synchronisation.

use crate::board::ports::BoardServiceError;
use crate::sync::domain::ConfigurationError;
use crate::sync::ports::{CardAssociationError, RenderError};
use thiserror::Error;

/// Errors raised while applying a card operation.
#[derive(Debug, Clone, Error)]
pub enum CardSyncError {
    /// The configuration cannot support the requested operation.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// The board service rejected or could not perform the operation.
    #[error(transparent)]
    Board(#[from] BoardServiceError),
    /// Reading or writing the association failed.
    #[error(transparent)]
    Store(#[from] CardAssociationError),
    /// Rendering card text failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Result type for card synchronisation operations.
pub type CardSyncResult<T> = Result<T, CardSyncError>;
