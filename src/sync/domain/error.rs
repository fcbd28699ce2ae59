//! Error types for synchronisation domain validation and configuration.

use super::{CreationTrigger, StatusAxis};
use crate::board::domain::BoardDomainError;
use thiserror::Error;

/// Errors returned while constructing synchronisation domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SyncDomainError {
    /// The record identifier is empty after trimming.
    #[error("record identifier must not be empty")]
    EmptyRecordId,

    /// The template name is empty after trimming.
    #[error("template name must not be empty")]
    EmptyTemplateName,

    /// The status axis name is not recognised.
    #[error("unknown status axis: {0}")]
    UnknownStatusAxis(String),
}

/// Errors raised while resolving persisted settings into a
/// [`super::TriggerConfiguration`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A `Move` policy has no target list.
    #[error("status policy for {axis} moves the card but no target list is configured")]
    MissingMoveTarget {
        /// Axis whose policy is incomplete.
        axis: StatusAxis,
    },

    /// Cards must be created but no target list is configured.
    #[error("no target list is configured for new cards (creation trigger: {trigger})")]
    MissingTargetList {
        /// Configured creation trigger.
        trigger: CreationTrigger,
    },

    /// Restore-on-reverse was requested for an axis that cannot be reversed.
    #[error("status axis {axis} cannot be reversed, so its card cannot be restored")]
    RestoreOnIrreversibleAxis {
        /// Offending axis.
        axis: StatusAxis,
    },

    /// API key or token is missing.
    #[error("board service credentials are not configured")]
    MissingCredentials,

    /// A configured board-service identifier is malformed.
    #[error("invalid value for setting {setting}: {reason}")]
    InvalidIdentifier {
        /// Persisted setting name.
        setting: &'static str,
        /// Validation failure.
        #[source]
        reason: BoardDomainError,
    },

    /// A configured template name is malformed.
    #[error(transparent)]
    Domain(#[from] SyncDomainError),
}

/// Error returned while parsing card states from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown card state: {0}")]
pub struct ParseCardStateError(pub String);
