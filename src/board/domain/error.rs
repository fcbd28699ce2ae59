//! Error types for board domain validation.

use thiserror::Error;

/// Errors returned while constructing board domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// An identifier is empty after trimming.
    #[error("{kind} identifier must not be empty")]
    EmptyIdentifier {
        /// Identifier kind, for example `card` or `list`.
        kind: &'static str,
    },

    /// An identifier contains whitespace or path separators.
    #[error("invalid {kind} identifier '{value}'")]
    InvalidIdentifier {
        /// Identifier kind, for example `card` or `list`.
        kind: &'static str,
        /// Rejected raw value.
        value: String,
    },

    /// The API key is empty after trimming.
    #[error("board service API key must not be empty")]
    EmptyApiKey,

    /// The API token is empty after trimming.
    #[error("board service API token must not be empty")]
    EmptyApiToken,
}
