//! Identifier types for board-service objects.
//!
//! The remote service issues opaque string identifiers. They are embedded
//! in request paths, so whitespace and `/` are rejected up front.

use super::BoardDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

fn validate(kind: &'static str, raw: String) -> Result<String, BoardDomainError> {
    let normalized = raw.trim();
    if normalized.is_empty() {
        return Err(BoardDomainError::EmptyIdentifier { kind });
    }
    if normalized
        .chars()
        .any(|ch| ch.is_whitespace() || ch == '/' || ch == '?' || ch == '#')
    {
        return Err(BoardDomainError::InvalidIdentifier { kind, value: raw });
    }
    Ok(normalized.to_owned())
}

macro_rules! board_identifier {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a validated identifier.
            ///
            /// # Errors
            ///
            /// Returns [`BoardDomainError`] when the value is empty or
            /// contains whitespace or URL delimiters.
            pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
                validate($kind, value.into()).map(Self)
            }

            /// Returns the identifier as `str`.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = BoardDomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

board_identifier!(
    /// Identifier of a board.
    BoardId,
    "board"
);

board_identifier!(
    /// Identifier of a list inside a board.
    ListId,
    "list"
);

board_identifier!(
    /// Identifier of a label defined on a board.
    LabelId,
    "label"
);

board_identifier!(
    /// Identifier of a card.
    CardId,
    "card"
);

board_identifier!(
    /// Identifier of a checklist attached to a card.
    ChecklistId,
    "checklist"
);
