//! Status axes and record status flags.

use super::SyncDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four status-change categories carrying an independent
/// policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusAxis {
    /// Record hidden from listings.
    Hidden,
    /// Record unpublished.
    Unpublished,
    /// Record moved to the trash.
    Trashed,
    /// Record deleted permanently.
    Deleted,
}

impl StatusAxis {
    /// Every axis, in dispatch order.
    pub const ALL: [Self; 4] = [Self::Hidden, Self::Unpublished, Self::Trashed, Self::Deleted];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::Unpublished => "unpublished",
            Self::Trashed => "trashed",
            Self::Deleted => "deleted",
        }
    }

    /// Returns `true` when the host can undo a transition on this axis.
    ///
    /// Deletion is final, so only the deleted axis is irreversible.
    #[must_use]
    pub const fn is_reversible(self) -> bool {
        !matches!(self, Self::Deleted)
    }
}

impl TryFrom<&str> for StatusAxis {
    type Error = SyncDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "hidden" => Ok(Self::Hidden),
            "unpublished" => Ok(Self::Unpublished),
            "trashed" => Ok(Self::Trashed),
            "deleted" => Ok(Self::Deleted),
            _ => Err(SyncDomainError::UnknownStatusAxis(value.to_owned())),
        }
    }
}

impl fmt::Display for StatusAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status flags of a record at one point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordStatus {
    hidden: bool,
    unpublished: bool,
    trashed: bool,
}

impl RecordStatus {
    /// Creates a visible, published, untrashed status.
    #[must_use]
    pub const fn published() -> Self {
        Self {
            hidden: false,
            unpublished: false,
            trashed: false,
        }
    }

    /// Creates an unpublished status.
    #[must_use]
    pub const fn unpublished() -> Self {
        Self {
            hidden: false,
            unpublished: true,
            trashed: false,
        }
    }

    /// Sets the hidden flag.
    #[must_use]
    pub const fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Sets the unpublished flag.
    #[must_use]
    pub const fn with_unpublished(mut self, unpublished: bool) -> Self {
        self.unpublished = unpublished;
        self
    }

    /// Sets the trashed flag.
    #[must_use]
    pub const fn with_trashed(mut self, trashed: bool) -> Self {
        self.trashed = trashed;
        self
    }

    /// Returns the hidden flag.
    #[must_use]
    pub const fn is_hidden(self) -> bool {
        self.hidden
    }

    /// Returns the unpublished flag.
    #[must_use]
    pub const fn is_unpublished(self) -> bool {
        self.unpublished
    }

    /// Returns the trashed flag.
    #[must_use]
    pub const fn is_trashed(self) -> bool {
        self.trashed
    }

    /// Returns the flag tracked for an axis.
    ///
    /// The deleted axis has no flag: a deleted record has no status.
    #[must_use]
    pub const fn flag(self, axis: StatusAxis) -> Option<bool> {
        match axis {
            StatusAxis::Hidden => Some(self.hidden),
            StatusAxis::Unpublished => Some(self.unpublished),
            StatusAxis::Trashed => Some(self.trashed),
            StatusAxis::Deleted => None,
        }
    }
}
