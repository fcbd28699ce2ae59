//! Normalised content-lifecycle events.

use super::{RecordId, RecordStatus, StatusAxis, TemplateName};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of content-lifecycle event understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Record was created.
    Added,
    /// Record was saved with changes.
    Updated,
    /// Record became published.
    Published,
    /// Record became unpublished.
    Unpublished,
    /// Record became hidden.
    Hidden,
    /// Record became visible again.
    Unhidden,
    /// Record was moved to the trash.
    Trashed,
    /// Record was restored from the trash.
    Untrashed,
    /// Record was deleted permanently.
    Deleted,
}

/// Status transition carried by an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusTransition {
    /// Axis the transition belongs to.
    pub axis: StatusAxis,
    /// `true` when the transition undoes a previous forward transition.
    pub is_reverse: bool,
}

impl EventKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Updated => "updated",
            Self::Published => "published",
            Self::Unpublished => "unpublished",
            Self::Hidden => "hidden",
            Self::Unhidden => "unhidden",
            Self::Trashed => "trashed",
            Self::Untrashed => "untrashed",
            Self::Deleted => "deleted",
        }
    }

    /// Returns the status transition this event represents, if any.
    ///
    /// Publishing is the reverse of unpublishing.
    #[must_use]
    pub const fn status_transition(self) -> Option<StatusTransition> {
        let (axis, is_reverse) = match self {
            Self::Added | Self::Updated => return None,
            Self::Hidden => (StatusAxis::Hidden, false),
            Self::Unhidden => (StatusAxis::Hidden, true),
            Self::Unpublished => (StatusAxis::Unpublished, false),
            Self::Published => (StatusAxis::Unpublished, true),
            Self::Trashed => (StatusAxis::Trashed, false),
            Self::Untrashed => (StatusAxis::Trashed, true),
            Self::Deleted => (StatusAxis::Deleted, false),
        };
        Some(StatusTransition { axis, is_reverse })
    }

    /// Returns the event for a flipped status flag.
    ///
    /// `now_set` is the flag value after the transition.
    #[must_use]
    pub const fn for_flag_change(axis: StatusAxis, now_set: bool) -> Self {
        match (axis, now_set) {
            (StatusAxis::Hidden, true) => Self::Hidden,
            (StatusAxis::Hidden, false) => Self::Unhidden,
            (StatusAxis::Unpublished, true) => Self::Unpublished,
            (StatusAxis::Unpublished, false) => Self::Published,
            (StatusAxis::Trashed, true) => Self::Trashed,
            (StatusAxis::Trashed, false) => Self::Untrashed,
            (StatusAxis::Deleted, _) => Self::Deleted,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Content-lifecycle event for one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEvent {
    record_id: RecordId,
    template: TemplateName,
    kind: EventKind,
    prior_status: Option<RecordStatus>,
}

impl ContentEvent {
    /// Creates an event without prior status.
    #[must_use]
    pub const fn new(record_id: RecordId, template: TemplateName, kind: EventKind) -> Self {
        Self {
            record_id,
            template,
            kind,
            prior_status: None,
        }
    }

    /// Attaches the status the record had before the transition.
    #[must_use]
    pub const fn with_prior_status(mut self, status: RecordStatus) -> Self {
        self.prior_status = Some(status);
        self
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn record_id(&self) -> &RecordId {
        &self.record_id
    }

    /// Returns the record's template.
    #[must_use]
    pub const fn template(&self) -> &TemplateName {
        &self.template
    }

    /// Returns the event kind.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        self.kind
    }

    /// Returns the status before the transition, if known.
    #[must_use]
    pub const fn prior_status(&self) -> Option<RecordStatus> {
        self.prior_status
    }
}
