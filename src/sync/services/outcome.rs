//! Results of applying one normalised event.

use crate::board::domain::{CardId, ChecklistId, ListId};
use std::fmt;

/// What the engine did for an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No board-service call was made.
    Skipped(SkipReason),
    /// A card was created and associated with the record.
    Created {
        /// New card.
        card_id: CardId,
        /// Checklist results, when a checklist is configured.
        checklist: Option<ChecklistReport>,
    },
    /// Title and body were refreshed.
    Updated {
        /// Updated card.
        card_id: CardId,
    },
    /// The card was moved to another list.
    Moved {
        /// Moved card.
        card_id: CardId,
        /// Destination list.
        list_id: ListId,
    },
    /// The card was archived.
    Archived {
        /// Archived card.
        card_id: CardId,
    },
    /// The card was restored from the archive.
    Restored {
        /// Restored card.
        card_id: CardId,
    },
    /// The card was deleted and the association removed.
    Deleted {
        /// Deleted card.
        card_id: CardId,
    },
    /// The record is gone; its association was dropped without touching
    /// the card.
    Released {
        /// Card left on the board.
        card_id: CardId,
    },
}

impl SyncOutcome {
    /// Returns the card acted upon, if any.
    #[must_use]
    pub const fn card_id(&self) -> Option<&CardId> {
        match self {
            Self::Skipped(_) => None,
            Self::Created { card_id, .. }
            | Self::Updated { card_id }
            | Self::Moved { card_id, .. }
            | Self::Archived { card_id }
            | Self::Restored { card_id }
            | Self::Deleted { card_id }
            | Self::Released { card_id } => Some(card_id),
        }
    }

    /// Returns `true` when the event was skipped.
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }
}

/// Why an event produced no board-service call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Synchronisation is switched off.
    Inactive,
    /// The record's template is not eligible.
    TemplateNotEnabled,
    /// The creation trigger does not match this event.
    TriggerNotConfigured,
    /// The record already has a card.
    AlreadyAssociated,
    /// The record has no card to act on.
    NoAssociation,
    /// Record edits are not propagated.
    UpdatesDisabled,
    /// The axis policy is `NoAction`, or the update carries no fields.
    NoAction,
    /// The reverse transition does not restore under this policy.
    NotRestorable,
}

impl SkipReason {
    /// Returns a stable label for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::TemplateNotEnabled => "template_not_enabled",
            Self::TriggerNotConfigured => "trigger_not_configured",
            Self::AlreadyAssociated => "already_associated",
            Self::NoAssociation => "no_association",
            Self::UpdatesDisabled => "updates_disabled",
            Self::NoAction => "no_action",
            Self::NotRestorable => "not_restorable",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One checklist step that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistFailure {
    /// Zero-based item position, or `None` for the checklist itself.
    pub item_index: Option<usize>,
    /// Diagnostic from the renderer or board service.
    pub reason: String,
}

/// Per-item results of populating a new card's checklist.
///
/// Failures never roll back the card or earlier items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecklistReport {
    checklist_id: Option<ChecklistId>,
    added: usize,
    failures: Vec<ChecklistFailure>,
}

impl ChecklistReport {
    /// Report for a checklist that could not be created at all.
    #[must_use]
    pub fn checklist_failed(reason: impl Into<String>) -> Self {
        Self {
            checklist_id: None,
            added: 0,
            failures: vec![ChecklistFailure {
                item_index: None,
                reason: reason.into(),
            }],
        }
    }

    /// Starts a report for a created checklist.
    #[must_use]
    pub const fn for_checklist(checklist_id: ChecklistId) -> Self {
        Self {
            checklist_id: Some(checklist_id),
            added: 0,
            failures: Vec::new(),
        }
    }

    pub(crate) const fn record_added(&mut self) {
        self.added += 1;
    }

    pub(crate) fn record_failure(&mut self, item_index: usize, reason: impl Into<String>) {
        self.failures.push(ChecklistFailure {
            item_index: Some(item_index),
            reason: reason.into(),
        });
    }

    /// Returns the created checklist, if any.
    #[must_use]
    pub const fn checklist_id(&self) -> Option<&ChecklistId> {
        self.checklist_id.as_ref()
    }

    /// Returns the number of items added.
    #[must_use]
    pub const fn added(&self) -> usize {
        self.added
    }

    /// Returns the failed steps in order.
    #[must_use]
    pub fn failures(&self) -> &[ChecklistFailure] {
        &self.failures
    }

    /// Returns `true` when every step succeeded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.checklist_id.is_some() && self.failures.is_empty()
    }
}
