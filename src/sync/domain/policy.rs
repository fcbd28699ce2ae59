//! Creation trigger and per-axis status policies.

use super::{ConfigurationError, StatusAxis};
use crate::board::domain::ListId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// When a card is created for an eligible record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreationTrigger {
    /// Cards are never created automatically.
    #[serde(rename = "never")]
    Never,
    /// Cards are created when a record is added.
    #[serde(rename = "added")]
    OnAdded,
    /// Cards are created when a record is published.
    #[default]
    #[serde(rename = "published")]
    OnPublished,
}

impl CreationTrigger {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Never => "never",
            Self::OnAdded => "added",
            Self::OnPublished => "published",
        }
    }

    /// Returns `true` when cards are created without operator action.
    #[must_use]
    pub const fn is_automatic(self) -> bool {
        !matches!(self, Self::Never)
    }
}

impl fmt::Display for CreationTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Persisted action selector for a status axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusActionKind {
    /// Leave the card alone.
    #[default]
    NoAction,
    /// Move the card to another list.
    Move,
    /// Archive the card.
    Archive,
    /// Delete the card irreversibly.
    Delete,
}

impl StatusActionKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoAction => "no_action",
            Self::Move => "move",
            Self::Archive => "archive",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for StatusActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolved card action for a status transition.
///
/// Each variant carries exactly the data it needs, so a move without a
/// target list cannot be represented.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum StatusAction {
    /// Leave the card alone.
    #[default]
    NoAction,
    /// Move the card to `target`.
    Move {
        /// List receiving the card.
        target: ListId,
    },
    /// Archive the card.
    Archive {
        /// Restore the card when the transition is reversed.
        restore_on_reverse: bool,
    },
    /// Delete the card irreversibly.
    Delete,
}

impl StatusAction {
    /// Returns the persisted selector for this action.
    #[must_use]
    pub const fn kind(&self) -> StatusActionKind {
        match self {
            Self::NoAction => StatusActionKind::NoAction,
            Self::Move { .. } => StatusActionKind::Move,
            Self::Archive { .. } => StatusActionKind::Archive,
            Self::Delete => StatusActionKind::Delete,
        }
    }
}

/// Card policy for one status axis.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatusPolicy {
    axis: StatusAxis,
    action: StatusAction,
}

impl StatusPolicy {
    /// Creates a validated policy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::RestoreOnIrreversibleAxis`] when an
    /// archive policy asks for restoration on the deleted axis.
    pub fn new(axis: StatusAxis, action: StatusAction) -> Result<Self, ConfigurationError> {
        if !axis.is_reversible()
            && matches!(
                action,
                StatusAction::Archive {
                    restore_on_reverse: true
                }
            )
        {
            return Err(ConfigurationError::RestoreOnIrreversibleAxis { axis });
        }
        Ok(Self { axis, action })
    }

    /// Creates a policy that leaves the card alone.
    #[must_use]
    pub const fn no_action(axis: StatusAxis) -> Self {
        Self {
            axis,
            action: StatusAction::NoAction,
        }
    }

    /// Returns the axis this policy applies to.
    #[must_use]
    pub const fn axis(&self) -> StatusAxis {
        self.axis
    }

    /// Returns the resolved action.
    #[must_use]
    pub const fn action(&self) -> &StatusAction {
        &self.action
    }

    /// Returns the target list of a move policy.
    #[must_use]
    pub const fn target_list(&self) -> Option<&ListId> {
        match &self.action {
            StatusAction::Move { target } => Some(target),
            _ => None,
        }
    }

    /// Returns `true` when reversing the transition restores the card.
    ///
    /// Only archive policies can restore.
    #[must_use]
    pub const fn restore_on_reverse(&self) -> bool {
        matches!(
            self.action,
            StatusAction::Archive {
                restore_on_reverse: true
            }
        )
    }
}

/// Exactly one policy per status axis.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatusPolicies {
    hidden: StatusPolicy,
    unpublished: StatusPolicy,
    trashed: StatusPolicy,
    deleted: StatusPolicy,
}

impl Default for StatusPolicies {
    fn default() -> Self {
        Self {
            hidden: StatusPolicy::no_action(StatusAxis::Hidden),
            unpublished: StatusPolicy::no_action(StatusAxis::Unpublished),
            trashed: StatusPolicy::no_action(StatusAxis::Trashed),
            deleted: StatusPolicy::no_action(StatusAxis::Deleted),
        }
    }
}

impl StatusPolicies {
    /// Replaces the policy for the policy's axis.
    #[must_use]
    pub fn with_policy(mut self, policy: StatusPolicy) -> Self {
        let axis = policy.axis();
        *self.slot_mut(axis) = policy;
        self
    }

    /// Returns the policy for an axis.
    #[must_use]
    pub const fn get(&self, axis: StatusAxis) -> &StatusPolicy {
        match axis {
            StatusAxis::Hidden => &self.hidden,
            StatusAxis::Unpublished => &self.unpublished,
            StatusAxis::Trashed => &self.trashed,
            StatusAxis::Deleted => &self.deleted,
        }
    }

    const fn slot_mut(&mut self, axis: StatusAxis) -> &mut StatusPolicy {
        match axis {
            StatusAxis::Hidden => &mut self.hidden,
            StatusAxis::Unpublished => &mut self.unpublished,
            StatusAxis::Trashed => &mut self.trashed,
            StatusAxis::Deleted => &mut self.deleted,
        }
    }
}
