//! Record-to-card association and its lifecycle state.

use super::{ParseCardStateError, RecordId};
use crate::board::domain::{Card, CardId, ListId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Local view of the associated card's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardState {
    /// Card is open on the board.
    Active,
    /// Card has been archived by the engine.
    Archived,
}

impl CardState {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }
}

impl TryFrom<&str> for CardState {
    type Error = ParseCardStateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "active" => Ok(Self::Active),
            "archived" => Ok(Self::Archived),
            _ => Err(ParseCardStateError(value.to_owned())),
        }
    }
}

/// Persistent link between one record and one card.
///
/// At most one association exists per record. The card id is the only
/// piece the engine strictly needs; list and state are a local mirror
/// used for logging and idempotent transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardAssociation {
    record_id: RecordId,
    card_id: CardId,
    list_id: ListId,
    state: CardState,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCardAssociation {
    /// Owning record.
    pub record_id: RecordId,
    /// Associated card.
    pub card_id: CardId,
    /// Last known list of the card.
    pub list_id: ListId,
    /// Last known card state.
    pub state: CardState,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest transition timestamp.
    pub updated_at: DateTime<Utc>,
}

impl CardAssociation {
    /// Associates a freshly created card with a record.
    #[must_use]
    pub fn new(record_id: RecordId, card: &Card, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        let state = if card.closed {
            CardState::Archived
        } else {
            CardState::Active
        };
        Self {
            record_id,
            card_id: card.id.clone(),
            list_id: card.id_list.clone(),
            state,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs an association from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCardAssociation) -> Self {
        Self {
            record_id: data.record_id,
            card_id: data.card_id,
            list_id: data.list_id,
            state: data.state,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the owning record.
    #[must_use]
    pub const fn record_id(&self) -> &RecordId {
        &self.record_id
    }

    /// Returns the associated card.
    #[must_use]
    pub const fn card_id(&self) -> &CardId {
        &self.card_id
    }

    /// Returns the last known list.
    #[must_use]
    pub const fn list_id(&self) -> &ListId {
        &self.list_id
    }

    /// Returns the last known state.
    #[must_use]
    pub const fn state(&self) -> CardState {
        self.state
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest transition timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Records that the card was archived. Returns `false` when it
    /// already was.
    pub fn mark_archived(&mut self, clock: &impl Clock) -> bool {
        self.transition_to(CardState::Archived, clock)
    }

    /// Records that the card was restored. Returns `false` when it was
    /// already active.
    pub fn mark_restored(&mut self, clock: &impl Clock) -> bool {
        self.transition_to(CardState::Active, clock)
    }

    /// Records that the card now lives in `list_id`.
    pub fn mark_moved(&mut self, list_id: ListId, clock: &impl Clock) {
        self.list_id = list_id;
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    pub fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }

    fn transition_to(&mut self, state: CardState, clock: &impl Clock) -> bool {
        if self.state == state {
            return false;
        }
        self.state = state;
        self.touch(clock);
        true
    }
}
