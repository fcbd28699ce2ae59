//! Models decoded from board-service responses.
//!
//! Only the fields Cardwire reads are modelled; unknown fields are ignored
//! during deserialisation.

use super::{BoardId, CardId, ChecklistId, LabelId, ListId};
use serde::{Deserialize, Serialize};

/// Board owned by the member behind the API token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Board identifier.
    pub id: BoardId,
    /// Board display name.
    pub name: String,
}

/// List inside a board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardList {
    /// List identifier.
    pub id: ListId,
    /// List display name.
    pub name: String,
    /// Ordering position inside the board.
    #[serde(default)]
    pub pos: f64,
}

/// Label defined on a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Label identifier.
    pub id: LabelId,
    /// Label name, empty for colour-only labels.
    #[serde(default)]
    pub name: String,
    /// Label colour, absent for colourless labels.
    #[serde(default)]
    pub color: Option<String>,
}

impl Label {
    /// Returns a human-readable label description.
    ///
    /// Uses `name (color)` when both are present and falls back to
    /// whichever one is set.
    #[must_use]
    pub fn display_name(&self) -> String {
        match (self.name.is_empty(), self.color.as_deref()) {
            (false, Some(color)) if !color.is_empty() => format!("{} ({color})", self.name),
            (true, Some(color)) => color.to_owned(),
            _ => self.name.clone(),
        }
    }
}

/// Card as returned by the board service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Card identifier.
    pub id: CardId,
    /// Card title.
    #[serde(default)]
    pub name: String,
    /// Card description (Markdown).
    #[serde(default)]
    pub desc: String,
    /// List currently holding the card.
    pub id_list: ListId,
    /// Whether the card is archived.
    #[serde(default)]
    pub closed: bool,
    /// Labels attached to the card.
    #[serde(default)]
    pub id_labels: Vec<LabelId>,
    /// Short link to the card, when requested.
    #[serde(default)]
    pub short_url: Option<String>,
}

/// Comment action created on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardComment {
    /// Action identifier of the comment.
    pub id: String,
}

/// Checklist attached to a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checklist {
    /// Checklist identifier.
    pub id: ChecklistId,
    /// Checklist title.
    #[serde(default)]
    pub name: String,
    /// Card owning the checklist.
    pub id_card: CardId,
    /// Items already present on the checklist.
    #[serde(default)]
    pub check_items: Vec<CheckItem>,
}

/// Completion state of a checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckItemState {
    /// Item is not yet checked.
    Incomplete,
    /// Item is checked.
    Complete,
}

impl CheckItemState {
    /// Maps a checked flag onto the remote state vocabulary.
    #[must_use]
    pub const fn from_checked(checked: bool) -> Self {
        if checked {
            Self::Complete
        } else {
            Self::Incomplete
        }
    }
}

/// Single checklist item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckItem {
    /// Item identifier.
    pub id: String,
    /// Item text.
    #[serde(default)]
    pub name: String,
    /// Completion state.
    pub state: CheckItemState,
    /// Ordering position inside the checklist.
    #[serde(default)]
    pub pos: f64,
}
