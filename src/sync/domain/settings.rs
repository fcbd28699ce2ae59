//! Persisted configuration as stored by the host.
//!
//! [`SyncSettings`] mirrors the persisted key/value bag one-to-one and is
//! never consulted directly by the engine; it is resolved once into a
//! [`super::TriggerConfiguration`].

use super::{ConfigurationError, CreationTrigger, StatusActionKind, StatusAxis};
use super::blueprint::{DEFAULT_BODY_TEMPLATE, DEFAULT_CHECKLIST_TITLE, DEFAULT_TITLE_TEMPLATE};
use crate::board::domain::BoardCredentials;
use serde::{Deserialize, Serialize};

/// Raw persisted settings.
///
/// Missing keys fall back to the installation defaults: active, cards
/// created on publish, title from the record title, body from the record
/// URL, trashed records archive their card and restore it when untrashed,
/// deleted records archive their card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SyncSettings {
    /// Master switch for all automatic operations.
    #[serde(alias = "TrelloWireActive")]
    pub active: bool,
    /// Board-service API key.
    pub api_key: String,
    /// Board-service API token.
    pub api_token: String,
    /// Alternative API base URL.
    pub api_base: Option<String>,
    /// Default board for new cards.
    pub target_board: String,
    /// Default list for new cards.
    pub target_list: String,
    /// Templates whose records get cards.
    #[serde(alias = "TrelloWireTemplates")]
    pub templates: Vec<String>,
    /// Title template for new cards.
    pub card_title: String,
    /// Body template for new cards.
    pub card_body: String,
    /// Labels attached to new cards.
    pub card_labels: Vec<String>,
    /// Newline-separated checklist item templates.
    pub card_checklist_items: String,
    /// Checklist title template.
    pub card_checklist_title: String,
    /// When cards are created.
    pub card_creation_trigger: CreationTrigger,
    /// Propagate record edits to the card title and body.
    pub card_update: bool,
    /// Action when a record is hidden.
    pub status_change_hidden: StatusActionKind,
    /// Move target when a record is hidden.
    pub move_list_target_hidden: String,
    /// Restore the card when a record is unhidden.
    pub restore_on_reverse_hidden: bool,
    /// Action when a record is unpublished.
    pub status_change_unpublished: StatusActionKind,
    /// Move target when a record is unpublished.
    pub move_list_target_unpublished: String,
    /// Restore the card when a record is published again.
    pub restore_on_reverse_unpublished: bool,
    /// Action when a record is trashed.
    pub status_change_trashed: StatusActionKind,
    /// Move target when a record is trashed.
    pub move_list_target_trashed: String,
    /// Restore the card when a record is restored from the trash.
    pub restore_on_reverse_trashed: bool,
    /// Action when a record is deleted.
    pub status_change_deleted: StatusActionKind,
    /// Move target when a record is deleted.
    pub move_list_target_deleted: String,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            active: true,
            api_key: String::new(),
            api_token: String::new(),
            api_base: None,
            target_board: String::new(),
            target_list: String::new(),
            templates: Vec::new(),
            card_title: DEFAULT_TITLE_TEMPLATE.to_owned(),
            card_body: DEFAULT_BODY_TEMPLATE.to_owned(),
            card_labels: Vec::new(),
            card_checklist_items: String::new(),
            card_checklist_title: DEFAULT_CHECKLIST_TITLE.to_owned(),
            card_creation_trigger: CreationTrigger::OnPublished,
            card_update: false,
            status_change_hidden: StatusActionKind::NoAction,
            move_list_target_hidden: String::new(),
            restore_on_reverse_hidden: false,
            status_change_unpublished: StatusActionKind::NoAction,
            move_list_target_unpublished: String::new(),
            restore_on_reverse_unpublished: false,
            status_change_trashed: StatusActionKind::Archive,
            move_list_target_trashed: String::new(),
            restore_on_reverse_trashed: true,
            status_change_deleted: StatusActionKind::Archive,
            move_list_target_deleted: String::new(),
        }
    }
}

/// Raw policy triple for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawStatusPolicy<'a> {
    pub(crate) kind: StatusActionKind,
    pub(crate) move_target: &'a str,
    pub(crate) restore_on_reverse: bool,
    pub(crate) setting: &'static str,
}

impl SyncSettings {
    /// Returns validated board-service credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingCredentials`] when the key or
    /// token is blank.
    pub fn credentials(&self) -> Result<BoardCredentials, ConfigurationError> {
        BoardCredentials::new(self.api_key.as_str(), self.api_token.as_str())
            .map_err(|_| ConfigurationError::MissingCredentials)
    }

    pub(crate) fn raw_policy(&self, axis: StatusAxis) -> RawStatusPolicy<'_> {
        match axis {
            StatusAxis::Hidden => RawStatusPolicy {
                kind: self.status_change_hidden,
                move_target: self.move_list_target_hidden.as_str(),
                restore_on_reverse: self.restore_on_reverse_hidden,
                setting: "MoveListTargetHidden",
            },
            StatusAxis::Unpublished => RawStatusPolicy {
                kind: self.status_change_unpublished,
                move_target: self.move_list_target_unpublished.as_str(),
                restore_on_reverse: self.restore_on_reverse_unpublished,
                setting: "MoveListTargetUnpublished",
            },
            StatusAxis::Trashed => RawStatusPolicy {
                kind: self.status_change_trashed,
                move_target: self.move_list_target_trashed.as_str(),
                restore_on_reverse: self.restore_on_reverse_trashed,
                setting: "MoveListTargetTrashed",
            },
            StatusAxis::Deleted => RawStatusPolicy {
                kind: self.status_change_deleted,
                move_target: self.move_list_target_deleted.as_str(),
                restore_on_reverse: false,
                setting: "MoveListTargetDeleted",
            },
        }
    }
}
