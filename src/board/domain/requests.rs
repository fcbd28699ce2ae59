//! Request payloads for card mutations.
//!
//! Payloads render into the flat `name=value` parameter lists the board
//! service expects for `POST` and `PUT` requests.

use super::{LabelId, ListId};
use std::collections::BTreeMap;

/// Payload for creating a card in a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCard {
    list_id: ListId,
    name: String,
    desc: String,
    label_ids: Vec<LabelId>,
    extra: BTreeMap<String, String>,
}

impl NewCard {
    /// Creates a payload with the target list and card title.
    #[must_use]
    pub fn new(list_id: ListId, name: impl Into<String>) -> Self {
        Self {
            list_id,
            name: name.into(),
            desc: String::new(),
            label_ids: Vec::new(),
            extra: BTreeMap::new(),
        }
    }

    /// Sets the card description.
    #[must_use]
    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = desc.into();
        self
    }

    /// Sets labels attached at creation time.
    #[must_use]
    pub fn with_labels(mut self, label_ids: impl IntoIterator<Item = LabelId>) -> Self {
        self.label_ids = label_ids.into_iter().collect();
        self
    }

    /// Adds an extra field passed through to the board service verbatim.
    ///
    /// Core fields (`name`, `desc`, `idList`) always win over extras with
    /// the same key.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Returns the target list.
    #[must_use]
    pub const fn list_id(&self) -> &ListId {
        &self.list_id
    }

    /// Returns the card title.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the card description.
    #[must_use]
    pub fn desc(&self) -> &str {
        &self.desc
    }

    /// Returns the labels attached at creation time.
    #[must_use]
    pub fn label_ids(&self) -> &[LabelId] {
        &self.label_ids
    }

    /// Renders the payload as request parameters.
    #[must_use]
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut fields = self.extra.clone();
        if !self.label_ids.is_empty() {
            fields.insert("idLabels".to_owned(), join_ids(&self.label_ids));
        }
        fields.insert("name".to_owned(), self.name.clone());
        fields.insert("desc".to_owned(), self.desc.clone());
        fields.insert("idList".to_owned(), self.list_id.to_string());
        fields.into_iter().collect()
    }
}

/// Partial update of an existing card. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardUpdate {
    name: Option<String>,
    desc: Option<String>,
    list_id: Option<ListId>,
    closed: Option<bool>,
    extra: BTreeMap<String, String>,
}

impl CardUpdate {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the card title. Blank titles are ignored.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = non_blank(name.into());
        self
    }

    /// Replaces the card description. Blank descriptions are ignored.
    #[must_use]
    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = non_blank(desc.into());
        self
    }

    /// Moves the card to another list.
    #[must_use]
    pub fn with_list(mut self, list_id: ListId) -> Self {
        self.list_id = Some(list_id);
        self
    }

    /// Archives (`true`) or restores (`false`) the card.
    #[must_use]
    pub const fn with_closed(mut self, closed: bool) -> Self {
        self.closed = Some(closed);
        self
    }

    /// Adds an extra field passed through to the board service verbatim.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Returns the new list, if the update moves the card.
    #[must_use]
    pub const fn list_id(&self) -> Option<&ListId> {
        self.list_id.as_ref()
    }

    /// Returns the new archive flag, if the update changes it.
    #[must_use]
    pub const fn closed(&self) -> Option<bool> {
        self.closed
    }

    /// Returns the new title, if set.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the new description, if set.
    #[must_use]
    pub fn desc(&self) -> Option<&str> {
        self.desc.as_deref()
    }

    /// Returns `true` when the update carries no field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.desc.is_none()
            && self.list_id.is_none()
            && self.closed.is_none()
            && self.extra.is_empty()
    }

    /// Renders the update as request parameters.
    #[must_use]
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut fields = self.extra.clone();
        if let Some(name) = &self.name {
            fields.insert("name".to_owned(), name.clone());
        }
        if let Some(desc) = &self.desc {
            fields.insert("desc".to_owned(), desc.clone());
        }
        if let Some(list_id) = &self.list_id {
            fields.insert("idList".to_owned(), list_id.to_string());
        }
        if let Some(closed) = self.closed {
            fields.insert("closed".to_owned(), closed.to_string());
        }
        fields.into_iter().collect()
    }
}

/// Position of a new checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckItemPosition {
    /// Before all existing items.
    Top,
    /// After all existing items.
    Bottom,
    /// Explicit numeric position.
    At(u32),
}

impl CheckItemPosition {
    /// Returns the parameter value understood by the board service.
    #[must_use]
    pub fn as_param(self) -> String {
        match self {
            Self::Top => "top".to_owned(),
            Self::Bottom => "bottom".to_owned(),
            Self::At(position) => position.to_string(),
        }
    }
}

/// Payload for adding one item to a checklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCheckItem {
    name: String,
    checked: bool,
    position: CheckItemPosition,
}

impl NewCheckItem {
    /// Creates an unchecked item appended at the bottom.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            checked: false,
            position: CheckItemPosition::Bottom,
        }
    }

    /// Sets the checked flag.
    #[must_use]
    pub const fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Sets the item position.
    #[must_use]
    pub const fn with_position(mut self, position: CheckItemPosition) -> Self {
        self.position = position;
        self
    }

    /// Returns the item text.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the checked flag.
    #[must_use]
    pub const fn checked(&self) -> bool {
        self.checked
    }

    /// Returns the item position.
    #[must_use]
    pub const fn position(&self) -> CheckItemPosition {
        self.position
    }

    /// Renders the item as request parameters.
    #[must_use]
    pub fn to_params(&self) -> Vec<(String, String)> {
        vec![
            ("name".to_owned(), self.name.clone()),
            ("checked".to_owned(), self.checked.to_string()),
            ("pos".to_owned(), self.position.as_param()),
        ]
    }
}

fn join_ids(ids: &[LabelId]) -> String {
    ids.iter()
        .map(LabelId::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

fn non_blank(value: String) -> Option<String> {
    (!value.trim().is_empty()).then_some(value)
}
