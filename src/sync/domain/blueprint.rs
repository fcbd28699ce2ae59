//! Content templates for newly created cards.

use crate::board::domain::{LabelId, ListId};

/// Default title template: the record title.
pub const DEFAULT_TITLE_TEMPLATE: &str = "{{ title }}";
/// Default body template: the record's public URL.
pub const DEFAULT_BODY_TEMPLATE: &str = "{{ url }}";
/// Default checklist title.
pub const DEFAULT_CHECKLIST_TITLE: &str = "Checklist";

/// Predefined checklist added to every new card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistTemplate {
    title_template: String,
    item_templates: Vec<String>,
}

impl ChecklistTemplate {
    /// Creates a checklist template, dropping blank items.
    ///
    /// Returns `None` when no item remains.
    #[must_use]
    pub fn new(
        title_template: impl Into<String>,
        item_templates: impl IntoIterator<Item = String>,
    ) -> Option<Self> {
        let items: Vec<String> = item_templates
            .into_iter()
            .map(|item| item.trim().to_owned())
            .filter(|item| !item.is_empty())
            .collect();
        if items.is_empty() {
            return None;
        }
        let raw_title = title_template.into();
        let title = if raw_title.trim().is_empty() {
            DEFAULT_CHECKLIST_TITLE.to_owned()
        } else {
            raw_title
        };
        Some(Self {
            title_template: title,
            item_templates: items,
        })
    }

    /// Creates a checklist template from newline-separated items.
    #[must_use]
    pub fn from_lines(title_template: impl Into<String>, lines: &str) -> Option<Self> {
        Self::new(title_template, lines.lines().map(str::to_owned))
    }

    /// Returns the checklist title template.
    #[must_use]
    pub fn title_template(&self) -> &str {
        &self.title_template
    }

    /// Returns the item templates, in order.
    #[must_use]
    pub fn item_templates(&self) -> &[String] {
        &self.item_templates
    }
}

/// Where new cards go and what they contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardBlueprint {
    target_list: Option<ListId>,
    title_template: String,
    body_template: String,
    label_ids: Vec<LabelId>,
    checklist: Option<ChecklistTemplate>,
}

impl Default for CardBlueprint {
    fn default() -> Self {
        Self {
            target_list: None,
            title_template: DEFAULT_TITLE_TEMPLATE.to_owned(),
            body_template: DEFAULT_BODY_TEMPLATE.to_owned(),
            label_ids: Vec::new(),
            checklist: None,
        }
    }
}

impl CardBlueprint {
    /// Creates a blueprint placing cards in `target_list`.
    #[must_use]
    pub fn new(target_list: ListId) -> Self {
        Self {
            target_list: Some(target_list),
            ..Self::default()
        }
    }

    /// Sets the target list.
    #[must_use]
    pub fn with_target_list(mut self, target_list: Option<ListId>) -> Self {
        self.target_list = target_list;
        self
    }

    /// Sets the title template.
    #[must_use]
    pub fn with_title_template(mut self, template: impl Into<String>) -> Self {
        self.title_template = template.into();
        self
    }

    /// Sets the body template.
    #[must_use]
    pub fn with_body_template(mut self, template: impl Into<String>) -> Self {
        self.body_template = template.into();
        self
    }

    /// Sets labels attached to new cards.
    #[must_use]
    pub fn with_labels(mut self, label_ids: impl IntoIterator<Item = LabelId>) -> Self {
        self.label_ids = label_ids.into_iter().collect();
        self
    }

    /// Sets the checklist added to new cards.
    #[must_use]
    pub fn with_checklist(mut self, checklist: Option<ChecklistTemplate>) -> Self {
        self.checklist = checklist;
        self
    }

    /// Returns the list new cards are created in.
    #[must_use]
    pub const fn target_list(&self) -> Option<&ListId> {
        self.target_list.as_ref()
    }

    /// Returns the title template.
    #[must_use]
    pub fn title_template(&self) -> &str {
        &self.title_template
    }

    /// Returns the body template.
    #[must_use]
    pub fn body_template(&self) -> &str {
        &self.body_template
    }

    /// Returns labels attached to new cards.
    #[must_use]
    pub fn label_ids(&self) -> &[LabelId] {
        &self.label_ids
    }

    /// Returns the checklist added to new cards.
    #[must_use]
    pub const fn checklist(&self) -> Option<&ChecklistTemplate> {
        self.checklist.as_ref()
    }
}
