//! Resolved, validated configuration consumed by the engine.

use super::settings::RawStatusPolicy;
use super::{
    CardBlueprint, ChecklistTemplate, ConfigurationError, CreationTrigger, StatusAction,
    StatusActionKind, StatusAxis, StatusPolicies, StatusPolicy, SyncSettings, TemplateName,
};
use crate::board::domain::{BoardDomainError, BoardId, LabelId, ListId};
use std::collections::BTreeSet;
use tracing::warn;

/// Validated per-installation configuration.
///
/// Built once from [`SyncSettings`] by [`TriggerConfiguration::resolve`];
/// every invariant (move policies name a list, automatic creation names a
/// list, restoration only on reversible archive policies) holds for any
/// value of this type obtained through `resolve`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerConfiguration {
    active: bool,
    enabled_templates: BTreeSet<TemplateName>,
    creation_trigger: CreationTrigger,
    update_on_edit: bool,
    policies: StatusPolicies,
    target_board: Option<BoardId>,
    blueprint: CardBlueprint,
}

impl TriggerConfiguration {
    /// Creates an active configuration with no eligible templates, no
    /// automatic creation and no status actions.
    #[must_use]
    pub fn new(blueprint: CardBlueprint) -> Self {
        Self {
            active: true,
            enabled_templates: BTreeSet::new(),
            creation_trigger: CreationTrigger::Never,
            update_on_edit: false,
            policies: StatusPolicies::default(),
            target_board: None,
            blueprint,
        }
    }

    /// Resolves persisted settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when a move policy has no target
    /// list, automatic creation has no target list, or an identifier or
    /// template name is malformed.
    pub fn resolve(settings: &SyncSettings) -> Result<Self, ConfigurationError> {
        let target_list = optional_id(&settings.target_list, "TargetList", ListId::new)?;
        let target_board = optional_id(&settings.target_board, "TargetBoard", BoardId::new)?;

        let trigger = settings.card_creation_trigger;
        if trigger.is_automatic() && target_list.is_none() {
            return Err(ConfigurationError::MissingTargetList { trigger });
        }

        let enabled_templates = settings
            .templates
            .iter()
            .filter(|name| !name.trim().is_empty())
            .map(TemplateName::new)
            .collect::<Result<BTreeSet<_>, _>>()?;

        let label_ids = settings
            .card_labels
            .iter()
            .filter(|label| !label.trim().is_empty())
            .map(LabelId::new)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|reason| ConfigurationError::InvalidIdentifier {
                setting: "CardLabels",
                reason,
            })?;

        let mut policies = StatusPolicies::default();
        for axis in StatusAxis::ALL {
            policies = policies.with_policy(resolve_policy(axis, settings.raw_policy(axis))?);
        }

        let blueprint = CardBlueprint::default()
            .with_target_list(target_list)
            .with_title_template(settings.card_title.as_str())
            .with_body_template(settings.card_body.as_str())
            .with_labels(label_ids)
            .with_checklist(ChecklistTemplate::from_lines(
                settings.card_checklist_title.as_str(),
                &settings.card_checklist_items,
            ));

        Ok(Self {
            active: settings.active,
            enabled_templates,
            creation_trigger: trigger,
            update_on_edit: settings.card_update,
            policies,
            target_board,
            blueprint,
        })
    }

    /// Enables or suspends all automatic operations.
    #[must_use]
    pub const fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Marks templates as eligible for cards.
    #[must_use]
    pub fn with_templates(mut self, templates: impl IntoIterator<Item = TemplateName>) -> Self {
        self.enabled_templates.extend(templates);
        self
    }

    /// Sets the creation trigger.
    #[must_use]
    pub const fn with_creation_trigger(mut self, trigger: CreationTrigger) -> Self {
        self.creation_trigger = trigger;
        self
    }

    /// Sets whether record edits update the card.
    #[must_use]
    pub const fn with_update_on_edit(mut self, update_on_edit: bool) -> Self {
        self.update_on_edit = update_on_edit;
        self
    }

    /// Replaces the policy for the policy's axis.
    #[must_use]
    pub fn with_policy(mut self, policy: StatusPolicy) -> Self {
        self.policies = self.policies.with_policy(policy);
        self
    }

    /// Sets the default board.
    #[must_use]
    pub fn with_target_board(mut self, board: BoardId) -> Self {
        self.target_board = Some(board);
        self
    }

    /// Returns `true` when automatic operations are enabled.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns `true` when records of `template` get cards.
    #[must_use]
    pub fn is_template_enabled(&self, template: &TemplateName) -> bool {
        self.enabled_templates.contains(template)
    }

    /// Returns the eligible templates.
    #[must_use]
    pub const fn enabled_templates(&self) -> &BTreeSet<TemplateName> {
        &self.enabled_templates
    }

    /// Returns the creation trigger.
    #[must_use]
    pub const fn creation_trigger(&self) -> CreationTrigger {
        self.creation_trigger
    }

    /// Returns `true` when record edits update the card.
    #[must_use]
    pub const fn update_on_edit(&self) -> bool {
        self.update_on_edit
    }

    /// Returns the policy for an axis.
    #[must_use]
    pub const fn policy(&self, axis: StatusAxis) -> &StatusPolicy {
        self.policies.get(axis)
    }

    /// Returns the default board, if configured.
    #[must_use]
    pub const fn target_board(&self) -> Option<&BoardId> {
        self.target_board.as_ref()
    }

    /// Returns the template for new cards.
    #[must_use]
    pub const fn blueprint(&self) -> &CardBlueprint {
        &self.blueprint
    }
}

fn optional_id<T>(
    raw: &str,
    setting: &'static str,
    parse: impl FnOnce(String) -> Result<T, BoardDomainError>,
) -> Result<Option<T>, ConfigurationError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse(raw.to_owned())
        .map(Some)
        .map_err(|reason| ConfigurationError::InvalidIdentifier { setting, reason })
}

fn resolve_policy(
    axis: StatusAxis,
    raw: RawStatusPolicy<'_>,
) -> Result<StatusPolicy, ConfigurationError> {
    if raw.restore_on_reverse && raw.kind != StatusActionKind::Archive {
        warn!(
            %axis,
            action = %raw.kind,
            "ignoring restore-on-reverse for a policy that does not archive"
        );
    }
    let action = match raw.kind {
        StatusActionKind::NoAction => StatusAction::NoAction,
        StatusActionKind::Move => StatusAction::Move {
            target: optional_id(raw.move_target, raw.setting, ListId::new)?
                .ok_or(ConfigurationError::MissingMoveTarget { axis })?,
        },
        StatusActionKind::Archive => StatusAction::Archive {
            restore_on_reverse: raw.restore_on_reverse && axis.is_reversible(),
        },
        StatusActionKind::Delete => StatusAction::Delete,
    };
    StatusPolicy::new(axis, action)
}
