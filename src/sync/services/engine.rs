//! Card-lifecycle policy engine.

use super::{CardSyncResult, ChecklistReport, RecordLocks, SkipReason, SyncOutcome};
use crate::board::domain::{CardId, CardUpdate, Checklist, ChecklistId, NewCard, NewCheckItem};
use crate::board::ports::BoardService;
use crate::sync::{
    domain::{
        CardAssociation, ChecklistTemplate, ConfigurationError, ContentEvent,
        CreationTrigger, RecordId, StatusAction, StatusAxis, TriggerConfiguration,
    },
    ports::{CardAssociationStore, CardRenderer},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Decides and applies card operations for normalised content events.
///
/// Each operation holds the record's lock from the association lookup
/// until the association write, and issues its board calls in between.
/// Board failures are returned to the caller; nothing is retried.
#[derive(Clone)]
pub struct CardLifecycleEngine<B, S, R, C>
where
    B: BoardService,
    S: CardAssociationStore,
    R: CardRenderer,
    C: Clock + Send + Sync,
{
    board: Arc<B>,
    store: Arc<S>,
    renderer: Arc<R>,
    clock: Arc<C>,
    config: TriggerConfiguration,
    locks: RecordLocks,
}

impl<B, S, R, C> CardLifecycleEngine<B, S, R, C>
where
    B: BoardService,
    S: CardAssociationStore,
    R: CardRenderer,
    C: Clock + Send + Sync,
{
    /// Creates an engine over injected collaborators.
    #[must_use]
    pub fn new(
        board: Arc<B>,
        store: Arc<S>,
        renderer: Arc<R>,
        clock: Arc<C>,
        config: TriggerConfiguration,
    ) -> Self {
        Self {
            board,
            store,
            renderer,
            clock,
            config,
            locks: RecordLocks::new(),
        }
    }

    /// Returns the resolved configuration.
    #[must_use]
    pub const fn config(&self) -> &TriggerConfiguration {
        &self.config
    }

    /// Handles a newly added record.
    ///
    /// Creates a card when the creation trigger is
    /// [`CreationTrigger::OnAdded`] and the record has none yet.
    ///
    /// # Errors
    ///
    /// Returns [`super::CardSyncError`] when rendering, card creation, or
    /// association storage fails. No association is stored unless the
    /// card was created. When storage fails after creation the card is left
    /// on the board without an association and its id is logged at error
    /// level for manual reconciliation; a later trigger creates a new card.
    pub async fn on_record_added(&self, event: &ContentEvent) -> CardSyncResult<SyncOutcome> {
        self.create_on_trigger(event, CreationTrigger::OnAdded).await
    }

    /// Handles a record becoming published.
    ///
    /// Creates a card when the creation trigger is
    /// [`CreationTrigger::OnPublished`] and the record has none yet.
    ///
    /// # Errors
    ///
    /// As for [`Self::on_record_added`].
    pub async fn on_record_published(&self, event: &ContentEvent) -> CardSyncResult<SyncOutcome> {
        self.create_on_trigger(event, CreationTrigger::OnPublished)
            .await
    }

    /// Handles an edit to a record.
    ///
    /// Refreshes the card title and body when updates are enabled. Never
    /// creates a card.
    ///
    /// # Errors
    ///
    /// Returns [`super::CardSyncError`] when rendering, the card update, or
    /// the association write fails.
    pub async fn on_record_updated(&self, event: &ContentEvent) -> CardSyncResult<SyncOutcome> {
        let record_id = event.record_id();
        if let Some(reason) = self.automatic_gate(event) {
            return Ok(skip(record_id, reason));
        }
        if !self.config.update_on_edit() {
            return Ok(skip(record_id, SkipReason::UpdatesDisabled));
        }

        let _guard = self.locks.acquire(record_id).await;
        let Some(mut association) = self.store.find_by_record(record_id).await? else {
            return Ok(skip(record_id, SkipReason::NoAssociation));
        };

        let blueprint = self.config.blueprint();
        let title = self.render(record_id, blueprint.title_template()).await?;
        let body = self.render(record_id, blueprint.body_template()).await?;
        let update = CardUpdate::new().with_name(title).with_desc(body);
        if update.is_empty() {
            return Ok(skip(record_id, SkipReason::NoAction));
        }

        let card_id = association.card_id().clone();
        self.board.update_card(&card_id, &update).await?;
        association.touch(&*self.clock);
        self.store.update(&association).await?;
        info!(record_id = %record_id, card_id = %card_id, "updated card");
        Ok(SyncOutcome::Updated { card_id })
    }

    /// Applies the policy for a status transition on `axis`.
    ///
    /// Forward transitions apply the axis action. A reverse transition
    /// only restores the card, and only when the axis archives with
    /// restore-on-reverse enabled; the forward action is never re-applied.
    /// The restore is sent even when the association is already active,
    /// since the remote card may have been archived after a failed write.
    /// Handling the `Deleted` axis always ends the association.
    ///
    /// # Errors
    ///
    /// Returns [`super::CardSyncError`] when the board call or association
    /// write fails. The association is left unchanged in that case.
    pub async fn on_status_changed(
        &self,
        event: &ContentEvent,
        axis: StatusAxis,
        is_reverse: bool,
    ) -> CardSyncResult<SyncOutcome> {
        let record_id = event.record_id();
        if !self.config.is_active() {
            return Ok(skip(record_id, SkipReason::Inactive));
        }

        let _guard = self.locks.acquire(record_id).await;
        let Some(association) = self.store.find_by_record(record_id).await? else {
            return Ok(skip(record_id, SkipReason::NoAssociation));
        };

        if is_reverse {
            self.restore(association, axis).await
        } else {
            self.apply_forward(association, axis).await
        }
    }

    /// Creates a card for a record regardless of the creation trigger.
    ///
    /// Returns [`SkipReason::AlreadyAssociated`] when the record already
    /// has a card.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingTargetList`] when no target
    /// list is configured, or the errors of [`Self::on_record_added`].
    pub async fn ensure_card(&self, record_id: &RecordId) -> CardSyncResult<SyncOutcome> {
        let _guard = self.locks.acquire(record_id).await;
        self.create_if_absent(record_id).await
    }

    fn automatic_gate(&self, event: &ContentEvent) -> Option<SkipReason> {
        if !self.config.is_active() {
            Some(SkipReason::Inactive)
        } else if !self.config.is_template_enabled(event.template()) {
            Some(SkipReason::TemplateNotEnabled)
        } else {
            None
        }
    }

    async fn create_on_trigger(
        &self,
        event: &ContentEvent,
        trigger: CreationTrigger,
    ) -> CardSyncResult<SyncOutcome> {
        let record_id = event.record_id();
        if let Some(reason) = self.automatic_gate(event) {
            return Ok(skip(record_id, reason));
        }
        if self.config.creation_trigger() != trigger {
            return Ok(skip(record_id, SkipReason::TriggerNotConfigured));
        }

        let _guard = self.locks.acquire(record_id).await;
        self.create_if_absent(record_id).await
    }

    async fn create_if_absent(&self, record_id: &RecordId) -> CardSyncResult<SyncOutcome> {
        if self.store.find_by_record(record_id).await?.is_some() {
            return Ok(skip(record_id, SkipReason::AlreadyAssociated));
        }

        let blueprint = self.config.blueprint();
        let list_id = blueprint
            .target_list()
            .ok_or(ConfigurationError::MissingTargetList {
                trigger: self.config.creation_trigger(),
            })?;
        let title = self.render(record_id, blueprint.title_template()).await?;
        let body = self.render(record_id, blueprint.body_template()).await?;
        let request = NewCard::new(list_id.clone(), title)
            .with_desc(body)
            .with_labels(blueprint.label_ids().iter().cloned());

        let card = self.board.create_card(&request).await?;
        let association = CardAssociation::new(record_id.clone(), &card, &*self.clock);
        if let Err(err) = self.store.store(&association).await {
            error!(
                record_id = %record_id,
                card_id = %card.id,
                error = %err,
                "card created but association not stored; card is orphaned"
            );
            return Err(err.into());
        }
        info!(
            record_id = %record_id,
            card_id = %card.id,
            list_id = %card.id_list,
            "created card"
        );

        let mut checklist = None;
        if let Some(template) = blueprint.checklist() {
            checklist = Some(self.populate_checklist(record_id, &card.id, template).await);
        }
        Ok(SyncOutcome::Created {
            card_id: card.id,
            checklist,
        })
    }

    async fn populate_checklist(
        &self,
        record_id: &RecordId,
        card_id: &CardId,
        template: &ChecklistTemplate,
    ) -> ChecklistReport {
        let checklist = match self.open_checklist(record_id, card_id, template).await {
            Ok(checklist) => checklist,
            Err(reason) => {
                warn!(card_id = %card_id, %reason, "failed to create checklist");
                return ChecklistReport::checklist_failed(reason);
            }
        };

        let mut report = ChecklistReport::for_checklist(checklist.id.clone());
        for (index, item_template) in template.item_templates().iter().enumerate() {
            let Err(reason) = self
                .add_checklist_item(record_id, &checklist.id, item_template)
                .await
            else {
                report.record_added();
                continue;
            };
            warn!(
                card_id = %card_id,
                checklist_id = %checklist.id,
                item = index,
                %reason,
                "failed to add checklist item"
            );
            report.record_failure(index, reason);
        }
        report
    }

    async fn open_checklist(
        &self,
        record_id: &RecordId,
        card_id: &CardId,
        template: &ChecklistTemplate,
    ) -> Result<Checklist, String> {
        let title = self
            .render(record_id, template.title_template())
            .await
            .map_err(|err| err.to_string())?;
        self.board
            .create_checklist(card_id, &title)
            .await
            .map_err(|err| err.to_string())
    }

    async fn add_checklist_item(
        &self,
        record_id: &RecordId,
        checklist_id: &ChecklistId,
        item_template: &str,
    ) -> Result<(), String> {
        let name = self
            .render(record_id, item_template)
            .await
            .map_err(|err| err.to_string())?;
        self.board
            .add_checklist_item(checklist_id, &NewCheckItem::new(name))
            .await
            .map(drop)
            .map_err(|err| err.to_string())
    }

    async fn restore(
        &self,
        mut association: CardAssociation,
        axis: StatusAxis,
    ) -> CardSyncResult<SyncOutcome> {
        let record_id = association.record_id().clone();
        if !self.config.policy(axis).restore_on_reverse() {
            return Ok(skip(&record_id, SkipReason::NotRestorable));
        }

        let card_id = association.card_id().clone();
        self.board.restore_card(&card_id).await?;
        association.mark_restored(&*self.clock);
        self.store.update(&association).await?;
        info!(record_id = %record_id, card_id = %card_id, %axis, "restored card");
        Ok(SyncOutcome::Restored { card_id })
    }

    async fn apply_forward(
        &self,
        mut association: CardAssociation,
        axis: StatusAxis,
    ) -> CardSyncResult<SyncOutcome> {
        let record_id = association.record_id().clone();
        let card_id = association.card_id().clone();
        let outcome = match self.config.policy(axis).action() {
            StatusAction::NoAction => {
                if axis == StatusAxis::Deleted {
                    self.store.remove(&record_id).await?;
                    info!(record_id = %record_id, card_id = %card_id, "released card");
                    return Ok(SyncOutcome::Released { card_id });
                }
                return Ok(skip(&record_id, SkipReason::NoAction));
            }
            StatusAction::Move { target } => {
                self.board.move_card(&card_id, target).await?;
                association.mark_moved(target.clone(), &*self.clock);
                info!(record_id = %record_id, card_id = %card_id, list_id = %target, %axis, "moved card");
                SyncOutcome::Moved {
                    card_id,
                    list_id: target.clone(),
                }
            }
            StatusAction::Archive { .. } => {
                self.board.archive_card(&card_id).await?;
                association.mark_archived(&*self.clock);
                info!(record_id = %record_id, card_id = %card_id, %axis, "archived card");
                SyncOutcome::Archived { card_id }
            }
            StatusAction::Delete => {
                self.board.delete_card(&card_id).await?;
                self.store.remove(&record_id).await?;
                info!(record_id = %record_id, card_id = %card_id, %axis, "deleted card");
                return Ok(SyncOutcome::Deleted { card_id });
            }
        };

        if axis == StatusAxis::Deleted {
            self.store.remove(&record_id).await?;
        } else {
            self.store.update(&association).await?;
        }
        Ok(outcome)
    }

    async fn render(&self, record_id: &RecordId, template: &str) -> CardSyncResult<String> {
        Ok(self.renderer.render(record_id, template).await?)
    }
}

fn skip(record_id: &RecordId, reason: SkipReason) -> SyncOutcome {
    debug!(record_id = %record_id, %reason, "no card operation");
    SyncOutcome::Skipped(reason)
}
