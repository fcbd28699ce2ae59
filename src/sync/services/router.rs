//! Normalises host events and dispatches them to the engine.

use super::{CardLifecycleEngine, CardSyncResult, SyncOutcome};
use crate::board::ports::BoardService;
use crate::sync::{
    domain::{ContentEvent, EventKind, RecordId, RecordStatus, StatusAxis, TemplateName},
    ports::{CardAssociationStore, CardRenderer},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, error};

/// Host record identity carried by every host event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRef {
    record_id: RecordId,
    template: TemplateName,
}

impl RecordRef {
    /// Creates a record reference.
    #[must_use]
    pub const fn new(record_id: RecordId, template: TemplateName) -> Self {
        Self {
            record_id,
            template,
        }
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

    fn event(&self, kind: EventKind) -> ContentEvent {
        ContentEvent::new(self.record_id.clone(), self.template.clone(), kind)
    }
}

/// Raw lifecycle notification from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// A record was created with the given status flags.
    Added {
        /// Created record.
        record: RecordRef,
        /// Status at creation.
        status: RecordStatus,
    },
    /// A record was saved.
    Saved {
        /// Saved record.
        record: RecordRef,
    },
    /// A record's status flags changed.
    StatusChanged {
        /// Affected record.
        record: RecordRef,
        /// Flags before the change.
        before: RecordStatus,
        /// Flags after the change.
        after: RecordStatus,
    },
    /// A record was deleted permanently.
    Deleted {
        /// Deleted record.
        record: RecordRef,
    },
}

impl HostEvent {
    /// Returns the record the event concerns.
    #[must_use]
    pub const fn record(&self) -> &RecordRef {
        match self {
            Self::Added { record, .. }
            | Self::Saved { record }
            | Self::StatusChanged { record, .. }
            | Self::Deleted { record } => record,
        }
    }

    /// Translates the host event into normalised content events.
    ///
    /// Status changes yield one event per flipped flag in axis order
    /// (hidden, unpublished, trashed), each carrying the prior status.
    #[must_use]
    pub fn normalize(&self) -> Vec<ContentEvent> {
        match self {
            Self::Added { record, status } => {
                let mut events = vec![record.event(EventKind::Added)];
                if !status.is_unpublished() {
                    events.push(record.event(EventKind::Published));
                }
                events
            }
            Self::Saved { record } => vec![record.event(EventKind::Updated)],
            Self::StatusChanged {
                record,
                before,
                after,
            } => StatusAxis::ALL
                .into_iter()
                .filter_map(|axis| {
                    let was_set = before.flag(axis)?;
                    let now_set = after.flag(axis)?;
                    (was_set != now_set).then(|| {
                        record
                            .event(EventKind::for_flag_change(axis, now_set))
                            .with_prior_status(*before)
                    })
                })
                .collect(),
            Self::Deleted { record } => vec![record.event(EventKind::Deleted)],
        }
    }
}

/// Engine entry point invoked for a content event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineOperation {
    /// [`CardLifecycleEngine::on_record_added`].
    RecordAdded,
    /// [`CardLifecycleEngine::on_record_published`].
    RecordPublished,
    /// [`CardLifecycleEngine::on_record_updated`].
    RecordUpdated,
    /// [`CardLifecycleEngine::on_status_changed`].
    StatusChanged {
        /// Axis of the transition.
        axis: StatusAxis,
        /// Whether the transition is a reversal.
        is_reverse: bool,
    },
}

/// Result of one engine call made for a host event.
#[derive(Debug, Clone)]
pub struct SyncReport {
    /// Normalised event that was handled.
    pub event: ContentEvent,
    /// Engine operation that handled it.
    pub operation: EngineOperation,
    /// Engine result. Failures have already been logged.
    pub result: CardSyncResult<SyncOutcome>,
}

impl SyncReport {
    /// Returns `true` when the engine call failed.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        self.result.is_err()
    }
}

/// Fail-open dispatcher between the host and the engine.
#[derive(Clone)]
pub struct ActionRouter<B, S, R, C>
where
    B: BoardService,
    S: CardAssociationStore,
    R: CardRenderer,
    C: Clock + Send + Sync,
{
    engine: Arc<CardLifecycleEngine<B, S, R, C>>,
}

impl<B, S, R, C> ActionRouter<B, S, R, C>
where
    B: BoardService,
    S: CardAssociationStore,
    R: CardRenderer,
    C: Clock + Send + Sync,
{
    /// Creates a router over an engine.
    #[must_use]
    pub const fn new(engine: Arc<CardLifecycleEngine<B, S, R, C>>) -> Self {
        Self { engine }
    }

    /// Returns the engine.
    #[must_use]
    pub const fn engine(&self) -> &Arc<CardLifecycleEngine<B, S, R, C>> {
        &self.engine
    }

    /// Handles a host event.
    ///
    /// Returns one report per engine call. Events are dropped without
    /// engine calls when synchronisation is inactive or the template is
    /// not eligible. Never fails.
    pub async fn route(&self, event: &HostEvent) -> Vec<SyncReport> {
        let record = event.record();
        let config = self.engine.config();
        if !config.is_active() {
            debug!(record_id = %record.record_id(), "synchronisation inactive, ignoring event");
            return Vec::new();
        }
        if !config.is_template_enabled(record.template()) {
            debug!(
                record_id = %record.record_id(),
                template = %record.template(),
                "template not enabled, ignoring event"
            );
            return Vec::new();
        }

        let mut reports = Vec::new();
        for content_event in event.normalize() {
            reports.extend(self.handle_content_event(&content_event).await);
        }
        reports
    }

    /// Dispatches one normalised event to the engine.
    ///
    /// `Published` first runs the unpublished-axis reversal, then the
    /// publish-triggered creation.
    pub async fn handle_content_event(&self, event: &ContentEvent) -> Vec<SyncReport> {
        let operations = match event.kind() {
            EventKind::Added => vec![EngineOperation::RecordAdded],
            EventKind::Updated => vec![EngineOperation::RecordUpdated],
            EventKind::Published => vec![
                EngineOperation::StatusChanged {
                    axis: StatusAxis::Unpublished,
                    is_reverse: true,
                },
                EngineOperation::RecordPublished,
            ],
            kind => kind
                .status_transition()
                .map(|transition| EngineOperation::StatusChanged {
                    axis: transition.axis,
                    is_reverse: transition.is_reverse,
                })
                .into_iter()
                .collect(),
        };

        let mut reports = Vec::with_capacity(operations.len());
        for operation in operations {
            let result = self.dispatch(event, operation).await;
            if let Err(err) = &result {
                error!(
                    record_id = %event.record_id(),
                    event = %event.kind(),
                    error = %err,
                    "card operation failed"
                );
            }
            reports.push(SyncReport {
                event: event.clone(),
                operation,
                result,
            });
        }
        reports
    }

    async fn dispatch(
        &self,
        event: &ContentEvent,
        operation: EngineOperation,
    ) -> CardSyncResult<SyncOutcome> {
        match operation {
            EngineOperation::RecordAdded => self.engine.on_record_added(event).await,
            EngineOperation::RecordPublished => self.engine.on_record_published(event).await,
            EngineOperation::RecordUpdated => self.engine.on_record_updated(event).await,
            EngineOperation::StatusChanged { axis, is_reverse } => {
                self.engine.on_status_changed(event, axis, is_reverse).await
            }
        }
    }
}
