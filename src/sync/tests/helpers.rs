//! Shared fixtures for synchronisation tests.

use std::sync::Arc;

use crate::board::{
    adapters::InMemoryBoardService,
    domain::{Board, BoardId, BoardList, ListId},
};
use crate::sync::{
    adapters::{FieldMapRenderer, InMemoryCardAssociationStore},
    domain::{
        CardAssociation, CardBlueprint, ContentEvent, EventKind, RecordId, StatusAction,
        StatusAxis, StatusPolicy, TemplateName, TriggerConfiguration,
    },
    ports::CardAssociationStore,
    services::CardLifecycleEngine,
};
use mockable::DefaultClock;
use serde_json::{Map, Value};

pub(super) type TestEngine = CardLifecycleEngine<
    InMemoryBoardService,
    InMemoryCardAssociationStore,
    FieldMapRenderer,
    DefaultClock,
>;

pub(super) const ARTICLE: &str = "article";

pub(super) fn list(raw: &str) -> ListId {
    ListId::new(raw).expect("valid list id")
}

pub(super) fn record(raw: &str) -> RecordId {
    RecordId::new(raw).expect("valid record id")
}

pub(super) fn template(raw: &str) -> TemplateName {
    TemplateName::new(raw).expect("valid template name")
}

pub(super) fn event(record_id: &RecordId, kind: EventKind) -> ContentEvent {
    ContentEvent::new(record_id.clone(), template(ARTICLE), kind)
}

pub(super) fn policy(axis: StatusAxis, action: StatusAction) -> StatusPolicy {
    StatusPolicy::new(axis, action).expect("valid policy")
}

/// Active configuration for `article` records, new cards in `todo`.
pub(super) fn article_config() -> TriggerConfiguration {
    TriggerConfiguration::new(CardBlueprint::new(list("todo"))).with_templates([template(ARTICLE)])
}

/// Collaborators shared by an engine under test.
pub(super) struct Harness {
    pub(super) board: Arc<InMemoryBoardService>,
    pub(super) store: Arc<InMemoryCardAssociationStore>,
    pub(super) renderer: Arc<FieldMapRenderer>,
}

impl Harness {
    pub(super) fn new() -> Self {
        let board = InMemoryBoardService::new();
        board
            .add_board(
                Board {
                    id: BoardId::new("board-editorial").expect("valid board id"),
                    name: "Editorial".to_owned(),
                },
                ["todo", "review", "done"]
                    .into_iter()
                    .zip(1_u8..)
                    .map(|(raw, pos)| BoardList {
                        id: list(raw),
                        name: raw.to_owned(),
                        pos: f64::from(pos),
                    })
                    .collect(),
                Vec::new(),
            )
            .expect("board registered");
        Self {
            board: Arc::new(board),
            store: Arc::new(InMemoryCardAssociationStore::new()),
            renderer: Arc::new(FieldMapRenderer::new()),
        }
    }

    pub(super) fn engine(&self, config: TriggerConfiguration) -> TestEngine {
        CardLifecycleEngine::new(
            Arc::clone(&self.board),
            Arc::clone(&self.store),
            Arc::clone(&self.renderer),
            Arc::new(DefaultClock),
            config,
        )
    }

    /// Registers a record with a title and URL and returns its id.
    pub(super) fn add_record(&self, raw_id: &str, title: &str) -> RecordId {
        let record_id = record(raw_id);
        let mut fields = Map::new();
        fields.insert("title".to_owned(), Value::from(title));
        fields.insert(
            "url".to_owned(),
            Value::from(format!("https://example.test/{raw_id}")),
        );
        self.renderer
            .set_fields(record_id.clone(), fields)
            .expect("fields registered");
        record_id
    }

    pub(super) async fn association(&self, record_id: &RecordId) -> Option<CardAssociation> {
        self.store
            .find_by_record(record_id)
            .await
            .expect("association lookup")
    }

    pub(super) fn call_total(&self) -> usize {
        self.board.calls().expect("recorded calls").len()
    }
}
