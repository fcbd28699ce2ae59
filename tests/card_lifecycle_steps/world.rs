//! Shared world state for card lifecycle BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use cardwire::board::{
    adapters::InMemoryBoardService,
    domain::{Board, BoardId, BoardList, ListId},
};
use cardwire::sync::{
    adapters::{FieldMapRenderer, InMemoryCardAssociationStore},
    domain::{CardBlueprint, RecordId, RecordStatus, TemplateName, TriggerConfiguration},
    services::{ActionRouter, CardLifecycleEngine, HostEvent, RecordRef, SyncReport},
};
use mockable::DefaultClock;
use rstest::fixture;
use serde_json::{Map, Value};

/// Router type used by the BDD world.
pub type TestRouter = ActionRouter<
    InMemoryBoardService,
    InMemoryCardAssociationStore,
    FieldMapRenderer,
    DefaultClock,
>;

/// Scenario world for card lifecycle behaviour tests.
pub struct CardLifecycleWorld {
    pub board: Arc<InMemoryBoardService>,
    pub store: Arc<InMemoryCardAssociationStore>,
    pub renderer: Arc<FieldMapRenderer>,
    pub config: TriggerConfiguration,
    pub template: Option<TemplateName>,
    pub router: Option<TestRouter>,
    pub records: HashMap<String, RecordStatus>,
    pub reports: Vec<SyncReport>,
}

impl CardLifecycleWorld {
    /// Creates a world with an editorial board holding `todo`, `review`
    /// and `done`.
    pub fn new() -> Result<Self, eyre::Report> {
        let board = InMemoryBoardService::new();
        let lists = ["todo", "review", "done"]
            .into_iter()
            .zip(1_u8..)
            .map(|(raw, pos)| {
                Ok(BoardList {
                    id: ListId::new(raw)?,
                    name: raw.to_owned(),
                    pos: f64::from(pos),
                })
            })
            .collect::<Result<Vec<_>, eyre::Report>>()?;
        board.add_board(
            Board {
                id: BoardId::new("board-editorial")?,
                name: "Editorial".to_owned(),
            },
            lists,
            Vec::new(),
        )?;

        Ok(Self {
            board: Arc::new(board),
            store: Arc::new(InMemoryCardAssociationStore::new()),
            renderer: Arc::new(FieldMapRenderer::new()),
            config: TriggerConfiguration::new(CardBlueprint::default()),
            template: None,
            router: None,
            records: HashMap::new(),
            reports: Vec::new(),
        })
    }

    /// Replaces the configuration. Only valid before the first event.
    pub fn configure(
        &mut self,
        change: impl FnOnce(TriggerConfiguration) -> TriggerConfiguration,
    ) -> Result<(), eyre::Report> {
        if self.router.is_some() {
            return Err(eyre::eyre!("configuration must precede the first event"));
        }
        self.config = change(self.config.clone());
        Ok(())
    }

    /// Returns the router, building it from the configuration on first use.
    pub fn router(&mut self) -> &TestRouter {
        let (board, store, renderer) = (&self.board, &self.store, &self.renderer);
        let config = &self.config;
        self.router.get_or_insert_with(|| {
            ActionRouter::new(Arc::new(CardLifecycleEngine::new(
                Arc::clone(board),
                Arc::clone(store),
                Arc::clone(renderer),
                Arc::new(DefaultClock),
                config.clone(),
            )))
        })
    }

    /// Returns the host reference for a scenario record.
    pub fn record_ref(&self, raw_id: &str) -> Result<RecordRef, eyre::Report> {
        let template = self
            .template
            .clone()
            .ok_or_else(|| eyre::eyre!("no template configured in scenario world"))?;
        Ok(RecordRef::new(RecordId::new(raw_id)?, template))
    }

    /// Sets the title and URL the renderer exposes for a record.
    pub fn set_title(&self, raw_id: &str, title: &str) -> Result<(), eyre::Report> {
        let mut fields = Map::new();
        fields.insert("title".to_owned(), Value::from(title));
        fields.insert(
            "url".to_owned(),
            Value::from(format!("https://example.test/{raw_id}")),
        );
        self.renderer.set_fields(RecordId::new(raw_id)?, fields)?;
        Ok(())
    }

    /// Routes a host event and keeps its reports.
    pub fn dispatch(&mut self, event: &HostEvent) {
        let reports = run_async(self.router().route(event));
        self.reports.extend(reports);
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> CardLifecycleWorld {
    CardLifecycleWorld::new().unwrap_or_else(|err| panic!("scenario world setup failed: {err}"))
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
