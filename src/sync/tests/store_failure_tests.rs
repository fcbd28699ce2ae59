//! Engine behaviour when association writes fail after a board call.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::helpers::{Harness, article_config, event, policy};
use crate::sync::{
    adapters::InMemoryCardAssociationStore,
    domain::{
        CardAssociation, CardState, CreationTrigger, EventKind, RecordId, StatusAction,
        StatusAxis,
    },
    ports::{CardAssociationError, CardAssociationResult, CardAssociationStore},
    services::{CardLifecycleEngine, CardSyncError, SyncOutcome},
};
use async_trait::async_trait;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

/// In-memory store whose next `store` or `update` can be made to fail.
#[derive(Default)]
struct FlakyStore {
    inner: InMemoryCardAssociationStore,
    fail_next_store: AtomicBool,
    fail_next_update: AtomicBool,
}

fn disk_full() -> CardAssociationError {
    CardAssociationError::persistence(std::io::Error::other("disk full"))
}

#[async_trait]
impl CardAssociationStore for FlakyStore {
    async fn store(&self, association: &CardAssociation) -> CardAssociationResult<()> {
        if self.fail_next_store.swap(false, Ordering::SeqCst) {
            return Err(disk_full());
        }
        self.inner.store(association).await
    }

    async fn update(&self, association: &CardAssociation) -> CardAssociationResult<()> {
        if self.fail_next_update.swap(false, Ordering::SeqCst) {
            return Err(disk_full());
        }
        self.inner.update(association).await
    }

    async fn find_by_record(
        &self,
        record_id: &RecordId,
    ) -> CardAssociationResult<Option<CardAssociation>> {
        self.inner.find_by_record(record_id).await
    }

    async fn remove(
        &self,
        record_id: &RecordId,
    ) -> CardAssociationResult<Option<CardAssociation>> {
        self.inner.remove(record_id).await
    }
}

type FlakyEngine = CardLifecycleEngine<
    crate::board::adapters::InMemoryBoardService,
    FlakyStore,
    crate::sync::adapters::FieldMapRenderer,
    DefaultClock,
>;

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

fn flaky_engine(harness: &Harness) -> (FlakyEngine, Arc<FlakyStore>) {
    let store = Arc::new(FlakyStore::default());
    let config = article_config()
        .with_creation_trigger(CreationTrigger::OnAdded)
        .with_policy(policy(
            StatusAxis::Trashed,
            StatusAction::Archive {
                restore_on_reverse: true,
            },
        ));
    let engine = CardLifecycleEngine::new(
        Arc::clone(&harness.board),
        Arc::clone(&store),
        Arc::clone(&harness.renderer),
        Arc::new(DefaultClock),
        config,
    );
    (engine, store)
}

fn is_persistence_failure(result: &Result<SyncOutcome, CardSyncError>) -> bool {
    matches!(
        result,
        Err(CardSyncError::Store(CardAssociationError::Persistence(_)))
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn untrash_restores_card_archived_before_a_failed_write(harness: Harness) {
    let (engine, store) = flaky_engine(&harness);
    let record_id = harness.add_record("r-1", "Spring issue");
    let created = engine
        .on_record_added(&event(&record_id, EventKind::Added))
        .await
        .expect("created");
    let card_id = created.card_id().cloned().expect("card created");

    store.fail_next_update.store(true, Ordering::SeqCst);
    let trashed = engine
        .on_status_changed(&event(&record_id, EventKind::Trashed), StatusAxis::Trashed, false)
        .await;

    assert!(is_persistence_failure(&trashed), "got {trashed:?}");
    let card = harness.board.card(&card_id).expect("lookup").expect("card");
    assert!(card.closed, "archive reached the board");
    let stale = store
        .find_by_record(&record_id)
        .await
        .expect("lookup")
        .expect("association kept");
    assert_eq!(stale.state(), CardState::Active);

    let untrashed = engine
        .on_status_changed(&event(&record_id, EventKind::Untrashed), StatusAxis::Trashed, true)
        .await
        .expect("untrash handled");

    assert_eq!(untrashed, SyncOutcome::Restored { card_id: card_id.clone() });
    let card = harness.board.card(&card_id).expect("lookup").expect("card");
    assert!(!card.closed);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_association_write_after_creation_leaves_card_unlinked(harness: Harness) {
    let (engine, store) = flaky_engine(&harness);
    let record_id = harness.add_record("r-1", "Spring issue");
    let added = event(&record_id, EventKind::Added);

    store.fail_next_store.store(true, Ordering::SeqCst);
    let first = engine.on_record_added(&added).await;

    assert!(is_persistence_failure(&first), "got {first:?}");
    assert_eq!(harness.board.card_count().expect("cards"), 1);
    assert!(store.find_by_record(&record_id).await.expect("lookup").is_none());

    let second = engine.on_record_added(&added).await.expect("created again");

    assert!(matches!(second, SyncOutcome::Created { .. }));
    assert_eq!(harness.board.card_count().expect("cards"), 2);
    assert!(store.find_by_record(&record_id).await.expect("lookup").is_some());
}
