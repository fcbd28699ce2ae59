//! Then steps for card lifecycle BDD scenarios.

use super::world::{CardLifecycleWorld, run_async};
use cardwire::board::{adapters::BoardOperation, domain::Card};
use cardwire::sync::{
    domain::{CardAssociation, CardState, RecordId},
    ports::CardAssociationStore,
};
use rstest_bdd_macros::then;

fn association(
    world: &CardLifecycleWorld,
    record_id: &str,
) -> Result<Option<CardAssociation>, eyre::Report> {
    let id = RecordId::new(record_id)?;
    Ok(run_async(world.store.find_by_record(&id))?)
}

fn associated_card(
    world: &CardLifecycleWorld,
    record_id: &str,
) -> Result<(CardAssociation, Card), eyre::Report> {
    let found = association(world, record_id)?
        .ok_or_else(|| eyre::eyre!("record {record_id} has no card association"))?;
    let card = world
        .board
        .card(found.card_id())?
        .ok_or_else(|| eyre::eyre!("card {} is missing from the board", found.card_id()))?;
    Ok((found, card))
}

#[then("the board holds {count:usize} cards")]
fn board_holds(world: &CardLifecycleWorld, count: usize) -> Result<(), eyre::Report> {
    let actual = world.board.card_count()?;
    if actual != count {
        return Err(eyre::eyre!("expected {count} cards, found {actual}"));
    }
    Ok(())
}

#[then(r#"record "{record_id}" has an active card titled "{title}" in list "{list}""#)]
fn active_card(
    world: &CardLifecycleWorld,
    record_id: String,
    title: String,
    list: String,
) -> Result<(), eyre::Report> {
    let (found, card) = associated_card(world, &record_id)?;
    if found.state() != CardState::Active || card.closed {
        return Err(eyre::eyre!("card {} is archived", card.id));
    }
    if card.name != title {
        return Err(eyre::eyre!("expected title {title}, found {}", card.name));
    }
    if card.id_list.as_str() != list || found.list_id().as_str() != list {
        return Err(eyre::eyre!(
            "expected list {list}, board has {} and association has {}",
            card.id_list,
            found.list_id()
        ));
    }
    Ok(())
}

#[then(r#"the card for record "{record_id}" is archived"#)]
fn card_archived(world: &CardLifecycleWorld, record_id: String) -> Result<(), eyre::Report> {
    let (found, card) = associated_card(world, &record_id)?;
    if found.state() != CardState::Archived || !card.closed {
        return Err(eyre::eyre!("card {} is still active", card.id));
    }
    Ok(())
}

#[then(r#"record "{record_id}" has no card association"#)]
fn no_association(world: &CardLifecycleWorld, record_id: String) -> Result<(), eyre::Report> {
    if let Some(found) = association(world, &record_id)? {
        return Err(eyre::eyre!(
            "record {record_id} is still associated with card {}",
            found.card_id()
        ));
    }
    Ok(())
}

#[then("no synchronisation call failed")]
fn nothing_failed(world: &CardLifecycleWorld) -> Result<(), eyre::Report> {
    if let Some(report) = world.reports.iter().find(|report| report.is_failure()) {
        return Err(eyre::eyre!("synchronisation failed: {report:?}"));
    }
    Ok(())
}

#[then("the board received {count:usize} create card calls")]
fn create_calls(world: &CardLifecycleWorld, count: usize) -> Result<(), eyre::Report> {
    expect_calls(world, BoardOperation::CreateCard, count)
}

#[then("the board received {count:usize} delete card calls")]
fn delete_calls(world: &CardLifecycleWorld, count: usize) -> Result<(), eyre::Report> {
    expect_calls(world, BoardOperation::DeleteCard, count)
}

fn expect_calls(
    world: &CardLifecycleWorld,
    operation: BoardOperation,
    count: usize,
) -> Result<(), eyre::Report> {
    let actual = world.board.call_count(operation)?;
    if actual != count {
        return Err(eyre::eyre!(
            "expected {count} {} calls, found {actual}",
            operation.as_str()
        ));
    }
    Ok(())
}
