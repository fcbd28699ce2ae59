//! When steps for card lifecycle BDD scenarios.

use super::world::CardLifecycleWorld;
use cardwire::sync::{domain::RecordStatus, services::HostEvent};
use rstest_bdd_macros::when;

fn add_record(
    world: &mut CardLifecycleWorld,
    record_id: &str,
    title: &str,
    status: RecordStatus,
) -> Result<(), eyre::Report> {
    world.set_title(record_id, title)?;
    let record = world.record_ref(record_id)?;
    world.records.insert(record_id.to_owned(), status);
    world.dispatch(&HostEvent::Added { record, status });
    Ok(())
}

#[when(r#"record "{record_id}" titled "{title}" is added as a draft"#)]
fn added_as_draft(
    world: &mut CardLifecycleWorld,
    record_id: String,
    title: String,
) -> Result<(), eyre::Report> {
    add_record(world, &record_id, &title, RecordStatus::unpublished())
}

#[when(r#"record "{record_id}" titled "{title}" is added as published"#)]
fn added_as_published(
    world: &mut CardLifecycleWorld,
    record_id: String,
    title: String,
) -> Result<(), eyre::Report> {
    add_record(world, &record_id, &title, RecordStatus::published())
}

#[when(r#"record "{record_id}" is "{change}""#)]
fn status_changes(
    world: &mut CardLifecycleWorld,
    record_id: String,
    change: String,
) -> Result<(), eyre::Report> {
    let before = world
        .records
        .get(&record_id)
        .copied()
        .ok_or_else(|| eyre::eyre!("record {record_id} was never added"))?;
    let after = match change.as_str() {
        "published" => before.with_unpublished(false),
        "unpublished" => before.with_unpublished(true),
        "hidden" => before.with_hidden(true),
        "unhidden" => before.with_hidden(false),
        "trashed" => before.with_trashed(true),
        "untrashed" => before.with_trashed(false),
        other => return Err(eyre::eyre!("unknown status change {other}")),
    };
    let record = world.record_ref(&record_id)?;
    world.records.insert(record_id, after);
    world.dispatch(&HostEvent::StatusChanged {
        record,
        before,
        after,
    });
    Ok(())
}

#[when(r#"record "{record_id}" is saved with title "{title}""#)]
fn saved_with_title(
    world: &mut CardLifecycleWorld,
    record_id: String,
    title: String,
) -> Result<(), eyre::Report> {
    world.set_title(&record_id, &title)?;
    let record = world.record_ref(&record_id)?;
    world.dispatch(&HostEvent::Saved { record });
    Ok(())
}

#[when(r#"record "{record_id}" is deleted"#)]
fn deleted(world: &mut CardLifecycleWorld, record_id: String) -> Result<(), eyre::Report> {
    let record = world.record_ref(&record_id)?;
    world.dispatch(&HostEvent::Deleted { record });
    Ok(())
}
