//! Given steps for card lifecycle BDD scenarios.

use super::world::CardLifecycleWorld;
use cardwire::board::domain::ListId;
use cardwire::sync::domain::{
    CardBlueprint, CreationTrigger, StatusAction, StatusAxis, StatusPolicy, TemplateName,
    TriggerConfiguration,
};
use rstest_bdd_macros::given;

fn axis(raw: &str) -> Result<StatusAxis, eyre::Report> {
    Ok(StatusAxis::try_from(raw)?)
}

#[given(r#"synchronisation is enabled for template "{template}" with new cards in list "{list}""#)]
fn sync_enabled(
    world: &mut CardLifecycleWorld,
    template: String,
    list: String,
) -> Result<(), eyre::Report> {
    let name = TemplateName::new(template)?;
    let target = ListId::new(list)?;
    world.template = Some(name.clone());
    world.configure(|_| {
        TriggerConfiguration::new(CardBlueprint::new(target)).with_templates([name])
    })
}

#[given(r#"cards are created when records are "{trigger}""#)]
fn creation_trigger(world: &mut CardLifecycleWorld, trigger: String) -> Result<(), eyre::Report> {
    let parsed = match trigger.as_str() {
        "added" => CreationTrigger::OnAdded,
        "published" => CreationTrigger::OnPublished,
        "never" => CreationTrigger::Never,
        other => return Err(eyre::eyre!("unknown creation trigger {other}")),
    };
    world.configure(|config| config.with_creation_trigger(parsed))
}

#[given(r#"the "{axis_name}" action is "{action}""#)]
fn status_action(
    world: &mut CardLifecycleWorld,
    axis_name: String,
    action: String,
) -> Result<(), eyre::Report> {
    let status_axis = axis(&axis_name)?;
    let parsed = match action.as_str() {
        "no_action" => StatusAction::NoAction,
        "archive" => StatusAction::Archive {
            restore_on_reverse: false,
        },
        "delete" => StatusAction::Delete,
        other => return Err(eyre::eyre!("unknown status action {other}")),
    };
    let policy = StatusPolicy::new(status_axis, parsed)?;
    world.configure(|config| config.with_policy(policy))
}

#[given(r#"the "{axis_name}" action moves cards to list "{list}""#)]
fn status_move(
    world: &mut CardLifecycleWorld,
    axis_name: String,
    list: String,
) -> Result<(), eyre::Report> {
    let policy = StatusPolicy::new(
        axis(&axis_name)?,
        StatusAction::Move {
            target: ListId::new(list)?,
        },
    )?;
    world.configure(|config| config.with_policy(policy))
}

#[given(r#""{axis_name}" reversals restore the card"#)]
fn reversals_restore(world: &mut CardLifecycleWorld, axis_name: String) -> Result<(), eyre::Report> {
    let policy = StatusPolicy::new(
        axis(&axis_name)?,
        StatusAction::Archive {
            restore_on_reverse: true,
        },
    )?;
    world.configure(|config| config.with_policy(policy))
}

#[given("record edits update the card")]
fn edits_update(world: &mut CardLifecycleWorld) -> Result<(), eyre::Report> {
    world.configure(|config| config.with_update_on_edit(true))
}

#[given("synchronisation is switched off")]
fn switched_off(world: &mut CardLifecycleWorld) -> Result<(), eyre::Report> {
    world.configure(|config| config.with_active(false))
}
