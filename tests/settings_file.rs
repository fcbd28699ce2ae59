//! Integration tests for loading persisted settings from disk.

use camino::Utf8PathBuf;
use cardwire::board::domain::ListId;
use cardwire::sync::{
    adapters::{SettingsFileError, load_settings},
    domain::{CreationTrigger, StatusActionKind, StatusAxis, StatusAction, TriggerConfiguration},
};
use rstest::{fixture, rstest};
use tempfile::TempDir;

#[fixture]
fn workdir() -> TempDir {
    tempfile::tempdir().expect("temporary directory")
}

fn write(dir: &TempDir, name: &str, contents: &str) -> Utf8PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("settings written");
    Utf8PathBuf::from_path_buf(path).expect("utf-8 temp path")
}

#[rstest]
fn loads_and_resolves_a_settings_document(workdir: TempDir) {
    let path = write(
        &workdir,
        "cardwire.json",
        r#"{
            "ApiKey": "app-key",
            "ApiToken": "user-token",
            "TargetBoard": "board-1",
            "TargetList": "list-todo",
            "Templates": ["article"],
            "CardCreationTrigger": "added",
            "StatusChangeHidden": "move",
            "MoveListTargetHidden": "list-hidden"
        }"#,
    );

    let settings = load_settings(&path).expect("settings load");
    let config = TriggerConfiguration::resolve(&settings).expect("settings resolve");

    assert_eq!(settings.card_creation_trigger, CreationTrigger::OnAdded);
    assert_eq!(settings.status_change_trashed, StatusActionKind::Archive);
    assert!(settings.credentials().is_ok());
    assert_eq!(
        config.policy(StatusAxis::Hidden).action(),
        &StatusAction::Move {
            target: ListId::new("list-hidden").expect("valid list")
        }
    );
}

#[rstest]
fn missing_file_is_an_io_error(workdir: TempDir) {
    let path = Utf8PathBuf::from_path_buf(workdir.path().join("absent.json"))
        .expect("utf-8 temp path");

    let err = load_settings(&path).expect_err("file is absent");

    assert!(matches!(err, SettingsFileError::Io { .. }));
}

#[rstest]
fn malformed_json_is_a_parse_error(workdir: TempDir) {
    let path = write(&workdir, "broken.json", r#"{"Active": "#);

    let err = load_settings(&path).expect_err("document is truncated");

    assert!(matches!(err, SettingsFileError::Parse { .. }));
}

#[rstest]
fn unknown_action_is_a_parse_error(workdir: TempDir) {
    let path = write(&workdir, "bad-action.json", r#"{"StatusChangeTrashed": "shred"}"#);

    let err = load_settings(&path).expect_err("action is unknown");

    assert!(matches!(err, SettingsFileError::Parse { .. }));
}
