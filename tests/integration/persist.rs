use notch::core::persist;
use notch::core::state::SessionState;
use notch::errors::Error;
use std::fs;

use crate::common::{
    build_context, make_temp_dir, normalized_lines, read_state_json, run_with_input, write_state,
};

#[test]
fn save_command_writes_versioned_document() {
    let dir = make_temp_dir("persist");
    let output = run_with_input(dir.path(), "add 2\ntag demo\nsave snap.json\nexit\n");
    assert!(output.status.success());

    let text = fs::read_to_string(dir.path().join("snap.json")).expect("snapshot written");
    let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(doc["schemaVersion"], 1);
    assert_eq!(doc["state"]["counter"], 2);
    assert_eq!(doc["state"]["tags"], serde_json::json!(["demo"]));
    assert!(doc["state"]["createdAt"].is_string());
}

#[test]
fn load_command_replaces_state_only_on_success() {
    let dir = make_temp_dir("persist");
    fs::write(dir.path().join("bad.json"), r#"{"schemaVersion": 3, "state": {}}"#).unwrap();
    fs::write(
        dir.path().join("good.json"),
        r#"{"schemaVersion": 1, "state": {"counter": 12, "createdAt": "2026-01-01T00:00:00Z"}}"#,
    )
    .unwrap();

    let output = run_with_input(dir.path(), "add\nload bad.json\nshow\nload good.json\nshow\n");
    assert!(output.status.success());
    let lines = normalized_lines(&output.stdout);
    assert!(
        lines.iter().any(|l| l
            == "Error: Incompatible state file: schema version 3 (supported: 1)"),
        "{lines:?}"
    );
    let counters: Vec<&String> = lines.iter().filter(|l| l.starts_with("Counter:  ")).collect();
    assert_eq!(counters, ["Counter:     1", "Counter:     12"]);
}

#[test]
fn round_trip_through_library_and_binary() {
    let dir = make_temp_dir("persist");
    let mut state = SessionState::new();
    state.counter = -3;
    state.notes.push("from the library".into());
    persist::save(&dir.path().join("session.json"), &state).unwrap();

    let output = run_with_input(dir.path(), "add 10\nexit\n");
    assert!(output.status.success());

    let reloaded = persist::load(&dir.path().join("session.json")).unwrap();
    assert_eq!(reloaded.counter, 7);
    assert_eq!(reloaded.notes, state.notes);
    assert_eq!(reloaded.created_at, state.created_at);
}

#[test]
fn saving_to_state_path_spelled_differently_counts_as_saved() {
    let dir = make_temp_dir("persist");
    let output = run_with_input(dir.path(), "add 4\nsave ./session.json\nexit\n");
    assert!(output.status.success());
    let lines = normalized_lines(&output.stdout);
    assert!(lines.iter().any(|l| l == "Saved to ./session.json"), "{lines:?}");
    assert!(
        !lines.iter().any(|l| l.starts_with("Session saved to")),
        "autosave ran for a clean session: {lines:?}"
    );
    assert_eq!(read_state_json(dir.path())["state"]["counter"], 4);
}

#[test]
fn unknown_fields_are_ignored_on_startup() {
    let dir = make_temp_dir("persist");
    write_state(
        dir.path(),
        r#"{"schemaVersion": 1, "writer": "elsewhere",
            "state": {"counter": 2, "createdAt": "2026-01-01T00:00:00Z", "mood": "ok"}}"#,
    );
    let output = run_with_input(dir.path(), "add\n");
    assert!(output.status.success());
    let doc = read_state_json(dir.path());
    assert_eq!(doc["state"]["counter"], 3);
    assert!(doc.get("writer").is_none());
}

#[test]
fn unchanged_session_does_not_rewrite_state() {
    let dir = make_temp_dir("persist");
    let body = r#"{"schemaVersion": 1, "state": {"counter": 2, "createdAt": "2026-01-01T00:00:00Z"}}"#;
    write_state(dir.path(), body);
    let output = run_with_input(dir.path(), "show\nnotes\nexit\n");
    assert!(output.status.success());
    assert_eq!(
        fs::read_to_string(dir.path().join("session.json")).unwrap(),
        body
    );
}

#[test]
fn library_context_rejects_incompatible_state() {
    let dir = make_temp_dir("persist");
    write_state(
        dir.path(),
        r#"{"schemaVersion": 999, "state": {"counter": 1, "createdAt": "2026-01-01T00:00:00Z"}}"#,
    );
    let err = notch::core::context::AppContext::new_with_paths(
        notch::core::cli::CliPaths::rooted_at(dir.path()),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        Error::IncompatibleVersion {
            found: 999,
            supported: 1
        }
    ));
}

#[test]
fn library_context_starts_fresh_without_state() {
    let dir = make_temp_dir("persist");
    let ctx = build_context(dir.path());
    assert_eq!(ctx.store.read().counter, 0);
    assert!(ctx.store.read().tags.is_empty());
}
