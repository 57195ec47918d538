use std::process::{Command, Stdio};

use crate::common::{
    binary_path, make_temp_dir, normalized_lines, read_state_json, run_with_args, run_with_input,
    write_config, write_state,
};

#[test]
fn main_exits_successfully_without_any_files() {
    let dir = make_temp_dir("core");
    let output = run_with_input(dir.path(), "exit\n");
    assert!(output.status.success());
    assert!(
        !dir.path().join("config.json").exists(),
        "defaults should not be written on startup"
    );
}

#[test]
fn end_of_input_exits_cleanly() {
    let dir = make_temp_dir("core");
    let output = Command::new(binary_path())
        .current_dir(dir.path())
        .stdin(Stdio::null())
        .output()
        .expect("failed to run binary");
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn add_add_sub_exit_scenario() {
    let dir = make_temp_dir("core");
    let output = run_with_input(dir.path(), "add\nadd\nsub\nshow\nexit\n");
    assert_eq!(output.status.code(), Some(0));

    let lines = normalized_lines(&output.stdout);
    assert!(lines.iter().any(|l| l == "Counter:     1"), "{lines:?}");
    assert_eq!(read_state_json(dir.path())["state"]["counter"], 1);
}

#[test]
fn main_fails_when_config_is_malformed() {
    let dir = make_temp_dir("core");
    write_config(dir.path(), r#"{ "autosave": { "value": "sometimes" "#);

    let output = run_with_input(dir.path(), "exit\n");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Could not start session") && stderr.contains("Invalid JSON"),
        "stderr did not explain the failure: {stderr}"
    );
}

#[test]
fn main_fails_on_corrupt_state_file_and_keeps_it() {
    let dir = make_temp_dir("core");
    write_state(dir.path(), "{ not json");

    let output = run_with_input(dir.path(), "add\nexit\n");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Corrupt state file"), "stderr: {stderr}");
    assert_eq!(
        std::fs::read_to_string(dir.path().join("session.json")).unwrap(),
        "{ not json"
    );
}

#[test]
fn main_fails_on_incompatible_state_file() {
    let dir = make_temp_dir("core");
    write_state(
        dir.path(),
        r#"{"schemaVersion": 999, "state": {"counter": 5, "createdAt": "2026-01-01T00:00:00Z"}}"#,
    );

    let output = run_with_input(dir.path(), "show\n");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("schema version 999 (supported: 1)"),
        "stderr: {stderr}"
    );
}

#[test]
fn main_fails_on_unknown_cli_arg() {
    let dir = make_temp_dir("core");
    let output = run_with_args(dir.path(), &["--nope"], "exit\n");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown argument: --nope"), "stderr: {stderr}");
}

#[test]
fn cli_paths_redirect_state_file() {
    let dir = make_temp_dir("core");
    let output = run_with_args(dir.path(), &["--state", "data/other.json"], "set 9\n");
    assert!(output.status.success());
    assert!(dir.path().join("data/other.json").exists());
    assert!(!dir.path().join("session.json").exists());
}

#[test]
fn existing_state_is_resumed() {
    let dir = make_temp_dir("core");
    write_state(
        dir.path(),
        r#"{"schemaVersion": 1, "state": {"counter": 41, "tags": ["work"],
            "createdAt": "2026-01-01T00:00:00Z"}}"#,
    );
    let output = run_with_input(dir.path(), "add\nshow\n");
    assert!(output.status.success());
    let lines = normalized_lines(&output.stdout);
    assert!(lines.iter().any(|l| l == "Counter:     42"), "{lines:?}");
    assert!(lines.iter().any(|l| l == "Tags:        work"), "{lines:?}");
    assert_eq!(read_state_json(dir.path())["state"]["counter"], 42);
}
