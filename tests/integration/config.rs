use notch::config::Config;

use crate::common::{make_temp_dir, normalized_lines, run_with_input, write_config};

#[test]
fn main_allows_running_config_command() {
    let dir = make_temp_dir("config");
    let output = run_with_input(dir.path(), "config\nexit\n");
    assert!(output.status.success(), "config run should succeed");
    let lines = normalized_lines(&output.stdout);
    assert!(lines.iter().any(|l| l == "CONFIG"), "{lines:?}");
    assert!(lines.iter().any(|l| l.starts_with("HISTORY_LIMIT")), "{lines:?}");
}

#[test]
fn config_edit_persists_change() {
    let dir = make_temp_dir("config");
    let output = run_with_input(dir.path(), "cfg history_limit 42\nexit\n");
    assert!(output.status.success());
    let lines = normalized_lines(&output.stdout);
    assert!(lines.iter().any(|l| l == "HISTORY_LIMIT: 500 -> 42"), "{lines:?}");

    let cfg = Config::load_from(dir.path().join("config.json")).expect("config should reload");
    assert_eq!(cfg.history_limit(), 42);
}

#[test]
fn invalid_config_value_is_reported_and_not_saved() {
    let dir = make_temp_dir("config");
    let output = run_with_input(dir.path(), "config AUTOSAVE maybe\nexit\n");
    assert!(output.status.success());
    let lines = normalized_lines(&output.stdout);
    assert!(
        lines.iter().any(|l| l.starts_with("Error: Parse error: Invalid string value for boolean")),
        "{lines:?}"
    );
    assert!(!dir.path().join("config.json").exists());
}

#[test]
fn blocked_words_from_config_reject_mutations() {
    let dir = make_temp_dir("config");
    write_config(
        dir.path(),
        r#"{ "blocked_words": { "value": ["darn"], "description": "blocked" } }"#,
    );
    let output = run_with_input(dir.path(), "note \"Darn it\"\nnote fine\nnotes\n");
    assert!(output.status.success());
    let lines = normalized_lines(&output.stdout);
    assert!(
        lines
            .iter()
            .any(|l| l == "Error: Invalid mutation: note contains blocked word 'darn'"),
        "{lines:?}"
    );
    assert!(lines.iter().any(|l| l == "1 | fine"), "{lines:?}");
}

#[test]
fn autosave_disabled_in_config_leaves_no_state_file() {
    let dir = make_temp_dir("config");
    write_config(
        dir.path(),
        r#"{ "autosave": { "value": "False", "description": "autosave" } }"#,
    );
    let output = run_with_input(dir.path(), "add 5\nexit\n");
    assert!(output.status.success());
    assert!(!dir.path().join("session.json").exists());
}

#[test]
fn history_persists_across_sessions_when_enabled() {
    let dir = make_temp_dir("config");
    write_config(
        dir.path(),
        r#"{ "persist_history": { "value": "True", "description": "history" } }"#,
    );
    let first = run_with_input(dir.path(), "add\nshow\n");
    assert!(first.status.success());
    assert!(dir.path().join("history.json").exists());

    let second = run_with_input(dir.path(), "history\n");
    let lines = normalized_lines(&second.stdout);
    assert!(lines.iter().any(|l| l == "1 | add"), "{lines:?}");
    assert!(lines.iter().any(|l| l == "2 | show"), "{lines:?}");
    assert!(lines.iter().any(|l| l == "3 | history"), "{lines:?}");
}

#[test]
fn disabling_file_logging_stops_log_file_creation() {
    let dir = make_temp_dir("config");
    write_config(
        dir.path(),
        r#"{ "file_logging_enabled": { "value": "False", "description": "logs" } }"#,
    );
    let output = run_with_input(dir.path(), "add\nfrobnicate\n");
    assert!(output.status.success());
    assert!(!dir.path().join("logs").exists());
}
