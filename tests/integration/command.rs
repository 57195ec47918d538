use notch::prompter::flows::main_flow::MainFlow;
use notch::prompter::line_editor::ReaderEditor;
use notch::prompter::prompter::Prompter;
use std::io::Cursor;

use crate::common::{
    build_context, make_temp_dir, normalized_lines, read_log_contents, run_with_bytes,
    run_with_input,
};

#[test]
fn unknown_command_reports_error_and_continues() {
    let dir = make_temp_dir("command");
    let output = run_with_input(dir.path(), "add 2\nfrobnicate\nadd\nshow\nexit\n");

    assert!(output.status.success());
    let lines = normalized_lines(&output.stdout);
    assert!(
        lines.iter().any(|l| l == "Error: Unknown command: frobnicate"),
        "stdout did not include expected error: {lines:?}"
    );
    assert!(lines.iter().any(|l| l == "Counter:     3"), "{lines:?}");
}

#[test]
fn parse_error_does_not_stop_followup_command() {
    let dir = make_temp_dir("command");
    let output = run_with_input(dir.path(), "note \"unclosed\nadd 4\nexit\n");
    assert!(output.status.success());
    let lines = normalized_lines(&output.stdout);
    assert!(lines[0].starts_with("Error: Parse error:"), "{lines:?}");
    assert_eq!(lines[1], "Counter: 4");
}

#[test]
fn undecodable_input_line_does_not_end_session() {
    let dir = make_temp_dir("command");
    let output = run_with_bytes(dir.path(), &[], b"add\n\xff\xfe\nadd\nshow\nexit\n");
    assert!(output.status.success(), "{output:?}");
    let lines = normalized_lines(&output.stdout);
    assert!(
        lines.iter().any(|l| l == "Error: Parse error: input is not valid UTF-8"),
        "{lines:?}"
    );
    assert!(lines.iter().any(|l| l == "Counter:     2"), "{lines:?}");
}

#[test]
fn help_lists_every_command() {
    let dir = make_temp_dir("command");
    let output = run_with_input(dir.path(), "help\n? note\nexit\n");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["add", "untag", "notes", "config (cfg)", "exit (quit)", "help (?)"] {
        assert!(stdout.contains(name), "help output missing {name}:\n{stdout}");
    }
    assert!(stdout.contains("Usage: note <text:text...>"));
}

#[test]
fn tags_description_and_notes_flow() {
    let dir = make_temp_dir("command");
    let input = "tag home urgent\nuntag urgent\ndesc Weekly  plan\nnote \"buy milk\"\nnote call mum\nnotes\nshow\n";
    let output = run_with_input(dir.path(), input);
    assert!(output.status.success());

    let lines = normalized_lines(&output.stdout);
    assert!(lines.iter().any(|l| l == "Tagged: home, urgent"), "{lines:?}");
    assert!(lines.iter().any(|l| l == "Removed tag 'urgent'."));
    assert!(lines.iter().any(|l| l == "1 | buy milk"));
    assert!(lines.iter().any(|l| l == "2 | call mum"));
    assert!(lines.iter().any(|l| l == "Tags:        home"));
    assert!(lines.iter().any(|l| l == "Description: Weekly plan"));
}

#[test]
fn log_command_without_log_file_prints_no_logs() {
    let dir = make_temp_dir("command");
    let output = run_with_input(dir.path(), "log\nexit\n");
    assert!(output.status.success(), "log command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No logs"), "stdout:\n{stdout}");
    assert!(
        !dir.path().join("logs").exists(),
        "log command should not create a log file when none existed"
    );
}

#[test]
fn log_command_prints_session_log_without_logging_itself() {
    let dir = make_temp_dir("command");
    let output = run_with_input(dir.path(), "add 3\nlog\nexit\n");
    assert!(output.status.success(), "session should complete");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Command run: add 3"), "stdout:\n{stdout}");
    let log_text = read_log_contents(dir.path()).expect("log file should exist");
    assert!(!log_text.contains("Command run: log"), "{log_text}");
    assert!(log_text.contains("Saved state to"), "{log_text}");
}

#[test]
fn library_flow_runs_scripted_session() {
    let dir = make_temp_dir("command");
    let mut ctx = build_context(dir.path());
    let mut out = Vec::new();
    let flow = MainFlow::new(&mut ctx, &mut out);
    let mut editor = ReaderEditor::new(Cursor::new("set 10\nsub 4\nhistory\n"));
    Prompter::new().run(flow, &mut editor).unwrap();

    assert_eq!(ctx.store.read().counter, 6);
    let lines = normalized_lines(&out);
    assert!(lines.iter().any(|l| l == "2 | sub 4"), "{lines:?}");
    assert!(lines.iter().any(|l| l == "3 | history"), "{lines:?}");
}
