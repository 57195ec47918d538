use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use notch::core::cli::CliPaths;
use notch::core::context::AppContext;
use tempfile::TempDir;

pub fn binary_path() -> String {
    let raw = PathBuf::from(env!("CARGO_BIN_EXE_notch"));
    if raw.is_absolute() {
        return raw.to_string_lossy().to_string();
    }
    let from_manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(&raw);
    if from_manifest.exists() {
        return from_manifest.to_string_lossy().to_string();
    }
    raw.to_string_lossy().to_string()
}

pub fn make_temp_dir(prefix: &str) -> TempDir {
    tempfile::Builder::new()
        .prefix(&format!("notch-{prefix}-"))
        .tempdir()
        .expect("temp dir should be created")
}

pub fn write_config(dir: &Path, json: &str) {
    fs::write(dir.join("config.json"), json).unwrap();
}

pub fn write_state(dir: &Path, json: &str) {
    fs::write(dir.join("session.json"), json).unwrap();
}

pub fn run_with_input(dir: &Path, input: &str) -> Output {
    run_with_args(dir, &[], input)
}

pub fn run_with_args(dir: &Path, args: &[&str], input: &str) -> Output {
    run_with_bytes(dir, args, input.as_bytes())
}

pub fn run_with_bytes(dir: &Path, args: &[&str], input: &[u8]) -> Output {
    let mut child = Command::new(binary_path())
        .current_dir(dir)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn binary");

    // Startup failures may exit before reading stdin.
    let _ = child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input);

    child.wait_with_output().unwrap()
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1B' && chars.peek() == Some(&'[') {
            chars.next();
            for nc in chars.by_ref() {
                if nc.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        if !c.is_control() {
            out.push(c);
        }
    }
    out
}

pub fn normalized_lines(buf: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(buf)
        .lines()
        .map(|l| strip_ansi(l).trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

pub fn build_context(dir: &Path) -> AppContext {
    let ctx = AppContext::new_with_paths(CliPaths::rooted_at(dir)).expect("context should load");
    ctx.logger.set_console_enabled(false);
    ctx
}

pub fn read_log_contents(dir: &Path) -> Option<String> {
    let mut entries = fs::read_dir(dir.join("logs")).ok()?;
    let entry = entries.find_map(|e| e.ok())?;
    fs::read_to_string(entry.path()).ok()
}

pub fn read_state_json(dir: &Path) -> serde_json::Value {
    let text = fs::read_to_string(dir.join("session.json")).expect("state file should exist");
    serde_json::from_str(&text).expect("state file should be JSON")
}
