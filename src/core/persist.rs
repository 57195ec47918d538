use crate::core::state::{SessionState, StateRules};
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Schema tag written into every state document.
pub const SCHEMA_VERSION: i64 = 1;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentRef<'a> {
    schema_version: i64,
    state: &'a SessionState,
}

/// Load a state document, checking only the built-in invariants.
pub fn load(path: &Path) -> Result<SessionState> {
    load_with(path, &StateRules::default())
}

/// Load a state document and validate it against `rules`.
pub fn load_with(path: &Path, rules: &StateRules) -> Result<SessionState> {
    let contents = fs::read_to_string(path)?;
    decode_document(&contents, rules)
}

pub fn save(path: &Path, state: &SessionState) -> Result<PathBuf> {
    let doc = DocumentRef {
        schema_version: SCHEMA_VERSION,
        state,
    };
    let contents = serde_json::to_string_pretty(&doc)?;
    write_atomic(path, contents.as_bytes())?;
    Ok(path.to_path_buf())
}

/// Read saved input history. A missing file is an empty history.
pub fn load_history(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| {
        Error::corrupt(format!(
            "history file '{}' is not a JSON list of strings: {e}",
            path.display()
        ))
    })
}

/// Persist the newest `limit` history entries.
pub fn save_history(path: &Path, entries: &[String], limit: usize) -> Result<PathBuf> {
    let start = entries.len().saturating_sub(limit);
    let contents = serde_json::to_string_pretty(&entries[start..])?;
    write_atomic(path, contents.as_bytes())?;
    Ok(path.to_path_buf())
}

fn decode_document(contents: &str, rules: &StateRules) -> Result<SessionState> {
    let value: Value = serde_json::from_str(contents)
        .map_err(|e| Error::corrupt(format!("invalid JSON: {e}")))?;
    let doc = value
        .as_object()
        .ok_or_else(|| Error::corrupt("top-level value is not an object"))?;

    let version = doc
        .get("schemaVersion")
        .ok_or_else(|| Error::corrupt("missing field `schemaVersion`"))?
        .as_i64()
        .ok_or_else(|| Error::corrupt("`schemaVersion` is not an integer"))?;
    if version != SCHEMA_VERSION {
        return Err(Error::IncompatibleVersion {
            found: version,
            supported: SCHEMA_VERSION,
        });
    }

    let raw_state = doc
        .get("state")
        .ok_or_else(|| Error::corrupt("missing field `state`"))?;
    let state = SessionState::deserialize(raw_state)
        .map_err(|e| Error::corrupt(format!("invalid state: {e}")))?;
    rules.check(&state).map_err(Error::CorruptState)?;
    Ok(state)
}

/// Write `bytes` to a temp file beside `path`, sync it, then rename it over `path`.
/// On failure the previous file is untouched and the temp file is removed.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir)?;

    let mut tmp = NamedTempFile::new_in(&dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
