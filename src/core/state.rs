use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::core::types::WordList;
use crate::errors::{Error, Result};

pub const MAX_TAG_LEN: usize = 32;
pub const MAX_DESCRIPTION_LEN: usize = 280;
pub const MAX_NOTE_LEN: usize = 1000;

/// The aggregate every command operates on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub counter: i64,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub notes: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_opened_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_exited_at: Option<DateTime<Utc>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::started_at(Utc::now())
    }

    pub fn started_at(created_at: DateTime<Utc>) -> Self {
        Self {
            counter: 0,
            tags: BTreeSet::new(),
            description: String::new(),
            notes: Vec::new(),
            created_at,
            last_opened_at: None,
            last_exited_at: None,
        }
    }

    /// Record the start of a session; never earlier than `created_at`.
    pub fn mark_opened(&mut self, at: DateTime<Utc>) {
        self.last_opened_at = Some(at.max(self.created_at));
    }

    /// Record the end of a session; never earlier than `created_at`.
    pub fn mark_exited(&mut self, at: DateTime<Utc>) {
        self.last_exited_at = Some(at.max(self.created_at));
    }

    pub fn add(&mut self, n: i64) -> Result<i64> {
        self.counter = self.counter.checked_add(n).ok_or_else(|| {
            Error::invalid(format!("counter overflow adding {n} to {}", self.counter))
        })?;
        Ok(self.counter)
    }

    pub fn sub(&mut self, n: i64) -> Result<i64> {
        self.counter = self.counter.checked_sub(n).ok_or_else(|| {
            Error::invalid(format!(
                "counter overflow subtracting {n} from {}",
                self.counter
            ))
        })?;
        Ok(self.counter)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags = if self.tags.is_empty() {
            "-".to_string()
        } else {
            self.tags.iter().cloned().collect::<Vec<_>>().join(", ")
        };
        let description = if self.description.is_empty() {
            "-"
        } else {
            self.description.as_str()
        };
        writeln!(f, "Counter:     {}", self.counter)?;
        writeln!(f, "Tags:        {tags}")?;
        writeln!(f, "Description: {description}")?;
        writeln!(f, "Notes:       {}", self.notes.len())?;
        writeln!(f, "Created:     {}", stamp(Some(self.created_at)))?;
        writeln!(f, "Last open:   {}", stamp(self.last_opened_at))?;
        write!(f, "Last exit:   {}", stamp(self.last_exited_at))
    }
}

fn stamp(at: Option<DateTime<Utc>>) -> String {
    match at {
        Some(t) => t.to_rfc3339_opts(SecondsFormat::Secs, true),
        None => "-".to_string(),
    }
}

/// Invariants a state must satisfy before it is committed or accepted from disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateRules {
    blocked_words: WordList,
}

impl StateRules {
    pub fn new(blocked_words: WordList) -> Self {
        Self { blocked_words }
    }

    pub fn blocked_words(&self) -> &WordList {
        &self.blocked_words
    }

    /// Returns the first violated invariant as a message.
    pub fn check(&self, state: &SessionState) -> std::result::Result<(), String> {
        for (field, at) in [
            ("lastOpenedAt", state.last_opened_at),
            ("lastExitedAt", state.last_exited_at),
        ] {
            if at.is_some_and(|t| t < state.created_at) {
                return Err(format!("{field} is earlier than createdAt"));
            }
        }

        for tag in &state.tags {
            if tag.is_empty() {
                return Err("tags must not be empty".to_string());
            }
            if tag.chars().any(char::is_whitespace) {
                return Err(format!("tag '{tag}' must not contain whitespace"));
            }
            if tag.chars().count() > MAX_TAG_LEN {
                return Err(format!("tag '{tag}' is longer than {MAX_TAG_LEN} characters"));
            }
            self.check_filtered("tag", tag)?;
        }

        if state.description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(format!(
                "description is longer than {MAX_DESCRIPTION_LEN} characters"
            ));
        }
        self.check_filtered("description", &state.description)?;

        for (idx, note) in state.notes.iter().enumerate() {
            if note.trim().is_empty() {
                return Err(format!("note {} is empty", idx + 1));
            }
            if note.chars().count() > MAX_NOTE_LEN {
                return Err(format!(
                    "note {} is longer than {MAX_NOTE_LEN} characters",
                    idx + 1
                ));
            }
            self.check_filtered("note", note)?;
        }
        Ok(())
    }

    fn check_filtered(&self, field: &str, text: &str) -> std::result::Result<(), String> {
        match self.blocked_words.first_match(text) {
            Some(word) => Err(format!("{field} contains blocked word '{word}'")),
            None => Ok(()),
        }
    }
}
