pub mod models;

use std::fs;
use std::ops::Index;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

use crate::config::models::{
    AutosaveConfigItem, BlockedWordsConfigItem, ConfigItem, FileLoggingConfigItem,
    HistoryLimitConfigItem, PersistHistoryConfigItem,
};
use crate::core::persist;
use crate::core::types::WordList;
use crate::errors::{Error, Result};
use crate::extensions::enums::valid_csv;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIterDerive, EnumString, Display, AsRefStr)]
#[strum(ascii_case_insensitive, serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigKey {
    Autosave,
    PersistHistory,
    HistoryLimit,
    BlockedWords,
    FileLoggingEnabled,
}

impl ConfigKey {
    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s.trim()).map_err(|_| {
            Error::Config(format!(
                "Unknown configuration key '{}'. Valid keys: {}",
                s.trim(),
                valid_csv::<ConfigKey>()
            ))
        })
    }

    pub fn names() -> Vec<String> {
        Self::iter().map(|k| k.to_string()).collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub autosave: AutosaveConfigItem,
    #[serde(default)]
    pub persist_history: PersistHistoryConfigItem,
    #[serde(default)]
    pub history_limit: HistoryLimitConfigItem,
    #[serde(default)]
    pub blocked_words: BlockedWordsConfigItem,
    #[serde(default)]
    pub file_logging_enabled: FileLoggingConfigItem,
}

#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    data: ConfigFile,
    pub last_change: Option<(String, String, String)>,
}

#[derive(Debug, Clone)]
pub struct ConfigRows(Vec<(String, String, String)>);

impl ConfigRows {
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &(String, String, String)> {
        self.0.iter()
    }
}
impl Index<usize> for ConfigRows {
    type Output = (String, String, String);
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl Config {
    /// In-memory defaults bound to `path`; nothing is written until an edit.
    pub fn defaults_at<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            data: ConfigFile::default(),
            last_change: None,
        }
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Ok(Self::defaults_at(path));
        }
        let text = fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        let data: ConfigFile = serde_json::from_str(&text)
            .map_err(|e| Error::Config(format!("Invalid JSON in '{}': {}", path.display(), e)))?;
        Ok(Self {
            path,
            data,
            last_change: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn autosave(&self) -> bool {
        self.data.autosave.get_value().0
    }
    pub fn persist_history(&self) -> bool {
        self.data.persist_history.get_value().0
    }
    pub fn history_limit(&self) -> usize {
        self.data.history_limit.get_value().0
    }
    pub fn blocked_words(&self) -> &WordList {
        self.data.blocked_words.get_value()
    }
    pub fn file_logging_enabled(&self) -> bool {
        self.data.file_logging_enabled.get_value().0
    }

    pub fn rows(&self) -> ConfigRows {
        ConfigRows(ConfigKey::iter().map(|key| self.row(key)).collect())
    }

    pub fn row(&self, key: ConfigKey) -> (String, String, String) {
        let (description, value) = match key {
            ConfigKey::Autosave => (
                self.data.autosave.description(),
                self.data.autosave.get_value().to_string(),
            ),
            ConfigKey::PersistHistory => (
                self.data.persist_history.description(),
                self.data.persist_history.get_value().to_string(),
            ),
            ConfigKey::HistoryLimit => (
                self.data.history_limit.description(),
                self.data.history_limit.get_value().to_string(),
            ),
            ConfigKey::BlockedWords => (
                self.data.blocked_words.description(),
                self.data.blocked_words.get_value().to_string(),
            ),
            ConfigKey::FileLoggingEnabled => (
                self.data.file_logging_enabled.description(),
                self.data.file_logging_enabled.get_value().to_string(),
            ),
        };
        (key.to_string(), description.to_string(), value)
    }

    pub fn set_key(&mut self, key: ConfigKey, new_value: &str) -> Result<()> {
        let old = self.row(key).2;
        self.edit(|cfg| match key {
            ConfigKey::Autosave => cfg.autosave.set_value(new_value),
            ConfigKey::PersistHistory => cfg.persist_history.set_value(new_value),
            ConfigKey::HistoryLimit => cfg.history_limit.set_value(new_value),
            ConfigKey::BlockedWords => cfg.blocked_words.set_value(new_value),
            ConfigKey::FileLoggingEnabled => cfg.file_logging_enabled.set_value(new_value),
        })?;
        // stash for caller to log.
        self.last_change = Some((key.to_string(), old, self.row(key).2));
        Ok(())
    }

    pub fn take_last_change(&mut self) -> Option<(String, String, String)> {
        self.last_change.take()
    }

    // Edits a copy so a failed value or a failed write leaves the config as it was.
    fn edit<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ConfigFile) -> Result<()>,
    {
        let mut staged = self.data.clone();
        f(&mut staged)?;
        Self::write(&self.path, &staged)?;
        self.data = staged;
        Ok(())
    }

    fn write(path: &Path, data: &ConfigFile) -> Result<()> {
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| Error::Config(format!("Failed to encode config: {}", e)))?;
        persist::write_atomic(path, json.as_bytes())
            .map_err(|e| Error::Config(format!("Failed to write {}: {}", path.display(), e)))
    }
}
