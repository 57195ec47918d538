use crate::core::types::{Bool, Limit, WordList};
use crate::errors::Error;
use serde::{Deserialize, Serialize};

pub trait ConfigItem<T> {
    fn get_value(&self) -> &T;
    fn set_value(&mut self, new_value: &str) -> Result<(), Error>;
    fn description(&self) -> &str;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutosaveConfigItem {
    pub value: Bool,
    pub description: String,
}

impl Default for AutosaveConfigItem {
    fn default() -> Self {
        Self {
            value: Bool(true),
            description: "Save the session state on exit when it has changed.".into(),
        }
    }
}

impl ConfigItem<Bool> for AutosaveConfigItem {
    fn get_value(&self) -> &Bool {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        Ok(self.value = Bool::try_from_str(new_value)?)
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistHistoryConfigItem {
    pub value: Bool,
    pub description: String,
}

impl Default for PersistHistoryConfigItem {
    fn default() -> Self {
        Self {
            value: Bool(false),
            description: "Keep input history across sessions.".into(),
        }
    }
}

impl ConfigItem<Bool> for PersistHistoryConfigItem {
    fn get_value(&self) -> &Bool {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        Ok(self.value = Bool::try_from_str(new_value)?)
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryLimitConfigItem {
    pub value: Limit,
    pub description: String,
}

impl Default for HistoryLimitConfigItem {
    fn default() -> Self {
        Self {
            value: Limit(500),
            description: "Maximum number of history lines kept on disk.".into(),
        }
    }
}

impl ConfigItem<Limit> for HistoryLimitConfigItem {
    fn get_value(&self) -> &Limit {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        Ok(self.value = Limit::try_from_str(new_value)?)
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockedWordsConfigItem {
    pub value: WordList,
    pub description: String,
}

impl Default for BlockedWordsConfigItem {
    fn default() -> Self {
        Self {
            value: WordList::default(),
            description: "Comma-separated words rejected in tags, description and notes."
                .into(),
        }
    }
}

impl ConfigItem<WordList> for BlockedWordsConfigItem {
    fn get_value(&self) -> &WordList {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        self.value = WordList::parse_csv(new_value);
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileLoggingConfigItem {
    pub value: Bool,
    pub description: String,
}

impl Default for FileLoggingConfigItem {
    fn default() -> Self {
        Self {
            value: Bool(true),
            description: "Enable writing log messages to file.".into(),
        }
    }
}

impl ConfigItem<Bool> for FileLoggingConfigItem {
    fn get_value(&self) -> &Bool {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        Ok(self.value = Bool::try_from_str(new_value)?)
    }
    fn description(&self) -> &str {
        &self.description
    }
}
