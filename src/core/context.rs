use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;

use crate::command::builtins;
use crate::command::registry::Registry;
use crate::config::{Config, ConfigKey};
use crate::core::cli::CliPaths;
use crate::core::persist;
use crate::core::state::{SessionState, StateRules};
use crate::core::store::StateStore;
use crate::core::types::WordList;
use crate::errors::{Error, Result};
use crate::logging::{LogTarget, Logger};

#[derive(Debug)]
pub struct AppContext {
    pub config: Config,
    pub store: StateStore,
    pub registry: Arc<Registry>,
    pub logger: Logger,
    pub paths: CliPaths,
    pub startup_displayed: bool,
    saved_revision: u64,
}

impl AppContext {
    /// Startup wiring: config, logger, command table, then the state file.
    ///
    /// A missing state file starts a fresh session; one that exists but cannot
    /// be loaded is an error so that it is never silently overwritten.
    pub fn new_with_paths(paths: CliPaths) -> Result<Self> {
        let config = Config::load_from(&paths.config_path)?;

        let logger = Logger::with_dir(&paths.logs_dir);
        logger.set_file_logging_enabled(config.file_logging_enabled());

        let registry = Registry::from_descriptors(builtins::discover())?;

        let rules = Self::rules_for(&config);
        let mut state = if paths.state_path.exists() {
            let state = persist::load_with(&paths.state_path, &rules)?;
            logger.info(
                format!("Loaded state from {}", paths.state_path.display()),
                LogTarget::FileOnly,
            );
            state
        } else {
            SessionState::new()
        };
        state.mark_opened(Utc::now());

        Ok(Self::from_parts(config, state, registry, logger, paths))
    }

    pub fn from_parts(
        config: Config,
        state: SessionState,
        registry: Registry,
        logger: Logger,
        paths: CliPaths,
    ) -> Self {
        let store = StateStore::new(state, Self::rules_for(&config));
        Self {
            config,
            store,
            registry: Arc::new(registry),
            logger,
            paths,
            startup_displayed: false,
            saved_revision: 0,
        }
    }

    fn rules_for(config: &Config) -> StateRules {
        StateRules::new(config.blocked_words().clone())
    }

    /// True when the state differs from what was last synced with the state path.
    pub fn is_dirty(&self) -> bool {
        self.store.revision() != self.saved_revision
    }

    pub fn mark_saved(&mut self) {
        self.saved_revision = self.store.revision();
    }

    /// Compares against the state path after making both absolute.
    fn is_state_path(&self, path: &Path) -> bool {
        match (
            std::path::absolute(path),
            std::path::absolute(&self.paths.state_path),
        ) {
            (Ok(a), Ok(b)) => a == b,
            _ => path == self.paths.state_path,
        }
    }

    pub fn save_state(&mut self, path: Option<&Path>) -> Result<PathBuf> {
        let target = path.unwrap_or(self.paths.state_path.as_path()).to_path_buf();
        let written = persist::save(&target, self.store.read())?;
        if self.is_state_path(&target) {
            self.mark_saved();
        }
        self.logger
            .info(format!("Saved state to {}", written.display()), LogTarget::FileOnly);
        Ok(written)
    }

    /// Replaces the in-memory state only when the file loads cleanly.
    pub fn load_state(&mut self, path: Option<&Path>) -> Result<PathBuf> {
        let source = path.unwrap_or(self.paths.state_path.as_path()).to_path_buf();
        let state = persist::load_with(&source, self.store.rules())?;
        self.store.replace(state)?;
        if self.is_state_path(&source) {
            self.mark_saved();
        }
        self.logger
            .info(format!("Loaded state from {}", source.display()), LogTarget::FileOnly);
        Ok(source)
    }

    /// Set a config value and apply it to the running session.
    ///
    /// Returns `(key, old, new)` as displayed values.
    pub fn set_config(&mut self, key: ConfigKey, value: &str) -> Result<(String, String, String)> {
        if key == ConfigKey::BlockedWords {
            let rules = StateRules::new(WordList::parse_csv(value));
            rules.check(self.store.read()).map_err(|msg| {
                Error::Config(format!("Current state would be rejected: {msg}"))
            })?;
        }

        self.config.set_key(key, value)?;
        self.store.set_rules(Self::rules_for(&self.config));
        self.logger
            .set_file_logging_enabled(self.config.file_logging_enabled());

        let change = self.config.take_last_change().unwrap_or_else(|| {
            let (k, _, v) = self.config.row(key);
            (k, v.clone(), v)
        });
        self.logger.info(
            format!("Config {} changed: {} -> {}", change.0, change.1, change.2),
            LogTarget::FileOnly,
        );
        Ok(change)
    }
}
