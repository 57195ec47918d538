use std::collections::HashMap;
use std::sync::Arc;

use crate::command::descriptor::CommandDescriptor;
use crate::errors::{Error, Result};

/// Name → command table, fixed once startup registration is done.
#[derive(Debug, Default)]
pub struct Registry {
    commands: Vec<Arc<CommandDescriptor>>,
    index: HashMap<String, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a fully formed descriptor list; the first collision aborts.
    pub fn from_descriptors<I>(descriptors: I) -> Result<Self>
    where
        I: IntoIterator<Item = CommandDescriptor>,
    {
        let mut registry = Self::new();
        for d in descriptors {
            registry.register(d)?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, descriptor: CommandDescriptor) -> Result<()> {
        let mut keys: Vec<String> = Vec::new();
        for name in descriptor.names() {
            let key = Self::key(name);
            if key.is_empty() || key.contains(char::is_whitespace) {
                return Err(Error::Parse(format!(
                    "Invalid command identifier '{name}'."
                )));
            }
            if self.index.contains_key(&key) || keys.contains(&key) {
                return Err(Error::DuplicateCommand(name.to_string()));
            }
            keys.push(key);
        }

        let slot = self.commands.len();
        self.commands.push(Arc::new(descriptor));
        for key in keys {
            self.index.insert(key, slot);
        }
        Ok(())
    }

    pub fn resolve(&self, identifier: &str) -> Result<Arc<CommandDescriptor>> {
        self.index
            .get(&Self::key(identifier))
            .map(|&slot| Arc::clone(&self.commands[slot]))
            .ok_or_else(|| Error::unknown(identifier.trim()))
    }

    /// Primary names in registration order.
    pub fn identifiers(&self) -> Vec<&'static str> {
        self.commands.iter().map(|c| c.name).collect()
    }

    /// Primary names and aliases in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.commands.iter().flat_map(|c| c.names()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<CommandDescriptor>> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    fn key(name: &str) -> String {
        name.trim().to_ascii_lowercase()
    }
}
