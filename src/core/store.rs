use crate::core::state::{SessionState, StateRules};
use crate::errors::{Error, Result};

/// Exclusive owner of the session state.
///
/// Mutations are staged on a copy, validated against [`StateRules`], and only
/// then swapped in; a failed mutation leaves the committed state untouched.
#[derive(Debug)]
pub struct StateStore {
    state: SessionState,
    rules: StateRules,
    revision: u64,
}

impl StateStore {
    pub fn new(initial: SessionState, rules: StateRules) -> Self {
        Self {
            state: initial,
            rules,
            revision: 0,
        }
    }

    pub fn read(&self) -> &SessionState {
        &self.state
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.clone()
    }

    /// Number of committed mutations since construction.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn rules(&self) -> &StateRules {
        &self.rules
    }

    pub fn set_rules(&mut self, rules: StateRules) {
        self.rules = rules;
    }

    pub fn apply<T, F>(&mut self, mutation: F) -> Result<T>
    where
        F: FnOnce(&mut SessionState) -> Result<T>,
    {
        let mut staged = self.state.clone();
        let out = mutation(&mut staged)?;
        self.commit(staged)?;
        Ok(out)
    }

    /// Update session bookkeeping (open/exit times) without bumping the revision.
    pub fn stamp<F>(&mut self, update: F) -> Result<()>
    where
        F: FnOnce(&mut SessionState),
    {
        let mut staged = self.state.clone();
        update(&mut staged);
        self.rules.check(&staged).map_err(Error::InvalidMutation)?;
        self.state = staged;
        Ok(())
    }

    /// Swap in a whole state, subject to the same invariants as `apply`.
    pub fn replace(&mut self, state: SessionState) -> Result<()> {
        self.commit(state)
    }

    fn commit(&mut self, staged: SessionState) -> Result<()> {
        self.rules.check(&staged).map_err(Error::InvalidMutation)?;
        if staged != self.state {
            self.state = staged;
            self.revision += 1;
        }
        Ok(())
    }
}
