use std::fmt;

use crate::arg::args::{BoundArgs, Param};
use crate::core::context::AppContext;
use crate::core::state::SessionState;
use crate::errors::Result;

/// Text a command hands back for rendering; empty means nothing to print.
pub type Output = String;

pub type MutateFn = fn(&mut SessionState, &BoundArgs) -> Result<Output>;
pub type InspectFn = fn(&SessionState, &BoundArgs) -> Result<Output>;
pub type SessionFn = fn(&mut SessionCtx<'_>, &BoundArgs) -> Result<Output>;

/// What running a command does.
#[derive(Clone, Copy)]
pub enum Action {
    /// Transforms a staged copy of the state; committed only if it validates.
    Mutate(MutateFn),
    /// Reads the committed state.
    Inspect(InspectFn),
    /// Works on the application itself (persistence, config, help...).
    Session(SessionFn),
    Exit,
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Action::Mutate(_) => "Mutate",
            Action::Inspect(_) => "Inspect",
            Action::Session(_) => "Session",
            Action::Exit => "Exit",
        };
        write!(f, "{kind}")
    }
}

/// Engine access handed to session-level commands.
pub struct SessionCtx<'a> {
    pub app: &'a mut AppContext,
    pub history: &'a [String],
}

/// Static metadata plus handler for one invocable command.
#[derive(Debug, Clone)]
pub struct CommandDescriptor {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub summary: &'static str,
    pub params: &'static [Param],
    pub action: Action,
}

impl CommandDescriptor {
    pub fn new(name: &'static str, summary: &'static str, action: Action) -> Self {
        Self {
            name,
            aliases: &[],
            summary,
            params: &[],
            action,
        }
    }

    pub fn params(mut self, params: &'static [Param]) -> Self {
        self.params = params;
        self
    }

    pub fn aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    /// Every identifier this command answers to.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.name).chain(self.aliases.iter().copied())
    }

    pub fn signature(&self) -> String {
        let mut s = self.name.to_string();
        for p in self.params {
            s.push(' ');
            s.push_str(&p.to_string());
        }
        s
    }

    pub fn usage(&self) -> String {
        format!("Usage: {}", self.signature())
    }
}
