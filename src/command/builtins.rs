use crate::command::descriptor::CommandDescriptor;
use crate::command::{session_commands, state_commands};

/// Every built-in command, in the order `help` lists them.
pub fn discover() -> Vec<CommandDescriptor> {
    let mut all = state_commands::descriptors();
    all.extend(session_commands::descriptors());
    all
}
