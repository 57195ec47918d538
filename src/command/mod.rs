pub mod builtins;
pub mod descriptor;
pub mod registry;
pub mod session_commands;
pub mod state_commands;
