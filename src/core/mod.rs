pub mod cli;
pub mod context;
pub mod persist;
pub mod state;
pub mod store;
pub mod types;
