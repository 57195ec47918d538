use crate::errors::{Error, Result};

pub enum FlowCtrl {
    Continue,
    Finish,
}

/// One interactive conversation driven by the [`Prompter`](super::prompter::Prompter).
pub trait Flow {
    fn render(&mut self) -> Result<()>;
    fn prompt(&self) -> String;
    fn handle_input(&mut self, input: &str, history: &[String]) -> Result<FlowCtrl>;
    /// A line the editor could not decode; `err` says why.
    fn reject_input(&mut self, raw: &str, err: Error) -> Result<()>;
    /// Called once when the loop ends, however it ended.
    fn finish(&mut self, history: &[String]) -> Result<()>;
}

/// Where the dispatcher is in handling one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplPhase {
    AwaitingInput,
    Parsing,
    Resolving,
    Executing,
    Rendering,
    Shutdown,
}
