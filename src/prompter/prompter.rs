use crate::errors::{Error, Result};
use crate::prompter::line_editor::{LineEditor, ReadOutcome};
use crate::prompter::models::{Flow, FlowCtrl};

#[derive(Debug, Default, Clone)]
pub struct Prompter;

impl Prompter {
    pub fn new() -> Self {
        Self
    }

    /// Read lines from `editor` into `flow` until it finishes or input ends.
    ///
    /// `finish` runs even when reading fails, so shutdown work is never skipped.
    pub fn run<F: Flow, E: LineEditor>(&self, mut flow: F, editor: &mut E) -> Result<()> {
        let outcome = Self::drive(&mut flow, editor);
        let finished = flow.finish(editor.history());
        outcome.and(finished)
    }

    fn drive<F: Flow, E: LineEditor>(flow: &mut F, editor: &mut E) -> Result<()> {
        loop {
            flow.render()?;
            let line = match editor.read_line(&flow.prompt())? {
                ReadOutcome::Line(line) => line,
                ReadOutcome::Cancelled => continue,
                ReadOutcome::Malformed(raw) => {
                    flow.reject_input(&raw, Error::parse("input is not valid UTF-8"))?;
                    continue;
                }
                ReadOutcome::EndOfInput => return Ok(()),
            };
            match flow.handle_input(&line, editor.history())? {
                FlowCtrl::Continue => continue,
                FlowCtrl::Finish => return Ok(()),
            }
        }
    }
}
