use std::io::{self, BufRead};
use std::sync::Arc;

use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use crate::command::registry::Registry;
use crate::errors::{Error, Result};
use crate::prompter::completion;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    /// The user abandoned the current line (Ctrl-C).
    Cancelled,
    /// A line that is not valid UTF-8, lossily decoded for display.
    Malformed(String),
    EndOfInput,
}

/// Source of input lines with a session history.
pub trait LineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome>;
    /// Every non-blank line submitted so far, oldest first.
    fn history(&self) -> &[String];
    /// Prepend entries from an earlier session.
    fn seed_history(&mut self, entries: Vec<String>);
}

/// Append-only record of submitted lines; blank lines are not kept.
#[derive(Debug, Default, Clone)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    pub fn push(&mut self, line: &str) -> bool {
        if line.trim().is_empty() {
            return false;
        }
        self.entries.push(line.to_string());
        true
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    fn seed(&mut self, earlier: Vec<String>) -> Vec<String> {
        let kept: Vec<String> = earlier
            .into_iter()
            .filter(|l| !l.trim().is_empty())
            .collect();
        let mut merged = kept.clone();
        merged.append(&mut self.entries);
        self.entries = merged;
        kept
    }
}

/// Reads from any buffered reader without echoing a prompt (piped input, tests).
pub struct ReaderEditor<R: BufRead> {
    reader: R,
    history: History,
}

impl<R: BufRead> ReaderEditor<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            history: History::default(),
        }
    }
}

impl<R: BufRead> LineEditor for ReaderEditor<R> {
    fn read_line(&mut self, _prompt: &str) -> Result<ReadOutcome> {
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(ReadOutcome::EndOfInput);
        }
        while matches!(buf.last(), Some(b'\n' | b'\r')) {
            buf.pop();
        }
        match String::from_utf8(buf) {
            Ok(line) => {
                self.history.push(&line);
                Ok(ReadOutcome::Line(line))
            }
            Err(err) => Ok(ReadOutcome::Malformed(
                String::from_utf8_lossy(err.as_bytes()).into_owned(),
            )),
        }
    }

    fn history(&self) -> &[String] {
        self.history.entries()
    }

    fn seed_history(&mut self, entries: Vec<String>) {
        self.history.seed(entries);
    }
}

/// Interactive editor with line editing, history recall and tab completion.
pub struct TerminalEditor {
    editor: Editor<ShellHelper, DefaultHistory>,
    history: History,
}

impl TerminalEditor {
    pub fn new(registry: Arc<Registry>) -> Result<Self> {
        let mut editor: Editor<ShellHelper, DefaultHistory> =
            Editor::new().map_err(readline_error)?;
        editor.set_helper(Some(ShellHelper::new(registry)));
        Ok(Self {
            editor,
            history: History::default(),
        })
    }
}

impl LineEditor for TerminalEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if self.history.push(&line) {
                    self.editor
                        .add_history_entry(line.as_str())
                        .map_err(readline_error)?;
                }
                Ok(ReadOutcome::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Cancelled),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::EndOfInput),
            Err(e) => Err(readline_error(e)),
        }
    }

    fn history(&self) -> &[String] {
        self.history.entries()
    }

    fn seed_history(&mut self, entries: Vec<String>) {
        let kept = self.history.seed(entries);
        // recall order for arrow keys; session lines typed so far stay newest
        let session: Vec<String> = self.history.entries()[kept.len()..].to_vec();
        let _ = self.editor.clear_history();
        for line in kept.iter().chain(session.iter()) {
            let _ = self.editor.add_history_entry(line.as_str());
        }
    }
}

fn readline_error(e: ReadlineError) -> Error {
    match e {
        ReadlineError::Io(io) => Error::Io(io),
        other => Error::Io(io::Error::other(other.to_string())),
    }
}

/// Completion glue between rustyline and [`completion::complete`].
pub struct ShellHelper {
    registry: Arc<Registry>,
    files: FilenameCompleter,
}

impl ShellHelper {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            files: FilenameCompleter::new(),
        }
    }
}

impl Helper for ShellHelper {}

impl Highlighter for ShellHelper {}

impl Hinter for ShellHelper {
    type Hint = String;
    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Validator for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        if completion::wants_path(&self.registry, line, pos) {
            return self.files.complete(line, pos, ctx);
        }
        let (start, words) = completion::complete(&self.registry, line, pos);
        let pairs = words
            .into_iter()
            .map(|w| Pair {
                display: w.clone(),
                replacement: w,
            })
            .collect();
        Ok((start, pairs))
    }
}
