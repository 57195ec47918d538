use std::io::Write;

use chrono::Utc;

use crate::arg::arg_parser::{ArgParser, split_line};
use crate::command::descriptor::{Action, Output, SessionCtx};
use crate::core::context::AppContext;
use crate::core::persist;
use crate::errors::{Error, Result};
use crate::logging::{LogTarget, Logger};
use crate::prompter::models::{Flow, FlowCtrl, ReplPhase};
use crate::ui::ansi::{FG_RED, paint};
use crate::ui::chrome::UiChrome;

const PROMPT: &str = "notch> ";

/// The command dispatcher: parse, resolve, execute and render one line at a time.
pub struct MainFlow<'a, W: Write> {
    ctx: &'a mut AppContext,
    out: W,
    arg_parser: ArgParser,
    chrome: UiChrome,
    interactive: bool,
    phase: ReplPhase,
    failed_in: Option<ReplPhase>,
    logger: Logger,
}

impl<'a, W: Write> MainFlow<'a, W> {
    pub fn new(ctx: &'a mut AppContext, out: W) -> Self {
        let logger = ctx.logger.clone();
        Self {
            ctx,
            out,
            arg_parser: ArgParser::new(),
            chrome: UiChrome::new(false),
            interactive: false,
            phase: ReplPhase::AwaitingInput,
            failed_in: None,
            logger,
        }
    }

    /// Colored output and the startup banner, for a real terminal.
    pub fn interactive(mut self, on: bool) -> Self {
        self.interactive = on;
        self.chrome = UiChrome::new(on);
        self
    }

    pub fn phase(&self) -> ReplPhase {
        self.phase
    }

    /// Phase in which the most recent line failed, if it did.
    pub fn failed_in(&self) -> Option<ReplPhase> {
        self.failed_in
    }

    pub fn context(&self) -> &AppContext {
        self.ctx
    }

    pub fn output(&self) -> &W {
        &self.out
    }
}

impl<'a, W: Write> Flow for MainFlow<'a, W> {
    fn render(&mut self) -> Result<()> {
        self.print_startup()
    }

    fn prompt(&self) -> String {
        self.chrome.prompt(PROMPT)
    }

    fn handle_input(&mut self, input: &str, history: &[String]) -> Result<FlowCtrl> {
        self.failed_in = None;
        let ctrl = match self.dispatch(input, history) {
            Ok(Some(output)) => {
                self.phase = ReplPhase::Rendering;
                if !output.is_empty() {
                    writeln!(self.out, "{output}")?;
                }
                FlowCtrl::Continue
            }
            Ok(None) => FlowCtrl::Finish,
            Err(err) => {
                self.failed_in = Some(self.phase);
                self.render_error(input, &err)?;
                FlowCtrl::Continue
            }
        };
        self.out.flush()?;
        self.phase = match ctrl {
            FlowCtrl::Continue => ReplPhase::AwaitingInput,
            FlowCtrl::Finish => ReplPhase::Shutdown,
        };
        Ok(ctrl)
    }

    fn reject_input(&mut self, raw: &str, err: Error) -> Result<()> {
        self.phase = ReplPhase::Parsing;
        self.failed_in = Some(self.phase);
        self.render_error(raw, &err)?;
        self.out.flush()?;
        self.phase = ReplPhase::AwaitingInput;
        Ok(())
    }

    fn finish(&mut self, history: &[String]) -> Result<()> {
        self.phase = ReplPhase::Shutdown;
        if let Err(err) = self.ctx.store.stamp(|s| s.mark_exited(Utc::now())) {
            self.logger
                .warn(format!("Could not record exit time. {err}"), LogTarget::FileOnly);
        }
        self.autosave();
        self.save_history(history);
        Ok(())
    }
}

impl<'a, W: Write> MainFlow<'a, W> {
    fn print_startup(&mut self) -> Result<()> {
        if self.ctx.startup_displayed || !self.interactive {
            return Ok(());
        }
        writeln!(self.out, "{}", self.chrome.banner())?;
        writeln!(self.out)?;
        writeln!(self.out, "State path: {}", self.ctx.paths.state_path.display())?;
        writeln!(self.out, "Config path: {}", self.ctx.paths.config_path.display())?;
        writeln!(self.out, "Logs path: {}", self.ctx.paths.logs_dir.display())?;
        writeln!(self.out)?;
        self.out.flush()?;
        self.ctx.startup_displayed = true;
        Ok(())
    }

    /// `Ok(None)` asks the loop to shut down.
    fn dispatch(&mut self, line: &str, history: &[String]) -> Result<Option<Output>> {
        self.phase = ReplPhase::Parsing;
        let parsed = split_line(line)?;

        self.phase = ReplPhase::Resolving;
        let cmd = self.ctx.registry.resolve(&parsed.command)?;
        let args = self
            .arg_parser
            .bind(cmd.params, &parsed.tokens)
            .map_err(|e| match e {
                Error::Parse(msg) => Error::Parse(format!("{msg}\n{}", cmd.usage())),
                other => other,
            })?;

        self.phase = ReplPhase::Executing;
        if let Action::Exit = cmd.action {
            return Ok(None);
        }
        if cmd.name != "log" {
            self.logger
                .info(format!("Command run: {}", line.trim()), LogTarget::FileOnly);
        }
        let output = match cmd.action {
            Action::Exit => return Ok(None),
            Action::Mutate(f) => self.ctx.store.apply(|state| f(state, &args))?,
            Action::Inspect(f) => f(self.ctx.store.read(), &args)?,
            Action::Session(f) => {
                let mut session = SessionCtx {
                    app: &mut *self.ctx,
                    history,
                };
                f(&mut session, &args)?
            }
        };
        Ok(Some(output))
    }

    fn render_error(&mut self, line: &str, err: &Error) -> Result<()> {
        self.logger.error(
            format!("Command failed for '{}'. {}", line.trim(), err),
            LogTarget::FileOnly,
        );
        let text = format!("Error: {err}");
        writeln!(self.out, "{}", paint(&text, FG_RED, self.interactive))?;
        Ok(())
    }

    fn autosave(&mut self) {
        if !self.ctx.config.autosave() || !self.ctx.is_dirty() {
            return;
        }
        match self.ctx.save_state(None) {
            Ok(path) => self.logger.info(
                format!("Session saved to {}", path.display()),
                LogTarget::ConsoleAndFile,
            ),
            Err(err) => self
                .logger
                .error(format!("Autosave failed. {err}"), LogTarget::ConsoleAndFile),
        }
    }

    fn save_history(&mut self, history: &[String]) {
        if !self.ctx.config.persist_history() {
            return;
        }
        let path = &self.ctx.paths.history_path;
        if let Err(err) = persist::save_history(path, history, self.ctx.config.history_limit()) {
            self.logger.warn(
                format!("Could not save history to {}. {err}", path.display()),
                LogTarget::ConsoleAndFile,
            );
        }
    }
}
