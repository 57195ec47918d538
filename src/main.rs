use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use notch::core::cli::CliPaths;
use notch::core::context::AppContext;
use notch::core::persist;
use notch::logging::LogTarget;
use notch::prompter::flows::main_flow::MainFlow;
use notch::prompter::line_editor::{LineEditor, ReaderEditor, TerminalEditor};
use notch::prompter::prompter::Prompter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let paths = CliPaths::from_env().map_err(|msg| anyhow!(msg))?;
    let mut ctx = AppContext::new_with_paths(paths.clone()).with_context(|| {
        format!(
            "Could not start session (config: {}, state: {})",
            paths.config_path.display(),
            paths.state_path.display()
        )
    })?;

    if io::stdin().is_terminal() {
        let editor = TerminalEditor::new(ctx.registry.clone())
            .context("Could not initialise the line editor")?;
        session(&mut ctx, editor, true)
    } else {
        session(&mut ctx, ReaderEditor::new(io::stdin().lock()), false)
    }
}

fn session<E: LineEditor>(ctx: &mut AppContext, mut editor: E, interactive: bool) -> Result<()> {
    if ctx.config.persist_history() {
        match persist::load_history(&ctx.paths.history_path) {
            Ok(entries) => editor.seed_history(entries),
            Err(err) => ctx
                .logger
                .warn(format!("History not loaded. {err}"), LogTarget::ConsoleAndFile),
        }
    }

    let logger = ctx.logger.clone();
    let flow = MainFlow::new(ctx, io::stdout()).interactive(interactive);
    Prompter::new().run(flow, &mut editor).map_err(|err| {
        logger.error(format!("Session ended with an error. {err}"), LogTarget::FileOnly);
        anyhow!(err).context("Session ended with an error")
    })
}
