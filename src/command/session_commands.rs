use crate::arg::args::{BoundArgs, Param, ParamKind};
use crate::command::descriptor::{Action, CommandDescriptor, Output, SessionCtx};
use crate::config::ConfigKey;
use crate::errors::{Error, Result};
use crate::ui::table_printer::TablePrinter;

const COMMAND: &[Param] = &[Param::optional("command", ParamKind::Word)];
const PATH: &[Param] = &[Param::optional("path", ParamKind::Path)];
const CONFIG: &[Param] = &[
    Param::optional("key", ParamKind::Word),
    Param::rest("value", ParamKind::Text),
];

/// Commands that act on the engine rather than the state.
pub fn descriptors() -> Vec<CommandDescriptor> {
    vec![
        CommandDescriptor::new("help", "List commands or show one command", Action::Session(help))
            .aliases(&["?"])
            .params(COMMAND),
        CommandDescriptor::new("history", "List lines entered this session", Action::Session(history)),
        CommandDescriptor::new("save", "Save the session state", Action::Session(save))
            .params(PATH),
        CommandDescriptor::new("load", "Load a saved session state", Action::Session(load))
            .params(PATH),
        CommandDescriptor::new("config", "Show or change settings", Action::Session(config))
            .aliases(&["cfg"])
            .params(CONFIG),
        CommandDescriptor::new("log", "Print this session's log file", Action::Session(log)),
        CommandDescriptor::new("exit", "Leave the session", Action::Exit).aliases(&["quit"]),
    ]
}

fn help(ctx: &mut SessionCtx<'_>, args: &BoundArgs) -> Result<Output> {
    let registry = &ctx.app.registry;
    if let Some(name) = args.word("command") {
        let cmd = registry.resolve(name)?;
        let mut out = vec![cmd.usage(), format!("  {}", cmd.summary)];
        if !cmd.aliases.is_empty() {
            out.push(format!("  Aliases: {}", cmd.aliases.join(", ")));
        }
        return Ok(out.join("\n"));
    }

    let rows: Vec<Vec<String>> = registry
        .iter()
        .map(|cmd| {
            let name = if cmd.aliases.is_empty() {
                cmd.name.to_string()
            } else {
                format!("{} ({})", cmd.name, cmd.aliases.join(", "))
            };
            let params = cmd
                .params
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            vec![name, params, cmd.summary.to_string()]
        })
        .collect();
    Ok(TablePrinter::for_terminal().render(
        "commands",
        &["COMMAND", "ARGS", "DESCRIPTION"],
        &rows,
        None,
    ))
}

fn history(ctx: &mut SessionCtx<'_>, _args: &BoundArgs) -> Result<Output> {
    let rows: Vec<Vec<String>> = ctx
        .history
        .iter()
        .enumerate()
        .map(|(i, line)| vec![(i + 1).to_string(), line.clone()])
        .collect();
    Ok(TablePrinter::for_terminal().render("history", &["#", "INPUT"], &rows, Some("No history")))
}

fn save(ctx: &mut SessionCtx<'_>, args: &BoundArgs) -> Result<Output> {
    let written = ctx.app.save_state(args.path("path"))?;
    Ok(format!("Saved to {}", written.display()))
}

fn load(ctx: &mut SessionCtx<'_>, args: &BoundArgs) -> Result<Output> {
    let read = ctx.app.load_state(args.path("path"))?;
    Ok(format!("Loaded {}", read.display()))
}

fn config(ctx: &mut SessionCtx<'_>, args: &BoundArgs) -> Result<Output> {
    let printer = TablePrinter::for_terminal();
    let headers = ["KEY", "VALUE", "DESCRIPTION"];

    let Some(raw_key) = args.word("key") else {
        let rows: Vec<Vec<String>> = ctx
            .app
            .config
            .rows()
            .iter()
            .map(|(k, d, v)| vec![k.clone(), v.clone(), d.clone()])
            .collect();
        return Ok(printer.render("config", &headers, &rows, None));
    };

    let key = ConfigKey::try_from(raw_key)?;
    match args.text("value") {
        None => {
            let (k, d, v) = ctx.app.config.row(key);
            Ok(printer.render("config", &headers, &[vec![k, v, d]], None))
        }
        Some(value) => {
            let (k, old, new) = ctx.app.set_config(key, value)?;
            Ok(format!("{k}: {old} -> {new}"))
        }
    }
}

fn log(ctx: &mut SessionCtx<'_>, _args: &BoundArgs) -> Result<Output> {
    match ctx.app.logger.read_current() {
        None => Ok("No logs".to_string()),
        Some(Ok(text)) if text.trim().is_empty() => Ok("No logs".to_string()),
        Some(Ok(text)) => Ok(text.trim_end().to_string()),
        Some(Err(e)) => Err(Error::Io(e)),
    }
}
