use crate::arg::args::{BoundArgs, Param, ParamKind};
use crate::command::descriptor::{Action, CommandDescriptor, Output};
use crate::core::state::SessionState;
use crate::errors::{Result, require_parse};
use crate::ui::table_printer::TablePrinter;

const AMOUNT: &[Param] = &[Param::optional("n", ParamKind::Int)];
const VALUE: &[Param] = &[Param::required("n", ParamKind::Int)];
const TAGS: &[Param] = &[Param::many("tags", ParamKind::Word)];
const TAG: &[Param] = &[Param::required("tag", ParamKind::Word)];
const TEXT: &[Param] = &[Param::many("text", ParamKind::Text)];

/// Commands that read or change the session state.
pub fn descriptors() -> Vec<CommandDescriptor> {
    vec![
        CommandDescriptor::new("add", "Add n (default 1) to the counter", Action::Mutate(add))
            .params(AMOUNT),
        CommandDescriptor::new(
            "sub",
            "Subtract n (default 1) from the counter",
            Action::Mutate(sub),
        )
        .params(AMOUNT),
        CommandDescriptor::new("set", "Set the counter to n", Action::Mutate(set))
            .params(VALUE),
        CommandDescriptor::new("reset", "Set the counter back to 0", Action::Mutate(reset)),
        CommandDescriptor::new("tag", "Attach one or more tags", Action::Mutate(tag))
            .params(TAGS),
        CommandDescriptor::new("untag", "Remove a tag", Action::Mutate(untag)).params(TAG),
        CommandDescriptor::new("desc", "Set the session description", Action::Mutate(desc))
            .params(TEXT),
        CommandDescriptor::new("note", "Append a note", Action::Mutate(note)).params(TEXT),
        CommandDescriptor::new("show", "Show the session state", Action::Inspect(show)),
        CommandDescriptor::new("notes", "List notes", Action::Inspect(notes)),
    ]
}

fn add(state: &mut SessionState, args: &BoundArgs) -> Result<Output> {
    let n = state.add(args.int("n").unwrap_or(1))?;
    Ok(format!("Counter: {n}"))
}

fn sub(state: &mut SessionState, args: &BoundArgs) -> Result<Output> {
    let n = state.sub(args.int("n").unwrap_or(1))?;
    Ok(format!("Counter: {n}"))
}

fn set(state: &mut SessionState, args: &BoundArgs) -> Result<Output> {
    state.counter = require_parse(args.int("n"), "Missing argument <n:int>.")?;
    Ok(format!("Counter: {}", state.counter))
}

fn reset(state: &mut SessionState, _args: &BoundArgs) -> Result<Output> {
    state.counter = 0;
    Ok("Counter: 0".to_string())
}

fn tag(state: &mut SessionState, args: &BoundArgs) -> Result<Output> {
    let mut added = Vec::new();
    for t in args.words("tags") {
        if state.tags.insert(t.to_string()) {
            added.push(t);
        }
    }
    if added.is_empty() {
        return Ok("No new tags.".to_string());
    }
    Ok(format!("Tagged: {}", added.join(", ")))
}

fn untag(state: &mut SessionState, args: &BoundArgs) -> Result<Output> {
    let t = require_parse(args.word("tag"), "Missing argument <tag:word>.")?;
    if state.tags.remove(t) {
        Ok(format!("Removed tag '{t}'."))
    } else {
        Ok(format!("No tag '{t}'."))
    }
}

fn desc(state: &mut SessionState, args: &BoundArgs) -> Result<Output> {
    let text = require_parse(args.text("text"), "Missing argument <text:text...>.")?;
    state.description = text.trim().to_string();
    Ok("Description updated.".to_string())
}

fn note(state: &mut SessionState, args: &BoundArgs) -> Result<Output> {
    let text = require_parse(args.text("text"), "Missing argument <text:text...>.")?;
    state.notes.push(text.trim().to_string());
    Ok(format!("Note {} added.", state.notes.len()))
}

fn show(state: &SessionState, _args: &BoundArgs) -> Result<Output> {
    Ok(state.to_string())
}

fn notes(state: &SessionState, _args: &BoundArgs) -> Result<Output> {
    let rows: Vec<Vec<String>> = state
        .notes
        .iter()
        .enumerate()
        .map(|(i, n)| vec![(i + 1).to_string(), n.clone()])
        .collect();
    Ok(TablePrinter::for_terminal().render("notes", &["#", "NOTE"], &rows, Some("No notes")))
}
