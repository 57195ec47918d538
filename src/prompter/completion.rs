use crate::command::registry::Registry;
use crate::config::ConfigKey;

/// Candidates for the word ending at `pos`, and the byte offset that word starts at.
///
/// The first word completes command names and aliases; the argument of `help`
/// completes command names and the first argument of `config` completes keys.
pub fn complete(registry: &Registry, line: &str, pos: usize) -> (usize, Vec<String>) {
    let (start, word, before) = split_at_cursor(line, pos);

    let pool: Vec<String> = match before.as_slice() {
        [] => registry.names().into_iter().map(str::to_string).collect(),
        [cmd] => match registry.resolve(cmd).map(|c| c.name) {
            Ok("help") => registry.names().into_iter().map(str::to_string).collect(),
            Ok("config") => ConfigKey::names(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    let prefix = word.to_ascii_lowercase();
    let mut matches: Vec<String> = pool
        .into_iter()
        .filter(|c| c.to_ascii_lowercase().starts_with(&prefix))
        .collect();
    matches.sort();
    matches.dedup();
    (start, matches)
}

/// True when the cursor sits on the path argument of `save` or `load`.
pub fn wants_path(registry: &Registry, line: &str, pos: usize) -> bool {
    let (_, _, before) = split_at_cursor(line, pos);
    match before.as_slice() {
        [cmd] => matches!(registry.resolve(cmd).map(|c| c.name), Ok("save" | "load")),
        _ => false,
    }
}

fn split_at_cursor(line: &str, pos: usize) -> (usize, &str, Vec<&str>) {
    let mut pos = pos.min(line.len());
    while !line.is_char_boundary(pos) {
        pos -= 1;
    }
    let head = &line[..pos];
    let start = head
        .rfind(char::is_whitespace)
        .map(|i| i + head[i..].chars().next().map_or(1, char::len_utf8))
        .unwrap_or(0);
    (start, &head[start..], head[..start].split_whitespace().collect())
}
