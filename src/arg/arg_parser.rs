use super::args::*;
use crate::errors::{Error, Result};

/// A raw input line split into its command identifier and argument tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub command: String,
    pub tokens: Vec<String>,
}

/// Split a line with shell quoting rules. Blank input is a parse error.
pub fn split_line(line: &str) -> Result<ParsedLine> {
    if line.trim().is_empty() {
        return Err(Error::parse("empty input"));
    }
    let mut tokens = shell_words::split(line)
        .map_err(|e| Error::Parse(format!("Could not split '{}': {e}", line.trim())))?;
    if tokens.is_empty() || tokens[0].trim().is_empty() {
        return Err(Error::parse("empty input"));
    }
    let command = tokens.remove(0);
    Ok(ParsedLine { command, tokens })
}

#[derive(Debug, Default, Clone)]
pub struct ArgParser;

impl ArgParser {
    pub fn new() -> Self {
        Self
    }

    /// Bind `raw` tokens to the ordered `params` schema.
    pub fn bind(&self, params: &[Param], raw: &[String]) -> Result<BoundArgs> {
        let mut ts = TokenStream::new(raw);
        let mut out = BoundArgs::default();

        for param in params {
            let values = match param.arity {
                Arity::Required => {
                    if ts.eof() {
                        return Err(Error::Parse(format!("Missing argument {param}.")));
                    }
                    vec![self.parse_one(param, &ts.next()?)?]
                }
                Arity::Optional => {
                    if ts.eof() {
                        Vec::new()
                    } else {
                        vec![self.parse_one(param, &ts.next()?)?]
                    }
                }
                Arity::Many | Arity::Rest => {
                    let rest = ts.drain();
                    if rest.is_empty() && param.arity == Arity::Many {
                        return Err(Error::Parse(format!("Missing argument {param}.")));
                    }
                    self.parse_multi(param, &rest)?
                }
            };
            out.push(param.name, values);
        }

        if !ts.eof() {
            return Err(Error::Parse(format!(
                "Unexpected argument: '{}'.",
                ts.peek()?
            )));
        }
        Ok(out)
    }

    fn parse_one(&self, param: &Param, tok: &str) -> Result<Arg> {
        parse_token(param.kind, tok)
            .map_err(|e| Error::Parse(format!("Invalid value for {param}: {}", strip(&e))))
    }

    fn parse_multi(&self, param: &Param, toks: &[String]) -> Result<Vec<Arg>> {
        if toks.is_empty() {
            return Ok(Vec::new());
        }
        if param.kind == ParamKind::Text {
            return Ok(vec![Arg::Text(toks.join(" "))]);
        }
        toks.iter().map(|t| self.parse_one(param, t)).collect()
    }
}

fn strip(err: &Error) -> String {
    match err {
        Error::Parse(msg) => msg.clone(),
        other => other.to_string(),
    }
}
