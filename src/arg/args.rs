use std::fmt;
use std::path::{Path, PathBuf};

use crate::errors::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    Int(i64),
    Word(String),
    Text(String),
    Path(PathBuf),
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Int(x) => write!(f, "{x}"),
            Arg::Word(x) => write!(f, "{x}"),
            Arg::Text(x) => write!(f, "\"{x}\""),
            Arg::Path(x) => write!(f, "{}", x.display()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Int,
    Word,
    /// Free text; with a multi-token arity the tokens are joined by spaces.
    Text,
    Path,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKind::Int => write!(f, "int"),
            ParamKind::Word => write!(f, "word"),
            ParamKind::Text => write!(f, "text"),
            ParamKind::Path => write!(f, "path"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Required,
    Optional,
    /// One or more remaining tokens.
    Many,
    /// Zero or more remaining tokens.
    Rest,
}

/// One entry of a command's ordered argument schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    pub name: &'static str,
    pub kind: ParamKind,
    pub arity: Arity,
}

impl Param {
    pub const fn required(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            kind,
            arity: Arity::Required,
        }
    }
    pub const fn optional(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            kind,
            arity: Arity::Optional,
        }
    }
    pub const fn many(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            kind,
            arity: Arity::Many,
        }
    }
    pub const fn rest(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            kind,
            arity: Arity::Rest,
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.arity {
            Arity::Required => write!(f, "<{}:{}>", self.name, self.kind),
            Arity::Optional => write!(f, "[{}:{}]", self.name, self.kind),
            Arity::Many => write!(f, "<{}:{}...>", self.name, self.kind),
            Arity::Rest => write!(f, "[{}:{}...]", self.name, self.kind),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TokenStream {
    toks: Vec<String>,
    i: usize,
}
impl TokenStream {
    pub fn new(raw: &[String]) -> Self {
        Self {
            toks: raw.to_vec(),
            i: 0,
        }
    }
    pub fn eof(&self) -> bool {
        self.i >= self.toks.len()
    }
    pub fn peek(&self) -> Result<&str> {
        self.toks
            .get(self.i)
            .map(|s| s.as_str())
            .ok_or_else(|| Error::Parse("EOF".into()))
    }
    pub fn next(&mut self) -> Result<String> {
        let s = self.peek()?.to_string();
        self.i += 1;
        Ok(s)
    }
    pub fn drain(&mut self) -> Vec<String> {
        let rest = self.toks[self.i.min(self.toks.len())..].to_vec();
        self.i = self.toks.len();
        rest
    }
}

pub trait SingleTokenArg {
    fn new(tok: &str) -> Result<Arg>;
}

pub struct IntArg;
impl SingleTokenArg for IntArg {
    fn new(value: &str) -> Result<Arg> {
        value
            .parse::<i64>()
            .map(Arg::Int)
            .map_err(|_| Error::Parse(format!("Expected an integer, got '{value}'.")))
    }
}

pub struct WordArg;
impl SingleTokenArg for WordArg {
    fn new(value: &str) -> Result<Arg> {
        if value.is_empty() {
            return Err(Error::Parse("Expected a non-empty word.".into()));
        }
        Ok(Arg::Word(value.to_string()))
    }
}

pub struct PathArg;
impl SingleTokenArg for PathArg {
    fn new(value: &str) -> Result<Arg> {
        if value.trim().is_empty() {
            return Err(Error::Parse("Expected a file path.".into()));
        }
        Ok(Arg::Path(PathBuf::from(value)))
    }
}

pub struct TextArg;
impl SingleTokenArg for TextArg {
    fn new(value: &str) -> Result<Arg> {
        Ok(Arg::Text(value.to_string()))
    }
}

pub fn parse_token(kind: ParamKind, tok: &str) -> Result<Arg> {
    match kind {
        ParamKind::Int => IntArg::new(tok),
        ParamKind::Word => WordArg::new(tok),
        ParamKind::Text => TextArg::new(tok),
        ParamKind::Path => PathArg::new(tok),
    }
}

/// Arguments bound to a schema, looked up by parameter name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundArgs {
    slots: Vec<(&'static str, Vec<Arg>)>,
}

impl BoundArgs {
    pub fn push(&mut self, name: &'static str, values: Vec<Arg>) {
        self.slots.push((name, values));
    }

    pub fn get(&self, name: &str) -> &[Arg] {
        self.slots
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|(_, v)| v.is_empty())
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).iter().find_map(|a| match a {
            Arg::Int(n) => Some(*n),
            _ => None,
        })
    }

    pub fn word(&self, name: &str) -> Option<&str> {
        self.words(name).into_iter().next()
    }

    pub fn words(&self, name: &str) -> Vec<&str> {
        self.get(name)
            .iter()
            .filter_map(|a| match a {
                Arg::Word(w) => Some(w.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).iter().find_map(|a| match a {
            Arg::Text(t) => Some(t.as_str()),
            _ => None,
        })
    }

    pub fn path(&self, name: &str) -> Option<&Path> {
        self.get(name).iter().find_map(|a| match a {
            Arg::Path(p) => Some(p.as_path()),
            _ => None,
        })
    }
}
