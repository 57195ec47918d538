use crate::errors::{Error, Result};
use crate::extensions::enums::valid_csv;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
pub enum BoolFormat {
    #[strum(serialize = "true", to_string = "True")]
    TextTrue,

    #[strum(serialize = "false", to_string = "False")]
    TextFalse,
}

impl BoolFormat {
    #[inline]
    fn to_bool(self) -> bool {
        matches!(self, BoolFormat::TextTrue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bool(pub bool);

impl Bool {
    pub fn try_from_str(s: &str) -> Result<Self> {
        match BoolFormat::from_str(s.trim()) {
            Ok(fmt) => Ok(Bool(fmt.to_bool())),
            Err(_) => Err(Error::Parse(format!(
                "Invalid string value for boolean: '{}'. Valid values: {}",
                s,
                valid_csv::<BoolFormat>()
            ))),
        }
    }
}

impl fmt::Display for Bool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", if self.0 { "True" } else { "False" })
    }
}

impl Serialize for Bool {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<<S as Serializer>::Ok, <S as Serializer>::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Bool {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Bool, <D as Deserializer<'de>>::Error> {
        let b = String::deserialize(deserializer)?;
        Bool::try_from_str(&b).map_err(serde::de::Error::custom)
    }
}

/// Positive count used for limits (history size and the like).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Limit(pub usize);

impl Limit {
    pub fn try_from_str(s: &str) -> Result<Self> {
        let n: u64 = s.trim().parse().map_err(|_| {
            Error::Parse(format!("Invalid limit: '{}'. Expected a whole number.", s.trim()))
        })?;
        Self::try_from(n).map_err(Error::Parse)
    }
}

impl TryFrom<u64> for Limit {
    type Error = String;
    fn try_from(n: u64) -> std::result::Result<Self, Self::Error> {
        if n == 0 {
            return Err("Limit must be at least 1.".to_string());
        }
        Ok(Limit(n as usize))
    }
}

impl From<Limit> for u64 {
    fn from(l: Limit) -> u64 {
        l.0 as u64
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lower-cased, de-duplicated word list edited as comma-separated text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct WordList(Vec<String>);

impl WordList {
    /// A lone `-` clears the list, mirroring how an empty list is displayed.
    pub fn parse_csv(s: &str) -> Self {
        if s.trim() == "-" {
            return Self::default();
        }
        Self::from(
            s.split(',')
                .map(|w| w.to_string())
                .collect::<Vec<String>>(),
        )
    }

    pub fn words(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First listed word contained in `text`, ignoring ASCII case.
    pub fn first_match(&self, text: &str) -> Option<&str> {
        let haystack = text.to_ascii_lowercase();
        self.0
            .iter()
            .find(|w| haystack.contains(w.as_str()))
            .map(|w| w.as_str())
    }
}

impl From<Vec<String>> for WordList {
    fn from(raw: Vec<String>) -> Self {
        let mut words: Vec<String> = Vec::new();
        for w in raw {
            let w = w.trim().to_ascii_lowercase();
            if !w.is_empty() && !words.contains(&w) {
                words.push(w);
            }
        }
        WordList(words)
    }
}

impl From<WordList> for Vec<String> {
    fn from(list: WordList) -> Vec<String> {
        list.0
    }
}

impl fmt::Display for WordList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "-");
        }
        write!(f, "{}", self.0.join(","))
    }
}
