use thiserror::Error;

// Re-export a simple Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure the shell can surface, from input parsing to persistence.
#[derive(Error, Debug)]
pub enum Error {
    // ---- Input & Routing ----------------------------------------------------
    /// Malformed input line or arguments that do not fit a command's schema.
    #[error("Parse error: {0}")]
    Parse(String),

    /// No registered command (or alias) matches the identifier.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Registry construction saw the same identifier twice.
    #[error("Duplicate command: {0}")]
    DuplicateCommand(String),

    // ---- State --------------------------------------------------------------
    /// A mutation produced a state that breaks a declared invariant.
    #[error("Invalid mutation: {0}")]
    InvalidMutation(String),

    // ---- Persistence --------------------------------------------------------
    /// Persisted document could not be parsed or is missing required fields.
    #[error("Corrupt state file: {0}")]
    CorruptState(String),

    /// Persisted document was written by an incompatible schema.
    #[error("Incompatible state file: schema version {found} (supported: {supported})")]
    IncompatibleVersion { found: i64, supported: i64 },

    // ---- Config -------------------------------------------------------------
    /// Any issue reading or editing config (invalid JSON, bad value, etc.)
    #[error("Config error: {0}")]
    Config(String),

    // ---- Plumbing / Wrappers ------------------------------------------------
    /// IO passthrough (read/write files, terminal, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serde JSON passthrough (encode side; decode side maps to CorruptState).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ----------------------- Convenience constructors ----------------------------

impl Error {
    /// Helper to create a parse error from any displayable value.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Error::Parse(msg.into())
    }
    /// Helper to create a generic config error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }
    /// Helper for unknown command.
    pub fn unknown<S: Into<String>>(cmd: S) -> Self {
        Error::UnknownCommand(cmd.into())
    }
    pub fn invalid<S: Into<String>>(msg: S) -> Self {
        Error::InvalidMutation(msg.into())
    }
    pub fn corrupt<S: Into<String>>(msg: S) -> Self {
        Error::CorruptState(msg.into())
    }
}

// ----------------------- Small result helpers --------------------------------

/// Map an `Option<T>` into `Result<T, Error::Parse>` with a custom message.
pub fn require_parse<T, S: Into<String>>(opt: Option<T>, msg: S) -> Result<T> {
    opt.ok_or_else(|| Error::Parse(msg.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_constructor_wraps_message() {
        let err = Error::parse("bad args");
        match err {
            Error::Parse(msg) => assert_eq!(msg, "bad args"),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn config_constructor_wraps_message() {
        let err = Error::config("config missing");
        match err {
            Error::Config(msg) => assert_eq!(msg, "config missing"),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_constructor_wraps_message() {
        let err = Error::unknown("noop");
        match err {
            Error::UnknownCommand(msg) => assert_eq!(msg, "noop"),
            other => panic!("expected unknown command error, got {other:?}"),
        }
    }

    #[test]
    fn require_parse_returns_value_when_present() {
        let value = require_parse(Some(4), "missing").unwrap();
        assert_eq!(value, 4);
    }

    #[test]
    fn require_parse_errors_with_message_when_missing() {
        let err = require_parse::<i32, _>(None, "missing").unwrap_err();
        match err {
            Error::Parse(msg) => assert_eq!(msg, "missing"),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn incompatible_version_formats_both_versions() {
        let err = Error::IncompatibleVersion {
            found: 999,
            supported: 1,
        };
        assert_eq!(
            err.to_string(),
            "Incompatible state file: schema version 999 (supported: 1)"
        );
    }

    #[test]
    fn io_error_formats_message() {
        let raw = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        let err = Error::from(raw);
        assert_eq!(err.to_string(), "I/O error: disk");
    }

    #[test]
    fn json_error_formats_message() {
        let raw = serde_json::from_str::<serde_json::Value>("not-json").unwrap_err();
        let expected = format!("JSON error: {}", raw);
        let err = Error::from(raw);
        assert_eq!(err.to_string(), expected);
    }
}
