//! Error types for the streamsql console.
//!
//! The console must stay usable after any single failed render or request,
//! so most variants here are recovered locally (raw-text fallback, error
//! line in the REPL) rather than terminating the process.

use std::fmt;

/// Result type for console operations
pub type Result<T> = std::result::Result<T, ConsoleError>;

/// Errors that can occur in the console
#[derive(Debug)]
pub enum ConsoleError {
    /// Network failure or aborted request
    TransportError(String),

    /// Response body (or a line of it) is not valid JSON
    ParseError(String),

    /// A parsed JSON value matches no known statement-response shape
    UnrecognizedShape,

    /// Configuration file error
    ConfigurationError(String),

    /// File I/O error
    FileError(String),

    /// Readline error
    ReadlineError(String),

    /// History file error
    HistoryError(String),

    /// Output formatting error
    FormatError(String),

    /// User cancelled operation
    Cancelled,
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleError::TransportError(msg) => write!(f, "Transport error: {}", msg),
            ConsoleError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConsoleError::UnrecognizedShape => write!(f, "Unrecognized response shape"),
            ConsoleError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
            ConsoleError::FileError(msg) => write!(f, "File error: {}", msg),
            ConsoleError::ReadlineError(msg) => write!(f, "Input error: {}", msg),
            ConsoleError::HistoryError(msg) => write!(f, "History error: {}", msg),
            ConsoleError::FormatError(msg) => write!(f, "Format error: {}", msg),
            ConsoleError::Cancelled => write!(f, "Operation cancelled"),
        }
    }
}

impl std::error::Error for ConsoleError {}

impl From<reqwest::Error> for ConsoleError {
    fn from(err: reqwest::Error) -> Self {
        ConsoleError::TransportError(err.to_string())
    }
}

impl From<serde_json::Error> for ConsoleError {
    fn from(err: serde_json::Error) -> Self {
        ConsoleError::ParseError(err.to_string())
    }
}

impl From<serde_yaml::Error> for ConsoleError {
    fn from(err: serde_yaml::Error) -> Self {
        ConsoleError::FormatError(err.to_string())
    }
}

impl From<std::io::Error> for ConsoleError {
    fn from(err: std::io::Error) -> Self {
        ConsoleError::FileError(err.to_string())
    }
}

impl From<toml::de::Error> for ConsoleError {
    fn from(err: toml::de::Error) -> Self {
        ConsoleError::ConfigurationError(format!("TOML parse error: {}", err))
    }
}

impl From<rustyline::error::ReadlineError> for ConsoleError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        match err {
            rustyline::error::ReadlineError::Interrupted => ConsoleError::Cancelled,
            rustyline::error::ReadlineError::Eof => ConsoleError::Cancelled,
            e => ConsoleError::ReadlineError(e.to_string()),
        }
    }
}
