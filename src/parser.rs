//! Input parsing: SQL statements vs. backslash meta-commands, and
//! classification of SQL into streaming queries and one-shot statements.

use crate::error::{ConsoleError, Result};

/// Statements beginning with one of these run as streaming queries
/// against the query endpoint; everything else is a one-shot statement.
const STREAMING_PREFIXES: [&str; 2] = ["SELECT ", "PRINT "];

/// True if the statement is a streaming query (case-insensitive prefix).
pub fn is_streaming_query(sql: &str) -> bool {
    let upper = sql.to_uppercase();
    STREAMING_PREFIXES
        .iter()
        .any(|prefix| upper.starts_with(prefix))
}

/// Parsed console input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// SQL statement or query
    Sql(String),

    /// Meta-commands (backslash commands)
    Quit,
    Help,
    Info,
    SetFormat(String),
    SetProperty { key: String, value: String },
    UnsetProperty(String),
    ListProperties,
    Unknown(String),
}

/// Console input parser
pub struct CommandParser;

impl CommandParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self
    }

    /// Parse one input line
    pub fn parse(&self, line: &str) -> Result<Command> {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            return Err(ConsoleError::ParseError("Empty command".into()));
        }

        if trimmed.starts_with('\\') {
            return self.parse_meta_command(trimmed);
        }

        Ok(Command::Sql(trimmed.to_string()))
    }

    fn parse_meta_command(&self, line: &str) -> Result<Command> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let command = parts[0];
        let args = parts.get(1..).unwrap_or(&[]);

        match command {
            "\\quit" | "\\q" => Ok(Command::Quit),
            "\\help" | "\\?" => Ok(Command::Help),
            "\\info" | "\\server" => Ok(Command::Info),
            "\\format" => {
                if args.is_empty() {
                    Err(ConsoleError::ParseError(
                        "\\format requires: tabular, json, compact, or yaml".into(),
                    ))
                } else {
                    Ok(Command::SetFormat(args[0].to_string()))
                }
            }
            "\\set" => {
                if args.len() < 2 {
                    Err(ConsoleError::ParseError(
                        "\\set requires a property name and a value".into(),
                    ))
                } else {
                    Ok(Command::SetProperty {
                        key: args[0].to_string(),
                        value: args[1..].join(" "),
                    })
                }
            }
            "\\unset" => {
                if args.is_empty() {
                    Err(ConsoleError::ParseError(
                        "\\unset requires a property name".into(),
                    ))
                } else {
                    Ok(Command::UnsetProperty(args[0].to_string()))
                }
            }
            "\\properties" | "\\props" => Ok(Command::ListProperties),
            _ => Ok(Command::Unknown(command.to_string())),
        }
    }
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new()
    }
}
