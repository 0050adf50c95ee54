//! Statement history persistence.
//!
//! Keeps submitted statements across sessions in `~/.streamsql/history`,
//! one per line, trimmed to a maximum size on save.

use std::path::{Path, PathBuf};

use crate::error::{ConsoleError, Result};

/// Statement history manager
pub struct CommandHistory {
    path: PathBuf,
    max_size: usize,
}

impl CommandHistory {
    /// Create a history manager with the default path
    pub fn new(max_size: usize) -> Self {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        let path = PathBuf::from(home).join(".streamsql").join("history");
        Self { path, max_size }
    }

    /// Create with a custom path
    pub fn with_path<P: AsRef<Path>>(path: P, max_size: usize) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            max_size,
        }
    }

    /// Load history, oldest first, at most `max_size` entries.
    pub fn load(&self) -> Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| ConsoleError::HistoryError(format!("Failed to read history: {}", e)))?;

        let mut entries: Vec<String> = contents
            .lines()
            .rev()
            .take(self.max_size)
            .map(str::to_string)
            .collect();
        entries.reverse();
        Ok(entries)
    }

    /// Save history, keeping only the newest `max_size` entries.
    pub fn save(&self, entries: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let start = entries.len().saturating_sub(self.max_size);
        let contents = entries[start..].join("\n");

        std::fs::write(&self.path, contents)
            .map_err(|e| ConsoleError::HistoryError(format!("Failed to write history: {}", e)))
    }

    /// Append one statement, skipping blanks and consecutive duplicates.
    pub fn append(&self, statement: &str) -> Result<()> {
        if statement.trim().is_empty() {
            return Ok(());
        }
        let mut entries = self.load()?;
        if entries.last().map(String::as_str) == Some(statement) {
            return Ok(());
        }
        entries.push(statement.to_string());
        self.save(&entries)
    }
}
