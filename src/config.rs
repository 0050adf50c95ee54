//! Configuration file management.
//!
//! # Configuration Format
//!
//! ```toml
//! [server]
//! url = "http://localhost:8088"  # streaming SQL server URL
//! connect_timeout = 10           # connection timeout in seconds
//!
//! [ui]
//! format = "tabular"             # tabular, json, compact, yaml
//! color = true
//! history_size = 1000
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Console configuration loaded from TOML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsoleConfiguration {
    /// Server connection settings
    pub server: Option<ServerConfig>,

    /// UI preferences
    pub ui: Option<UiConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server URL (e.g., http://localhost:8088)
    pub url: Option<String>,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Output format: tabular, json, compact, yaml
    #[serde(default = "default_format")]
    pub format: String,

    /// Enable colored output
    #[serde(default = "default_color")]
    pub color: bool,

    /// Maximum history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_format() -> String {
    "tabular".to_string()
}

fn default_color() -> bool {
    true
}

fn default_history_size() -> usize {
    1000
}

impl ConsoleConfiguration {
    /// Load configuration from file.
    ///
    /// Returns the default configuration if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        let path = expand_config_path(path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(&path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Resolved server URL, falling back to the localhost default.
    pub fn server_url(&self) -> String {
        self.server
            .as_ref()
            .and_then(|s| s.url.clone())
            .unwrap_or_else(|| "http://localhost:8088".to_string())
    }

    /// Resolved connection timeout in seconds.
    pub fn connect_timeout(&self) -> u64 {
        self.server
            .as_ref()
            .map(|s| s.connect_timeout)
            .unwrap_or_else(default_connect_timeout)
    }

    /// Resolved history size.
    pub fn history_size(&self) -> usize {
        self.ui
            .as_ref()
            .map(|u| u.history_size)
            .unwrap_or_else(default_history_size)
    }
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_config_path(path: &Path) -> PathBuf {
    let path_str = path.to_str().unwrap_or("~/.streamsql/config.toml");
    if let Some(rest) = path_str.strip_prefix("~/") {
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(rest);
        }
    }
    path.to_path_buf()
}
