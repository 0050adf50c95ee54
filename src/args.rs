use clap::Parser;
use std::path::PathBuf;
use streamsql_cli::OutputFormat;

/// streamsql - Interactive console for a streaming SQL service
#[derive(Parser, Debug)]
#[command(name = "streamsql")]
#[command(version)]
#[command(about = "Interactive SQL console for a streaming SQL service", long_about = None)]
pub struct Cli {
    /// Server URL (e.g., http://localhost:8088)
    #[arg(short = 'u', long = "url")]
    pub url: Option<String>,

    /// Execute statements from file and exit
    #[arg(short = 'f', long = "file")]
    pub file: Option<PathBuf>,

    /// Execute a single statement and exit
    #[arg(short = 'c', long = "command")]
    pub command: Option<String>,

    /// Output format
    #[arg(long = "format", value_enum)]
    pub format: Option<OutputFormat>,

    /// Streams property, key=value (repeatable)
    #[arg(short = 'p', long = "property", value_name = "KEY=VALUE")]
    pub properties: Vec<String>,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Disable spinners/animations
    #[arg(long = "no-spinner")]
    pub no_spinner: bool,

    /// Connection timeout in seconds
    #[arg(long = "connect-timeout", value_name = "SECONDS")]
    pub connect_timeout: Option<u64>,

    /// Configuration file path
    #[arg(long = "config", default_value = "~/.streamsql/config.toml")]
    pub config: PathBuf,

    /// Enable verbose logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}
