//! streamsql - Interactive console for a streaming SQL service
//!
//! # Usage
//!
//! ```bash
//! # Interactive mode
//! streamsql -u http://localhost:8088
//!
//! # Execute a statement file
//! streamsql -u http://localhost:8088 --file statements.sql
//!
//! # One statement, YAML output
//! streamsql -u http://localhost:8088 --format yaml -c "SHOW STREAMS;"
//! ```

use clap::Parser;

use streamsql_cli::{ConsoleConfiguration, ConsoleError, Result};

mod args;
mod connect;

use args::Cli;
use connect::create_session;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let config = ConsoleConfiguration::load(&cli.config)?;

    let mut session = create_session(&cli, &config).await?;

    match (cli.file, cli.command) {
        // Execute a statement file
        (Some(file), None) => {
            let sql = std::fs::read_to_string(&file).map_err(|e| {
                ConsoleError::FileError(format!("Failed to read {}: {}", file.display(), e))
            })?;
            session.execute_batch(&sql).await?;
        }

        // Execute a single statement
        (None, Some(command)) => {
            session.execute(&command).await?;
        }

        // Interactive mode
        (None, None) => {
            session.run_interactive().await?;
        }

        // Invalid combination
        (Some(_), Some(_)) => {
            return Err(ConsoleError::ConfigurationError(
                "Cannot specify both --file and --command".into(),
            ));
        }
    }

    Ok(())
}
