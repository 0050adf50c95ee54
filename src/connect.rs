use std::time::Duration;

use streamsql_cli::{
    ConsoleConfiguration, ConsoleError, ConsoleSession, OutputFormat, PropertyStore, Result,
};

use crate::args::Cli;

/// Resolve the output format from CLI args, then config, then the default.
fn resolve_format(cli: &Cli, config: &ConsoleConfiguration) -> Result<OutputFormat> {
    if let Some(format) = cli.format {
        return Ok(format);
    }
    let name = config
        .ui
        .as_ref()
        .map(|ui| ui.format.clone())
        .unwrap_or_else(|| "tabular".to_string());
    match name.to_lowercase().as_str() {
        "tabular" | "table" => Ok(OutputFormat::Tabular),
        "json" => Ok(OutputFormat::Json),
        "compact" => Ok(OutputFormat::Compact),
        "yaml" => Ok(OutputFormat::Yaml),
        other => Err(ConsoleError::ConfigurationError(format!(
            "Unknown format '{}' in config (use tabular, json, compact, or yaml)",
            other
        ))),
    }
}

/// Parse repeated `-p key=value` flags into a property store.
fn resolve_properties(cli: &Cli) -> Result<PropertyStore> {
    let mut store = PropertyStore::new();
    for pair in &cli.properties {
        match pair.split_once('=') {
            Some((key, value)) => store.set(key, value),
            None => {
                return Err(ConsoleError::ConfigurationError(format!(
                    "Invalid property '{}', expected KEY=VALUE",
                    pair
                )))
            }
        }
    }
    Ok(store)
}

pub async fn create_session(cli: &Cli, config: &ConsoleConfiguration) -> Result<ConsoleSession> {
    let server_url = cli.url.clone().unwrap_or_else(|| config.server_url());

    let format = resolve_format(cli, config)?;
    let properties = resolve_properties(cli)?;

    let color = !cli.no_color && config.ui.as_ref().map(|ui| ui.color).unwrap_or(true);
    let connect_timeout =
        Duration::from_secs(cli.connect_timeout.unwrap_or_else(|| config.connect_timeout()));

    ConsoleSession::new(
        server_url,
        format,
        color,
        !cli.no_spinner,
        connect_timeout,
        properties,
        config.history_size(),
    )
    .await
}
