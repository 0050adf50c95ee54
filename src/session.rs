//! Console session state management.
//!
//! Owns the service client, the active output format, the streams-property
//! store, and the last raw response body. Keeping the raw body around is
//! what makes `\format` re-render the previous response without another
//! network round trip. Requests are single-flight by construction: each
//! statement is awaited to completion (or cancellation) before the next
//! one is read.

use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::{
    client::ServiceClient,
    error::Result,
    formatter::{OutputFormat, OutputFormatter},
    history::CommandHistory,
    parser::{is_streaming_query, Command, CommandParser},
    properties::PropertyStore,
    render::{render_response, render_streamed_line, RenderOutcome},
    table::render_table,
};

/// The raw body of the most recent response, kept for format switching
struct CachedResponse {
    raw: String,
    streamed: bool,
}

/// Console session state
pub struct ConsoleSession {
    /// Service client
    client: ServiceClient,

    /// Input parser
    parser: CommandParser,

    /// Active response formatter
    formatter: OutputFormatter,

    /// Active output format
    format: OutputFormat,

    /// Enable colored output
    color: bool,

    /// Enable spinners/animations
    animations: bool,

    /// Streams properties sent with every statement
    properties: PropertyStore,

    /// Last raw response body, for re-rendering on format change
    last_response: Option<CachedResponse>,

    /// Session is connected
    connected: bool,

    /// Server version reported by GET /info
    server_version: Option<String>,

    /// Maximum persisted history size
    history_size: usize,
}

impl ConsoleSession {
    /// Create a new console session and probe the server for its version.
    pub async fn new(
        server_url: String,
        format: OutputFormat,
        color: bool,
        animations: bool,
        connect_timeout: Duration,
        properties: PropertyStore,
        history_size: usize,
    ) -> Result<Self> {
        let client = ServiceClient::new(&server_url, connect_timeout)?;

        let (server_version, connected) = match client.server_info().await {
            Ok(info) => (Some(info.server_info.version), true),
            Err(e) => {
                debug!("server info unavailable: {}", e);
                (None, false)
            }
        };

        Ok(Self {
            client,
            parser: CommandParser::new(),
            formatter: OutputFormatter::new(format),
            format,
            color,
            animations,
            properties,
            last_response: None,
            connected,
            server_version,
            history_size,
        })
    }

    /// Execute a statement: streaming queries go to the query endpoint,
    /// everything else is a one-shot statement.
    pub async fn execute(&mut self, sql: &str) -> Result<()> {
        if is_streaming_query(sql) {
            self.execute_streaming_query(sql).await
        } else {
            self.execute_statement(sql).await
        }
    }

    /// Execute a one-shot statement and render its single JSON body.
    async fn execute_statement(&mut self, sql: &str) -> Result<()> {
        let spinner = self.animations.then(Self::create_spinner);

        let result = self
            .client
            .execute_statement(sql, self.properties.as_map())
            .await;

        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        let raw = result?;
        self.render_and_print(&raw, false);
        self.last_response = Some(CachedResponse {
            raw,
            streamed: false,
        });
        self.connected = true;
        Ok(())
    }

    /// Execute a streaming query, rendering rows line by line as chunks
    /// arrive. Ctrl+C cancels the in-flight request; rows already printed
    /// stay on screen and the partial body is cached for format switching.
    async fn execute_streaming_query(&mut self, sql: &str) -> Result<()> {
        let spinner = self.animations.then(Self::create_spinner);
        let stream = self
            .client
            .execute_query(sql, self.properties.as_map())
            .await;

        let mut stream = match stream {
            Ok(stream) => stream,
            Err(e) => {
                if let Some(pb) = spinner {
                    pb.finish_and_clear();
                }
                return Err(e);
            }
        };

        let mut raw_body = String::new();
        let mut pending: Vec<u8> = Vec::new();
        let mut first_chunk = true;
        let mut spinner = spinner;

        loop {
            tokio::select! {
                chunk = stream.next_chunk() => {
                    if first_chunk {
                        if let Some(pb) = spinner.take() {
                            pb.finish_and_clear();
                        }
                        first_chunk = false;
                    }
                    match chunk {
                        Ok(Some(bytes)) => {
                            pending.extend_from_slice(&bytes);
                            self.drain_lines(&mut pending, &mut raw_body);
                        }
                        Ok(None) => break,
                        Err(e) => {
                            self.print_error(&e.to_string());
                            break;
                        }
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    // Dropping the stream aborts the request; any late data
                    // from it is never observed.
                    println!("Query cancelled");
                    break;
                }
            }
        }

        if let Some(pb) = spinner.take() {
            pb.finish_and_clear();
        }

        // Flush a trailing partial line, if the body didn't end in '\n'.
        if !pending.is_empty() {
            let line = String::from_utf8_lossy(&pending).to_string();
            raw_body.push_str(&line);
            if let Some(rendered) = render_streamed_line(&line, &self.formatter) {
                println!("{}", rendered);
            }
        }

        self.last_response = Some(CachedResponse {
            raw: raw_body,
            streamed: true,
        });
        self.connected = true;
        Ok(())
    }

    /// Split complete lines out of the pending buffer, rendering and
    /// printing each one in arrival order.
    fn drain_lines(&self, pending: &mut Vec<u8>, raw_body: &mut String) {
        while let Some(pos) = pending.iter().position(|&b| b == b'\n') {
            let rest = pending.split_off(pos + 1);
            let line_bytes = std::mem::replace(pending, rest);
            let line = String::from_utf8_lossy(&line_bytes[..pos]).to_string();

            raw_body.push_str(&line);
            raw_body.push('\n');

            if let Some(rendered) = render_streamed_line(&line, &self.formatter) {
                println!("{}", rendered);
            }
        }
    }

    /// Render a raw body with the active formatter and print it.
    ///
    /// A tabular render that comes back empty is not tabular-representable;
    /// that one response is shown as pretty JSON instead, and the active
    /// format stays unchanged.
    fn render_and_print(&self, raw: &str, streamed: bool) {
        match render_response(raw, streamed, &self.formatter) {
            RenderOutcome::Document(doc) => println!("{}", doc.text),
            RenderOutcome::NotTabular => {
                let pretty = OutputFormatter::new(OutputFormat::Json);
                if let RenderOutcome::Document(doc) = render_response(raw, streamed, &pretty) {
                    println!("{}", doc.text);
                }
            }
        }
    }

    /// Switch the output format and re-render the cached response, if any,
    /// without a new network call.
    pub fn set_format(&mut self, format: OutputFormat) {
        self.format = format;
        self.formatter = OutputFormatter::new(format);
        if let Some(cached) = self.last_response.as_ref() {
            self.render_and_print(&cached.raw, cached.streamed);
        }
    }

    /// Execute multiple statements from a batch (file or -c), split on ';'.
    pub async fn execute_batch(&mut self, sql: &str) -> Result<()> {
        for statement in sql.split(';') {
            let statement = statement.trim();
            if !statement.is_empty() {
                self.execute(&format!("{};", statement)).await?;
            }
        }
        Ok(())
    }

    /// Run the interactive readline loop.
    pub async fn run_interactive(&mut self) -> Result<()> {
        self.print_banner();

        let mut rl = DefaultEditor::new()?;
        let history = CommandHistory::new(self.history_size);

        if let Ok(entries) = history.load() {
            for entry in entries {
                let _ = rl.add_history_entry(&entry);
            }
        }

        loop {
            let prompt = if self.connected {
                "streamsql> "
            } else {
                "streamsql (disconnected)> "
            };

            match rl.readline(prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(line);
                    let _ = history.append(line);

                    match self.parser.parse(line) {
                        Ok(command) => {
                            if let Err(e) = self.execute_command(command).await {
                                self.print_error(&e.to_string());
                            }
                        }
                        Err(e) => self.print_error(&e.to_string()),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("Use \\quit or \\q to exit");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Goodbye!");
                    break;
                }
                Err(err) => {
                    self.print_error(&err.to_string());
                    break;
                }
            }
        }

        Ok(())
    }

    /// Execute a parsed command
    async fn execute_command(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Sql(sql) => {
                self.execute(&sql).await?;
            }
            Command::Quit => {
                println!("Goodbye!");
                std::process::exit(0);
            }
            Command::Help => {
                self.show_help();
            }
            Command::Info => {
                self.show_info();
            }
            Command::SetFormat(name) => match name.to_lowercase().as_str() {
                "tabular" | "table" => {
                    self.set_format(OutputFormat::Tabular);
                    println!("Output format set to: tabular");
                }
                "json" => {
                    self.set_format(OutputFormat::Json);
                    println!("Output format set to: json");
                }
                "compact" => {
                    self.set_format(OutputFormat::Compact);
                    println!("Output format set to: compact");
                }
                "yaml" => {
                    self.set_format(OutputFormat::Yaml);
                    println!("Output format set to: yaml");
                }
                _ => {
                    self.print_error(&format!(
                        "Unknown format: {}. Use: tabular, json, compact, or yaml",
                        name
                    ));
                }
            },
            Command::SetProperty { key, value } => {
                self.properties.set(&key, &value);
                println!("Property set: {} = {}", key, value);
            }
            Command::UnsetProperty(key) => {
                if self.properties.unset(&key) {
                    println!("Property removed: {}", key);
                } else {
                    self.print_error(&format!("No such property: {}", key));
                }
            }
            Command::ListProperties => {
                self.show_properties();
            }
            Command::Unknown(cmd) => {
                self.print_error(&format!("Unknown command: {}. Type \\help for help.", cmd));
            }
        }
        Ok(())
    }

    fn print_banner(&self) {
        println!("streamsql console v{}", env!("CARGO_PKG_VERSION"));
        println!("Connected to: {}", self.client.base_url());
        if let Some(version) = &self.server_version {
            println!("Server version: {}", version);
        }
        println!("Type \\help for help, \\quit to exit\n");
    }

    fn show_properties(&self) {
        if self.properties.is_empty() {
            println!("No streams properties set");
            return;
        }
        let headers = vec!["Property".to_string(), "Value".to_string()];
        let rows: Vec<Vec<String>> = self
            .properties
            .iter()
            .map(|(key, value)| vec![key.to_string(), value.to_string()])
            .collect();
        println!("{}", render_table(&headers, &rows));
    }

    fn show_info(&self) {
        println!("Server:  {}", self.client.base_url());
        println!(
            "Version: {}",
            self.server_version.as_deref().unwrap_or("unknown")
        );
        println!(
            "Status:  {}",
            if self.connected {
                "connected"
            } else {
                "disconnected"
            }
        );
        println!("Format:  {}", self.format.as_str());
        println!("Properties: {}", self.properties.len());
    }

    fn show_help(&self) {
        println!("streamsql console commands:");
        println!();
        println!("  SQL statements:");
        println!("    SELECT and PRINT run as streaming queries; all other");
        println!("    statements (SHOW, CREATE, DESCRIBE, ...) run one-shot.");
        println!();
        println!("  Meta-commands:");
        println!("    \\quit, \\q              Exit the console");
        println!("    \\help, \\?              Show this help message");
        println!("    \\info                  Show server and session info");
        println!("    \\format <type>         Set output format (tabular, json, compact, yaml)");
        println!("    \\set <key> <value>     Set a streams property");
        println!("    \\unset <key>           Remove a streams property");
        println!("    \\properties            List streams properties");
        println!();
        println!("  Examples:");
        println!("    SHOW TOPICS;");
        println!("    SELECT * FROM pageviews;");
        println!("    \\set auto.offset.reset earliest");
        println!("    \\format yaml");
        println!();
    }

    fn print_error(&self, message: &str) {
        if self.color {
            eprintln!("{}", format!("Error: {}", message).red());
        } else {
            eprintln!("Error: {}", message);
        }
    }

    /// Create a spinner for in-flight requests
    fn create_spinner() -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.set_message("Executing...");
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    }

    /// The configured server URL
    pub fn server_url(&self) -> &str {
        self.client.base_url()
    }

    /// Whether the last contact with the server succeeded
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// The active output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }
}
