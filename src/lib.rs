//! Library entry point for the streamsql console components.
//!
//! Exposes the rendering, formatting, and session modules so integration
//! tests and other crates can use the console's behaviors without going
//! through the binary entry point.

pub mod client;
pub mod config;
pub mod error;
pub mod formatter;
pub mod history;
pub mod parser;
pub mod properties;
pub mod render;
pub mod response;
pub mod session;
pub mod table;

pub use config::ConsoleConfiguration;
pub use error::{ConsoleError, Result};
pub use formatter::{DisplayMode, OutputFormat, OutputFormatter, RenderedDocument};
pub use properties::PropertyStore;
pub use render::{render_response, RenderOutcome};
pub use response::ResponseShape;
pub use session::ConsoleSession;
