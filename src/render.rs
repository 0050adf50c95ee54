//! Response dispatching: raw body in, rendered document out.
//!
//! The dispatcher decides whether a body is a single JSON value or a
//! newline-delimited stream of them, parses accordingly, and feeds each
//! parsed unit to the active formatter. Parse failures are never fatal:
//! a malformed one-shot body is shown raw, and a malformed streamed line
//! is kept verbatim (printed topics have no consistent framing, so a
//! non-JSON line is assumed to be legitimate output, not an error).

use serde_json::Value as JsonValue;

use crate::formatter::{DisplayMode, OutputFormat, OutputFormatter, RenderedDocument};

/// Result of dispatching one response body
#[derive(Debug)]
pub enum RenderOutcome {
    /// The body rendered to a document
    Document(RenderedDocument),

    /// The body parsed but the tabular formatter produced an empty string,
    /// meaning it is not tabular-representable. The caller should render
    /// this body once with the pretty-JSON formatter; the active format is
    /// the caller's policy, not the dispatcher's.
    NotTabular,
}

/// Render a raw response body with the given formatter.
///
/// Produces a string only; pushing it to the display is the caller's job.
pub fn render_response(
    raw_body: &str,
    streamed: bool,
    formatter: &OutputFormatter,
) -> RenderOutcome {
    if streamed {
        return RenderOutcome::Document(render_streamed(raw_body, formatter));
    }

    let parsed: JsonValue = match serde_json::from_str(raw_body) {
        Ok(value) => value,
        Err(err) => {
            // Degraded render, not an error: show the body as-is.
            log::debug!("response body is not JSON ({}), showing raw", err);
            return RenderOutcome::Document(raw_document(raw_body));
        }
    };

    match formatter.format_value(&parsed) {
        Ok(document) => {
            if document.text.is_empty() && formatter.format() == OutputFormat::Tabular {
                return RenderOutcome::NotTabular;
            }
            RenderOutcome::Document(document)
        }
        // Unrecognized shape: fall back to the raw body for this render.
        Err(err) => {
            log::debug!("render failed ({}), showing raw body", err);
            RenderOutcome::Document(raw_document(raw_body))
        }
    }
}

/// Render one line of a streamed body, without the trailing newline.
///
/// Returns `None` for blank lines, which are skipped entirely.
pub fn render_streamed_line(line: &str, formatter: &OutputFormatter) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match serde_json::from_str::<JsonValue>(line) {
        Ok(parsed) => match formatter.format_value(&parsed) {
            Ok(document) => Some(document.text),
            Err(_) => Some(line.to_string()),
        },
        Err(_) => Some(line.to_string()),
    }
}

fn render_streamed(raw_body: &str, formatter: &OutputFormatter) -> RenderedDocument {
    let mut text = String::new();
    for line in raw_body.split('\n') {
        if let Some(rendered) = render_streamed_line(line, formatter) {
            text.push_str(&rendered);
            text.push('\n');
        }
    }
    RenderedDocument {
        text,
        mode: match formatter.format() {
            OutputFormat::Yaml => DisplayMode::Yaml,
            _ => DisplayMode::Json,
        },
    }
}

fn raw_document(raw_body: &str) -> RenderedDocument {
    RenderedDocument {
        text: raw_body.to_string(),
        mode: DisplayMode::Json,
    }
}
