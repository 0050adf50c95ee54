//! Output formatters for statement responses.
//!
//! A parsed response value can be rendered four ways: as a fixed-width
//! table, as pretty JSON, as compact JSON, or as YAML-like text. Rendering
//! also decides which display mode the output belongs to, so syntax-aware
//! consumers (and the `\info` display) know what they are looking at.

use clap::ValueEnum;
use serde_json::Value as JsonValue;

use crate::error::{ConsoleError, Result};
use crate::response::ResponseShape;
use crate::table::render_table;

/// Output format for statement responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Fixed-width pipe-delimited tables
    Tabular,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    Compact,
    /// YAML-like text
    Yaml,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Tabular => "tabular",
            OutputFormat::Json => "json",
            OutputFormat::Compact => "compact",
            OutputFormat::Yaml => "yaml",
        }
    }
}

/// Display mode implied by a rendered document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Json,
    Yaml,
}

/// A rendered response body plus the display mode it requires
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub text: String,
    pub mode: DisplayMode,
}

/// The YAML serializer escapes these code points in some scalar positions;
/// the console has always shown them literally. Only these seven sequences
/// are substituted back, anything else passes through unchanged.
const YAML_UNESCAPES: [(&str, &str); 7] = [
    ("\\x20", " "),
    ("\\x2C", ","),
    ("\\x3B", ";"),
    ("\\x27", "'"),
    ("\\x3A", ":"),
    ("\\x28", "("),
    ("\\x29", ")"),
];

/// Renders parsed response values in the active output format
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    /// Create a new formatter
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// The active output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Render one parsed response value in the active format.
    ///
    /// In tabular format an unrecognized shape fails the render; the
    /// dispatcher catches that and falls back to the raw body.
    pub fn format_value(&self, value: &JsonValue) -> Result<RenderedDocument> {
        match self.format {
            OutputFormat::Tabular => self.render_tabular(value),
            OutputFormat::Json => render_pretty_json(value),
            OutputFormat::Compact => render_compact_json(value),
            OutputFormat::Yaml => render_yaml(value),
        }
    }

    /// Render a response value as tabular text.
    ///
    /// A top-level sequence is a list of statement responses, one table
    /// per element joined by a blank line. A lone object is classified
    /// and rendered as a single statement response. The document mode is
    /// JSON unless any statement delegated to the YAML renderer.
    fn render_tabular(&self, value: &JsonValue) -> Result<RenderedDocument> {
        let parts: Vec<(String, DisplayMode)> = if let Some(items) = value.as_array() {
            items
                .iter()
                .map(|item| self.render_statement(item))
                .collect::<Result<_>>()?
        } else {
            vec![self.render_statement(value)?]
        };

        let mode = if parts.iter().any(|(_, mode)| *mode == DisplayMode::Yaml) {
            DisplayMode::Yaml
        } else {
            DisplayMode::Json
        };
        let text = parts
            .into_iter()
            .map(|(text, _)| text)
            .collect::<Vec<_>>()
            .join("\n\n");

        Ok(RenderedDocument { text, mode })
    }

    /// Render one statement response as a table (or delegated text).
    fn render_statement(&self, value: &JsonValue) -> Result<(String, DisplayMode)> {
        match ResponseShape::classify(value)? {
            ResponseShape::Message(message) => Ok((message.to_string(), DisplayMode::Json)),
            ResponseShape::Properties(map) => {
                let headers = vec!["Property".to_string(), "Value".to_string()];
                let rows: Vec<Vec<String>> = map
                    .iter()
                    .map(|(key, value)| vec![key.clone(), scalar_string(value)])
                    .collect();
                Ok((render_table(&headers, &rows), DisplayMode::Json))
            }
            ResponseShape::KafkaTopics(items)
            | ResponseShape::Streams(items)
            | ResponseShape::Tables(items)
            | ResponseShape::Queries(items) => {
                Ok((self.render_listing(items)?, DisplayMode::Json))
            }
            ResponseShape::Error(whole)
            | ResponseShape::Description(whole)
            | ResponseShape::CurrentStatus(whole) => {
                // These shapes are not tabular-representable
                Ok((render_yaml(whole)?.text, DisplayMode::Yaml))
            }
            ResponseShape::SetProperty(change) => {
                let headers = vec![
                    "Property".to_string(),
                    "Prior Value".to_string(),
                    "New Value".to_string(),
                ];
                let row = ["property", "oldValue", "newValue"]
                    .iter()
                    .map(|key| change.get(*key).map(scalar_string).unwrap_or_default())
                    .collect();
                Ok((render_table(&headers, &[row]), DisplayMode::Json))
            }
            ResponseShape::Row(columns) => {
                let cells: Vec<String> = columns.iter().map(scalar_string).collect();
                Ok((format!(" {} ", cells.join(" | ")), DisplayMode::Json))
            }
        }
    }

    /// Render a listing (topics, streams, tables, queries) with column
    /// headers auto-derived from the keys of the first element.
    fn render_listing(&self, items: &[JsonValue]) -> Result<String> {
        let first = items
            .first()
            .and_then(JsonValue::as_object)
            .ok_or(ConsoleError::UnrecognizedShape)?;

        let headers: Vec<String> = first.keys().map(|key| title_case(key)).collect();

        let rows: Vec<Vec<String>> = items
            .iter()
            .map(|item| match item.as_object() {
                Some(object) => object.values().map(cell_string).collect(),
                None => vec![cell_string(item)],
            })
            .collect();

        Ok(render_table(&headers, &rows))
    }
}

/// Pretty JSON with 2-space indentation
pub fn render_pretty_json(value: &JsonValue) -> Result<RenderedDocument> {
    Ok(RenderedDocument {
        text: serde_json::to_string_pretty(value)?,
        mode: DisplayMode::Json,
    })
}

/// Compact single-line JSON
pub fn render_compact_json(value: &JsonValue) -> Result<RenderedDocument> {
    Ok(RenderedDocument {
        text: serde_json::to_string(value)?,
        mode: DisplayMode::Json,
    })
}

/// YAML-like text, with the serializer's hex escapes substituted back
pub fn render_yaml(value: &JsonValue) -> Result<RenderedDocument> {
    Ok(RenderedDocument {
        text: unescape_yaml(serde_yaml::to_string(value)?),
        mode: DisplayMode::Yaml,
    })
}

fn unescape_yaml(mut text: String) -> String {
    for (escape, literal) in YAML_UNESCAPES {
        text = text.replace(escape, literal);
    }
    text
}

/// Stringify a scalar value the way the console shows it bare in a cell:
/// strings unquoted, everything else via its JSON text.
fn scalar_string(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Listing cells: scalars stringified directly, arrays and objects
/// serialized as compact JSON.
fn cell_string(value: &JsonValue) -> String {
    match value {
        JsonValue::Array(_) | JsonValue::Object(_) => value.to_string(),
        other => scalar_string(other),
    }
}

/// Upper-case the first character, leave the rest unchanged.
fn title_case(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tabular() -> OutputFormatter {
        OutputFormatter::new(OutputFormat::Tabular)
    }

    #[test]
    fn test_message_renders_verbatim() {
        let doc = tabular()
            .format_value(&json!({"message": "Topic created"}))
            .unwrap();
        assert_eq!(doc.text, "Topic created");
        assert_eq!(doc.mode, DisplayMode::Json);
    }

    #[test]
    fn test_properties_table() {
        let doc = tabular()
            .format_value(&json!({
                "properties": {"properties": {
                    "ksql.service.id": "default_",
                    "ksql.sink.replicas": 1
                }}
            }))
            .unwrap();
        let lines: Vec<&str> = doc.text.split('\n').collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with(" Property"));
        assert!(lines[0].contains("| Value"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[2].contains("ksql.service.id"));
        assert!(lines[2].contains("default_"));
        assert!(lines[3].contains("1"));
    }

    #[test]
    fn test_listing_headers_title_cased() {
        let doc = tabular()
            .format_value(&json!({
                "kafka_topics": {"topics": [
                    {"name": "pageviews", "registered": false, "partitionCount": 4},
                    {"name": "users", "registered": true, "partitionCount": 2}
                ]}
            }))
            .unwrap();
        let lines: Vec<&str> = doc.text.split('\n').collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("Name"));
        assert!(lines[0].contains("Registered"));
        assert!(lines[0].contains("PartitionCount"));
        assert!(lines[2].contains("pageviews"));
        assert!(lines[2].contains("false"));
        assert!(lines[3].contains("users"));
    }

    #[test]
    fn test_listing_non_scalar_cells_compact_json() {
        let doc = tabular()
            .format_value(&json!({
                "queries": {"queries": [
                    {"id": "CSAS_0", "sinks": ["PAGEVIEWS_OUT"]}
                ]}
            }))
            .unwrap();
        assert!(doc.text.contains("[\"PAGEVIEWS_OUT\"]"));
    }

    #[test]
    fn test_empty_listing_fails_render() {
        let result = tabular().format_value(&json!({"streams": {"streams": []}}));
        assert!(matches!(result, Err(ConsoleError::UnrecognizedShape)));
    }

    #[test]
    fn test_set_property_table() {
        let doc = tabular()
            .format_value(&json!({
                "setProperty": {"property": "p", "oldValue": "1", "newValue": "2"}
            }))
            .unwrap();
        let lines: Vec<&str> = doc.text.split('\n').collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], " Property | Prior Value | New Value ");
        assert!(lines[2].starts_with(" p "));
        assert!(lines[2].contains("| 1"));
        assert!(lines[2].contains("| 2"));
    }

    #[test]
    fn test_streamed_row_line() {
        let doc = tabular()
            .format_value(&json!({"row": {"columns": ["x", "y"]}}))
            .unwrap();
        assert_eq!(doc.text, " x | y ");
    }

    #[test]
    fn test_row_with_mixed_column_types() {
        let doc = tabular()
            .format_value(&json!({"row": {"columns": [1500962514814u64, "User_8", null, [1, 2]]}}))
            .unwrap();
        assert_eq!(doc.text, " 1500962514814 | User_8 | null | [1,2] ");
    }

    #[test]
    fn test_statement_list_joined_by_blank_line() {
        let doc = tabular()
            .format_value(&json!([
                {"message": "first"},
                {"message": "second"}
            ]))
            .unwrap();
        assert_eq!(doc.text, "first\n\nsecond");
    }

    #[test]
    fn test_empty_statement_list_renders_empty() {
        let doc = tabular().format_value(&json!([])).unwrap();
        assert_eq!(doc.text, "");
    }

    #[test]
    fn test_error_shape_delegates_to_yaml() {
        // Delegation flips the document into YAML mode even though the
        // active format is tabular.
        let doc = tabular()
            .format_value(&json!({"error": {"errorMessage": {"message": "Statement failed"}}}))
            .unwrap();
        assert!(doc.text.contains("Statement failed"));
        assert!(!doc.text.contains('|'));
        assert_eq!(doc.mode, DisplayMode::Yaml);
    }

    #[test]
    fn test_mixed_statement_list_ends_in_yaml_mode() {
        let doc = tabular()
            .format_value(&json!([
                {"currentStatus": {"status": {"status": "SUCCESS"}}},
                {"message": "done"}
            ]))
            .unwrap();
        assert_eq!(doc.mode, DisplayMode::Yaml);
        assert!(doc.text.ends_with("done"));
    }

    #[test]
    fn test_pretty_and_compact_json() {
        let value = json!({"a": [1, 2]});
        let pretty = render_pretty_json(&value).unwrap();
        assert_eq!(pretty.text, "{\n  \"a\": [\n    1,\n    2\n  ]\n}");
        assert_eq!(pretty.mode, DisplayMode::Json);

        let compact = render_compact_json(&value).unwrap();
        assert_eq!(compact.text, "{\"a\":[1,2]}");
        assert_eq!(compact.mode, DisplayMode::Json);
    }

    #[test]
    fn test_yaml_unescape_table() {
        // The substitution list is fixed: exactly these seven sequences.
        let text = unescape_yaml("\\x20\\x2C\\x3B\\x27\\x3A\\x28\\x29".to_string());
        assert_eq!(text, " ,;':()");
        // Unlisted escapes pass through untouched.
        assert_eq!(unescape_yaml("\\x2F\\x5B".to_string()), "\\x2F\\x5B");
    }

    #[test]
    fn test_yaml_render_mode() {
        let doc = render_yaml(&json!({"error": {"message": "bad"}})).unwrap();
        assert_eq!(doc.mode, DisplayMode::Yaml);
        assert!(doc.text.contains("bad"));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("name"), "Name");
        assert_eq!(title_case("partitionCount"), "PartitionCount");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_unrecognized_shape_propagates() {
        assert!(matches!(
            tabular().format_value(&json!({"unknown": 1})),
            Err(ConsoleError::UnrecognizedShape)
        ));
        assert!(matches!(
            tabular().format_value(&json!(17)),
            Err(ConsoleError::UnrecognizedShape)
        ));
    }
}
