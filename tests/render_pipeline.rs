//! End-to-end rendering tests: raw response bodies through the dispatcher
//! and formatters, the way the session drives them. No server involved;
//! bodies are taken from real service responses.

use streamsql_cli::{render_response, OutputFormat, OutputFormatter, RenderOutcome};

const TOPICS_BODY: &str = r#"[{"kafka_topics":{"statementText":"SHOW TOPICS;","topics":[
    {"name":"pageviews","registered":true,"partitionCount":4,"replicaInfo":[1,1,1,1]},
    {"name":"users","registered":false,"partitionCount":2,"replicaInfo":[1,1]}
]}}]"#;

const STREAMED_BODY: &str = concat!(
    "{\"row\":{\"columns\":[1500962514814,\"User_8\",\"Page_12\"]}}\n",
    "{\"row\":{\"columns\":[1500962515114,\"User_9\",\"Page_44\"]}}\n",
    "Limit Reached\n",
);

fn document(outcome: RenderOutcome) -> String {
    match outcome {
        RenderOutcome::Document(doc) => doc.text,
        RenderOutcome::NotTabular => panic!("expected a document"),
    }
}

#[test]
fn tabular_render_is_deterministic() {
    let formatter = OutputFormatter::new(OutputFormat::Tabular);
    let first = document(render_response(TOPICS_BODY, false, &formatter));
    let second = document(render_response(TOPICS_BODY, false, &formatter));
    assert_eq!(first, second);

    let lines: Vec<&str> = first.split('\n').collect();
    // Header, separator, two data rows.
    assert_eq!(lines.len(), 4);
    assert!(lines[0].contains("Name"));
    assert!(lines[0].contains("ReplicaInfo"));
    assert!(lines[2].contains("pageviews"));
    assert!(lines[2].contains("[1,1,1,1]"));
    assert!(lines[3].contains("users"));
}

#[test]
fn format_switch_rerenders_same_body() {
    // The session keeps the raw body and re-renders it on \format without
    // a network call; this is the rendering half of that path.
    let tabular = document(render_response(
        TOPICS_BODY,
        false,
        &OutputFormatter::new(OutputFormat::Tabular),
    ));
    assert!(tabular.contains('|'));

    let compact = document(render_response(
        TOPICS_BODY,
        false,
        &OutputFormatter::new(OutputFormat::Compact),
    ));
    assert!(compact.starts_with("[{\"kafka_topics\""));
    assert!(!compact.contains('\n'));

    let pretty = document(render_response(
        TOPICS_BODY,
        false,
        &OutputFormatter::new(OutputFormat::Json),
    ));
    assert!(pretty.contains("  \"kafka_topics\""));

    let yaml = document(render_response(
        TOPICS_BODY,
        false,
        &OutputFormatter::new(OutputFormat::Yaml),
    ));
    assert!(yaml.contains("kafka_topics"));
    assert!(!yaml.contains('{'));
}

#[test]
fn streamed_body_renders_rows_and_keeps_framing_text() {
    let formatter = OutputFormatter::new(OutputFormat::Tabular);
    let text = document(render_response(STREAMED_BODY, true, &formatter));
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], " 1500962514814 | User_8 | Page_12 ");
    assert_eq!(lines[1], " 1500962515114 | User_9 | Page_44 ");
    // The non-JSON trailer is kept verbatim, in order.
    assert_eq!(lines[2], "Limit Reached");
}

#[test]
fn streamed_body_under_json_format() {
    let formatter = OutputFormatter::new(OutputFormat::Compact);
    let text = document(render_response(STREAMED_BODY, true, &formatter));
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "{\"row\":{\"columns\":[1500962514814,\"User_8\",\"Page_12\"]}}");
    assert_eq!(lines[2], "Limit Reached");
}

#[test]
fn malformed_body_shown_raw() {
    let raw = "upstream connect error or disconnect/reset before headers";
    let formatter = OutputFormatter::new(OutputFormat::Tabular);
    assert_eq!(document(render_response(raw, false, &formatter)), raw);
}

#[test]
fn empty_statement_list_falls_back_to_pretty_json() {
    let formatter = OutputFormatter::new(OutputFormat::Tabular);
    assert!(matches!(
        render_response("[]", false, &formatter),
        RenderOutcome::NotTabular
    ));

    // The session then renders that same body with the pretty formatter.
    let pretty = OutputFormatter::new(OutputFormat::Json);
    assert_eq!(document(render_response("[]", false, &pretty)), "[]");
}

#[test]
fn error_response_renders_as_yaml_under_tabular() {
    let body = r#"[{"error":{"statementText":"BAD;","errorMessage":{"message":"line 1: oops"}}}]"#;
    let formatter = OutputFormatter::new(OutputFormat::Tabular);
    let text = document(render_response(body, false, &formatter));
    assert!(text.contains("line 1: oops"));
    assert!(!text.contains('|'));
}
