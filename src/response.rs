//! Statement response shapes.
//!
//! The service does not tag its responses with an explicit type field; the
//! shape is determined by which key is present. Classification assigns a
//! variant once, in a fixed precedence order, and formatting is exhaustive
//! matching from then on. A value matching no shape is an
//! [`UnrecognizedShape`](crate::error::ConsoleError::UnrecognizedShape)
//! error, which the dispatcher turns into a raw-body fallback.

use serde_json::{Map, Value as JsonValue};

use crate::error::{ConsoleError, Result};

/// One classified statement response, borrowing from the parsed JSON value.
#[derive(Debug)]
pub enum ResponseShape<'a> {
    /// `message` / `errorMessage` error shape; rendered as the bare text
    Message(&'a str),

    /// `properties` — the nested `properties.properties` map
    Properties(&'a Map<String, JsonValue>),

    /// `kafka_topics` listing
    KafkaTopics(&'a [JsonValue]),

    /// `streams` listing
    Streams(&'a [JsonValue]),

    /// `tables` listing
    Tables(&'a [JsonValue]),

    /// `queries` listing
    Queries(&'a [JsonValue]),

    /// `error` — not tabular, rendered as YAML of the whole response
    Error(&'a JsonValue),

    /// `description` — not tabular, rendered as YAML of the whole response
    Description(&'a JsonValue),

    /// `currentStatus` — not tabular, rendered as YAML of the whole response
    CurrentStatus(&'a JsonValue),

    /// `setProperty` property change
    SetProperty(&'a Map<String, JsonValue>),

    /// `row` — one streamed query row
    Row(&'a [JsonValue]),
}

impl<'a> ResponseShape<'a> {
    /// Classify a parsed JSON object by key presence.
    ///
    /// Non-objects and objects with no recognized key fail with
    /// `UnrecognizedShape`.
    pub fn classify(value: &'a JsonValue) -> Result<ResponseShape<'a>> {
        let object = value.as_object().ok_or(ConsoleError::UnrecognizedShape)?;

        if let Some(message) = object
            .get("message")
            .or_else(|| object.get("errorMessage"))
            .and_then(JsonValue::as_str)
        {
            return Ok(ResponseShape::Message(message));
        }
        if object.contains_key("properties") {
            // The property map sits one level down: properties.properties
            let properties = object["properties"]
                .get("properties")
                .and_then(JsonValue::as_object)
                .ok_or(ConsoleError::UnrecognizedShape)?;
            return Ok(ResponseShape::Properties(properties));
        }
        if let Some(items) = Self::listing(object, "kafka_topics", "topics") {
            return Ok(ResponseShape::KafkaTopics(items));
        }
        if let Some(items) = Self::listing(object, "streams", "streams") {
            return Ok(ResponseShape::Streams(items));
        }
        if let Some(items) = Self::listing(object, "tables", "tables") {
            return Ok(ResponseShape::Tables(items));
        }
        if let Some(items) = Self::listing(object, "queries", "queries") {
            return Ok(ResponseShape::Queries(items));
        }
        if object.contains_key("error") {
            return Ok(ResponseShape::Error(value));
        }
        if object.contains_key("description") {
            return Ok(ResponseShape::Description(value));
        }
        if object.contains_key("currentStatus") {
            return Ok(ResponseShape::CurrentStatus(value));
        }
        if let Some(change) = object.get("setProperty").and_then(JsonValue::as_object) {
            return Ok(ResponseShape::SetProperty(change));
        }
        if let Some(columns) = object
            .get("row")
            .and_then(|row| row.get("columns"))
            .and_then(JsonValue::as_array)
        {
            return Ok(ResponseShape::Row(columns));
        }

        Err(ConsoleError::UnrecognizedShape)
    }

    /// Listings nest their elements under a same-named inner key, e.g.
    /// `{"streams": {"streams": [...]}}`.
    fn listing(
        object: &'a Map<String, JsonValue>,
        outer: &str,
        inner: &str,
    ) -> Option<&'a [JsonValue]> {
        object
            .get(outer)?
            .get(inner)
            .and_then(JsonValue::as_array)
            .map(Vec::as_slice)
    }
}
