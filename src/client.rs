//! HTTP transport to the streaming SQL service.
//!
//! Two endpoints carry statements: `/query` for streaming queries, whose
//! response body is a newline-delimited stream of JSON values, and `/ksql`
//! for one-shot statements, whose body is a single JSON value. Both take
//! the same `{ksql, streamsProperties}` payload. The service reports
//! errors in the response body itself, so non-2xx statuses are not
//! treated as transport failures here; the body is rendered either way.

use std::collections::HashMap;
use std::pin::Pin;
use std::time::Duration;

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Request payload for both statement endpoints
#[derive(Debug, Clone, Serialize)]
pub struct StatementRequest {
    /// The statement text
    pub ksql: String,

    /// Streams properties applied to this statement
    #[serde(rename = "streamsProperties")]
    pub streams_properties: HashMap<String, String>,
}

/// Server information returned by GET /info
#[derive(Debug, Clone, Deserialize)]
pub struct ServerInfoResponse {
    #[serde(rename = "KsqlServerInfo")]
    pub server_info: ServerInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerInfo {
    pub version: String,
}

/// HTTP client for the streaming SQL service
#[derive(Clone)]
pub struct ServiceClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl ServiceClient {
    /// Create a client for the given base URL.
    ///
    /// Only the connection handshake is bounded by a timeout. Streaming
    /// queries run until cancelled or ended by the server, so no overall
    /// request timeout is applied.
    pub fn new(base_url: &str, connect_timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    /// The configured server base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute a one-shot statement against /ksql, returning the raw body.
    pub async fn execute_statement(
        &self,
        sql: &str,
        properties: HashMap<String, String>,
    ) -> Result<String> {
        let url = format!("{}/ksql", self.base_url);
        let request = StatementRequest {
            ksql: sql.to_string(),
            streams_properties: properties,
        };
        debug!("POST {} ({} bytes of sql)", url, sql.len());

        let response = self.http_client.post(&url).json(&request).send().await?;
        debug!("statement response status: {}", response.status());
        Ok(response.text().await?)
    }

    /// Start a streaming query against /query.
    ///
    /// The returned stream yields raw body chunks; dropping it aborts the
    /// request, which is how cancellation works. At most one query stream
    /// should be live per session.
    pub async fn execute_query(
        &self,
        sql: &str,
        properties: HashMap<String, String>,
    ) -> Result<QueryStream> {
        let url = format!("{}/query", self.base_url);
        let request = StatementRequest {
            ksql: sql.to_string(),
            streams_properties: properties,
        };
        debug!("POST {} (streaming)", url);

        let response = self.http_client.post(&url).json(&request).send().await?;
        debug!("query response status: {}", response.status());
        Ok(QueryStream {
            inner: Box::pin(response.bytes_stream()),
        })
    }

    /// Fetch server information from GET /info.
    pub async fn server_info(&self) -> Result<ServerInfoResponse> {
        let url = format!("{}/info", self.base_url);
        debug!("GET {}", url);
        let response = self.http_client.get(&url).send().await?;
        Ok(response.json::<ServerInfoResponse>().await?)
    }
}

/// Body chunk stream of an in-flight streaming query.
///
/// Chunks arrive in order and may split lines (and in principle UTF-8
/// sequences) arbitrarily; callers reassemble lines from the raw bytes.
pub struct QueryStream {
    inner: Pin<Box<dyn Stream<Item = reqwest::Result<Bytes>> + Send>>,
}

impl QueryStream {
    /// Next body chunk, or `None` when the server ends the response.
    pub async fn next_chunk(&mut self) -> Result<Option<Bytes>> {
        match self.inner.next().await {
            Some(Ok(chunk)) => Ok(Some(chunk)),
            Some(Err(err)) => Err(err.into()),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_request_wire_format() {
        let mut properties = HashMap::new();
        properties.insert("auto.offset.reset".to_string(), "earliest".to_string());
        let request = StatementRequest {
            ksql: "SHOW TOPICS;".to_string(),
            streams_properties: properties,
        };

        let encoded = serde_json::to_value(&request).unwrap();
        assert_eq!(encoded["ksql"], "SHOW TOPICS;");
        assert_eq!(encoded["streamsProperties"]["auto.offset.reset"], "earliest");
    }

    #[test]
    fn test_server_info_decoding() {
        let body = r#"{"KsqlServerInfo":{"version":"5.1.0","kafkaClusterId":"x"}}"#;
        let info: ServerInfoResponse = serde_json::from_str(body).unwrap();
        assert_eq!(info.server_info.version, "5.1.0");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ServiceClient::new("http://localhost:8088/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8088");
    }
}
