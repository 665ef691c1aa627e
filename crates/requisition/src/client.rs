//! Client side of the request store API.
//!
//! The form talks to the store only through [`RequestStoreClient`], so it
//! can be driven by the HTTP implementation here or by an in-memory fake.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::config::ClientConfig;
use crate::model::{LookupEntry, LookupKind, RequestPayload, RequestRow};

/// Shown when a failure carries no usable server message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    /// The store answered with a non-success status or `success: false`.
    #[error("Server returned {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Text suitable for an error banner: the server's own message when
    /// there is one, the generic fallback otherwise.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Server { message, .. } if !message.trim().is_empty() => message.clone(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Network(e.to_string())
        }
    }
}

/// Operations the request store offers to the form and the list view.
#[async_trait]
pub trait RequestStoreClient: Send + Sync {
    async fn list_lookup(&self, kind: LookupKind) -> Result<Vec<LookupEntry>, ClientError>;

    async fn submit_request(&self, payload: &RequestPayload) -> Result<(), ClientError>;

    async fn list_requests(&self) -> Result<Vec<RequestRow>, ClientError>;
}

/// Pulls a human-readable message out of an error body.
///
/// Prefers `message`, then `error`; returns `None` for bodies that are not
/// JSON objects or carry neither field.
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|m| !m.is_empty())
        .map(String::from)
}

#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    success: bool,
    data: Option<Vec<T>>,
    message: Option<String>,
}

/// [`RequestStoreClient`] over HTTP.
#[derive(Clone)]
pub struct HttpRequestStore {
    http: reqwest::Client,
    base_url: String,
}

impl HttpRequestStore {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    async fn get_list<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ClientError> {
        let response = self.http.get(self.url(path)).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(server_error(status, &body));
        }

        let parsed: ListResponse<T> =
            serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))?;
        if !parsed.success {
            return Err(ClientError::Server {
                status: status.as_u16(),
                message: parsed.message.unwrap_or_default(),
            });
        }
        Ok(parsed.data.unwrap_or_default())
    }
}

fn server_error(status: StatusCode, body: &str) -> ClientError {
    ClientError::Server {
        status: status.as_u16(),
        message: extract_error_message(body).unwrap_or_default(),
    }
}

#[async_trait]
impl RequestStoreClient for HttpRequestStore {
    async fn list_lookup(&self, kind: LookupKind) -> Result<Vec<LookupEntry>, ClientError> {
        let rows: Vec<serde_json::Value> = self.get_list(kind.path()).await?;
        rows.iter()
            .map(|row| {
                LookupEntry::from_keyed(kind, row).ok_or_else(|| {
                    ClientError::Decode(format!("malformed {} row: {}", kind.table(), row))
                })
            })
            .collect()
    }

    async fn submit_request(&self, payload: &RequestPayload) -> Result<(), ClientError> {
        let response = self.http.post(self.url("request")).json(payload).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(server_error(status, &body))
    }

    async fn list_requests(&self) -> Result<Vec<RequestRow>, ClientError> {
        self.get_list("request").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_prefers_message() {
        let body = r#"{"error": "Database error", "message": "disk I/O error"}"#;
        assert_eq!(extract_error_message(body).as_deref(), Some("disk I/O error"));
    }

    #[test]
    fn test_extract_falls_back_to_error() {
        let body = r#"{"error": "ID is required for update"}"#;
        assert_eq!(
            extract_error_message(body).as_deref(),
            Some("ID is required for update")
        );
    }

    #[test]
    fn test_extract_malformed_body() {
        assert_eq!(extract_error_message("<html>Bad Gateway</html>"), None);
        assert_eq!(extract_error_message(r#"{"code": 7}"#), None);
        assert_eq!(extract_error_message(r#"{"message": "  "}"#), None);
    }

    #[test]
    fn test_user_message() {
        let server = ClientError::Server {
            status: 400,
            message: "Request details is required".to_string(),
        };
        assert_eq!(server.user_message(), "Request details is required");

        let empty = ClientError::Server {
            status: 502,
            message: String::new(),
        };
        assert_eq!(empty.user_message(), GENERIC_FAILURE_MESSAGE);

        let network = ClientError::Network("connection refused".to_string());
        assert_eq!(network.user_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_list_response_without_data() {
        let body = r#"{"success": false, "message": "Failed to fetch requests"}"#;
        let response: ListResponse<RequestRow> = serde_json::from_str(body).unwrap();
        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.message.as_deref(), Some("Failed to fetch requests"));
    }

    #[test]
    fn test_list_response_with_rows() {
        let body = r#"{"success": true, "data": [{
            "id": 1, "request_details": "Printer toner", "branch_id": 2,
            "dept_id": null, "mis_id": null,
            "created_at": "2026-01-05 08:00:00", "updated_at": "2026-01-05 08:00:00"
        }]}"#;
        let response: ListResponse<RequestRow> = serde_json::from_str(body).unwrap();
        assert!(response.success);
        let rows = response.data.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].branch_id, Some(2));
        assert!(response.message.is_none());
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = HttpRequestStore::new("http://localhost:3000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.url("branch"), "http://localhost:3000/api/branch");
    }
}
