//! Owned HTTP response snapshot
//!
//! `reqwest::Response` consumes itself on read, so the transport converts
//! every wire response into an [`ApiResponse`] that can be cached, cloned,
//! and inspected repeatedly by resource clients.

use brighte_domain::{BrighteError, Result};
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Status, headers, and body of one upstream response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl ApiResponse {
    pub(crate) async fn from_reqwest(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .text()
            .await
            .map_err(|e| BrighteError::Network(format!("failed to read response body: {e}")))?;

        Ok(Self { status, headers, body })
    }

    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }

    /// Decode the body into a typed value
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body)
            .map_err(|e| BrighteError::Internal(format!("failed to decode response body: {e}")))
    }

    /// Decode the body as loose JSON, `None` if it is not valid JSON
    pub fn json_value(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }

    /// Upstream `message` field, falling back to the HTTP reason phrase
    pub fn error_message(&self) -> String {
        self.json_value()
            .and_then(|body| body.get("message")?.as_str().map(str::to_string))
            .unwrap_or_else(|| self.reason_phrase())
    }

    /// First GraphQL `errors[0].message`, falling back to the reason phrase
    pub fn graphql_error_message(&self) -> String {
        self.json_value()
            .and_then(|body| {
                body.get("errors")?.get(0)?.get("message")?.as_str().map(str::to_string)
            })
            .unwrap_or_else(|| self.reason_phrase())
    }

    fn reason_phrase(&self) -> String {
        self.status.canonical_reason().unwrap_or("Unknown").to_string()
    }
}
