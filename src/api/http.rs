//! HTTP implementation of [`BoardApi`].
//!
//! Thin reqwest wrapper over the board endpoints. Status handling and body
//! parsing live in free functions so they can be tested without a server.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, COOKIE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::types::{ApiError, ManageEntry, MessageEntry, ReplyRequest};
use super::{BoardApi, MANAGE_PATH, MESSAGE_PATH, Role};
use crate::config::BoardConfig;

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Debug, Clone)]
pub struct HttpBoardApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBoardApi {
    /// Build a client from config. The session cookie, when set, is attached
    /// to every request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ClientBuild`] if a timeout is zero, the cookie is
    /// not a valid header value, or the HTTP client cannot be constructed.
    pub fn new(config: &BoardConfig) -> Result<Self, ApiError> {
        if config.timeouts.request_secs == 0 || config.timeouts.connect_secs == 0 {
            return Err(ApiError::ClientBuild("timeouts must be at least one second".into()));
        }

        let mut headers = HeaderMap::new();
        if let Some(cookie) = config.session_cookie.as_deref() {
            let value = HeaderValue::from_str(cookie).map_err(|e| ApiError::ClientBuild(e.to_string()))?;
            headers.insert(COOKIE, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;

        Ok(Self { http, base_url: config.api_url.trim_end_matches('/').to_owned() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_text(&self, path: &str) -> Result<String, ApiError> {
        debug!(path, "board api GET");
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        read_success_body(response).await
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        let payload = serde_json::to_vec(body).map_err(|e| ApiError::Parse(e.to_string()))?;
        debug!(path, bytes = payload.len(), "board api POST");
        let response = self
            .http
            .post(self.url(path))
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let text = read_success_body(response).await?;
        parse_json_or_null(&text)
    }
}

async fn read_success_body(response: reqwest::Response) -> Result<String, ApiError> {
    let status = response.status().as_u16();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;
    check_status(status, text)
}

#[async_trait::async_trait]
impl BoardApi for HttpBoardApi {
    async fn check_access(&self, role: Role) -> Result<(), ApiError> {
        let text = self.get_text(role.check_path()).await?;
        parse_json::<Value>(&text).map(|_| ())
    }

    async fn manage_entries(&self) -> Result<Vec<ManageEntry>, ApiError> {
        let text = self.get_text(MANAGE_PATH).await?;
        parse_json(&text)
    }

    async fn post_reply(&self, request: &ReplyRequest) -> Result<Value, ApiError> {
        self.post_json(MANAGE_PATH, request).await
    }

    async fn message_entries(&self) -> Result<Vec<MessageEntry>, ApiError> {
        let text = self.get_text(MESSAGE_PATH).await?;
        parse_json(&text)
    }

    async fn post_message(&self, text: &str) -> Result<Value, ApiError> {
        self.post_json(MESSAGE_PATH, text).await
    }
}

// =============================================================================
// PARSING
// =============================================================================

fn check_status(status: u16, body: String) -> Result<String, ApiError> {
    if (200..300).contains(&status) {
        Ok(body)
    } else {
        Err(ApiError::Status { status, body })
    }
}

fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Parse(e.to_string()))
}

/// Submission responses are only checked for well-formedness; an empty body
/// reads as `null`.
fn parse_json_or_null(text: &str) -> Result<Value, ApiError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    parse_json(text)
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
