//! Board API wire types and errors.

use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by board API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("API request failed: {0}")]
    Request(String),

    /// The API returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    Status { status: u16, body: String },

    /// The response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

// =============================================================================
// ENTRIES
// =============================================================================

/// One row of `GET /board/manage`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManageEntry {
    pub msgid: i64,
    #[serde(default, deserialize_with = "scalar_text")]
    pub time: String,
    #[serde(rename = "userName", default, deserialize_with = "scalar_text")]
    pub user_name: String,
    #[serde(default, deserialize_with = "scalar_text")]
    pub message: String,
    #[serde(rename = "replymsg", default, deserialize_with = "optional_scalar_text", skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
}

impl ManageEntry {
    /// The reply text, if one has been written. Empty replies count as absent.
    #[must_use]
    pub fn reply_text(&self) -> Option<&str> {
        self.reply.as_deref().filter(|r| !r.is_empty())
    }
}

/// One row of `GET /board/message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEntry {
    #[serde(default, deserialize_with = "scalar_text")]
    pub time: String,
    #[serde(default, deserialize_with = "scalar_text")]
    pub message: String,
    #[serde(default, deserialize_with = "optional_scalar_text", skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
}

/// Body of `POST /board/manage`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyRequest {
    #[serde(rename = "boardId")]
    pub board_id: i64,
    pub reply: String,
}

/// Accept strings, numbers, and booleans as display text; `null` becomes empty.
fn scalar_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Like [`scalar_text`], but `null` stays absent.
fn optional_scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
