//! The platform's response envelope and the ambiguous edit result.

use serde::{Deserialize, Serialize};

use super::Message;

/// Generic success/failure envelope wrapping every API response.
///
/// The platform encodes failure in the body, not the HTTP status line.
/// `result` is present iff `ok` is true, but the decoder tolerates
/// `ok:false` with nothing else set.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(default)]
    pub result: Option<T>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub error_code: Option<i64>,
    #[serde(default)]
    pub parameters: Option<ResponseParameters>,
}

impl<T> ApiResponse<T> {
    /// Synthetic failure envelope; used when response bytes cannot decode so
    /// callers always receive a typed envelope.
    pub fn failure(description: String) -> Self {
        ApiResponse {
            ok: false,
            result: None,
            description: Some(description),
            error_code: None,
            parameters: None,
        }
    }
}

/// Failure hints the platform may attach (`retry_after` on flood control,
/// `migrate_to_chat_id` on group upgrades).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub migrate_to_chat_id: Option<i64>,
}

/// Result of an edit endpoint, which returns either the edited message or a
/// bare acknowledgement depending on where the message lives.
#[derive(Debug, Clone)]
pub enum EditResult {
    /// The platform returned the edited message.
    Message(Message),
    /// The platform acknowledged the edit without returning the message.
    Acknowledged(bool),
}

impl EditResult {
    /// The edited message, when the platform returned one.
    pub fn message(&self) -> Option<&Message> {
        match self {
            EditResult::Message(msg) => Some(msg),
            EditResult::Acknowledged(_) => None,
        }
    }
}

/// File handle for downloads: `file_path` plugs into the file-download URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileInfo {
    pub file_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_unique_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}
