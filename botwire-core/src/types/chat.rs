//! Chat (group, channel or private conversation) identity.

use serde::{Deserialize, Serialize};

/// Chat identity. `kind` carries the platform's `type` string
/// (`private`, `group`, `supergroup`, `channel`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl Chat {
    /// True for one-on-one conversations.
    pub fn is_private(&self) -> bool {
        self.kind == "private"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_chat_type_field() {
        let json = r#"{"id":-100,"type":"supergroup","title":"ops"}"#;
        let chat: Chat = serde_json::from_str(json).unwrap();
        assert_eq!(chat.kind, "supergroup");
        assert!(!chat.is_private());
    }
}
