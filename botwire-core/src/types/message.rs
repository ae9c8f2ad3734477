//! A single platform message, reduced to the fields the runtime reads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Chat, User};

/// One message. `date` is the platform's unix-seconds timestamp;
/// [`Message::date_time`] maps it to chrono.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    #[serde(default)]
    pub date: i64,
    #[serde(default)]
    pub chat: Chat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_message: Option<Box<Message>>,
}

impl Message {
    /// Message timestamp as chrono; `None` when the platform sent no date or
    /// an out-of-range value.
    pub fn date_time(&self) -> Option<DateTime<Utc>> {
        if self.date == 0 {
            return None;
        }
        DateTime::from_timestamp(self.date, 0)
    }

    /// Text content: the text for text messages, the caption for media.
    pub fn content(&self) -> Option<&str> {
        self.text.as_deref().or(self.caption.as_deref())
    }
}
