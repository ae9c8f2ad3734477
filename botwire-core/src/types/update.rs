//! Inbound update: one event from the platform, exactly one payload populated.

use serde::{Deserialize, Serialize};

use super::{Chat, Message, User};

/// One inbound event. The platform populates exactly one payload field per
/// update; [`Update::kind`] reports which. A payload this runtime does not
/// model decodes to [`UpdateKind::Unknown`] and still reaches the generic
/// handler. `Update::default()` is the empty update handed to the generic
/// handler together with source errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_message: Option<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_post: Option<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_channel_post: Option<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_query: Option<InlineQuery>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chosen_inline_result: Option<ChosenInlineResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_query: Option<CallbackQuery>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_query: Option<ShippingQuery>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_checkout_query: Option<PreCheckoutQuery>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll: Option<Poll>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll_answer: Option<PollAnswer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_chat_member: Option<ChatMemberUpdated>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_member: Option<ChatMemberUpdated>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_join_request: Option<ChatJoinRequest>,
}

/// Which payload an [`Update`] carries. Used as the dispatch routing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateKind {
    Message,
    EditedMessage,
    ChannelPost,
    EditedChannelPost,
    InlineQuery,
    ChosenInlineResult,
    CallbackQuery,
    ShippingQuery,
    PreCheckoutQuery,
    Poll,
    PollAnswer,
    MyChatMember,
    ChatMember,
    ChatJoinRequest,
    Unknown,
}

impl UpdateKind {
    /// The platform's field name for this payload (`message`, `callback_query`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateKind::Message => "message",
            UpdateKind::EditedMessage => "edited_message",
            UpdateKind::ChannelPost => "channel_post",
            UpdateKind::EditedChannelPost => "edited_channel_post",
            UpdateKind::InlineQuery => "inline_query",
            UpdateKind::ChosenInlineResult => "chosen_inline_result",
            UpdateKind::CallbackQuery => "callback_query",
            UpdateKind::ShippingQuery => "shipping_query",
            UpdateKind::PreCheckoutQuery => "pre_checkout_query",
            UpdateKind::Poll => "poll",
            UpdateKind::PollAnswer => "poll_answer",
            UpdateKind::MyChatMember => "my_chat_member",
            UpdateKind::ChatMember => "chat_member",
            UpdateKind::ChatJoinRequest => "chat_join_request",
            UpdateKind::Unknown => "unknown",
        }
    }
}

impl Update {
    /// Reports which payload is populated.
    pub fn kind(&self) -> UpdateKind {
        if self.message.is_some() {
            UpdateKind::Message
        } else if self.edited_message.is_some() {
            UpdateKind::EditedMessage
        } else if self.channel_post.is_some() {
            UpdateKind::ChannelPost
        } else if self.edited_channel_post.is_some() {
            UpdateKind::EditedChannelPost
        } else if self.inline_query.is_some() {
            UpdateKind::InlineQuery
        } else if self.chosen_inline_result.is_some() {
            UpdateKind::ChosenInlineResult
        } else if self.callback_query.is_some() {
            UpdateKind::CallbackQuery
        } else if self.shipping_query.is_some() {
            UpdateKind::ShippingQuery
        } else if self.pre_checkout_query.is_some() {
            UpdateKind::PreCheckoutQuery
        } else if self.poll.is_some() {
            UpdateKind::Poll
        } else if self.poll_answer.is_some() {
            UpdateKind::PollAnswer
        } else if self.my_chat_member.is_some() {
            UpdateKind::MyChatMember
        } else if self.chat_member.is_some() {
            UpdateKind::ChatMember
        } else if self.chat_join_request.is_some() {
            UpdateKind::ChatJoinRequest
        } else {
            UpdateKind::Unknown
        }
    }

    /// The message payload, whichever message-shaped field carries it.
    pub fn any_message(&self) -> Option<&Message> {
        self.message
            .as_ref()
            .or(self.edited_message.as_ref())
            .or(self.channel_post.as_ref())
            .or(self.edited_channel_post.as_ref())
    }
}

/// Inline query from a user typing `@bot ...` in any chat.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InlineQuery {
    pub id: String,
    #[serde(default)]
    pub from: User,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub offset: String,
}

/// Result of an inline query the user picked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChosenInlineResult {
    pub result_id: String,
    #[serde(default)]
    pub from: User,
    #[serde(default)]
    pub query: String,
}

/// Button press on an inline keyboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    #[serde(default)]
    pub from: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

/// Shipping query during checkout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShippingQuery {
    pub id: String,
    #[serde(default)]
    pub from: User,
    #[serde(default)]
    pub invoice_payload: String,
}

/// Pre-checkout confirmation query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreCheckoutQuery {
    pub id: String,
    #[serde(default)]
    pub from: User,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub total_amount: i64,
    #[serde(default)]
    pub invoice_payload: String,
}

/// Poll state change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Poll {
    pub id: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub is_closed: bool,
}

/// A user's answer in a non-anonymous poll.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PollAnswer {
    pub poll_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default)]
    pub option_ids: Vec<i64>,
}

/// Membership change for the bot or another chat member.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatMemberUpdated {
    #[serde(default)]
    pub chat: Chat,
    #[serde(default)]
    pub from: User,
    #[serde(default)]
    pub date: i64,
}

/// Request to join a chat awaiting approval.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatJoinRequest {
    #[serde(default)]
    pub chat: Chat,
    #[serde(default)]
    pub from: User,
    #[serde(default)]
    pub date: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_update_kind() {
        let json = r#"{
            "update_id": 100,
            "message": {
                "message_id": 1,
                "date": 1712000000,
                "chat": {"id": 1, "type": "private"},
                "text": "hi"
            }
        }"#;
        let update: Update = serde_json::from_str(json).unwrap();
        assert_eq!(update.update_id, 100);
        assert_eq!(update.kind(), UpdateKind::Message);
        assert_eq!(update.any_message().unwrap().text.as_deref(), Some("hi"));
    }

    #[test]
    fn test_callback_query_update_kind() {
        let json = r#"{
            "update_id": 101,
            "callback_query": {"id": "cb1", "from": {"id": 2, "is_bot": false, "first_name": "A"}, "data": "yes"}
        }"#;
        let update: Update = serde_json::from_str(json).unwrap();
        assert_eq!(update.kind(), UpdateKind::CallbackQuery);
        assert_eq!(
            update.callback_query.unwrap().data.as_deref(),
            Some("yes")
        );
    }

    #[test]
    fn test_unmodeled_payload_is_unknown() {
        // A payload field this runtime does not model is ignored by serde.
        let json = r#"{"update_id": 102, "message_reaction": {"chat": {"id": 3, "type": "group"}}}"#;
        let update: Update = serde_json::from_str(json).unwrap();
        assert_eq!(update.kind(), UpdateKind::Unknown);
    }

    #[test]
    fn test_default_update_is_empty() {
        let update = Update::default();
        assert_eq!(update.update_id, 0);
        assert_eq!(update.kind(), UpdateKind::Unknown);
    }
}
