//! Per-endpoint request builders.
//!
//! Each builder exposes only the fields its endpoint accepts and assembles a
//! [`Params`] bag for the transport layer. This is a representative set
//! covering every encoding path (plain fields, enum strings, structured
//! values, file uploads, ambiguous results); the platform's remaining
//! endpoints follow the same pattern.

use botwire_core::InputFile;
use serde_json::json;

use super::params::{ParamValue, Params, ParseMode};

/// `sendMessage`: text to a chat.
#[derive(Debug, Clone)]
pub struct SendMessage {
    chat_id: i64,
    text: String,
    parse_mode: Option<ParseMode>,
    disable_notification: bool,
    reply_to_message_id: Option<i64>,
}

impl SendMessage {
    pub fn new(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            parse_mode: None,
            disable_notification: false,
            reply_to_message_id: None,
        }
    }

    pub fn parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = Some(mode);
        self
    }

    pub fn disable_notification(mut self) -> Self {
        self.disable_notification = true;
        self
    }

    pub fn reply_to(mut self, message_id: i64) -> Self {
        self.reply_to_message_id = Some(message_id);
        self
    }

    pub fn into_params(self) -> Params {
        let mut params = Params::new()
            .push("chat_id", ParamValue::Int(self.chat_id))
            .push("text", ParamValue::Text(self.text));
        if let Some(mode) = self.parse_mode {
            params = params.push("parse_mode", ParamValue::Mode(mode));
        }
        if self.disable_notification {
            params = params.push("disable_notification", ParamValue::Bool(true));
        }
        if let Some(id) = self.reply_to_message_id {
            params = params.push("reply_to_message_id", ParamValue::Int(id));
        }
        params
    }
}

/// `sendPhoto`: photo by upload, URL, or platform file id.
#[derive(Debug, Clone)]
pub struct SendPhoto {
    chat_id: i64,
    photo: InputFile,
    caption: Option<String>,
    parse_mode: Option<ParseMode>,
}

impl SendPhoto {
    pub fn new(chat_id: i64, photo: InputFile) -> Self {
        Self {
            chat_id,
            photo,
            caption: None,
            parse_mode: None,
        }
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = Some(mode);
        self
    }

    pub fn into_params(self) -> Params {
        let mut params = Params::new()
            .push("chat_id", ParamValue::Int(self.chat_id))
            .push("photo", ParamValue::File(self.photo));
        if let Some(caption) = self.caption {
            params = params.push("caption", ParamValue::Text(caption));
        }
        if let Some(mode) = self.parse_mode {
            params = params.push("parse_mode", ParamValue::Mode(mode));
        }
        params
    }
}

/// `sendDocument`: arbitrary file by upload, URL, or platform file id.
#[derive(Debug, Clone)]
pub struct SendDocument {
    chat_id: i64,
    document: InputFile,
    caption: Option<String>,
}

impl SendDocument {
    pub fn new(chat_id: i64, document: InputFile) -> Self {
        Self {
            chat_id,
            document,
            caption: None,
        }
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn into_params(self) -> Params {
        let mut params = Params::new()
            .push("chat_id", ParamValue::Int(self.chat_id))
            .push("document", ParamValue::File(self.document));
        if let Some(caption) = self.caption {
            params = params.push("caption", ParamValue::Text(caption));
        }
        params
    }
}

/// `editMessageText`: edit a sent message, addressed either by chat+id or by
/// inline message id. The response is ambiguous (message or acknowledgement).
#[derive(Debug, Clone)]
pub struct EditMessageText {
    chat_id: Option<i64>,
    message_id: Option<i64>,
    inline_message_id: Option<String>,
    text: String,
    parse_mode: Option<ParseMode>,
}

impl EditMessageText {
    /// Edit addressed by chat and message id.
    pub fn new(chat_id: i64, message_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id: Some(chat_id),
            message_id: Some(message_id),
            inline_message_id: None,
            text: text.into(),
            parse_mode: None,
        }
    }

    /// Edit addressed by inline message id; the platform acknowledges
    /// without returning the message.
    pub fn inline(inline_message_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            chat_id: None,
            message_id: None,
            inline_message_id: Some(inline_message_id.into()),
            text: text.into(),
            parse_mode: None,
        }
    }

    pub fn parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = Some(mode);
        self
    }

    pub fn into_params(self) -> Params {
        let mut params = Params::new();
        if let Some(chat_id) = self.chat_id {
            params = params.push("chat_id", ParamValue::Int(chat_id));
        }
        if let Some(message_id) = self.message_id {
            params = params.push("message_id", ParamValue::Int(message_id));
        }
        if let Some(inline_id) = self.inline_message_id {
            params = params.push("inline_message_id", ParamValue::Text(inline_id));
        }
        params = params.push("text", ParamValue::Text(self.text));
        if let Some(mode) = self.parse_mode {
            params = params.push("parse_mode", ParamValue::Mode(mode));
        }
        params
    }
}

/// `answerCallbackQuery`: acknowledge a button press.
#[derive(Debug, Clone)]
pub struct AnswerCallbackQuery {
    callback_query_id: String,
    text: Option<String>,
    show_alert: bool,
}

impl AnswerCallbackQuery {
    pub fn new(callback_query_id: impl Into<String>) -> Self {
        Self {
            callback_query_id: callback_query_id.into(),
            text: None,
            show_alert: false,
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn show_alert(mut self) -> Self {
        self.show_alert = true;
        self
    }

    pub fn into_params(self) -> Params {
        let mut params = Params::new().push(
            "callback_query_id",
            ParamValue::Text(self.callback_query_id),
        );
        if let Some(text) = self.text {
            params = params.push("text", ParamValue::Text(text));
        }
        if self.show_alert {
            params = params.push("show_alert", ParamValue::Bool(true));
        }
        params
    }
}

/// `getUpdates`: fetch updates at or past `offset`.
#[derive(Debug, Clone)]
pub struct GetUpdates {
    offset: i64,
    limit: Option<i64>,
    timeout: Option<i64>,
    allowed_updates: Vec<String>,
}

impl GetUpdates {
    pub fn new(offset: i64) -> Self {
        Self {
            offset,
            limit: None,
            timeout: None,
            allowed_updates: Vec::new(),
        }
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn timeout(mut self, seconds: i64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    pub fn allowed_updates(mut self, kinds: Vec<String>) -> Self {
        self.allowed_updates = kinds;
        self
    }

    pub fn into_params(self) -> Params {
        let mut params = Params::new().push("offset", ParamValue::Int(self.offset));
        if let Some(limit) = self.limit {
            params = params.push("limit", ParamValue::Int(limit));
        }
        if let Some(timeout) = self.timeout {
            params = params.push("timeout", ParamValue::Int(timeout));
        }
        if !self.allowed_updates.is_empty() {
            params = params.push("allowed_updates", ParamValue::Json(json!(self.allowed_updates)));
        }
        params
    }
}

/// `setWebhook`: register the push endpoint with the platform.
#[derive(Debug, Clone)]
pub struct SetWebhook {
    url: String,
    certificate: Option<InputFile>,
    max_connections: Option<i64>,
    allowed_updates: Vec<String>,
    secret_token: Option<String>,
    drop_pending_updates: bool,
}

impl SetWebhook {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            certificate: None,
            max_connections: None,
            allowed_updates: Vec::new(),
            secret_token: None,
            drop_pending_updates: false,
        }
    }

    /// Self-signed certificate upload for the platform to pin.
    pub fn certificate(mut self, certificate: InputFile) -> Self {
        self.certificate = Some(certificate);
        self
    }

    pub fn max_connections(mut self, n: i64) -> Self {
        self.max_connections = Some(n);
        self
    }

    pub fn allowed_updates(mut self, kinds: Vec<String>) -> Self {
        self.allowed_updates = kinds;
        self
    }

    /// Secret the platform echoes back in its push header.
    pub fn secret_token(mut self, token: impl Into<String>) -> Self {
        self.secret_token = Some(token.into());
        self
    }

    pub fn drop_pending_updates(mut self) -> Self {
        self.drop_pending_updates = true;
        self
    }

    pub fn into_params(self) -> Params {
        let mut params = Params::new().push("url", ParamValue::Text(self.url));
        if let Some(certificate) = self.certificate {
            params = params.push("certificate", ParamValue::File(certificate));
        }
        if let Some(n) = self.max_connections {
            params = params.push("max_connections", ParamValue::Int(n));
        }
        if !self.allowed_updates.is_empty() {
            params = params.push("allowed_updates", ParamValue::Json(json!(self.allowed_updates)));
        }
        if let Some(token) = self.secret_token {
            params = params.push("secret_token", ParamValue::Text(token));
        }
        if self.drop_pending_updates {
            params = params.push("drop_pending_updates", ParamValue::Bool(true));
        }
        params
    }
}

/// `getFile`: resolve a file id to a downloadable path.
#[derive(Debug, Clone)]
pub struct GetFile {
    file_id: String,
}

impl GetFile {
    pub fn new(file_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
        }
    }

    pub fn into_params(self) -> Params {
        Params::new().push("file_id", ParamValue::Text(self.file_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(params: &Params, name: &str) -> Option<String> {
        params
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.to_text())
    }

    #[test]
    fn test_send_message_params() {
        let params = SendMessage::new(42, "hello")
            .parse_mode(ParseMode::Html)
            .reply_to(7)
            .into_params();
        assert_eq!(text_of(&params, "chat_id").unwrap(), "42");
        assert_eq!(text_of(&params, "text").unwrap(), "hello");
        assert_eq!(text_of(&params, "parse_mode").unwrap(), "HTML");
        assert_eq!(text_of(&params, "reply_to_message_id").unwrap(), "7");
        assert!(text_of(&params, "disable_notification").is_none());
    }

    #[test]
    fn test_send_photo_by_file_id_stays_form() {
        let params = SendPhoto::new(42, InputFile::file_id("AgACAgIAAx")).into_params();
        assert!(!params.requires_multipart());
        assert_eq!(text_of(&params, "photo").unwrap(), "AgACAgIAAx");
    }

    #[test]
    fn test_send_photo_by_bytes_requires_multipart() {
        let params = SendPhoto::new(42, InputFile::bytes(vec![1, 2, 3])).into_params();
        assert!(params.requires_multipart());
    }

    #[test]
    fn test_get_updates_omits_empty_allowed_updates() {
        let params = GetUpdates::new(5).into_params();
        assert_eq!(text_of(&params, "offset").unwrap(), "5");
        assert!(text_of(&params, "allowed_updates").is_none());

        let params = GetUpdates::new(5)
            .allowed_updates(vec!["message".to_string()])
            .into_params();
        assert_eq!(
            text_of(&params, "allowed_updates").unwrap(),
            r#"["message"]"#
        );
    }

    #[test]
    fn test_edit_message_text_inline_addressing() {
        let params = EditMessageText::inline("inline-1", "new text").into_params();
        assert!(text_of(&params, "chat_id").is_none());
        assert_eq!(text_of(&params, "inline_message_id").unwrap(), "inline-1");
        assert_eq!(text_of(&params, "text").unwrap(), "new text");
    }
}
