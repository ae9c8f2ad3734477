//! Bot facade: owns the transport and exposes the outbound operations.

use botwire_core::{
    ApiResponse, EditResult, Error, FileInfo, Message, Result, Update, User,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::{
    decode_edit_result, decode_response, encode_params, AnswerCallbackQuery, EditMessageText,
    GetFile, GetUpdates, Params, SendDocument, SendMessage, SendPhoto, SetWebhook, Transport,
};
use crate::config::{BotConfig, DEFAULT_API_URL};

/// Client facade for one bot identity.
///
/// Cheap to share behind an `Arc`; all methods take `&self`. Each call
/// builds its parameter bag, encodes it, performs one POST, and decodes the
/// envelope. `ok:false` surfaces as [`Error::Api`] with the platform's
/// hints attached verbatim.
pub struct Bot {
    transport: Transport,
    api_url: String,
    token: String,
}

impl Bot {
    /// Bot against the default platform host.
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_api_url(token, DEFAULT_API_URL)
    }

    /// Bot against a specific API host (test servers, local gateways).
    pub fn with_api_url(token: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), token, api_url)
    }

    /// Bot with a caller-configured client; this is where timeouts and
    /// proxies come from, the transport adds none of its own.
    pub fn with_client(
        client: reqwest::Client,
        token: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Self {
        let token = token.into();
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self {
            transport: Transport::new(client, api_url.clone(), token.clone()),
            api_url,
            token,
        }
    }

    /// Bot from a validated [`BotConfig`].
    pub fn from_config(config: &BotConfig) -> Self {
        Self::with_api_url(config.token.clone(), config.api_url.clone())
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Generic call: encode, send, decode, unwrap. Parameters that could not
    /// be encoded have already been dropped (and logged) by the encoder.
    pub async fn request<T: DeserializeOwned>(&self, method: &str, params: Params) -> Result<T> {
        let encoded = encode_params(params).await?;
        if !encoded.dropped.is_empty() {
            debug!(method, dropped = ?encoded.dropped, "Call proceeding without dropped parameters");
        }
        let bytes = self.transport.send(method, encoded.body).await?;
        unwrap_envelope(decode_response::<T>(&bytes))
    }

    /// Identity of this bot.
    pub async fn get_me(&self) -> Result<User> {
        self.request("getMe", Params::new()).await
    }

    pub async fn send_message(&self, request: SendMessage) -> Result<Message> {
        self.request("sendMessage", request.into_params()).await
    }

    pub async fn send_photo(&self, request: SendPhoto) -> Result<Message> {
        self.request("sendPhoto", request.into_params()).await
    }

    pub async fn send_document(&self, request: SendDocument) -> Result<Message> {
        self.request("sendDocument", request.into_params()).await
    }

    /// Edit a sent message. The platform returns either the edited message
    /// or a bare acknowledgement; see [`EditResult`].
    pub async fn edit_message_text(&self, request: EditMessageText) -> Result<EditResult> {
        let encoded = encode_params(request.into_params()).await?;
        let bytes = self.transport.send("editMessageText", encoded.body).await?;
        unwrap_envelope(decode_edit_result(&bytes))
    }

    pub async fn answer_callback_query(&self, request: AnswerCallbackQuery) -> Result<bool> {
        self.request("answerCallbackQuery", request.into_params())
            .await
    }

    /// Fetch updates at or past the given offset.
    pub async fn get_updates(&self, request: GetUpdates) -> Result<Vec<Update>> {
        self.request("getUpdates", request.into_params()).await
    }

    /// Register the push endpoint with the platform.
    pub async fn set_webhook(&self, request: SetWebhook) -> Result<bool> {
        self.request("setWebhook", request.into_params()).await
    }

    /// Unregister the push endpoint (back to polling).
    pub async fn delete_webhook(&self) -> Result<bool> {
        self.request("deleteWebhook", Params::new()).await
    }

    /// Resolve a file id to a download path.
    pub async fn get_file(&self, request: GetFile) -> Result<FileInfo> {
        self.request("getFile", request.into_params()).await
    }

    /// Download URL for a resolved file path. Constructed only; this layer
    /// never fetches it. Contains the token.
    pub fn file_download_url(&self, file_path: &str) -> String {
        format!(
            "{}/file/bot{}/{}",
            self.api_url, self.token, file_path
        )
    }
}

fn unwrap_envelope<T>(envelope: ApiResponse<T>) -> Result<T> {
    if envelope.ok {
        envelope
            .result
            .ok_or_else(|| Error::Decode("ok response without result".to_string()))
    } else {
        let (retry_after, migrate_to_chat_id) = envelope
            .parameters
            .map(|p| (p.retry_after, p.migrate_to_chat_id))
            .unwrap_or((None, None));
        Err(Error::api(
            envelope.description,
            envelope.error_code,
            retry_after,
            migrate_to_chat_id,
        ))
    }
}
