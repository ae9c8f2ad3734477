//! HTTP transport: one POST per call, secrets scrubbed from every error.

use botwire_core::{Error, Result};
use sha2::{Digest, Sha256};

use super::encode::RequestBody;

/// Placeholder substituted for the bot token and its hash in error text.
pub const REDACTED: &str = "[REDACTED]";

/// Lowercase-hex SHA-256 digest of `input`.
pub(crate) fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

/// Issues POSTs to `<api_url>/bot<token>/<method>`.
///
/// No retries and no timeout of its own; callers supply a pre-configured
/// [`reqwest::Client`] when they need deadlines. The HTTP status line is
/// deliberately not inspected: the platform reports success and failure in
/// the JSON body.
pub struct Transport {
    client: reqwest::Client,
    api_url: String,
    token: String,
    token_hash: String,
}

impl Transport {
    pub fn new(client: reqwest::Client, api_url: impl Into<String>, token: impl Into<String>) -> Self {
        let api_url = api_url.into();
        let token = token.into();
        let token_hash = sha256_hex(&token);
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
            token_hash,
        }
    }

    /// Full endpoint URL for a method. Contains the token; never log it raw.
    pub fn endpoint(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.token, method)
    }

    /// Replaces the literal token and its hex SHA-256 with [`REDACTED`].
    pub fn redact(&self, text: &str) -> String {
        text.replace(&self.token, REDACTED)
            .replace(&self.token_hash, REDACTED)
    }

    /// Sends one call and returns the raw response bytes. Any transport
    /// failure is wrapped and redacted before it is surfaced.
    pub async fn send(&self, method: &str, body: RequestBody) -> Result<Vec<u8>> {
        let url = self.endpoint(method);
        let request = match body {
            RequestBody::Form(pairs) => self.client.post(&url).form(&pairs),
            RequestBody::Multipart(form) => self.client.post(&url).multipart(form),
        };

        let response = request
            .send()
            .await
            .map_err(|e| Error::Transport(self.redact(&e.to_string())))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(self.redact(&e.to_string())))?;
        Ok(bytes.to_vec())
    }
}
