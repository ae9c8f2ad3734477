//! Error types for the bot runtime.
//!
//! [`Error`] is the top-level error; everything callers see funnels through it.

use thiserror::Error;

/// Top-level error for botwire (transport, platform, decode, config, IO, handler).
#[derive(Error, Debug)]
pub enum Error {
    /// Network or body-build failure. The message has already been redacted;
    /// it never contains the bot token or its hash.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Platform replied `ok:false`. Hints (`retry_after`, `migrate_to_chat_id`)
    /// are surfaced verbatim; the runtime does not act on them.
    #[error("API error: {description}")]
    Api {
        description: String,
        error_code: Option<i64>,
        retry_after: Option<i64>,
        migrate_to_chat_id: Option<i64>,
    },

    /// Response bytes did not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A user-supplied handler failed. Never propagates into a source loop.
    #[error("Handler error: {0}")]
    Handler(String),
}

impl Error {
    /// Builds an [`Error::Api`] from envelope fields.
    pub fn api(
        description: Option<String>,
        error_code: Option<i64>,
        retry_after: Option<i64>,
        migrate_to_chat_id: Option<i64>,
    ) -> Self {
        Error::Api {
            description: description.unwrap_or_else(|| "unknown error".to_string()),
            error_code,
            retry_after,
            migrate_to_chat_id,
        }
    }
}

/// Result type for runtime operations; uses [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
