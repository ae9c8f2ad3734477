//! # botwire
//!
//! Client runtime for long-lived chat bots: outbound calls with the
//! platform's form/multipart protocol, and inbound updates by polling
//! ([`Poller`]) or webhook ([`WebhookServer`]), routed through a
//! [`botwire_dispatch::Dispatcher`].
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use botwire::{Bot, Poller, SendMessage};
//! use botwire_dispatch::Dispatcher;
//!
//! # async fn run() -> botwire_core::Result<()> {
//! let bot = Arc::new(Bot::new("123456:TOKEN"));
//! bot.send_message(SendMessage::new(42, "hello")).await?;
//!
//! let dispatcher = Arc::new(Dispatcher::new(32));
//! let (mut poller, stop) = Poller::new(bot, dispatcher, Duration::from_secs(1), 0, vec![]);
//! poller.run().await?;
//! # let _ = stop;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod bot;
pub mod config;
pub mod polling;
pub mod webhook;

pub use api::{
    AnswerCallbackQuery, EditMessageText, GetFile, GetUpdates, ParamValue, Params, ParseMode,
    SendDocument, SendMessage, SendPhoto, SetWebhook, REDACTED,
};
pub use bot::Bot;
pub use config::{BotConfig, DEFAULT_API_URL};
pub use polling::{Cursor, Poller, StopHandle};
pub use webhook::{webhook_path, WebhookServer, SECRET_TOKEN_HEADER, WEBHOOK_PATH_PREFIX};

// Core types and the dispatcher at the crate root, so most callers depend
// on this crate alone.
pub use botwire_core::{
    Command, CommandHandler, EditResult, Error, FallbackHandler, InputFile, Message, Result,
    Update, UpdateHandler, UpdateKind, User,
};
pub use botwire_dispatch::{DispatchOutcome, DispatchPool, Dispatcher};
