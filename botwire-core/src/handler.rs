//! Handler traits the dispatcher routes updates to.
//!
//! Handlers run as independent tasks and must not retain runtime-internal
//! state; everything they need arrives by value.

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::types::{Message, Update};

/// A parsed command invocation.
///
/// For a registered handler `name` is the token as registered (marker
/// included); for the unknown-command fallback it is the bare command name
/// with the marker stripped. `args` is everything after the first space of
/// the message text, verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub args: String,
}

/// Handles a command-style text message.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, message: Message, command: Command) -> Result<()>;
}

/// Handles updates of one payload kind.
#[async_trait]
pub trait UpdateHandler: Send + Sync {
    async fn handle(&self, update: Update) -> Result<()>;
}

/// Last-resort handler. Receives updates nothing else matched
/// (`error: None`) and source failures (`Update::default()` plus the error).
#[async_trait]
pub trait FallbackHandler: Send + Sync {
    async fn handle(&self, update: Update, error: Option<Error>) -> Result<()>;
}
