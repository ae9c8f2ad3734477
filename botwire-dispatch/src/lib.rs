//! # botwire-dispatch
//!
//! Routes decoded updates to registered handlers. Precedence, first match
//! wins: command handler for a text message starting with a command token
//! (else the unknown-command fallback), then the handler registered for the
//! update's payload kind, then the generic fallback. Handler execution is
//! fire-and-forget through a bounded [`DispatchPool`].

mod pool;

pub use pool::{DispatchOutcome, DispatchPool};

use std::collections::HashMap;
use std::sync::Arc;

use botwire_core::{
    Command, CommandHandler, Error, FallbackHandler, Update, UpdateHandler, UpdateKind,
};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, warn};

/// Marker character a command token starts with.
pub const COMMAND_MARKER: char = '/';

/// Splits message text into a command token and verbatim argument text.
///
/// The token is the leading run up to the first whitespace character and must
/// start with the marker; the argument is everything after the first space,
/// unparsed. Returns `None` for non-command text.
pub fn parse_command(text: &str) -> Option<(&str, &str)> {
    if !text.starts_with(COMMAND_MARKER) {
        return None;
    }
    let token_end = text.find(char::is_whitespace).unwrap_or(text.len());
    let token = &text[..token_end];
    let args = match text.find(' ') {
        Some(idx) => &text[idx + 1..],
        None => "",
    };
    Some((token, args))
}

/// Update router. Built by chaining registrations, then shared (`Arc`)
/// between update sources.
pub struct Dispatcher {
    commands: HashMap<String, Arc<dyn CommandHandler>>,
    kinds: HashMap<UpdateKind, Arc<dyn UpdateHandler>>,
    unknown_command: Option<Arc<dyn CommandHandler>>,
    fallback: Option<Arc<dyn FallbackHandler>>,
    pool: DispatchPool,
    completions: Option<UnboundedReceiver<DispatchOutcome>>,
}

impl Dispatcher {
    /// Creates a dispatcher whose pool runs at most `concurrency` handlers
    /// at once.
    pub fn new(concurrency: usize) -> Self {
        let (pool, completions) = DispatchPool::new(concurrency);
        Self {
            commands: HashMap::new(),
            kinds: HashMap::new(),
            unknown_command: None,
            fallback: None,
            pool,
            completions: Some(completions),
        }
    }

    /// Registers a handler for a command token (case-sensitive, marker
    /// included, e.g. `"/start"`). Replaces any previous registration.
    pub fn on_command(mut self, token: impl Into<String>, handler: Arc<dyn CommandHandler>) -> Self {
        self.commands.insert(token.into(), handler);
        self
    }

    /// Registers a handler for updates of one payload kind.
    pub fn on_kind(mut self, kind: UpdateKind, handler: Arc<dyn UpdateHandler>) -> Self {
        self.kinds.insert(kind, handler);
        self
    }

    /// Registers the handler for command-style messages whose token has no
    /// registration. It receives the bare command name (marker stripped).
    pub fn on_unknown_command(mut self, handler: Arc<dyn CommandHandler>) -> Self {
        self.unknown_command = Some(handler);
        self
    }

    /// Registers the generic fallback: unrouted updates and source failures.
    pub fn on_fallback(mut self, handler: Arc<dyn FallbackHandler>) -> Self {
        self.fallback = Some(handler);
        self
    }

    /// Takes the completion receiver (one [`DispatchOutcome`] per dispatched
    /// task). Call before sharing the dispatcher; returns `None` thereafter.
    pub fn take_completions(&mut self) -> Option<UnboundedReceiver<DispatchOutcome>> {
        self.completions.take()
    }

    /// Routes one update and spawns its handler. Never blocks and never
    /// fails; an update nothing matches is logged and dropped.
    pub fn dispatch(&self, update: Update) {
        let update_id = update.update_id;
        let kind = update.kind();

        if let Some(message) = &update.message {
            if let Some((token, args)) = message.text.as_deref().and_then(parse_command) {
                if let Some(handler) = self.commands.get(token) {
                    info!(update_id, command = %token, "Dispatching command");
                    let handler = Arc::clone(handler);
                    let message = message.clone();
                    let command = Command {
                        name: token.to_string(),
                        args: args.to_string(),
                    };
                    self.pool.spawn(format!("command:{}", token), async move {
                        handler.handle(message, command).await
                    });
                    return;
                }
                if let Some(handler) = &self.unknown_command {
                    let name = token.trim_start_matches(COMMAND_MARKER).to_string();
                    info!(update_id, command = %name, "Dispatching unknown command");
                    let handler = Arc::clone(handler);
                    let message = message.clone();
                    let command = Command {
                        name,
                        args: args.to_string(),
                    };
                    self.pool.spawn("unknown_command".to_string(), async move {
                        handler.handle(message, command).await
                    });
                    return;
                }
            }
        }

        if let Some(handler) = self.kinds.get(&kind) {
            info!(update_id, kind = kind.as_str(), "Dispatching by kind");
            let handler = Arc::clone(handler);
            self.pool
                .spawn(format!("kind:{}", kind.as_str()), async move {
                    handler.handle(update).await
                });
            return;
        }

        if let Some(handler) = &self.fallback {
            debug!(update_id, kind = kind.as_str(), "Dispatching to fallback");
            let handler = Arc::clone(handler);
            self.pool
                .spawn("fallback".to_string(), async move {
                    handler.handle(update, None).await
                });
            return;
        }

        debug!(update_id, kind = kind.as_str(), "No handler registered, update dropped");
    }

    /// Surfaces a source failure (fetch or webhook decode) to the generic
    /// fallback with an empty update.
    pub fn dispatch_error(&self, error: Error) {
        match &self.fallback {
            Some(handler) => {
                let handler = Arc::clone(handler);
                self.pool.spawn("fallback".to_string(), async move {
                    handler.handle(Update::default(), Some(error)).await
                });
            }
            None => warn!(error = %error, "Source failure with no fallback handler"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_token_and_args() {
        assert_eq!(parse_command("/start hello"), Some(("/start", "hello")));
        assert_eq!(parse_command("/start"), Some(("/start", "")));
        assert_eq!(
            parse_command("/send a b  c"),
            Some(("/send", "a b  c"))
        );
    }

    #[test]
    fn test_parse_command_rejects_plain_text() {
        assert_eq!(parse_command("hello /start"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn test_parse_command_args_verbatim() {
        // No quoting rules: everything after the first space, untouched.
        let (token, args) = parse_command("/say \"a b\"  c").unwrap();
        assert_eq!(token, "/say");
        assert_eq!(args, "\"a b\"  c");
    }
}
