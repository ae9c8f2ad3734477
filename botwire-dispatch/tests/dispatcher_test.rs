//! Integration tests for [`botwire_dispatch::Dispatcher`] routing.
//!
//! Covers: command routing with verbatim arguments, unknown-command fallback
//! with the bare name, kind routing, command precedence over kind handlers,
//! generic fallback for unrouted updates, and source-failure surfacing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use botwire_core::{
    Chat, Command, CommandHandler, Error, FallbackHandler, Message, Update, UpdateHandler,
    UpdateKind,
};
use botwire_dispatch::Dispatcher;

fn text_update(update_id: i64, text: &str) -> Update {
    Update {
        update_id,
        message: Some(Message {
            message_id: 1,
            date: 1712000000,
            chat: Chat {
                id: 42,
                kind: "private".to_string(),
                ..Default::default()
            },
            text: Some(text.to_string()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

struct RecordingCommandHandler {
    seen: Arc<Mutex<Vec<Command>>>,
}

#[async_trait]
impl CommandHandler for RecordingCommandHandler {
    async fn handle(&self, _message: Message, command: Command) -> botwire_core::Result<()> {
        self.seen.lock().unwrap().push(command);
        Ok(())
    }
}

struct CountingUpdateHandler {
    count: Arc<AtomicUsize>,
}

#[async_trait]
impl UpdateHandler for CountingUpdateHandler {
    async fn handle(&self, _update: Update) -> botwire_core::Result<()> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct RecordingFallback {
    seen: Arc<Mutex<Vec<(i64, Option<String>)>>>,
}

#[async_trait]
impl FallbackHandler for RecordingFallback {
    async fn handle(&self, update: Update, error: Option<Error>) -> botwire_core::Result<()> {
        self.seen
            .lock()
            .unwrap()
            .push((update.update_id, error.map(|e| e.to_string())));
        Ok(())
    }
}

/// **Test: a registered command receives the argument text verbatim.**
#[tokio::test]
async fn test_command_routing_with_args() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut dispatcher = Dispatcher::new(4).on_command(
        "/start",
        Arc::new(RecordingCommandHandler { seen: seen.clone() }),
    );
    let mut completions = dispatcher.take_completions().unwrap();

    dispatcher.dispatch(text_update(1, "/start hello"));
    let outcome = completions.recv().await.unwrap();
    assert_eq!(outcome.route, "command:/start");
    assert!(outcome.result.is_ok());

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].name, "/start");
    assert_eq!(seen[0].args, "hello");
}

/// **Test: an unregistered command goes to the unknown-command fallback with
/// the bare name.**
#[tokio::test]
async fn test_unknown_command_fallback() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut dispatcher = Dispatcher::new(4)
        .on_command(
            "/start",
            Arc::new(RecordingCommandHandler {
                seen: Arc::new(Mutex::new(Vec::new())),
            }),
        )
        .on_unknown_command(Arc::new(RecordingCommandHandler { seen: seen.clone() }));
    let mut completions = dispatcher.take_completions().unwrap();

    dispatcher.dispatch(text_update(2, "/unknown x"));
    let outcome = completions.recv().await.unwrap();
    assert_eq!(outcome.route, "unknown_command");

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0].name, "unknown");
    assert_eq!(seen[0].args, "x");
}

/// **Test: command tokens are case-sensitive; a mismatch is an unknown
/// command, not a match.**
#[tokio::test]
async fn test_command_tokens_case_sensitive() {
    let registered = Arc::new(Mutex::new(Vec::new()));
    let unknown = Arc::new(Mutex::new(Vec::new()));
    let mut dispatcher = Dispatcher::new(4)
        .on_command(
            "/Start",
            Arc::new(RecordingCommandHandler {
                seen: registered.clone(),
            }),
        )
        .on_unknown_command(Arc::new(RecordingCommandHandler {
            seen: unknown.clone(),
        }));
    let mut completions = dispatcher.take_completions().unwrap();

    dispatcher.dispatch(text_update(3, "/start"));
    completions.recv().await.unwrap();

    assert!(registered.lock().unwrap().is_empty());
    assert_eq!(unknown.lock().unwrap()[0].name, "start");
}

/// **Test: an update routes to the handler registered for its payload kind.**
#[tokio::test]
async fn test_kind_routing() {
    let count = Arc::new(AtomicUsize::new(0));
    let mut dispatcher = Dispatcher::new(4).on_kind(
        UpdateKind::CallbackQuery,
        Arc::new(CountingUpdateHandler {
            count: count.clone(),
        }),
    );
    let mut completions = dispatcher.take_completions().unwrap();

    let update = Update {
        update_id: 4,
        callback_query: Some(Default::default()),
        ..Default::default()
    };
    dispatcher.dispatch(update);
    let outcome = completions.recv().await.unwrap();
    assert_eq!(outcome.route, "kind:callback_query");
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

/// **Test: a command message prefers the command handler over a registered
/// Message kind handler.**
#[tokio::test]
async fn test_command_precedence_over_kind() {
    let command_seen = Arc::new(Mutex::new(Vec::new()));
    let kind_count = Arc::new(AtomicUsize::new(0));
    let mut dispatcher = Dispatcher::new(4)
        .on_command(
            "/start",
            Arc::new(RecordingCommandHandler {
                seen: command_seen.clone(),
            }),
        )
        .on_kind(
            UpdateKind::Message,
            Arc::new(CountingUpdateHandler {
                count: kind_count.clone(),
            }),
        );
    let mut completions = dispatcher.take_completions().unwrap();

    dispatcher.dispatch(text_update(5, "/start"));
    completions.recv().await.unwrap();

    assert_eq!(command_seen.lock().unwrap().len(), 1);
    assert_eq!(kind_count.load(Ordering::SeqCst), 0);
}

/// **Test: a non-command message with no kind handler reaches the generic
/// fallback without an error.**
#[tokio::test]
async fn test_generic_fallback_for_unrouted_update() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut dispatcher =
        Dispatcher::new(4).on_fallback(Arc::new(RecordingFallback { seen: seen.clone() }));
    let mut completions = dispatcher.take_completions().unwrap();

    dispatcher.dispatch(text_update(6, "plain text"));
    let outcome = completions.recv().await.unwrap();
    assert_eq!(outcome.route, "fallback");

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0].0, 6);
    assert!(seen[0].1.is_none());
}

/// **Test: a source failure reaches the generic fallback exactly once, with
/// an empty update and a non-nil error.**
#[tokio::test]
async fn test_source_failure_surfaced_once() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut dispatcher =
        Dispatcher::new(4).on_fallback(Arc::new(RecordingFallback { seen: seen.clone() }));
    let mut completions = dispatcher.take_completions().unwrap();

    dispatcher.dispatch_error(Error::Transport("connection refused".to_string()));
    completions.recv().await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, 0);
    assert!(seen[0].1.as_deref().unwrap().contains("connection refused"));
}

/// **Test: a failing handler reports through the completion channel and does
/// not disturb later dispatches.**
#[tokio::test]
async fn test_handler_failure_is_contained() {
    struct FailingHandler;

    #[async_trait]
    impl CommandHandler for FailingHandler {
        async fn handle(&self, _message: Message, _command: Command) -> botwire_core::Result<()> {
            Err(Error::Handler("boom".to_string()))
        }
    }

    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut dispatcher = Dispatcher::new(4)
        .on_command("/boom", Arc::new(FailingHandler))
        .on_command(
            "/ok",
            Arc::new(RecordingCommandHandler { seen: seen.clone() }),
        );
    let mut completions = dispatcher.take_completions().unwrap();

    dispatcher.dispatch(text_update(7, "/boom"));
    let outcome = completions.recv().await.unwrap();
    assert!(outcome.result.is_err());

    dispatcher.dispatch(text_update(8, "/ok"));
    let outcome = completions.recv().await.unwrap();
    assert!(outcome.result.is_ok());
    assert_eq!(seen.lock().unwrap().len(), 1);
}
