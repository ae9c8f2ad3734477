//! Polling update source: cursor tracking and the fetch-dispatch loop.

use std::sync::Arc;
use std::time::Duration;

use botwire_core::{Error, Result};
use botwire_dispatch::Dispatcher;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::api::GetUpdates;
use crate::bot::Bot;
use crate::config::BotConfig;

/// Monotonic update cursor: always one past the highest identifier ever
/// observed, so acknowledged updates are never re-delivered.
#[derive(Debug, Clone, Copy)]
pub struct Cursor(i64);

impl Cursor {
    pub fn new(start: i64) -> Self {
        Cursor(start)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Advances past `update_id` if it is at or beyond the cursor.
    /// Never decreases.
    pub fn advance(&mut self, update_id: i64) {
        if update_id >= self.0 {
            self.0 = update_id + 1;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PollerState {
    Idle,
    Running,
    Stopped,
}

/// Cooperative stop signal for a running [`Poller`]. Observed once per
/// iteration; an in-flight fetch or interval sleep finishes first.
pub struct StopHandle {
    tx: watch::Sender<bool>,
}

impl StopHandle {
    pub fn stop(&self) {
        let _ = self.tx.send(true);
    }
}

/// Polling update source. One logical thread of control owns the cursor;
/// dispatched handlers never touch it.
///
/// Lifecycle is `Idle → Running → Stopped`, `Stopped` terminal: a new
/// session resumes by constructing a new poller with the remembered
/// [`Poller::cursor`] value as its initial offset.
pub struct Poller {
    bot: Arc<Bot>,
    dispatcher: Arc<Dispatcher>,
    interval: Duration,
    allowed_updates: Vec<String>,
    cursor: Cursor,
    state: PollerState,
    stop: watch::Receiver<bool>,
}

impl Poller {
    pub fn new(
        bot: Arc<Bot>,
        dispatcher: Arc<Dispatcher>,
        interval: Duration,
        initial_offset: i64,
        allowed_updates: Vec<String>,
    ) -> (Self, StopHandle) {
        let (tx, rx) = watch::channel(false);
        (
            Self {
                bot,
                dispatcher,
                interval,
                allowed_updates,
                cursor: Cursor::new(initial_offset),
                state: PollerState::Idle,
                stop: rx,
            },
            StopHandle { tx },
        )
    }

    /// Poller configured from a [`BotConfig`].
    pub fn from_config(
        bot: Arc<Bot>,
        dispatcher: Arc<Dispatcher>,
        config: &BotConfig,
    ) -> (Self, StopHandle) {
        Self::new(
            bot,
            dispatcher,
            Duration::from_secs(config.poll_interval_secs),
            config.initial_offset,
            config.allowed_updates.clone(),
        )
    }

    /// Current cursor value; still readable after the loop stops, for
    /// resuming in a later session.
    pub fn cursor(&self) -> i64 {
        self.cursor.value()
    }

    /// One fetch-and-dispatch pass. On success the cursor advances past
    /// every update in the batch before the next fetch can happen; each
    /// update is dispatched fire-and-forget, in batch order but without
    /// waiting on prior dispatches. On failure the cursor is untouched and
    /// the error reaches the generic handler exactly once.
    pub async fn poll_once(&mut self) {
        let request = GetUpdates::new(self.cursor.value())
            .allowed_updates(self.allowed_updates.clone());
        match self.bot.get_updates(request).await {
            Ok(updates) => {
                for update in updates {
                    self.cursor.advance(update.update_id);
                    self.dispatcher.dispatch(update);
                }
            }
            Err(err) => {
                warn!(error = %err, offset = self.cursor.value(), "Update fetch failed");
                self.dispatcher.dispatch_error(err);
            }
        }
    }

    /// Runs the polling loop until the stop signal is observed. Valid only
    /// from `Idle`.
    pub async fn run(&mut self) -> Result<()> {
        if self.state != PollerState::Idle {
            return Err(Error::Config(
                "poller can only be started once, from idle".to_string(),
            ));
        }
        self.state = PollerState::Running;
        info!(offset = self.cursor.value(), "Polling started");

        loop {
            if *self.stop.borrow() {
                break;
            }
            self.poll_once().await;
            tokio::time::sleep(self.interval).await;
        }

        self.state = PollerState::Stopped;
        info!(offset = self.cursor.value(), "Polling stopped");
        Ok(())
    }
}
