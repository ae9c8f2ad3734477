//! Bounded fire-and-forget execution for handler tasks.
//!
//! Dispatching never blocks the caller; concurrency is capped by a semaphore
//! so a large update batch cannot create unbounded in-flight work. Each task
//! reports its outcome on a completion channel.

use std::future::Future;
use std::sync::Arc;

use botwire_core::Result;
use tokio::sync::{mpsc, Semaphore};
use tracing::error;

/// Outcome of one dispatched handler task.
#[derive(Debug)]
pub struct DispatchOutcome {
    /// Route label, e.g. `command:/start`, `kind:callback_query`, `fallback`.
    pub route: String,
    pub result: Result<()>,
}

/// Spawns handler futures with a concurrency cap and publishes completions.
#[derive(Clone)]
pub struct DispatchPool {
    semaphore: Arc<Semaphore>,
    completions: mpsc::UnboundedSender<DispatchOutcome>,
}

impl DispatchPool {
    /// Creates a pool allowing at most `limit` concurrently running handlers.
    /// The receiver yields one [`DispatchOutcome`] per spawned task.
    pub fn new(limit: usize) -> (Self, mpsc::UnboundedReceiver<DispatchOutcome>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                semaphore: Arc::new(Semaphore::new(limit)),
                completions: tx,
            },
            rx,
        )
    }

    /// Spawns a handler future. Returns immediately; the task waits for a
    /// semaphore permit before running, so callers are never throttled but
    /// running handlers are.
    pub fn spawn<F>(&self, route: String, fut: F)
    where
        F: Future<Output = Result<()>> + Send + 'static,
    {
        let semaphore = Arc::clone(&self.semaphore);
        let completions = self.completions.clone();
        tokio::spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => return,
            };
            let result = fut.await;
            if let Err(ref e) = result {
                error!(route = %route, error = %e, "Handler failed");
            }
            let _ = completions.send(DispatchOutcome { route, result });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Concurrency never exceeds the configured limit even when many tasks
    /// are spawned at once.
    #[tokio::test]
    async fn test_pool_respects_limit() {
        let (pool, mut completions) = DispatchPool::new(2);
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        for i in 0..8 {
            let running = running.clone();
            let peak = peak.clone();
            pool.spawn(format!("task:{}", i), async move {
                let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(10)).await;
                running.fetch_sub(1, Ordering::SeqCst);
                Ok(())
            });
        }

        for _ in 0..8 {
            completions.recv().await.unwrap();
        }
        assert!(peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_pool_reports_handler_error() {
        let (pool, mut completions) = DispatchPool::new(1);
        pool.spawn("task:boom".to_string(), async {
            Err(botwire_core::Error::Handler("boom".to_string()))
        });
        let outcome = completions.recv().await.unwrap();
        assert_eq!(outcome.route, "task:boom");
        assert!(outcome.result.is_err());
    }
}
