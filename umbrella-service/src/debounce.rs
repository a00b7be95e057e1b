use std::future::Future;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::debug;

struct Pending {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Runs a task once input has been quiet for a fixed interval.
///
/// Scheduling again cancels the pending task, including one that already
/// started running, so a stale run never completes after a newer schedule.
pub struct Debouncer {
    quiet: Duration,
    pending: Mutex<Option<Pending>>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: Mutex::new(None),
        }
    }

    pub async fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut pending = self.pending.lock().await;
        if let Some(previous) = pending.take() {
            debug!("Rescheduling debounced task");
            previous.token.cancel();
        }

        let token = CancellationToken::new();
        let cancel = token.clone();
        let deadline = Instant::now() + self.quiet;

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = tokio::time::sleep_until(deadline) => {
                    tokio::select! {
                        _ = cancel.cancelled() => {}
                        _ = task => {}
                    }
                }
            }
        });

        *pending = Some(Pending { token, handle });
    }

    /// Drop the pending task, if any. Returns whether one was cancelled.
    pub async fn cancel(&self) -> bool {
        match self.pending.lock().await.take() {
            Some(previous) if !previous.handle.is_finished() => {
                previous.token.cancel();
                true
            }
            _ => false,
        }
    }

    pub async fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .await
            .as_ref()
            .is_some_and(|p| !p.handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(previous) = self.pending.get_mut().take() {
            previous.token.cancel();
        }
    }
}
