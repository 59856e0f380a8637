//! Cancellable, restartable periodic-refresh timer.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use dominion_core::result::AppResult;

/// A fixed-cadence polling timer with `Stopped`/`Running` states.
///
/// At most one live timer exists per controller instance; restarting
/// cancels the previous timer first. Each tick's work is spawned
/// fire-and-forget, so a slow cycle never delays the next tick and a
/// failed cycle never cancels the schedule.
#[derive(Debug, Default)]
pub struct PollingController {
    handle: Option<JoinHandle<()>>,
}

impl PollingController {
    /// Create a controller in the `Stopped` state.
    pub fn new() -> Self {
        Self { handle: None }
    }

    /// Whether the timer is currently running.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Start the timer, cancelling any existing one first (idempotent
    /// restart). The first invocation of `task` occurs one full `period`
    /// after this call; there is no eager call on start.
    pub fn start<F, Fut>(&mut self, period: Duration, mut task: F)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = AppResult<()>> + Send + 'static,
    {
        self.stop();

        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                let cycle = task();
                tokio::spawn(async move {
                    if let Err(e) = cycle.await {
                        tracing::warn!("Refresh cycle failed, schedule continues: {}", e);
                    }
                });
            }
        });

        self.handle = Some(handle);
    }

    /// Stop the timer. Prevents all future scheduled invocations but does
    /// not abort an already-in-flight cycle. Idempotent.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for PollingController {
    fn drop(&mut self) {
        self.stop();
    }
}
