//! Session monitor — drives the fetch → filter → aggregate → reduce →
//! render cycle and owns the auto-refresh timer.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;

use dominion_core::config::telemetry::TelemetryConfig;
use dominion_core::result::AppResult;
use dominion_core::traits::sink::RenderSink;
use dominion_core::traits::source::SessionSource;
use dominion_core::types::filter::FilterCriterion;

use crate::activity::ActivityWindow;
use crate::filter::filter_sessions;
use crate::geo::aggregate_by_country;
use crate::poller::PollingController;
use crate::stats::compute_stats;

/// Orchestrates session telemetry refresh cycles.
///
/// The monitor is the only holder of mutable state (the timer and the
/// last-used filter); the classification, aggregation, and reduction
/// stages it calls are pure. Fetch failures stop at [`Self::refresh_cycle`]:
/// the sink is left untouched, so the previous successful view stays
/// visible, and an auto-refresh schedule keeps running.
pub struct SessionMonitor {
    source: Arc<dyn SessionSource>,
    sink: Arc<dyn RenderSink>,
    config: TelemetryConfig,
    window: ActivityWindow,
    poller: Mutex<PollingController>,
    active_filter: Mutex<FilterCriterion>,
}

impl std::fmt::Debug for SessionMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionMonitor")
            .field("config", &self.config)
            .finish()
    }
}

impl SessionMonitor {
    /// Create a monitor in the stopped state.
    pub fn new(
        source: Arc<dyn SessionSource>,
        sink: Arc<dyn RenderSink>,
        config: TelemetryConfig,
    ) -> Self {
        let window = ActivityWindow::from_config(&config);
        Self {
            source,
            sink,
            config,
            window,
            poller: Mutex::new(PollingController::new()),
            active_filter: Mutex::new(FilterCriterion::All),
        }
    }

    /// The configured activity window.
    pub fn window(&self) -> ActivityWindow {
        self.window
    }

    /// Run one refresh cycle: fetch, filter, aggregate, reduce, render,
    /// in that order. Remembers `criterion` as the active filter.
    ///
    /// A data-source failure propagates to the caller without touching
    /// the sink; the pure stages never observe it.
    pub async fn refresh_cycle(&self, criterion: FilterCriterion) -> AppResult<()> {
        *self.active_filter.lock().await = criterion;

        let records = self
            .source
            .fetch_sessions(criterion, self.config.fetch_limit)
            .await?;

        let now = Utc::now();
        let filtered = filter_sessions(&records, criterion, now);
        let buckets = aggregate_by_country(&filtered, self.config.geo_top_n);
        let stats = compute_stats(&filtered, now, self.window);

        tracing::debug!(
            filter = %criterion,
            fetched = records.len(),
            kept = filtered.len(),
            live = stats.live_count,
            "Refresh cycle complete"
        );

        self.sink.render(&stats, &buckets, &filtered);
        Ok(())
    }

    /// Re-run the cycle with the last-used filter.
    pub async fn refresh_current(&self) -> AppResult<()> {
        let criterion = *self.active_filter.lock().await;
        self.refresh_cycle(criterion).await
    }

    /// The currently active filter criterion.
    pub async fn active_filter(&self) -> FilterCriterion {
        *self.active_filter.lock().await
    }

    /// Start auto-refreshing with the configured interval. Restarting
    /// with a new criterion replaces the running timer.
    pub async fn start_auto_refresh(self: &Arc<Self>, criterion: FilterCriterion) {
        *self.active_filter.lock().await = criterion;

        let interval = Duration::from_secs(self.config.refresh_interval_seconds);
        let monitor = Arc::clone(self);

        self.poller.lock().await.start(interval, move || {
            let monitor = Arc::clone(&monitor);
            async move { monitor.refresh_current().await }
        });

        tracing::info!(filter = %criterion, interval_seconds = interval.as_secs(), "Auto-refresh started");
    }

    /// Stop auto-refreshing. Idempotent; an in-flight cycle is not
    /// aborted.
    pub async fn stop_auto_refresh(&self) {
        self.poller.lock().await.stop();
        tracing::info!("Auto-refresh stopped");
    }

    /// Whether the auto-refresh timer is running.
    pub async fn is_auto_refreshing(&self) -> bool {
        self.poller.lock().await.is_running()
    }
}
