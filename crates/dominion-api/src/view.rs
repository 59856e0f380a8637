//! Retained telemetry view.

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dominion_core::traits::sink::RenderSink;
use dominion_core::types::session::SessionRecord;
use dominion_core::types::stats::{GeoBucket, SessionStatsSnapshot};
use dominion_telemetry::activity::ActivityWindow;
use dominion_telemetry::display::SessionRow;

/// One fully rendered telemetry view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryView {
    /// Summary counters for the filtered batch.
    pub stats: SessionStatsSnapshot,
    /// Ranked geo buckets.
    pub buckets: Vec<GeoBucket>,
    /// Projected session rows, newest first.
    pub rows: Vec<SessionRow>,
    /// When this view was rendered.
    pub refreshed_at: DateTime<Utc>,
}

/// The last successful render, shared between the refresh cycle and the
/// HTTP handlers.
///
/// Implements [`RenderSink`]: each render replaces the whole view under
/// one write lock, so readers never observe a partially applied cycle.
/// Failed cycles never reach this sink, which keeps the previous view
/// available.
#[derive(Debug)]
pub struct ViewState {
    window: ActivityWindow,
    latest: RwLock<Option<TelemetryView>>,
}

impl ViewState {
    /// Create an empty view holder.
    pub fn new(window: ActivityWindow) -> Self {
        Self {
            window,
            latest: RwLock::new(None),
        }
    }

    /// The last successful view, if any cycle has completed.
    pub fn latest(&self) -> Option<TelemetryView> {
        match self.latest.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl RenderSink for ViewState {
    fn render(
        &self,
        stats: &SessionStatsSnapshot,
        buckets: &[GeoBucket],
        records: &[SessionRecord],
    ) {
        let now = Utc::now();
        let view = TelemetryView {
            stats: *stats,
            buckets: buckets.to_vec(),
            rows: records
                .iter()
                .map(|r| SessionRow::from_record(r, now, self.window))
                .collect(),
            refreshed_at: now,
        };

        match self.latest.write() {
            Ok(mut guard) => *guard = Some(view),
            Err(poisoned) => *poisoned.into_inner() = Some(view),
        }
    }
}
