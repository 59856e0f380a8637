//! Activity-window classification of live sessions.

use chrono::{DateTime, Duration, Utc};

use dominion_core::config::telemetry::TelemetryConfig;
use dominion_core::types::session::SessionRecord;

/// A duration threshold defining "live": a session is live iff its last
/// observed activity is strictly more recent than the window.
///
/// The window is injected from configuration (canonically 15 minutes),
/// never hard-coded at call sites, so tests can use synthetic windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityWindow(Duration);

impl ActivityWindow {
    /// Create a window spanning the given number of minutes.
    pub fn from_minutes(minutes: i64) -> Self {
        Self(Duration::minutes(minutes))
    }

    /// The configured window from telemetry settings.
    pub fn from_config(config: &TelemetryConfig) -> Self {
        Self::from_minutes(config.activity_window_minutes as i64)
    }

    /// The underlying duration.
    pub fn duration(&self) -> Duration {
        self.0
    }

    /// Whether an activity timestamp falls inside the window.
    ///
    /// True iff `now - last_activity < window`, strictly: a session whose
    /// last activity is exactly one window old is not live.
    pub fn is_live(&self, last_activity: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now - last_activity < self.0
    }

    /// Whether a possibly-absent activity timestamp falls inside the
    /// window. An absent timestamp is not-live, never an error.
    pub fn is_live_opt(&self, last_activity: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        match last_activity {
            Some(ts) => self.is_live(ts, now),
            None => false,
        }
    }

    /// Whether a session record is live, using the last observed activity
    /// and falling back to the session start when no activity has been
    /// recorded. An idle-but-present session counts as live only if it
    /// was created recently.
    pub fn record_is_live(&self, record: &SessionRecord, now: DateTime<Utc>) -> bool {
        self.is_live(record.effective_activity(), now)
    }
}

impl Default for ActivityWindow {
    /// The canonical 15-minute live window.
    fn default() -> Self {
        Self::from_minutes(15)
    }
}
