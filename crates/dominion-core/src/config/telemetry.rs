//! Session telemetry configuration.

use serde::{Deserialize, Serialize};

/// Session telemetry settings.
///
/// Controls the activity window used to classify sessions as live, the
/// auto-refresh cadence, and the fetch/aggregation bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Minutes of inactivity after which a session is no longer live.
    #[serde(default = "default_activity_window")]
    pub activity_window_minutes: u64,
    /// Auto-refresh polling interval in seconds.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_seconds: u64,
    /// Maximum number of session records fetched per cycle.
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: u32,
    /// Fetch cap for geo aggregation, wider than the table cap so the
    /// country distribution is not skewed by recency.
    #[serde(default = "default_geo_fetch_limit")]
    pub geo_fetch_limit: u32,
    /// Number of geo buckets retained after aggregation.
    #[serde(default = "default_geo_top_n")]
    pub geo_top_n: usize,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            activity_window_minutes: default_activity_window(),
            refresh_interval_seconds: default_refresh_interval(),
            fetch_limit: default_fetch_limit(),
            geo_fetch_limit: default_geo_fetch_limit(),
            geo_top_n: default_geo_top_n(),
        }
    }
}

fn default_activity_window() -> u64 {
    15
}

fn default_refresh_interval() -> u64 {
    30
}

fn default_fetch_limit() -> u32 {
    100
}

fn default_geo_fetch_limit() -> u32 {
    1000
}

fn default_geo_top_n() -> usize {
    10
}
