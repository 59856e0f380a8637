//! Response DTOs for the Dominion Admin API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dominion_core::types::stats::{GeoBucket, SessionStatsSnapshot};
use dominion_telemetry::display::SessionRow;

/// Standard success envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status string.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Whether the auto-refresh timer is running.
    pub auto_refresh: bool,
}

/// Session list payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionListResponse {
    /// Projected session rows, newest first.
    pub rows: Vec<SessionRow>,
    /// The filter token that produced this list.
    pub filter: String,
}

/// Telemetry view payload (stats + geo).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    /// Summary counters.
    pub stats: SessionStatsSnapshot,
    /// Ranked geo buckets.
    pub buckets: Vec<GeoBucket>,
    /// When the view was rendered.
    pub refreshed_at: DateTime<Utc>,
}

/// Geo aggregation payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoResponse {
    /// Ranked geo buckets.
    pub buckets: Vec<GeoBucket>,
}

/// Auto-refresh control payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoRefreshResponse {
    /// Whether the auto-refresh timer is running.
    pub running: bool,
    /// The active filter token.
    pub filter: String,
}
