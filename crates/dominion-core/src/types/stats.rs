//! Derived telemetry types.
//!
//! Both types here are recomputed whole on every refresh cycle and never
//! persisted; batch sizes are capped, so incremental updates buy nothing.

use serde::{Deserialize, Serialize};

/// An aggregated count of sessions sharing a displayed country label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoBucket {
    /// Country display label (name, or code when no name is known).
    pub label: String,
    /// Number of sessions in this bucket.
    pub count: u64,
}

/// Summary counters derived from one filtered session batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionStatsSnapshot {
    /// Sessions classified as desktop Linux.
    pub linux_count: u64,
    /// Sessions classified as Termux (Android terminal).
    pub termux_count: u64,
    /// Sessions flagged as VPN connections.
    pub vpn_count: u64,
    /// Distinct non-null country codes observed.
    pub distinct_countries: u64,
    /// Sessions whose last activity falls within the live window.
    pub live_count: u64,
}
