//! # dominion-telemetry
//!
//! Session telemetry core for Dominion Admin. Provides:
//!
//! - Activity-window classification of live sessions
//! - Country/geo aggregation into ranked buckets
//! - Multi-criteria session filtering
//! - Single-pass session stats reduction
//! - A cancellable, restartable auto-refresh polling controller
//! - The session monitor driving the fetch → filter → aggregate →
//!   reduce → render cycle
//! - Display-row projection for the admin session table

pub mod activity;
pub mod display;
pub mod filter;
pub mod geo;
pub mod monitor;
pub mod poller;
pub mod stats;

pub use activity::ActivityWindow;
pub use monitor::SessionMonitor;
pub use poller::PollingController;
