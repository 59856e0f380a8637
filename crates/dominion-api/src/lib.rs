//! # dominion-api
//!
//! HTTP API layer for Dominion Admin. Exposes the session telemetry
//! view over JSON: session rows, derived stats, geo buckets, manual
//! refresh, and auto-refresh control.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
pub mod view;

pub use router::build_router;
pub use state::AppState;
pub use view::ViewState;
