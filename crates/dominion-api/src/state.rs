//! Application state shared across all handlers.

use std::sync::Arc;

use dominion_core::config::AppConfig;
use dominion_core::traits::source::SessionSource;
use dominion_telemetry::monitor::SessionMonitor;

use crate::view::ViewState;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Session data source (hosted backend)
    pub source: Arc<dyn SessionSource>,
    /// Telemetry monitor driving refresh cycles
    pub monitor: Arc<SessionMonitor>,
    /// Last successful telemetry view
    pub view: Arc<ViewState>,
}
