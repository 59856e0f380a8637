//! Dominion Admin Server — session telemetry for the CLI product's
//! admin console.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use dominion_api::state::AppState;
use dominion_api::view::ViewState;
use dominion_backend::rest::RestSessionSource;
use dominion_core::config::AppConfig;
use dominion_core::error::AppError;
use dominion_core::traits::source::SessionSource;
use dominion_core::types::filter::FilterCriterion;
use dominion_telemetry::activity::ActivityWindow;
use dominion_telemetry::monitor::SessionMonitor;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("DOMINION_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Dominion Admin v{}", env!("CARGO_PKG_VERSION"));

    let config = Arc::new(config);

    // ── Step 1: Session backend client ───────────────────────────
    tracing::info!("Connecting to session backend at {}", config.backend.url);
    let source: Arc<dyn SessionSource> = Arc::new(RestSessionSource::new(&config.backend)?);

    // ── Step 2: Telemetry view + monitor ─────────────────────────
    let window = ActivityWindow::from_config(&config.telemetry);
    let view = Arc::new(ViewState::new(window));
    let monitor = Arc::new(SessionMonitor::new(
        Arc::clone(&source),
        Arc::clone(&view) as Arc<dyn dominion_core::traits::sink::RenderSink>,
        config.telemetry.clone(),
    ));

    // ── Step 3: Auto-refresh ─────────────────────────────────────
    monitor.start_auto_refresh(FilterCriterion::All).await;

    // ── Step 4: HTTP server ──────────────────────────────────────
    let state = AppState {
        config: Arc::clone(&config),
        source,
        monitor: Arc::clone(&monitor),
        view,
    };
    let app = dominion_api::router::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Dominion Admin server listening on {}", addr);

    // ── Step 5: Graceful shutdown ────────────────────────────────
    let server = axum::serve(listener, app).with_graceful_shutdown(async {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    monitor.stop_auto_refresh().await;

    tracing::info!("Dominion Admin server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
