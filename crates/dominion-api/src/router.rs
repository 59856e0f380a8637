//! Route definitions for the Dominion Admin HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState`
//! and passes it to all handlers via Axum's `State` extractor.

use axum::http::HeaderValue;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use dominion_core::config::server::ServerConfig;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(session_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state.config.server);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Session telemetry endpoints
fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/sessions", get(handlers::sessions::list_sessions))
        .route("/sessions/stats", get(handlers::sessions::session_stats))
        .route("/sessions/geo", get(handlers::sessions::session_geo))
        .route("/sessions/refresh", post(handlers::sessions::refresh))
        .route(
            "/sessions/autorefresh/start",
            post(handlers::sessions::autorefresh_start),
        )
        .route(
            "/sessions/autorefresh/stop",
            post(handlers::sessions::autorefresh_stop),
        )
}

/// Health endpoints
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Build CORS layer from configuration
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    cors
}
