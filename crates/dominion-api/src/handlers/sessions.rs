//! Session telemetry handlers.

use axum::Json;
use axum::extract::{Query, State};
use chrono::Utc;
use serde::Deserialize;

use dominion_core::error::AppError;
use dominion_core::types::filter::FilterCriterion;
use dominion_telemetry::display::SessionRow;
use dominion_telemetry::filter::filter_sessions;
use dominion_telemetry::geo::aggregate_by_country;

use crate::dto::{
    ApiResponse, AutoRefreshResponse, GeoResponse, SessionListResponse, StatsResponse,
};
use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for the session list.
#[derive(Debug, Deserialize)]
pub struct SessionsQuery {
    /// Filter token (`all`, `today`, `week`, `vpn`).
    pub filter: Option<String>,
    /// Batch cap override.
    pub limit: Option<u32>,
}

/// Query parameters for geo aggregation.
#[derive(Debug, Deserialize)]
pub struct GeoQuery {
    /// Number of buckets to keep.
    pub top: Option<usize>,
}

/// Query parameters for auto-refresh start.
#[derive(Debug, Deserialize)]
pub struct AutoRefreshQuery {
    /// Filter token to poll with.
    pub filter: Option<String>,
}

fn parse_filter(token: Option<&str>) -> Result<FilterCriterion, AppError> {
    match token {
        Some(t) => t.parse(),
        None => Ok(FilterCriterion::All),
    }
}

/// GET /api/sessions
pub async fn list_sessions(
    State(state): State<AppState>,
    Query(query): Query<SessionsQuery>,
) -> Result<Json<ApiResponse<SessionListResponse>>, ApiError> {
    let criterion = parse_filter(query.filter.as_deref())?;
    let limit = query.limit.unwrap_or(state.config.telemetry.fetch_limit);

    let records = state.source.fetch_sessions(criterion, limit).await?;

    let now = Utc::now();
    let window = state.monitor.window();
    let rows = filter_sessions(&records, criterion, now)
        .iter()
        .map(|r| SessionRow::from_record(r, now, window))
        .collect();

    Ok(Json(ApiResponse::ok(SessionListResponse {
        rows,
        filter: criterion.as_str().to_string(),
    })))
}

/// GET /api/sessions/stats
///
/// Returns the last retained view; runs one refresh cycle first when no
/// cycle has completed yet.
pub async fn session_stats(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<StatsResponse>>, ApiError> {
    if state.view.latest().is_none() {
        state.monitor.refresh_current().await?;
    }

    let view = state
        .view
        .latest()
        .ok_or_else(|| AppError::internal("No telemetry view after refresh"))?;

    Ok(Json(ApiResponse::ok(StatsResponse {
        stats: view.stats,
        buckets: view.buckets,
        refreshed_at: view.refreshed_at,
    })))
}

/// GET /api/sessions/geo
///
/// Fetches with the wider `geo_fetch_limit` cap so the distribution
/// reflects more than the most recent table page.
pub async fn session_geo(
    State(state): State<AppState>,
    Query(query): Query<GeoQuery>,
) -> Result<Json<ApiResponse<GeoResponse>>, ApiError> {
    let top_n = query.top.unwrap_or(state.config.telemetry.geo_top_n);
    let records = state
        .source
        .fetch_sessions(FilterCriterion::All, state.config.telemetry.geo_fetch_limit)
        .await?;

    Ok(Json(ApiResponse::ok(GeoResponse {
        buckets: aggregate_by_country(&records, top_n),
    })))
}

/// POST /api/sessions/refresh
///
/// Manual refresh with the last-used filter, like the console's refresh
/// button.
pub async fn refresh(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<StatsResponse>>, ApiError> {
    state.monitor.refresh_current().await?;

    let view = state
        .view
        .latest()
        .ok_or_else(|| AppError::internal("No telemetry view after refresh"))?;

    Ok(Json(ApiResponse::ok(StatsResponse {
        stats: view.stats,
        buckets: view.buckets,
        refreshed_at: view.refreshed_at,
    })))
}

/// POST /api/sessions/autorefresh/start
pub async fn autorefresh_start(
    State(state): State<AppState>,
    Query(query): Query<AutoRefreshQuery>,
) -> Result<Json<ApiResponse<AutoRefreshResponse>>, ApiError> {
    let criterion = parse_filter(query.filter.as_deref())?;
    state.monitor.start_auto_refresh(criterion).await;

    Ok(Json(ApiResponse::ok(AutoRefreshResponse {
        running: true,
        filter: criterion.as_str().to_string(),
    })))
}

/// POST /api/sessions/autorefresh/stop
pub async fn autorefresh_stop(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<AutoRefreshResponse>>, ApiError> {
    state.monitor.stop_auto_refresh().await;
    let filter = state.monitor.active_filter().await;

    Ok(Json(ApiResponse::ok(AutoRefreshResponse {
        running: false,
        filter: filter.as_str().to_string(),
    })))
}
