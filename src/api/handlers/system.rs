//! System endpoints: health check and analysis configuration.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
    observations: usize,
}

/// `GET /health`: Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, current timestamp and the number of stored observations.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let observations = state.radar_service.observation_count().await;
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            observations,
        }),
    )
}

/// Active analysis thresholds.
#[derive(Debug, Serialize, ToSchema)]
pub struct AnalysisConfigResponse {
    novelty_threshold: usize,
    swing_threshold_pct: f64,
    ranking_default_limit: usize,
}

/// `GET /config/analysis`: Thresholds the analysis runs with.
#[utoipa::path(
    get,
    path = "/config/analysis",
    tag = "System",
    summary = "Analysis configuration",
    description = "Returns the novelty threshold, the large-swing percentage and the default ranking size.",
    responses(
        (status = 200, description = "Analysis configuration", body = AnalysisConfigResponse),
    )
)]
pub async fn analysis_config_handler(State(state): State<AppState>) -> impl IntoResponse {
    let config = state.radar_service.config();
    (
        StatusCode::OK,
        Json(AnalysisConfigResponse {
            novelty_threshold: config.novelty_threshold,
            swing_threshold_pct: config.swing_threshold_pct,
            ranking_default_limit: state.ranking_default_limit,
        }),
    )
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/analysis", get(analysis_config_handler))
}
