//! Ranking and summary handlers.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{EntityStateDto, RankingParams, RankingResponse, SummaryResponse};
use crate::app_state::AppState;
use crate::error::RadarError;

/// `GET /ranking`: Best points-per-currency ratios on the latest date.
///
/// # Errors
///
/// Returns [`RadarError`] on internal failures.
#[utoipa::path(
    get,
    path = "/api/v1/ranking",
    tag = "Reports",
    summary = "Rank by ratio",
    description = "Returns current states ordered by points per currency unit, highest first. `flagged_only` restricts the ranking to keys with an active offer.",
    params(RankingParams),
    responses(
        (status = 200, description = "Ranking", body = RankingResponse),
    )
)]
pub async fn ranking(
    State(state): State<AppState>,
    Query(params): Query<RankingParams>,
) -> Result<impl IntoResponse, RadarError> {
    let limit = params.limit.unwrap_or(state.ranking_default_limit);
    let ranked = state.radar_service.ranking(limit, params.flagged_only).await;

    Ok(Json(RankingResponse {
        data: ranked.into_iter().map(EntityStateDto::from).collect(),
        limit,
    }))
}

/// `GET /summary`: Snapshot totals and day-over-day deltas.
///
/// # Errors
///
/// Returns [`RadarError`] on internal failures.
#[utoipa::path(
    get,
    path = "/api/v1/summary",
    tag = "Reports",
    summary = "Snapshot summary",
    description = "Returns totals for the latest snapshot date and, when a previous date exists, the deltas against it.",
    responses(
        (status = 200, description = "Summary", body = SummaryResponse),
    )
)]
pub async fn summary(State(state): State<AppState>) -> Result<impl IntoResponse, RadarError> {
    let summary = state.radar_service.summary().await;
    Ok(Json(SummaryResponse::from(summary)))
}

/// Report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/ranking", get(ranking))
        .route("/summary", get(summary))
}
