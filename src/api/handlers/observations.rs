//! Ingestion handler: append a batch of snapshot rows.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{IngestRequest, IngestResponse};
use crate::app_state::AppState;
use crate::domain::RawObservation;
use crate::error::{ErrorResponse, RadarError};

/// `POST /observations`: Append snapshot rows to the store.
///
/// # Errors
///
/// Returns [`RadarError::InvalidRequest`] when the batch is empty.
#[utoipa::path(
    post,
    path = "/api/v1/observations",
    tag = "Observations",
    summary = "Ingest snapshot rows",
    description = "Appends a batch of scraped rows. Rows with unreadable numbers or missing names are rejected individually and reported; the rest are stored.",
    request_body = IngestRequest,
    responses(
        (status = 201, description = "Batch processed", body = IngestResponse),
        (status = 400, description = "Empty or malformed batch", body = ErrorResponse),
    )
)]
pub async fn ingest_observations(
    State(state): State<AppState>,
    Json(req): Json<IngestRequest>,
) -> Result<impl IntoResponse, RadarError> {
    let rows: Vec<RawObservation> = req.observations.into_iter().map(Into::into).collect();
    let report = state.radar_service.ingest(rows).await?;
    let total_observations = state.radar_service.observation_count().await;

    let response = IngestResponse {
        accepted: report.accepted,
        rejected: report.rejected.len(),
        rejections: report.rejected,
        total_observations,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Ingestion routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/observations", post(ingest_observations))
}
