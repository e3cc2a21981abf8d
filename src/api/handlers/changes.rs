//! Day-over-day change handlers.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    ChangeEventDto, ChangeListResponse, ChangeQuery, SubscriberFilterRequest,
};
use crate::app_state::AppState;
use crate::domain::{ChangeEvent, ChangeKind, SubscriberPreferences};
use crate::error::{ErrorResponse, RadarError};

fn to_response(events: &[ChangeEvent]) -> ChangeListResponse {
    ChangeListResponse {
        data: events.iter().map(ChangeEventDto::from).collect(),
        total: events.len(),
    }
}

/// `GET /changes`: Changes between the two most recent dates.
///
/// # Errors
///
/// Returns [`RadarError::InvalidChangeKind`] for an unknown `kind` filter.
#[utoipa::path(
    get,
    path = "/api/v1/changes",
    tag = "Changes",
    summary = "List day-over-day changes",
    description = "Compares the two most recent snapshot dates and lists arrivals, disappearances, offer transitions and large swings. Empty when fewer than two dates exist.",
    params(ChangeQuery),
    responses(
        (status = 200, description = "Change list", body = ChangeListResponse),
        (status = 400, description = "Unknown change kind", body = ErrorResponse),
    )
)]
pub async fn list_changes(
    State(state): State<AppState>,
    Query(query): Query<ChangeQuery>,
) -> Result<impl IntoResponse, RadarError> {
    let kind = query
        .kind
        .as_deref()
        .map(str::parse::<ChangeKind>)
        .transpose()?;
    let events = state.radar_service.changes(kind).await;
    Ok(Json(to_response(&events)))
}

/// `POST /changes/filter`: Changes a subscriber would be notified about.
///
/// # Errors
///
/// Returns [`RadarError`] when a favorite key or change kind cannot be parsed.
#[utoipa::path(
    post,
    path = "/api/v1/changes/filter",
    tag = "Changes",
    summary = "Filter changes for a subscriber",
    description = "Applies subscriber preferences (favorite keys, change kinds, follow-all) to the latest day-over-day changes. With no kinds given, only offers starting are delivered.",
    request_body = SubscriberFilterRequest,
    responses(
        (status = 200, description = "Matching changes", body = ChangeListResponse),
        (status = 400, description = "Malformed key or change kind", body = ErrorResponse),
    )
)]
pub async fn filter_changes(
    State(state): State<AppState>,
    Json(req): Json<SubscriberFilterRequest>,
) -> Result<impl IntoResponse, RadarError> {
    let preferences = SubscriberPreferences::try_from(req)?;
    let events = state.radar_service.changes_for(&preferences).await;
    Ok(Json(to_response(&events)))
}

/// Change routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/changes", get(list_changes))
        .route("/changes/filter", post(filter_changes))
}
