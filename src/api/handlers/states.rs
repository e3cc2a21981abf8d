//! Current state handlers: list and per-key detail.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{EntityStateDto, PaginationParams, StateListResponse};
use crate::app_state::AppState;
use crate::domain::EntityKey;
use crate::error::{ErrorResponse, RadarError};

/// `GET /states`: Current state of every key on the latest date.
///
/// # Errors
///
/// Returns [`RadarError`] on internal failures.
#[utoipa::path(
    get,
    path = "/api/v1/states",
    tag = "States",
    summary = "List current states",
    description = "Returns a paginated list of every entity/currency key active on the latest snapshot date, with streak statistics and novelty classification.",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated state list", body = StateListResponse),
    )
)]
pub async fn list_states(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, RadarError> {
    let states = state.radar_service.current_states().await;
    let (page, pagination) = params.paginate(states);

    Ok(Json(StateListResponse {
        data: page.into_iter().map(EntityStateDto::from).collect(),
        pagination,
    }))
}

/// `GET /states/{entity_id}/{currency}`: Current state of one key.
///
/// # Errors
///
/// Returns [`RadarError::EntityNotFound`] if the key is not active on the
/// latest date, or [`RadarError::EmptyStore`] before any ingestion.
#[utoipa::path(
    get,
    path = "/api/v1/states/{entity_id}/{currency}",
    tag = "States",
    summary = "Get one current state",
    description = "Returns the current state of a single entity/currency key on the latest snapshot date.",
    params(
        ("entity_id" = String, Path, description = "Entity (partner) name"),
        ("currency" = String, Path, description = "Currency code"),
    ),
    responses(
        (status = 200, description = "Current state", body = EntityStateDto),
        (status = 404, description = "Key not active on the latest date", body = ErrorResponse),
    )
)]
pub async fn get_state(
    State(state): State<AppState>,
    Path((entity_id, currency)): Path<(String, String)>,
) -> Result<impl IntoResponse, RadarError> {
    let key = EntityKey::new(entity_id, currency);
    let current = state.radar_service.entity_state(&key).await?;
    Ok(Json(EntityStateDto::from(current)))
}

/// Current state routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/states", get(list_states))
        .route("/states/{entity_id}/{currency}", get(get_state))
}
