//! REST API layer: route handlers, DTOs, router composition and the
//! OpenAPI document.
//!
//! Resource endpoints are mounted under `/api/v1`; system endpoints live
//! at the root.

pub mod dto;
pub mod handlers;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI document covering every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "rewards-radar",
        description = "Streak and day-over-day change analysis over loyalty-program partner snapshots."
    ),
    paths(
        handlers::observations::ingest_observations,
        handlers::states::list_states,
        handlers::states::get_state,
        handlers::changes::list_changes,
        handlers::changes::filter_changes,
        handlers::reports::ranking,
        handlers::reports::summary,
        handlers::system::health_handler,
        handlers::system::analysis_config_handler,
    ),
    components(schemas(
        dto::ObservationDto,
        dto::IngestRequest,
        dto::IngestResponse,
        dto::EntityStateDto,
        dto::StateListResponse,
        dto::PaginationMeta,
        dto::ChangeEventDto,
        dto::ChangeListResponse,
        dto::SubscriberFilterRequest,
        dto::RankingResponse,
        dto::SummaryResponse,
        handlers::system::HealthResponse,
        handlers::system::AnalysisConfigResponse,
        crate::error::ErrorResponse,
    )),
    tags(
        (name = "Observations", description = "Snapshot ingestion"),
        (name = "States", description = "Current state per entity and currency"),
        (name = "Changes", description = "Day-over-day change detection"),
        (name = "Reports", description = "Ranking and summary"),
        (name = "System", description = "Health and configuration"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes())
}
