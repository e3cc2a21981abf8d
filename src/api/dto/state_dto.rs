//! Current state DTOs for list, detail and ranking endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::common_dto::PaginationMeta;
use crate::domain::EntityState;

/// Current state of one entity key.
#[derive(Debug, Serialize, ToSchema)]
pub struct EntityStateDto {
    /// Entity (partner) name.
    pub entity_id: String,
    /// Currency code.
    pub currency: String,
    /// Quantity on the latest date.
    pub current_quantity: f64,
    /// Currency units the quantity refers to.
    pub unit_value: f64,
    /// Points per currency unit.
    pub ratio: f64,
    /// Unit value formatted for display.
    pub display_value: String,
    /// Offer flag on the latest date.
    pub has_flag: bool,
    /// Consecutive days at the current quantity.
    pub days_at_current_quantity: u32,
    /// Most recent differing quantity.
    pub previous_quantity: Option<f64>,
    /// Days since the previous quantity was observed.
    pub days_since_change: u32,
    /// Signed percent change from the previous quantity.
    pub variation_percent: f64,
    /// Whether the entity is rarely observed.
    pub is_new: bool,
    /// Lifetime number of observations of the entity.
    pub occurrences: usize,
}

impl From<EntityState> for EntityStateDto {
    fn from(state: EntityState) -> Self {
        Self {
            entity_id: state.entity_id,
            currency: state.currency,
            current_quantity: state.current_quantity,
            unit_value: state.unit_value,
            ratio: state.ratio,
            display_value: state.display_value,
            has_flag: state.has_flag,
            days_at_current_quantity: state.days_at_current_quantity,
            previous_quantity: state.previous_quantity,
            days_since_change: state.days_since_change,
            variation_percent: state.variation_percent,
            is_new: state.is_new,
            occurrences: state.occurrences,
        }
    }
}

/// Paginated list response for `GET /states`.
#[derive(Debug, Serialize, ToSchema)]
pub struct StateListResponse {
    /// Page of states, ordered by entity then currency.
    pub data: Vec<EntityStateDto>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}

/// Query parameters for `GET /ranking`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RankingParams {
    /// Number of entries to return. Defaults to the configured limit.
    #[serde(default)]
    pub limit: Option<usize>,
    /// Only rank keys with an active offer.
    #[serde(default)]
    pub flagged_only: bool,
}

/// Response body for `GET /ranking`.
#[derive(Debug, Serialize, ToSchema)]
pub struct RankingResponse {
    /// States ordered by ratio, highest first.
    pub data: Vec<EntityStateDto>,
    /// Limit that was applied.
    pub limit: usize,
}
