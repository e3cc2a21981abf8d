//! Change event DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{ChangeEvent, ChangeKind, EntityKey, SubscriberPreferences};
use crate::error::RadarError;

/// One day-over-day change.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChangeEventDto {
    /// Change kind (`new_entity`, `appeared_again`, `gained_flag`,
    /// `lost_flag`, `large_swing`, `disappeared`).
    pub kind: String,
    /// Entity (partner) name.
    pub entity_id: String,
    /// Currency code.
    pub currency: String,
    /// Today's quantity; absent when the key disappeared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_quantity: Option<f64>,
    /// Yesterday's quantity; absent for arrivals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_quantity: Option<f64>,
    /// Signed percent change; only for `large_swing`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variation_percent: Option<f64>,
    /// Offer flag carried by the event.
    pub has_flag: bool,
}

impl From<&ChangeEvent> for ChangeEventDto {
    fn from(event: &ChangeEvent) -> Self {
        let key = event.key();
        Self {
            kind: event.kind().as_str().to_string(),
            entity_id: key.entity_id.clone(),
            currency: key.currency.clone(),
            current_quantity: event.current_quantity(),
            previous_quantity: event.previous_quantity(),
            variation_percent: event.variation_percent(),
            has_flag: event.has_flag(),
        }
    }
}

/// Query parameters for `GET /changes`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ChangeQuery {
    /// Restrict to one change kind.
    #[serde(default)]
    pub kind: Option<String>,
}

/// Response body for change listings.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChangeListResponse {
    /// Events ordered by entity then currency.
    pub data: Vec<ChangeEventDto>,
    /// Number of events.
    pub total: usize,
}

/// Request body for `POST /changes/filter`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SubscriberFilterRequest {
    /// Favorite keys in `entity|currency` form.
    #[serde(default)]
    pub favorites: Vec<String>,
    /// Change kinds to receive. Empty means offers starting only.
    #[serde(default)]
    pub kinds: Vec<String>,
    /// Follow every entity instead of favorites only.
    #[serde(default)]
    pub all_entities: bool,
}

impl TryFrom<SubscriberFilterRequest> for SubscriberPreferences {
    type Error = RadarError;

    fn try_from(req: SubscriberFilterRequest) -> Result<Self, Self::Error> {
        let favorites = req
            .favorites
            .iter()
            .map(|s| s.parse::<EntityKey>())
            .collect::<Result<Vec<_>, _>>()?;
        let kinds = req
            .kinds
            .iter()
            .map(|s| s.parse::<ChangeKind>())
            .collect::<Result<Vec<_>, _>>()?;

        let mut preferences = Self::new();
        preferences.follow(&favorites, req.all_entities);
        for kind in kinds {
            preferences.notify_on(kind);
        }
        Ok(preferences)
    }
}
