//! Ingestion DTOs.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::RawObservation;

/// One snapshot row as sent by the scraper.
///
/// Numeric fields and the flag are accepted loosely (numbers, numeric
/// strings, `"Sim"`/`"Não"`); rows that cannot be read are rejected
/// individually.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ObservationDto {
    /// Entity (partner) name.
    pub entity_id: String,
    /// Scrape time, ISO-8601 without offset.
    pub timestamp: NaiveDateTime,
    /// Currency code.
    pub currency: String,
    /// Offer flag.
    #[serde(default)]
    pub has_flag: serde_json::Value,
    /// Reward points.
    #[serde(default)]
    pub quantity: serde_json::Value,
    /// Currency units the points refer to.
    #[serde(default)]
    pub unit_value: serde_json::Value,
}

impl From<ObservationDto> for RawObservation {
    fn from(dto: ObservationDto) -> Self {
        Self {
            entity_id: dto.entity_id,
            timestamp: dto.timestamp,
            currency: dto.currency,
            has_flag: dto.has_flag,
            quantity: dto.quantity,
            unit_value: dto.unit_value,
        }
    }
}

/// Request body for `POST /observations`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct IngestRequest {
    /// Rows to append, in log order.
    pub observations: Vec<ObservationDto>,
}

/// Response body for `POST /observations`.
#[derive(Debug, Serialize, ToSchema)]
pub struct IngestResponse {
    /// Rows admitted to the store.
    pub accepted: usize,
    /// Rows rejected.
    pub rejected: usize,
    /// Rejection reasons, in batch order.
    pub rejections: Vec<String>,
    /// Observations held after this batch.
    pub total_observations: usize,
}
