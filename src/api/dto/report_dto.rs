//! Summary DTO.

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::analysis::report::SnapshotSummary;

/// Response body for `GET /summary`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SummaryResponse {
    /// Most recent snapshot date.
    pub latest_date: Option<NaiveDate>,
    /// Previous distinct snapshot date.
    pub previous_date: Option<NaiveDate>,
    /// Keys active on the latest date.
    pub total_entities: usize,
    /// Keys with an active offer.
    pub total_with_flag: usize,
    /// Share of keys with an offer, in percent.
    pub flag_rate_percent: f64,
    /// Share of keys with an offer on the previous date.
    pub previous_flag_rate_percent: Option<f64>,
    /// Change in active keys versus the previous date.
    pub entity_delta: Option<i64>,
    /// Change in keys with an offer versus the previous date.
    pub flag_delta: Option<i64>,
    /// Keys whose entity is classified as new.
    pub new_entities: usize,
    /// Mean ratio over keys with an offer.
    pub mean_ratio_flagged: f64,
    /// Whether a day-over-day comparison is available.
    pub comparison_available: bool,
}

impl From<SnapshotSummary> for SummaryResponse {
    fn from(summary: SnapshotSummary) -> Self {
        Self {
            comparison_available: summary.previous_date.is_some(),
            latest_date: summary.latest_date,
            previous_date: summary.previous_date,
            total_entities: summary.total_entities,
            total_with_flag: summary.total_with_flag,
            flag_rate_percent: summary.flag_rate_percent,
            previous_flag_rate_percent: summary.previous_flag_rate_percent,
            entity_delta: summary.entity_delta,
            flag_delta: summary.flag_delta,
            new_entities: summary.new_entities,
            mean_ratio_flagged: summary.mean_ratio_flagged,
        }
    }
}
