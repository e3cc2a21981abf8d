//! Radar error types with HTTP status code mapping.
//!
//! [`RadarError`] is the central error type for the crate. The analysis
//! engine only ever raises [`RadarError::EntityNotFound`]; the remaining
//! variants belong to the ingestion and HTTP layers. Each variant maps to a
//! specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::EntityKey;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "entity not found at 2024-05-03: Acme|BRL",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Crate-wide error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status               |
/// |-----------|-----------------|---------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request           |
/// | 2000–2999 | Not Found       | 404 Not Found             |
#[derive(Debug, thiserror::Error)]
pub enum RadarError {
    /// The entity key has no observation on the date being analysed.
    ///
    /// Raised when a caller asks for a single entity that is not part of
    /// the latest partition. Bulk analysis never raises it: absent
    /// entities are simply excluded.
    #[error("entity not found at {date}: {key}")]
    EntityNotFound {
        /// Requested entity key.
        key: EntityKey,
        /// Date partition that was searched.
        date: chrono::NaiveDate,
    },

    /// The store holds no observations at all.
    #[error("snapshot store is empty")]
    EmptyStore,

    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Unknown change kind in a filter.
    #[error("invalid change kind: {0}")]
    InvalidChangeKind(String),
}

impl RadarError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::InvalidChangeKind(_) => 1002,
            Self::EntityNotFound { .. } => 2001,
            Self::EmptyStore => 2002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::InvalidChangeKind(_) => StatusCode::BAD_REQUEST,
            Self::EntityNotFound { .. } | Self::EmptyStore => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for RadarError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        let Some(date) = NaiveDate::from_ymd_opt(2024, 5, d) else {
            panic!("valid date");
        };
        date
    }

    #[test]
    fn entity_not_found_maps_to_404() {
        let err = RadarError::EntityNotFound {
            key: EntityKey::new("Acme", "BRL"),
            date: day(3),
        };
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), 2001);
        assert_eq!(err.to_string(), "entity not found at 2024-05-03: Acme|BRL");
    }

    #[test]
    fn validation_errors_map_to_400() {
        assert_eq!(
            RadarError::InvalidRequest("empty batch".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RadarError::InvalidChangeKind("boom".to_string()).error_code(),
            1002
        );
    }

    #[test]
    fn into_response_carries_status() {
        let response = RadarError::EmptyStore.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
