//! Gateway error types with HTTP status code mapping.
//!
//! [`CityscapeError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 3001,
///     "message": "persistence error: connection refused",
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
    /// Numeric error code (see code ranges on [`CityscapeError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category          | HTTP Status                |
/// |-----------|-------------------|----------------------------|
/// | 1000–1999 | Validation/Auth   | 400 Bad Request / 401      |
/// | 2000–2999 | Not Found         | 404 Not Found              |
/// | 3000–3999 | Server/Upstream   | 500 / 502                  |
/// | 4000–4999 | Attachment        | 422 Unprocessable Entity   |
#[derive(Debug, thiserror::Error)]
pub enum CityscapeError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// No authenticated identity was supplied on a write route.
    #[error("missing or invalid authenticated identity")]
    Unauthorized,

    /// The operation requires a persisted identifier that is absent.
    #[error("event has no persisted identifier")]
    MissingIdentifier,

    /// Event with the given ID was not found.
    #[error("event not found: {0}")]
    EventNotFound(String),

    /// Photo attach requires a persisted parent event.
    #[error("photo attach requires a persisted parent event")]
    MissingParent,

    /// Document write, read, or delete failed.
    #[error("persistence error: {0}")]
    PersistenceError(String),

    /// Blob transfer to storage failed.
    #[error("upload error: {0}")]
    UploadError(String),

    /// Post-upload download URL resolution failed.
    #[error("url resolution error: {0}")]
    UrlResolutionError(String),

    /// Place search provider call failed.
    #[error("place lookup error: {0}")]
    PlaceLookup(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CityscapeError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::Unauthorized => 1002,
            Self::MissingIdentifier => 1003,
            Self::EventNotFound(_) => 2001,
            Self::Internal(_) => 3000,
            Self::PersistenceError(_) => 3001,
            Self::UploadError(_) => 3002,
            Self::UrlResolutionError(_) => 3003,
            Self::PlaceLookup(_) => 3004,
            Self::MissingParent => 4001,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::MissingIdentifier => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::EventNotFound(_) => StatusCode::NOT_FOUND,
            Self::MissingParent => StatusCode::UNPROCESSABLE_ENTITY,
            Self::PersistenceError(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::UploadError(_) | Self::UrlResolutionError(_) | Self::PlaceLookup(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

impl IntoResponse for CityscapeError {
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

    #[test]
    fn error_codes_match_taxonomy() {
        assert_eq!(CityscapeError::MissingIdentifier.error_code(), 1003);
        assert_eq!(CityscapeError::MissingParent.error_code(), 4001);
        assert_eq!(
            CityscapeError::PersistenceError("x".to_string()).error_code(),
            3001
        );
        assert_eq!(
            CityscapeError::UploadError("x".to_string()).error_code(),
            3002
        );
        assert_eq!(
            CityscapeError::UrlResolutionError("x".to_string()).error_code(),
            3003
        );
    }

    #[test]
    fn missing_parent_maps_to_unprocessable() {
        assert_eq!(
            CityscapeError::MissingParent.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = CityscapeError::EventNotFound("abc".to_string());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
