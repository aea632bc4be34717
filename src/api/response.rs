//! Response types for the shift tracker API.
//!
//! This module defines the response bodies, the error response structure,
//! and the mapping from [`ShiftError`] to HTTP status codes.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::clock::{ClockInResult, ClockOutResult};
use crate::error::{ShiftError, StoreError};
use crate::geofence::GeofenceCheck;
use crate::models::Shift;

/// Body returned by the clock-in and clock-out endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockResponse {
    /// The opened or closed shift.
    pub shift: Shift,
    /// The geofence measurement, when a geofence was enforced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geofence: Option<GeofenceCheck>,
}

impl From<ClockInResult> for ClockResponse {
    fn from(result: ClockInResult) -> Self {
        Self {
            shift: result.shift,
            geofence: result.geofence,
        }
    }
}

impl From<ClockOutResult> for ClockResponse {
    fn from(result: ClockOutResult) -> Self {
        Self {
            shift: result.shift,
            geofence: result.geofence,
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Pairs an error body with a status.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    /// A 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<ShiftError> for ApiErrorResponse {
    fn from(error: ShiftError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            ShiftError::NotAuthenticated => (
                StatusCode::UNAUTHORIZED,
                ApiError::with_details(
                    "NOT_AUTHENTICATED",
                    message,
                    "Supply the caller's worker id in the x-worker-id header",
                ),
            ),
            ShiftError::Unauthorized { .. } => {
                (StatusCode::FORBIDDEN, ApiError::new("UNAUTHORIZED", message))
            }
            ShiftError::WorkerNotFound { .. } => {
                (StatusCode::NOT_FOUND, ApiError::new("WORKER_NOT_FOUND", message))
            }
            ShiftError::ShiftNotFound { .. } => {
                (StatusCode::NOT_FOUND, ApiError::new("SHIFT_NOT_FOUND", message))
            }
            ShiftError::OrganizationNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("ORGANIZATION_NOT_FOUND", message),
            ),
            ShiftError::AlreadyClockedIn => {
                (StatusCode::CONFLICT, ApiError::new("ALREADY_CLOCKED_IN", message))
            }
            ShiftError::NoActiveShift => {
                (StatusCode::CONFLICT, ApiError::new("NO_ACTIVE_SHIFT", message))
            }
            ShiftError::NoOrganization => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::new("NO_ORGANIZATION", message),
            ),
            ShiftError::OutsideAllowedArea {
                distance_meters,
                radius_meters,
            } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::with_details(
                    "OUTSIDE_ALLOWED_AREA",
                    message,
                    format!(
                        "distance_meters={:.2} radius_meters={:.2}",
                        distance_meters, radius_meters
                    ),
                ),
            ),
            ShiftError::InvalidCoordinate { field, .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details("VALIDATION_ERROR", message, format!("field: {}", field)),
            ),
            ShiftError::InvalidGeofence { .. } => {
                (StatusCode::BAD_REQUEST, ApiError::validation_error(message))
            }
            ShiftError::ConfigNotFound { .. }
            | ShiftError::ConfigParseError { .. }
            | ShiftError::ConfigInvalid { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            ShiftError::Store(StoreError::DuplicateActiveShift { .. }) => (
                StatusCode::CONFLICT,
                ApiError::new("DUPLICATE_ACTIVE_SHIFT", message),
            ),
            ShiftError::Store(StoreError::ShiftClosed { .. }) => {
                (StatusCode::CONFLICT, ApiError::new("SHIFT_CLOSED", message))
            }
            ShiftError::Store(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("STORE_ERROR", "Storage failure", message),
            ),
        };
        Self { status, error }
    }
}
