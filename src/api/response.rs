//! Response types for the compensation engine API.
//!
//! This module defines the success payloads that are not plain models, the
//! error response structure, and the mapping from [`EngineError`] to HTTP.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, ErrorCategory};
use crate::models::{PunchEvent, WorkRecord};

/// Response body for `POST /punches`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunchResponse {
    /// The stored punch, with its assigned id.
    pub punch: PunchEvent,
    /// The recomputed record for the punch's day.
    pub work_record: WorkRecord,
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
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response for a request the engine could not parse.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
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

/// The stable machine-readable code for an engine error.
fn error_code(error: &EngineError) -> &'static str {
    match error {
        EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
            "CONFIG_ERROR"
        }
        EngineError::EmployeeNotFound { .. } => "EMPLOYEE_NOT_FOUND",
        EngineError::CompanyNotFound { .. } => "COMPANY_NOT_FOUND",
        EngineError::RegionNotFound { .. } => "REGION_NOT_FOUND",
        EngineError::PunchNotFound { .. } => "PUNCH_NOT_FOUND",
        EngineError::InvalidPeriod { .. } => "INVALID_PERIOD",
        EngineError::RegionMissing { .. } => "REGION_MISSING",
        EngineError::RegionNotConfigured { .. } => "REGION_NOT_CONFIGURED",
        EngineError::NoMatchingBracket { .. } => "NO_MATCHING_BRACKET",
        EngineError::InvalidRateTable { .. } => "INVALID_RATE_TABLE",
        EngineError::UnknownAllowanceType { .. } => "UNKNOWN_ALLOWANCE_TYPE",
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let status = match (&error, error.category()) {
            (EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. }, _) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            (_, ErrorCategory::NotFound) => StatusCode::NOT_FOUND,
            (_, ErrorCategory::InvalidInput) => StatusCode::BAD_REQUEST,
            (_, ErrorCategory::Configuration | ErrorCategory::DataQuality) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
        };

        ApiErrorResponse {
            status,
            error: ApiError::new(error_code(&error), error.to_string()),
        }
    }
}
