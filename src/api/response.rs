//! Response types for the Commission Engine API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

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

    /// Creates a role not found error response.
    pub fn role_not_found(role: &str) -> Self {
        Self::with_details(
            "ROLE_NOT_FOUND",
            format!("Role not found: {}", role),
            format!("The role '{}' is not part of the career plan", role),
        )
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

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidRole { role, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Invalid role configuration",
                    format!("Role '{}': {}", role, message),
                ),
            },
            EngineError::RoleNotFound { role } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::role_not_found(&role),
            },
            EngineError::InvalidEmployee { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "VALIDATION_ERROR",
                    format!("Invalid employee field '{}': {}", field, message),
                    "The employee data contains invalid information",
                ),
            },
            EngineError::InvalidRequest { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::validation_error(format!(
                    "Invalid request field '{}': {}",
                    field, message
                )),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_role_not_found_error() {
        let error = ApiError::role_not_found("unit_manager");
        assert_eq!(error.code, "ROLE_NOT_FOUND");
        assert!(error.message.contains("unit_manager"));
    }

    #[test]
    fn test_engine_error_status_mapping() {
        let cases = [
            (
                EngineError::RoleNotFound {
                    role: "unit_manager".to_string(),
                },
                StatusCode::BAD_REQUEST,
                "ROLE_NOT_FOUND",
            ),
            (
                EngineError::InvalidEmployee {
                    field: "tenure".to_string(),
                    message: "must not be negative".to_string(),
                },
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
            ),
            (
                EngineError::InvalidRequest {
                    field: "period".to_string(),
                    message: "inverted".to_string(),
                },
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
            ),
            (
                EngineError::InvalidRole {
                    role: "tech_leader_1".to_string(),
                    message: "base_salary must be positive".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
            ),
            (
                EngineError::ConfigNotFound {
                    path: "roles.yaml".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
            ),
        ];

        for (engine_error, status, code) in cases {
            let api_error: ApiErrorResponse = engine_error.into();
            assert_eq!(api_error.status, status);
            assert_eq!(api_error.error.code, code);
        }
    }
}
