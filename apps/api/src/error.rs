//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                  Error Flow in folio-api                            │
//! │                                                                     │
//! │  handler                                                            │
//! │    │                                                                │
//! │    ├── ValidationErrors ──► 400 + { errors: { field: [msg] } }      │
//! │    ├── CoreError::ReceiptNotFound ──► 404                           │
//! │    ├── CoreError::AlreadyVoided ──► 400 (conflict)                  │
//! │    ├── DbError::NotFound ──► 404                                    │
//! │    ├── DbError::{UniqueViolation, Conflict} ──► 400 (conflict)      │
//! │    └── any other DbError ──► 500, detail only logged                │
//! │                                                                     │
//! │  Internal failures never leak their detail to the caller.           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use folio_core::{CoreError, ValidationErrors};
use folio_db::DbError;

/// API error returned from handlers.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "One or more validation errors occurred",
///   "errors": { "series": ["must be exactly 4 characters"] }
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Field → messages map, present only for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Illegal state transition or numbering race (400)
    Conflict,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::Conflict => StatusCode::BAD_REQUEST,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            errors: None,
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Conflict, message)
    }

    /// Creates an internal error with a generic caller-facing message.
    pub fn internal() -> Self {
        ApiError::new(ErrorCode::Internal, "An internal error occurred")
    }

    /// Creates a validation error carrying the field → messages map.
    pub fn validation(errors: ValidationErrors) -> Self {
        ApiError {
            code: ErrorCode::ValidationError,
            message: "One or more validation errors occurred".to_string(),
            errors: Some(errors.errors().clone()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

/// Converts collected validation failures to an API error.
impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::validation(errors)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ReceiptNotFound(id) => ApiError::not_found("Receipt", &id),
            CoreError::AlreadyVoided { id } => {
                ApiError::conflict(format!("Receipt {} is already voided", id))
            }
            CoreError::Validation(errors) => ApiError::validation(errors),
        }
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => {
                ApiError::conflict(format!("{} '{}' already exists", field, value))
            }
            DbError::Conflict { message } => ApiError::conflict(message),
            other => {
                // Log the actual error but return a generic message.
                tracing::error!(error = %other, "Database operation failed");
                ApiError::internal()
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
