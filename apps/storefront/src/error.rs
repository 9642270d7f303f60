//! # API Error Type
//!
//! Error type crossing the `Api` seam, plus the binary's startup error.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  View                        LocalApi                                   │
//! │  ────                        ────────                                   │
//! │                                                                         │
//! │  fetcher.load(api, "/products/1")                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Route handler  Result<Value, ApiError>                          │  │
//! │  │         │                                                        │  │
//! │  │  Database error? ─── DbError::Sqlx ─────────────┐                │  │
//! │  │  Validation error? ── ValidationError ──────── ApiError (4xx/5xx)│  │
//! │  └──────────────────────────────────────────────────┬───────────────┘  │
//! │                                                     │                   │
//! │  ◄──────────────────────────────────────────────────┘                   │
//! │                                                                         │
//! │  FetchState::Failed(FetchError::Network("[InternalError] ..."))         │
//! │  View renders "An unexpected error occurred."                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use storefront_core::{CoreError, ValidationError};
use storefront_db::DbError;
use thiserror::Error;

/// API error returned by every route.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Route not found: GET /orders"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed request, e.g. a non-numeric id segment (400)
    BadRequest,

    /// Route or resource not found (404)
    NotFound,

    /// Payload failed validation (422)
    ValidationError,

    /// Database operation failed (500)
    DatabaseError,

    /// Anything else, including injected faults (500)
    InternalError,
}

impl ErrorCode {
    /// HTTP-style status code for this error.
    pub const fn status(&self) -> u16 {
        match self {
            ErrorCode::BadRequest => 400,
            ErrorCode::NotFound => 404,
            ErrorCode::ValidationError => 422,
            ErrorCode::DatabaseError | ErrorCode::InternalError => 500,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BadRequest, message)
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InternalError, message)
    }

    /// HTTP-style status code.
    pub fn status(&self) -> u16 {
        self.code.status()
    }
}

/// Converts database errors to API errors.
///
/// SQLite messages are logged, never returned.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(entity, &id.to_string()),
            DbError::DuplicateCategory(name) => {
                ApiError::validation(format!("Category '{}' already exists", name))
            }
            DbError::ConstraintViolation(message) => {
                tracing::warn!(%message, "Check constraint violation");
                ApiError::validation("Value out of range")
            }
            DbError::UnknownCategory(id) => CoreError::CategoryNotFound(id).into(),
            DbError::Migration(_) | DbError::Sqlx(_) => {
                tracing::error!(error = %err, "Catalog query failed");
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::CategoryNotFound(id) => ApiError::bad_request(format!(
                "Category {} does not exist",
                id
            )),
            CoreError::Validation(e) => ApiError::from(e),
            other => ApiError::bad_request(other.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Startup Error
// =============================================================================

/// Errors that stop the storefront binary from starting.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Invalid product id argument: {0}")]
    InvalidArgument(String),

    #[error("Could not determine app data directory")]
    NoDataDir,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::bad_request("x").status(), 400);
        assert_eq!(ApiError::not_found("Product", "1").status(), 404);
        assert_eq!(ApiError::validation("x").status(), 422);
        assert_eq!(ApiError::internal("x").status(), 500);
    }

    #[test]
    fn test_db_errors_hide_details() {
        let err: ApiError = DbError::Sqlx(sqlx::Error::Protocol(
            "no such table: products".to_string(),
        ))
        .into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("no such table"));

        let err: ApiError =
            DbError::ConstraintViolation("CHECK constraint failed: price".to_string()).into();
        assert_eq!(err, ApiError::validation("Value out of range"));

        let err: ApiError = DbError::not_found("Product", 3).into();
        assert_eq!(err, ApiError::not_found("Product", "3"));
    }

    #[test]
    fn test_unknown_category_is_bad_request() {
        let from_db: ApiError = DbError::UnknownCategory(9).into();
        let from_core: ApiError = CoreError::CategoryNotFound(9).into();

        assert_eq!(from_db, from_core);
        assert_eq!(from_db.status(), 400);
        assert_eq!(from_db.message, "Category 9 does not exist");
    }

    #[test]
    fn test_duplicate_category_names_the_category() {
        let err: ApiError = DbError::DuplicateCategory("Bakery".to_string()).into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("Bakery"));
    }

    #[test]
    fn test_validation_error_keeps_message() {
        let err: ApiError = ValidationError::Required {
            field: "name".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "name is required");
    }

    #[test]
    fn test_serializes_code_and_message() {
        let json = serde_json::to_value(ApiError::not_found("Product", "9")).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product not found: 9");
    }
}
