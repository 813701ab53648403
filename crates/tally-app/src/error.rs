//! # API Error Type
//!
//! Unified error type for the controller surface.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                Error Flow in Event Tally                    │
//! │                                                             │
//! │  Rendering shell calls controller.increment("yakisoba")     │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  Unknown id?      ── CoreError ──► AppError { NotFound }    │
//! │  Bad catalog file ── Validation ─► AppError { Validation }  │
//! │  Store unreadable ── DbError ────► AppError { Storage }     │
//! │                                                             │
//! │  NOT errors (silent no-ops): sold-out increment,            │
//! │  decrement at zero.                                         │
//! │  NOT propagated: background save failures - those flip      │
//! │  the controller's degraded flag instead of failing the      │
//! │  mutation that triggered them.                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! The error implements `Serialize` with a machine-readable `code` and a
//! human-readable `message`, so a shell over any IPC boundary can pattern
//! match on the code.

use serde::Serialize;
use tally_core::{CoreError, ValidationError};
use tally_db::DbError;

/// API error returned from controller operations.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found in shop north: yakisoba"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Shop or product id not in the catalog
    NotFound,

    /// Catalog or input validation failed
    ValidationError,

    /// State store or backup file operation failed
    StorageError,

    /// Anything else
    Internal,
}

impl AppError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::NotFound, message)
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::StorageError, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ShopNotFound(_) | CoreError::ProductNotFound { .. } => {
                AppError::not_found(err.to_string())
            }
            CoreError::Validation(e) => AppError::validation(e.to_string()),
        }
    }
}

/// Converts catalog validation errors to API errors.
impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

/// Converts database errors to API errors.
impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionFailed(_) => {
                AppError::storage("State store connection failed")
            }
            DbError::MigrationFailed(_) => {
                AppError::storage("State store migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("State store query failed: {}", e);
                AppError::storage("State store operation failed")
            }
            DbError::Serialization(e) => {
                tracing::error!("State serialization failed: {}", e);
                AppError::new(ErrorCode::Internal, "State serialization failed")
            }
            DbError::PoolExhausted => AppError::storage("State store pool exhausted"),
            DbError::Internal(e) => {
                tracing::error!("Internal state store error: {}", e);
                AppError::storage("State store operation failed")
            }
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

/// Result type for controller operations.
pub type AppResult<T> = Result<T, AppError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_maps_to_not_found() {
        let err: AppError = CoreError::ShopNotFound("nope".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(err.message.contains("nope"));
    }

    #[test]
    fn test_serialized_shape() {
        let err = AppError::not_found("Product not found");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product not found");
    }
}
