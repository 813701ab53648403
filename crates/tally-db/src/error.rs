//! # Database Error Types
//!
//! Error types for state-store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                        │
//! │                                                             │
//! │  SQLite Error (sqlx::Error)                                 │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  DbError (this module) ← Adds context and categorization    │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  AppError (tally-app) ← What the embedding shell sees;      │
//! │       │                 the controller downgrades save      │
//! │       ▼                 failures to degraded mode instead   │
//! │  Non-blocking warning   of failing the mutation             │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// State-store operation errors.
///
/// These wrap sqlx errors and provide categorization for the app layer.
/// None of them is fatal to the session: the controller falls back to
/// memory-only operation on any save failure.
#[derive(Debug, Error)]
pub enum DbError {
    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// The state payload could not be serialized for storage.
    ///
    /// Deserialization failures on load are NOT this error: a corrupt
    /// stored payload is logged and treated as absent state instead.
    #[error("State payload serialization failed: {0}")]
    Serialization(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Convert sqlx errors to DbError.
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => DbError::QueryFailed(db_err.message().to_string()),
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),
            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

impl From<serde_json::Error> for DbError {
    fn from(err: serde_json::Error) -> Self {
        DbError::Serialization(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Unit Tests
// =============================================================================
