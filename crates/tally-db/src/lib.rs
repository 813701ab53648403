//! # tally-db: Database Layer for Event Tally
//!
//! This crate provides database access for Event Tally.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Event Tally Data Flow                      │
//! │                                                             │
//! │  TallyController mutation (increment, set_active_shop, ...) │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────────────────────────────────────────────────┐   │
//! │  │                tally-db (THIS CRATE)                │   │
//! │  │                                                     │   │
//! │  │  ┌─────────────┐  ┌──────────────┐  ┌────────────┐  │   │
//! │  │  │  Database   │  │ StateRepo    │  │ Migrations │  │   │
//! │  │  │  (pool.rs)  │◄─│ (singleton   │  │ (embedded) │  │   │
//! │  │  │             │  │  record)     │  │            │  │   │
//! │  │  └─────────────┘  └──────────────┘  └────────────┘  │   │
//! │  └─────────────────────────────────────────────────────┘   │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  SQLite file (WAL mode): the store that survives restarts   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - The application-state repository
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_db::{Database, DbConfig};
//!
//! // Create database with default config (runs migrations)
//! let db = Database::new(DbConfig::new("path/to/tally.db")).await?;
//!
//! // Load prior state, save new state
//! let loaded = db.state().load().await?;
//! db.state().save(&new_state).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::state::{StateRepository, STATE_KEY};
