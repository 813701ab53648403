//! # tally-app: Headless Application Controller
//!
//! The orchestration layer a rendering shell embeds to run Event Tally.
//!
//! ## Module Organization
//! ```text
//! tally_app/
//! ├── lib.rs          ◄─── You are here (wiring & tracing setup)
//! ├── controller.rs   ◄─── TallyController: presentation-facing API
//! ├── persist.rs      ◄─── Background save queue (observable)
//! ├── catalog.rs      ◄─── Catalog file loading
//! ├── config.rs       ◄─── AppConfig (paths, currency display)
//! └── error.rs        ◄─── AppError for the controller surface
//! ```
//!
//! ## Embedding
//! ```rust,ignore
//! use tally_app::{AppConfig, TallyController};
//!
//! tally_app::init_tracing();
//!
//! let config = AppConfig::from_env();
//! let mut controller = TallyController::start(&config).await?;
//!
//! // user taps [+] on yakisoba
//! let mutation = controller.increment("yakisoba")?;
//! if mutation.changed {
//!     // re-render from controller state; the save runs in the
//!     // background and is deliberately not awaited here
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod persist;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::load_catalog;
pub use config::AppConfig;
pub use controller::{Mutation, TallyController};
pub use error::{AppError, AppResult, ErrorCode};
pub use persist::{PersistOutcome, PersistTask};

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tally=trace` - Show trace for tally crates only
/// - Default: INFO level, with per-operation debug for tally crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tally=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
