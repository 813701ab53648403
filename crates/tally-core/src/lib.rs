//! # tally-core: Pure Business Logic for Event Tally
//!
//! This crate is the heart of Event Tally. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Event Tally Architecture                  │
//! │                                                             │
//! │  ┌─────────────────────────────────────────────────────┐   │
//! │  │            Rendering Shell (external)               │   │
//! │  │   Shop tabs ──► Counter buttons ──► Revenue panel   │   │
//! │  └──────────────────────────┬──────────────────────────┘   │
//! │                             │                               │
//! │  ┌──────────────────────────▼──────────────────────────┐   │
//! │  │          tally-app (TallyController)                │   │
//! │  └──────────────────────────┬──────────────────────────┘   │
//! │                             │                               │
//! │  ┌──────────────────────────▼──────────────────────────┐   │
//! │  │            ★ tally-core (THIS CRATE) ★              │   │
//! │  │                                                     │   │
//! │  │  ┌─────────┐ ┌────────┐ ┌────────┐ ┌──────────┐    │   │
//! │  │  │ catalog │ │ money  │ │ ledger │ │ snapshot │    │   │
//! │  │  │ Product │ │ Money  │ │ counts │ │ JSON     │    │   │
//! │  │  │ Shop    │ │ (i64)  │ │ revenue│ │ export   │    │   │
//! │  │  └─────────┘ └────────┘ └────────┘ └──────────┘    │   │
//! │  │                                                     │   │
//! │  │  NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS   │   │
//! │  └──────────────────────────┬──────────────────────────┘   │
//! │                             │                               │
//! │  ┌──────────────────────────▼──────────────────────────┐   │
//! │  │              tally-db (SQLite state store)          │   │
//! │  └─────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Read-only catalog types (Shop, Product)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`state`] - Mutable application state and startup reconciliation
//! - [`ledger`] - Counter mutations with stock boundaries, revenue sums
//! - [`snapshot`] - JSON backup snapshot construction
//! - [`validation`] - Catalog validation rules
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system and clock access are FORBIDDEN here
//! 3. **Integer Money**: All monetary values are integer minor units (i64)
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::{Catalog, Money, Product, Shop};
//! use tally_core::{ledger, state};
//!
//! let catalog = Catalog::new(vec![Shop {
//!     id: "north".into(),
//!     name: "North Stand".into(),
//!     products: vec![Product {
//!         id: "yakisoba".into(),
//!         name: "Yakisoba".into(),
//!         category: "Food".into(),
//!         stock: 2,
//!         price: Money::from_minor(500),
//!     }],
//! }]);
//!
//! let mut app = state::AppState::defaults(&catalog);
//! ledger::increment(&catalog, &mut app, "north", "yakisoba").unwrap();
//!
//! let revenue = ledger::revenue_by_shop(&catalog, &app, "north").unwrap();
//! assert_eq!(revenue, Money::from_minor(500));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod ledger;
pub mod money;
pub mod snapshot;
pub mod state;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use tally_core::Money` instead of
// `use tally_core::money::Money`

pub use catalog::{Catalog, Product, Shop};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use snapshot::{Snapshot, DEFAULT_BACKUP_FILENAME};
pub use state::{reconcile, AppState, SoldCounters};
