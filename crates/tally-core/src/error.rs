//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Error Types                           │
//! │                                                             │
//! │  tally-core errors (this file)                              │
//! │  ├── CoreError        - Unknown shop/product lookups        │
//! │  └── ValidationError  - Catalog validation failures         │
//! │                                                             │
//! │  tally-db errors (separate crate)                           │
//! │  └── DbError          - State store failures                │
//! │                                                             │
//! │  tally-app errors (app crate)                               │
//! │  └── AppError         - What an embedding shell sees        │
//! │                                                             │
//! │  Flow: ValidationError → CoreError → AppError → Shell       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Note what is NOT an error: incrementing a sold-out product or
//! decrementing past zero. Those are boundary guards handled as silent
//! no-ops inside [`crate::ledger`], never surfaced to the caller.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (shop id, product id)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These represent lookups with ids that do not exist in the catalog,
/// which indicates a caller bug or a stale frontend - never a boundary
/// condition of normal tallying.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Shop id is not part of the catalog.
    #[error("Shop not found: {0}")]
    ShopNotFound(String),

    /// Product id is not part of the given shop's catalog entry.
    #[error("Product not found in shop {shop_id}: {product_id}")]
    ProductNotFound {
        shop_id: String,
        product_id: String,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Catalog validation errors.
///
/// The catalog is externally supplied and read-only at runtime, so it is
/// validated once at load time before any state is built on top of it.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The catalog defines no shops at all.
    #[error("catalog has no shops")]
    EmptyCatalog,

    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Duplicate id (shop id across the catalog, product id within a shop).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// A product price is negative.
    #[error("price for product '{product_id}' must not be negative")]
    NegativePrice { product_id: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ProductNotFound {
            shop_id: "north".to_string(),
            product_id: "yakisoba".to_string(),
        };
        assert_eq!(err.to_string(), "Product not found in shop north: yakisoba");

        let err = CoreError::ShopNotFound("south".to_string());
        assert_eq!(err.to_string(), "Shop not found: south");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "shop id".to_string(),
        };
        assert_eq!(err.to_string(), "shop id is required");

        let err = ValidationError::Duplicate {
            field: "product id".to_string(),
            value: "yakisoba".to_string(),
        };
        assert_eq!(err.to_string(), "product id 'yakisoba' already exists");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::EmptyCatalog;
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
