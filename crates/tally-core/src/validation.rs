//! # Validation Module
//!
//! Catalog validation for Event Tally.
//!
//! The catalog arrives from outside (a JSON file) and everything else -
//! state defaults, ledger bounds, exports - is built on the assumption
//! that its ids are unique and its prices non-negative. So it is checked
//! once, at load time, before any state exists.
//!
//! ## Usage
//! ```rust
//! use tally_core::validation::validate_catalog;
//! use tally_core::{Catalog, Money, Product, Shop};
//!
//! let catalog = Catalog::new(vec![Shop {
//!     id: "north".into(),
//!     name: "North Stand".into(),
//!     products: vec![Product {
//!         id: "yakisoba".into(),
//!         name: "Yakisoba".into(),
//!         category: "Food".into(),
//!         stock: 30,
//!         price: Money::from_minor(500),
//!     }],
//! }]);
//!
//! validate_catalog(&catalog).unwrap();
//! ```

use std::collections::HashSet;

use crate::catalog::Catalog;
use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Catalog Validation
// =============================================================================

/// Validates an externally supplied catalog.
///
/// ## Rules
/// - At least one shop (the first shop is the default active shop, so an
///   empty catalog has no usable state at all)
/// - Shop ids and names non-empty; shop ids unique across the catalog
/// - Product ids and names non-empty; product ids unique within a shop
/// - Prices non-negative (stock is `u32`, non-negative by construction)
pub fn validate_catalog(catalog: &Catalog) -> ValidationResult<()> {
    if catalog.is_empty() {
        return Err(ValidationError::EmptyCatalog);
    }

    let mut shop_ids = HashSet::new();

    for shop in catalog.shops() {
        validate_id("shop id", &shop.id)?;
        validate_name("shop name", &shop.name)?;

        if !shop_ids.insert(shop.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "shop id".to_string(),
                value: shop.id.clone(),
            });
        }

        let mut product_ids = HashSet::new();

        for product in &shop.products {
            validate_id("product id", &product.id)?;
            validate_name("product name", &product.name)?;

            if !product_ids.insert(product.id.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: "product id".to_string(),
                    value: product.id.clone(),
                });
            }

            if product.price.is_negative() {
                return Err(ValidationError::NegativePrice {
                    product_id: product.id.clone(),
                });
            }
        }
    }

    Ok(())
}

// =============================================================================
// Field Validators
// =============================================================================

/// An id must be non-empty after trimming.
fn validate_id(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// A display name must be non-empty after trimming.
fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Product, Shop};
    use crate::money::Money;

    fn product(id: &str, price: i64) -> Product {
        Product {
            id: id.to_string(),
            name: id.to_uppercase(),
            category: "Food".to_string(),
            stock: 10,
            price: Money::from_minor(price),
        }
    }

    fn shop(id: &str, products: Vec<Product>) -> Shop {
        Shop {
            id: id.to_string(),
            name: format!("{id} stand"),
            products,
        }
    }

    #[test]
    fn test_valid_catalog_passes() {
        let catalog = Catalog::new(vec![
            shop("north", vec![product("yakisoba", 500), product("ramune", 200)]),
            shop("south", vec![product("yakisoba", 450)]), // same id, other shop: fine
        ]);
        assert!(validate_catalog(&catalog).is_ok());
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let catalog = Catalog::new(vec![]);
        assert!(matches!(
            validate_catalog(&catalog),
            Err(ValidationError::EmptyCatalog)
        ));
    }

    #[test]
    fn test_duplicate_shop_id_rejected() {
        let catalog = Catalog::new(vec![shop("north", vec![]), shop("north", vec![])]);
        assert!(matches!(
            validate_catalog(&catalog),
            Err(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_duplicate_product_id_within_shop_rejected() {
        let catalog = Catalog::new(vec![shop(
            "north",
            vec![product("yakisoba", 500), product("yakisoba", 600)],
        )]);
        assert!(matches!(
            validate_catalog(&catalog),
            Err(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_blank_ids_and_names_rejected() {
        let catalog = Catalog::new(vec![shop("  ", vec![])]);
        assert!(matches!(
            validate_catalog(&catalog),
            Err(ValidationError::Required { .. })
        ));

        let mut bad_name = shop("north", vec![]);
        bad_name.name = String::new();
        let catalog = Catalog::new(vec![bad_name]);
        assert!(matches!(
            validate_catalog(&catalog),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_negative_price_rejected() {
        let catalog = Catalog::new(vec![shop("north", vec![product("yakisoba", -1)])]);
        assert!(matches!(
            validate_catalog(&catalog),
            Err(ValidationError::NegativePrice { .. })
        ));
    }
}
