//! # Catalog Types
//!
//! The static, externally supplied definition of shops and their products.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Catalog                              │
//! │                                                             │
//! │  Catalog ──► [Shop] ──► [Product]                           │
//! │                                                             │
//! │  ┌─────────────────┐      ┌─────────────────┐               │
//! │  │      Shop       │      │     Product     │               │
//! │  │  ─────────────  │      │  ─────────────  │               │
//! │  │  id (unique)    │      │  id (unique in  │               │
//! │  │  name           │      │      its shop)  │               │
//! │  │  products (in   │      │  name           │               │
//! │  │   menu order)   │      │  category       │               │
//! │  └─────────────────┘      │  stock (fixed)  │               │
//! │                           │  price (Money)  │               │
//! │                           └─────────────────┘               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog is read-only at runtime: stock levels never change, only
//! the sold counters in [`crate::state::AppState`] move. Order matters -
//! shops and products are rendered and exported in catalog order.

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale at one shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier within the owning shop.
    pub id: String,

    /// Display name shown on the counter board.
    pub name: String,

    /// Category label used to group products on screen.
    pub category: String,

    /// Units prepared for the event. Fixed for the whole session.
    pub stock: u32,

    /// Unit price in minor units.
    pub price: Money,
}

// =============================================================================
// Shop
// =============================================================================

/// A shop (stall) participating in the event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    /// Unique identifier across the catalog.
    pub id: String,

    /// Display name shown on the shop switcher.
    pub name: String,

    /// Products in menu order.
    pub products: Vec<Product>,
}

impl Shop {
    /// Looks up a product by id.
    pub fn product(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    /// Groups products by category, preserving first-appearance order of
    /// categories and catalog order of products within each.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::{Money, Product, Shop};
    ///
    /// let shop = Shop {
    ///     id: "north".into(),
    ///     name: "North Stand".into(),
    ///     products: vec![
    ///         Product { id: "a".into(), name: "A".into(), category: "Food".into(),
    ///                   stock: 1, price: Money::from_minor(100) },
    ///         Product { id: "b".into(), name: "B".into(), category: "Drink".into(),
    ///                   stock: 1, price: Money::from_minor(100) },
    ///         Product { id: "c".into(), name: "C".into(), category: "Food".into(),
    ///                   stock: 1, price: Money::from_minor(100) },
    ///     ],
    /// };
    ///
    /// let grouped = shop.products_by_category();
    /// assert_eq!(grouped[0].0, "Food");
    /// assert_eq!(grouped[0].1.len(), 2);
    /// assert_eq!(grouped[1].0, "Drink");
    /// ```
    pub fn products_by_category(&self) -> Vec<(&str, Vec<&Product>)> {
        let mut grouped: Vec<(&str, Vec<&Product>)> = Vec::new();

        for product in &self.products {
            match grouped.iter_mut().find(|(c, _)| *c == product.category) {
                Some((_, items)) => items.push(product),
                None => grouped.push((product.category.as_str(), vec![product])),
            }
        }

        grouped
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The full, ordered set of shops for the event.
///
/// Constructed once at startup (from a catalog file in the app layer) and
/// shared read-only with every operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    shops: Vec<Shop>,
}

impl Catalog {
    /// Creates a catalog from a list of shops.
    ///
    /// Run [`crate::validation::validate_catalog`] on the result before
    /// building state on top of it.
    pub fn new(shops: Vec<Shop>) -> Self {
        Catalog { shops }
    }

    /// All shops in catalog order.
    pub fn shops(&self) -> &[Shop] {
        &self.shops
    }

    /// The first shop - the default active shop for fresh state and the
    /// fallback when a persisted active shop id has gone stale.
    pub fn first_shop(&self) -> Option<&Shop> {
        self.shops.first()
    }

    /// Looks up a shop by id.
    pub fn shop(&self, shop_id: &str) -> Option<&Shop> {
        self.shops.iter().find(|s| s.id == shop_id)
    }

    /// Checks whether a shop id exists in the catalog.
    pub fn contains_shop(&self, shop_id: &str) -> bool {
        self.shop(shop_id).is_some()
    }

    /// Looks up a product within a shop.
    pub fn product(&self, shop_id: &str, product_id: &str) -> Option<&Product> {
        self.shop(shop_id).and_then(|s| s.product(product_id))
    }

    /// Number of shops.
    pub fn len(&self) -> usize {
        self.shops.len()
    }

    /// True when the catalog defines no shops.
    pub fn is_empty(&self) -> bool {
        self.shops.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
