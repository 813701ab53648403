//! # Application State
//!
//! The mutable state of a tally session, plus the startup reconciliation
//! that merges persisted state over catalog-driven defaults.
//!
//! ## State Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        AppState                             │
//! │                                                             │
//! │  active_shop:  "north"         ← one-of-N selection         │
//! │  show_revenue: false           ← 2-state toggle             │
//! │  shops: {                                                   │
//! │    "north": { sold: { "yakisoba": 12, "ramune": 3 } },      │
//! │    "south": { sold: {} },                                   │
//! │  }                                                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The whole struct is what the state store persists as a single record,
//! so its serde shape IS the durable storage format. `BTreeMap` keeps the
//! serialized payload deterministic.
//!
//! ## Ownership
//! There are no ambient globals: the controller in tally-app owns the one
//! `AppState` instance and has exclusive mutation rights. Everything here
//! takes the state explicitly, which keeps tests free of hidden shared
//! state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

// =============================================================================
// Sold Counters
// =============================================================================

/// Per-shop, per-product counts of units sold so far.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoldCounters {
    /// Product id → sold count. Absent means zero.
    #[serde(default)]
    pub sold: BTreeMap<String, u32>,
}

impl SoldCounters {
    /// Creates empty counters.
    pub fn new() -> Self {
        SoldCounters::default()
    }

    /// Sold count for a product; 0 when the product was never sold.
    pub fn count(&self, product_id: &str) -> u32 {
        self.sold.get(product_id).copied().unwrap_or(0)
    }
}

// =============================================================================
// Application State
// =============================================================================

/// The full mutable state of a tally session.
///
/// ## Serialization
/// camelCase field names (`activeShop`, `showRevenue`, `shops`) with
/// serde defaults on every field, so a persisted payload written before a
/// field existed still loads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// Id of the shop whose counter board is active.
    #[serde(default)]
    pub active_shop: String,

    /// Whether revenue figures are shown unmasked.
    #[serde(default)]
    pub show_revenue: bool,

    /// Shop id → sold counters. May contain entries for shops no longer
    /// in the catalog; those are retained but ignored by catalog-driven
    /// views.
    #[serde(default)]
    pub shops: BTreeMap<String, SoldCounters>,
}

impl AppState {
    /// Default state for a catalog: first shop active, revenue hidden,
    /// every shop present with empty counters.
    pub fn defaults(catalog: &Catalog) -> Self {
        let shops = catalog
            .shops()
            .iter()
            .map(|s| (s.id.clone(), SoldCounters::new()))
            .collect();

        AppState {
            active_shop: catalog
                .first_shop()
                .map(|s| s.id.clone())
                .unwrap_or_default(),
            show_revenue: false,
            shops,
        }
    }

    /// Counters for a shop, if any have been recorded or initialized.
    pub fn counters(&self, shop_id: &str) -> Option<&SoldCounters> {
        self.shops.get(shop_id)
    }

    /// Mutable counters for a shop, created empty on first touch.
    ///
    /// Creating on demand covers persisted payloads that predate a shop
    /// being added to the catalog.
    pub fn counters_mut(&mut self, shop_id: &str) -> &mut SoldCounters {
        self.shops.entry(shop_id.to_string()).or_default()
    }

    /// Sold count for a product in a shop; 0 when absent at either level.
    pub fn sold_count(&self, shop_id: &str, product_id: &str) -> u32 {
        self.counters(shop_id)
            .map(|c| c.count(product_id))
            .unwrap_or(0)
    }
}

// =============================================================================
// Reconciliation
// =============================================================================

/// Merges persisted state over catalog-driven defaults.
///
/// ## Precedence (documented contract)
/// - Loaded values win per key: `active_shop`, `show_revenue` and every
///   persisted shop's counters are taken from `loaded` when present.
/// - Missing keys fall back to `defaults`: a catalog shop absent from the
///   persisted payload gets empty counters.
/// - Extra persisted shop entries (catalog changed since the save) are
///   retained so they survive the next save, but catalog-driven views
///   never read them.
/// - A persisted `active_shop` that no longer exists in the catalog falls
///   back to the default (first catalog shop) instead of breaking every
///   render that asks for the active shop.
///
/// `None` for `loaded` means first launch: the defaults are returned
/// unchanged.
///
/// ## Example
/// ```rust
/// use tally_core::{reconcile, AppState, Catalog, Shop};
///
/// let catalog = Catalog::new(vec![Shop {
///     id: "north".into(),
///     name: "North Stand".into(),
///     products: vec![],
/// }]);
///
/// let mut stale = AppState::default();
/// stale.active_shop = "demolished".into();
/// stale.show_revenue = true;
///
/// let state = reconcile(&catalog, AppState::defaults(&catalog), Some(stale));
/// assert_eq!(state.active_shop, "north"); // fallback
/// assert!(state.show_revenue);            // loaded value wins
/// assert!(state.shops.contains_key("north"));
/// ```
pub fn reconcile(catalog: &Catalog, defaults: AppState, loaded: Option<AppState>) -> AppState {
    let mut state = match loaded {
        Some(loaded) => loaded,
        None => return defaults,
    };

    // Every catalog shop gets an entry, even if the save predates it.
    for (shop_id, counters) in defaults.shops {
        state.shops.entry(shop_id).or_insert(counters);
    }

    // Stale active shop falls back to the catalog default.
    if !catalog.contains_shop(&state.active_shop) {
        state.active_shop = defaults.active_shop;
    }

    state
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Product, Shop};
    use crate::money::Money;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Shop {
                id: "north".to_string(),
                name: "North Stand".to_string(),
                products: vec![Product {
                    id: "yakisoba".to_string(),
                    name: "Yakisoba".to_string(),
                    category: "Food".to_string(),
                    stock: 30,
                    price: Money::from_minor(500),
                }],
            },
            Shop {
                id: "south".to_string(),
                name: "South Stand".to_string(),
                products: vec![],
            },
        ])
    }

    #[test]
    fn test_defaults() {
        let state = AppState::defaults(&catalog());

        assert_eq!(state.active_shop, "north");
        assert!(!state.show_revenue);
        assert_eq!(state.shops.len(), 2);
        assert_eq!(state.sold_count("north", "yakisoba"), 0);
    }

    #[test]
    fn test_reconcile_first_launch_returns_defaults() {
        let catalog = catalog();
        let state = reconcile(&catalog, AppState::defaults(&catalog), None);
        assert_eq!(state, AppState::defaults(&catalog));
    }

    #[test]
    fn test_reconcile_loaded_values_win() {
        let catalog = catalog();

        let mut loaded = AppState::defaults(&catalog);
        loaded.active_shop = "south".to_string();
        loaded.show_revenue = true;
        loaded.counters_mut("north").sold.insert("yakisoba".to_string(), 7);

        let state = reconcile(&catalog, AppState::defaults(&catalog), Some(loaded));

        assert_eq!(state.active_shop, "south");
        assert!(state.show_revenue);
        assert_eq!(state.sold_count("north", "yakisoba"), 7);
    }

    #[test]
    fn test_reconcile_fills_missing_catalog_shops() {
        let catalog = catalog();

        // Persisted before "south" existed.
        let mut loaded = AppState::default();
        loaded.active_shop = "north".to_string();
        loaded.counters_mut("north").sold.insert("yakisoba".to_string(), 3);

        let state = reconcile(&catalog, AppState::defaults(&catalog), Some(loaded));

        assert!(state.shops.contains_key("south"));
        assert_eq!(state.sold_count("south", "anything"), 0);
        assert_eq!(state.sold_count("north", "yakisoba"), 3);
    }

    #[test]
    fn test_reconcile_stale_active_shop_falls_back() {
        let catalog = catalog();

        let mut loaded = AppState::defaults(&catalog);
        loaded.active_shop = "demolished".to_string();

        let state = reconcile(&catalog, AppState::defaults(&catalog), Some(loaded));
        assert_eq!(state.active_shop, "north");
    }

    #[test]
    fn test_reconcile_retains_extra_shop_entries() {
        let catalog = catalog();

        let mut loaded = AppState::defaults(&catalog);
        loaded
            .counters_mut("retired-stand")
            .sold
            .insert("old-item".to_string(), 9);

        let state = reconcile(&catalog, AppState::defaults(&catalog), Some(loaded));

        // Retained for the next save, ignored by catalog-driven views.
        assert_eq!(state.sold_count("retired-stand", "old-item"), 9);
    }

    #[test]
    fn test_persisted_payload_shape() {
        let catalog = catalog();
        let mut state = AppState::defaults(&catalog);
        state.counters_mut("north").sold.insert("yakisoba".to_string(), 2);

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["activeShop"], "north");
        assert_eq!(json["showRevenue"], false);
        assert_eq!(json["shops"]["north"]["sold"]["yakisoba"], 2);
    }

    #[test]
    fn test_partial_payload_loads_with_defaults() {
        // A payload from an older schema with fields missing entirely.
        let state: AppState = serde_json::from_str(r#"{"activeShop": "north"}"#).unwrap();

        assert_eq!(state.active_shop, "north");
        assert!(!state.show_revenue);
        assert!(state.shops.is_empty());
    }
}
