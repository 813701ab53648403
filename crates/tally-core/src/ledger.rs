//! # Ledger Operations
//!
//! Counter mutations with stock-boundary enforcement, plus the derived
//! revenue computations.
//!
//! ## Boundary Guards
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Counter State Machine                       │
//! │                                                             │
//! │            increment                increment               │
//! │   sold=0 ───────────► sold=1 ─ ... ───────────► sold=stock  │
//! │      ▲                                              │       │
//! │      │  decrement: no-op            increment: no-op│       │
//! │      └──────── (already zero)    (sold out) ────────┘       │
//! │                                                             │
//! │  Both guards return Ok(false): nothing changed, nothing to  │
//! │  persist, nothing to re-render. They are guard rails, not   │
//! │  error paths.                                               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unknown shop/product ids DO error - a caller asking to tally a product
//! the catalog does not define is a bug, not a boundary.

use crate::catalog::{Catalog, Product};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::state::{AppState, SoldCounters};

// =============================================================================
// Lookup Helper
// =============================================================================

/// Resolves a (shop, product) pair against the catalog, distinguishing an
/// unknown shop from an unknown product for error reporting.
fn resolve<'a>(catalog: &'a Catalog, shop_id: &str, product_id: &str) -> CoreResult<&'a Product> {
    let shop = catalog
        .shop(shop_id)
        .ok_or_else(|| CoreError::ShopNotFound(shop_id.to_string()))?;

    shop.product(product_id)
        .ok_or_else(|| CoreError::ProductNotFound {
            shop_id: shop_id.to_string(),
            product_id: product_id.to_string(),
        })
}

// =============================================================================
// Mutations
// =============================================================================

/// Records one unit sold.
///
/// ## Returns
/// * `Ok(true)` - the counter moved; the caller should persist and
///   re-render
/// * `Ok(false)` - remaining stock was zero; silent no-op
/// * `Err(_)` - the shop or product is not in the catalog
pub fn increment(
    catalog: &Catalog,
    state: &mut AppState,
    shop_id: &str,
    product_id: &str,
) -> CoreResult<bool> {
    let product = resolve(catalog, shop_id, product_id)?;

    let counters = state.counters_mut(shop_id);
    let sold = counters.count(product_id);

    // A persisted count can sit above a shrunk catalog stock; treat that
    // as sold out too rather than pushing it further.
    if sold >= product.stock {
        return Ok(false);
    }

    counters.sold.insert(product_id.to_string(), sold + 1);
    Ok(true)
}

/// Returns one unit (a miscount or a refund at the stall).
///
/// ## Returns
/// * `Ok(true)` - the counter moved
/// * `Ok(false)` - the sold count was already zero; silent no-op
/// * `Err(_)` - the shop or product is not in the catalog
pub fn decrement(
    catalog: &Catalog,
    state: &mut AppState,
    shop_id: &str,
    product_id: &str,
) -> CoreResult<bool> {
    resolve(catalog, shop_id, product_id)?;

    let counters = state.counters_mut(shop_id);
    let sold = counters.count(product_id);

    if sold == 0 {
        return Ok(false);
    }

    counters.sold.insert(product_id.to_string(), sold - 1);
    Ok(true)
}

// =============================================================================
// Derived Values
// =============================================================================

/// Stock minus sold count, saturating at zero.
///
/// The saturation only engages when a persisted count exceeds a later,
/// smaller catalog stock; counts produced by [`increment`] never pass
/// `product.stock`.
pub fn remaining_stock(product: &Product, counters: &SoldCounters) -> u32 {
    product.stock.saturating_sub(counters.count(&product.id))
}

/// True when no stock remains.
pub fn is_sold_out(product: &Product, counters: &SoldCounters) -> bool {
    remaining_stock(product, counters) == 0
}

/// Revenue for one shop: Σ sold(p) × p.price over the shop's catalog
/// products. Counter entries for products no longer in the catalog do not
/// contribute.
pub fn revenue_by_shop(catalog: &Catalog, state: &AppState, shop_id: &str) -> CoreResult<Money> {
    let shop = catalog
        .shop(shop_id)
        .ok_or_else(|| CoreError::ShopNotFound(shop_id.to_string()))?;

    Ok(shop
        .products
        .iter()
        .map(|p| p.price.times(state.sold_count(shop_id, &p.id)))
        .sum())
}

/// Total revenue across every catalog shop.
pub fn total_revenue(catalog: &Catalog, state: &AppState) -> Money {
    catalog
        .shops()
        .iter()
        .map(|shop| {
            shop.products
                .iter()
                .map(|p| p.price.times(state.sold_count(&shop.id, &p.id)))
                .sum()
        })
        .sum()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Shop;

    /// Shop A with Product X (stock=2, price=500), plus a second shop so
    /// the totals cross shops.
    fn catalog() -> Catalog {
        Catalog::new(vec![
            Shop {
                id: "a".to_string(),
                name: "Shop A".to_string(),
                products: vec![
                    Product {
                        id: "x".to_string(),
                        name: "Product X".to_string(),
                        category: "Food".to_string(),
                        stock: 2,
                        price: Money::from_minor(500),
                    },
                    Product {
                        id: "y".to_string(),
                        name: "Product Y".to_string(),
                        category: "Drink".to_string(),
                        stock: 10,
                        price: Money::from_minor(200),
                    },
                ],
            },
            Shop {
                id: "b".to_string(),
                name: "Shop B".to_string(),
                products: vec![Product {
                    id: "z".to_string(),
                    name: "Product Z".to_string(),
                    category: "Food".to_string(),
                    stock: 5,
                    price: Money::from_minor(300),
                }],
            },
        ])
    }

    #[test]
    fn test_increment_until_sold_out_then_noop() {
        let catalog = catalog();
        let mut state = AppState::defaults(&catalog);

        assert!(increment(&catalog, &mut state, "a", "x").unwrap());
        assert!(increment(&catalog, &mut state, "a", "x").unwrap());
        assert_eq!(state.sold_count("a", "x"), 2);

        let product = catalog.product("a", "x").unwrap();
        assert_eq!(remaining_stock(product, state.counters("a").unwrap()), 0);
        assert!(is_sold_out(product, state.counters("a").unwrap()));

        // Third increment hits the boundary: silent no-op.
        assert!(!increment(&catalog, &mut state, "a", "x").unwrap());
        assert_eq!(state.sold_count("a", "x"), 2);

        assert!(decrement(&catalog, &mut state, "a", "x").unwrap());
        assert_eq!(state.sold_count("a", "x"), 1);

        // Scenario from the backup-format contract: one unit at ¥500.
        // (After the decrement above, one X remains sold.)
        assert_eq!(
            revenue_by_shop(&catalog, &state, "a").unwrap(),
            Money::from_minor(500)
        );
    }

    #[test]
    fn test_zero_stock_product_never_moves() {
        let catalog = Catalog::new(vec![Shop {
            id: "a".to_string(),
            name: "Shop A".to_string(),
            products: vec![Product {
                id: "x".to_string(),
                name: "Product X".to_string(),
                category: "Food".to_string(),
                stock: 0,
                price: Money::from_minor(500),
            }],
        }]);
        let mut state = AppState::defaults(&catalog);

        // Both directions guard: the counter is pinned at zero.
        assert!(!increment(&catalog, &mut state, "a", "x").unwrap());
        assert!(!decrement(&catalog, &mut state, "a", "x").unwrap());
        assert_eq!(state.sold_count("a", "x"), 0);
    }

    #[test]
    fn test_decrement_at_zero_is_noop() {
        let catalog = catalog();
        let mut state = AppState::defaults(&catalog);

        assert!(!decrement(&catalog, &mut state, "a", "x").unwrap());
        assert_eq!(state.sold_count("a", "x"), 0);
    }

    #[test]
    fn test_increment_then_decrement_round_trips() {
        let catalog = catalog();
        let mut state = AppState::defaults(&catalog);

        increment(&catalog, &mut state, "a", "y").unwrap();
        let before = state.clone();

        assert!(increment(&catalog, &mut state, "a", "y").unwrap());
        assert!(decrement(&catalog, &mut state, "a", "y").unwrap());
        assert_eq!(state, before);
    }

    #[test]
    fn test_bounds_hold_under_any_sequence() {
        let catalog = catalog();
        let mut state = AppState::defaults(&catalog);
        let product = catalog.product("a", "x").unwrap();

        // A hostile mash of plus/minus presses never escapes [0, stock].
        let presses = [1, 1, -1, 1, 1, 1, -1, -1, -1, -1, -1, 1];
        for press in presses {
            if press > 0 {
                increment(&catalog, &mut state, "a", "x").unwrap();
            } else {
                decrement(&catalog, &mut state, "a", "x").unwrap();
            }

            let sold = state.sold_count("a", "x");
            assert!(sold <= product.stock);
            let remaining = remaining_stock(product, state.counters("a").unwrap());
            assert!(remaining <= product.stock);
            assert_eq!(remaining, product.stock - sold);
        }
    }

    #[test]
    fn test_unknown_ids_error() {
        let catalog = catalog();
        let mut state = AppState::defaults(&catalog);

        assert!(matches!(
            increment(&catalog, &mut state, "nope", "x"),
            Err(CoreError::ShopNotFound(_))
        ));
        assert!(matches!(
            increment(&catalog, &mut state, "a", "nope"),
            Err(CoreError::ProductNotFound { .. })
        ));
        assert!(matches!(
            decrement(&catalog, &mut state, "a", "nope"),
            Err(CoreError::ProductNotFound { .. })
        ));
        assert!(matches!(
            revenue_by_shop(&catalog, &state, "nope"),
            Err(CoreError::ShopNotFound(_))
        ));
    }

    #[test]
    fn test_revenue_sums() {
        let catalog = catalog();
        let mut state = AppState::defaults(&catalog);

        increment(&catalog, &mut state, "a", "x").unwrap();
        increment(&catalog, &mut state, "a", "y").unwrap();
        increment(&catalog, &mut state, "a", "y").unwrap();
        increment(&catalog, &mut state, "b", "z").unwrap();

        let a = revenue_by_shop(&catalog, &state, "a").unwrap();
        let b = revenue_by_shop(&catalog, &state, "b").unwrap();
        assert_eq!(a, Money::from_minor(500 + 2 * 200));
        assert_eq!(b, Money::from_minor(300));
        assert_eq!(total_revenue(&catalog, &state), a + b);
    }

    #[test]
    fn test_revenue_ignores_stale_counter_entries() {
        let catalog = catalog();
        let mut state = AppState::defaults(&catalog);

        // Product removed from the catalog since the save.
        state
            .counters_mut("a")
            .sold
            .insert("discontinued".to_string(), 40);

        assert_eq!(
            revenue_by_shop(&catalog, &state, "a").unwrap(),
            Money::zero()
        );
        assert_eq!(total_revenue(&catalog, &state), Money::zero());
    }

    #[test]
    fn test_oversold_persisted_count_clamps_and_blocks() {
        let catalog = catalog();
        let mut state = AppState::defaults(&catalog);

        // Stock used to be 9; catalog now says 2.
        state.counters_mut("a").sold.insert("x".to_string(), 9);
        let product = catalog.product("a", "x").unwrap();

        assert_eq!(remaining_stock(product, state.counters("a").unwrap()), 0);
        assert!(!increment(&catalog, &mut state, "a", "x").unwrap());
        assert_eq!(state.sold_count("a", "x"), 9);

        // Decrement still walks it back down.
        assert!(decrement(&catalog, &mut state, "a", "x").unwrap());
        assert_eq!(state.sold_count("a", "x"), 8);
    }
}
