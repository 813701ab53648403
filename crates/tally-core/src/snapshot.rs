//! # Export Snapshot
//!
//! Serializes the current state plus the catalog into a single JSON
//! document for external backup.
//!
//! ## Export Shape
//! ```text
//! {
//!   "exportedAt": "2026-08-07T10:30:00Z",
//!   "shops": [
//!     {"id": "north", "name": "North Stand", "products": [
//!       {"id": "yakisoba", "name": "Yakisoba", "category": "Food",
//!        "stock": 30, "price": 500, "sold": 12}
//!     ], "revenue": 6000}
//!   ],
//!   "totalRevenue": 6000
//! }
//! ```
//!
//! Construction is a pure function of (catalog, state, timestamp): the
//! caller supplies `exported_at`, so the only non-deterministic input
//! stays outside this crate. Building never fails - a stale or missing
//! shop entry in the state reads as zero sold.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::money::Money;
use crate::state::AppState;

/// Default filename a shell should offer when saving a backup.
pub const DEFAULT_BACKUP_FILENAME: &str = "event-backup.json";

// =============================================================================
// Snapshot Types
// =============================================================================

/// One product line in the export: the catalog row plus the current sold
/// count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductExport {
    pub id: String,
    pub name: String,
    pub category: String,
    pub stock: u32,
    pub price: Money,
    pub sold: u32,
}

/// One shop in the export, with its computed revenue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopExport {
    pub id: String,
    pub name: String,
    pub products: Vec<ProductExport>,
    pub revenue: Money,
}

/// A point-in-time JSON export of full state plus catalog and derived
/// revenue figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// When the export was taken (ISO-8601).
    pub exported_at: DateTime<Utc>,
    /// Shops in catalog order.
    pub shops: Vec<ShopExport>,
    /// Sum of every shop's revenue.
    pub total_revenue: Money,
}

// =============================================================================
// Construction
// =============================================================================

impl Snapshot {
    /// Builds a snapshot from the catalog and the current state.
    ///
    /// Shops and products are emitted in catalog order; sold counts
    /// missing from the state read as zero. Counter entries for shops or
    /// products no longer in the catalog are not exported.
    pub fn build(catalog: &Catalog, state: &AppState, exported_at: DateTime<Utc>) -> Snapshot {
        let shops: Vec<ShopExport> = catalog
            .shops()
            .iter()
            .map(|shop| {
                let products: Vec<ProductExport> = shop
                    .products
                    .iter()
                    .map(|p| ProductExport {
                        id: p.id.clone(),
                        name: p.name.clone(),
                        category: p.category.clone(),
                        stock: p.stock,
                        price: p.price,
                        sold: state.sold_count(&shop.id, &p.id),
                    })
                    .collect();

                let revenue = products.iter().map(|p| p.price.times(p.sold)).sum();

                ShopExport {
                    id: shop.id.clone(),
                    name: shop.name.clone(),
                    products,
                    revenue,
                }
            })
            .collect();

        let total_revenue = shops.iter().map(|s| s.revenue).sum();

        Snapshot {
            exported_at,
            shops,
            total_revenue,
        }
    }

    /// Renders the snapshot as two-space-indented JSON, the format the
    /// backup file is written in.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
