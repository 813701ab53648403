//! # Tally Controller
//!
//! The presentation-facing API. A rendering shell owns one controller,
//! dispatches user actions into it, and re-renders from its state.
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   One User Action                           │
//! │                                                             │
//! │  tap [+] ──► controller.increment("yakisoba")               │
//! │                   │                                         │
//! │                   ├── ledger mutation (bounded by stock)    │
//! │                   │                                         │
//! │                   ├── changed? ──► enqueue background save  │
//! │                   │                                         │
//! │                   ▼                                         │
//! │              Mutation { changed, persist }                  │
//! │                   │                                         │
//! │     changed == true ──► shell re-renders                    │
//! │     persist ──► ignored by the shell, awaited by tests      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! The controller holds the only `AppState` and the only mutation rights
//! to it. Every method is synchronous; durability happens behind the
//! persistence queue. When the store is unavailable the controller keeps
//! running memory-only and reports it via [`TallyController::degraded`].

use std::path::Path;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::catalog::load_catalog;
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::persist::{PersistQueue, PersistTask};
use tally_core::validation::validate_catalog;
use tally_core::{ledger, reconcile, AppState, Catalog, CoreError, Money, Shop, Snapshot};
use tally_db::{Database, DbConfig};

// =============================================================================
// Mutation Result
// =============================================================================

/// Result of a state mutation.
#[derive(Debug)]
pub struct Mutation {
    /// Whether the state changed. `false` means a boundary guard fired
    /// (sold out, or already at zero): nothing to persist, nothing to
    /// re-render.
    pub changed: bool,

    /// Handle to the background save triggered by this mutation.
    /// Skipped when nothing changed or the controller is memory-only.
    pub persist: PersistTask,
}

// =============================================================================
// Controller
// =============================================================================

/// The application controller: catalog + state + persistence.
#[derive(Debug)]
pub struct TallyController {
    catalog: Catalog,
    state: AppState,
    store: Option<PersistQueue>,
}

impl TallyController {
    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    /// Starts a controller from configuration: loads the catalog file,
    /// opens the state store, reconciles persisted state over defaults.
    ///
    /// ## Startup Sequence
    /// 1. Load and validate the catalog (hard error if broken)
    /// 2. Open the SQLite store, running migrations
    /// 3. Load persisted state and reconcile against the catalog
    ///
    /// A store that cannot be opened does NOT fail startup: the event
    /// does not stop because a disk did. The controller comes up
    /// memory-only with [`TallyController::degraded`] set.
    pub async fn start(config: &AppConfig) -> AppResult<Self> {
        let catalog = load_catalog(&config.catalog_path)?;

        if let Some(parent) = config.db_path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!(
                    error = %e,
                    path = %parent.display(),
                    "Cannot create data directory; running memory-only"
                );
                return Self::memory_only(catalog);
            }
        }

        match Database::new(DbConfig::new(&config.db_path)).await {
            Ok(db) => Self::with_database(catalog, db).await,
            Err(e) => {
                warn!(
                    error = %e,
                    "State store unavailable; counters will not survive a restart"
                );
                Self::memory_only(catalog)
            }
        }
    }

    /// Creates a controller on an already-open database.
    ///
    /// Used by `start`, and directly by tests with an in-memory store.
    pub async fn with_database(catalog: Catalog, db: Database) -> AppResult<Self> {
        validate_catalog(&catalog)?;

        let repo = db.state();
        let loaded = match repo.load().await {
            Ok(loaded) => loaded,
            Err(e) => {
                // Reads failing does not doom writes; the degraded flag
                // will flip if saves fail too.
                warn!(error = %e, "Could not read persisted state; starting from defaults");
                None
            }
        };

        if let Some(loaded) = &loaded {
            if !catalog.contains_shop(&loaded.active_shop) {
                warn!(
                    stale = %loaded.active_shop,
                    "Persisted active shop is no longer in the catalog; \
                     falling back to the first shop"
                );
            }
        }

        let state = reconcile(&catalog, AppState::defaults(&catalog), loaded);
        info!(
            active_shop = %state.active_shop,
            shops = state.shops.len(),
            "Controller ready"
        );

        Ok(TallyController {
            catalog,
            state,
            store: Some(PersistQueue::spawn(repo)),
        })
    }

    /// Creates a controller with no durable store at all.
    ///
    /// Every mutation's persist handle resolves as skipped and
    /// [`TallyController::degraded`] reports `true` from the start.
    pub fn memory_only(catalog: Catalog) -> AppResult<Self> {
        validate_catalog(&catalog)?;

        let state = AppState::defaults(&catalog);
        Ok(TallyController {
            catalog,
            state,
            store: None,
        })
    }

    // -------------------------------------------------------------------------
    // Read API
    // -------------------------------------------------------------------------

    /// The read-only catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The current application state (read-only; mutations go through
    /// the methods below).
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Id of the active shop.
    pub fn active_shop_id(&self) -> &str {
        &self.state.active_shop
    }

    /// The active shop's catalog entry.
    pub fn active_shop(&self) -> AppResult<&Shop> {
        self.catalog
            .shop(&self.state.active_shop)
            .or_else(|| self.catalog.first_shop())
            .ok_or_else(|| CoreError::ShopNotFound(self.state.active_shop.clone()).into())
    }

    /// Whether revenue figures are currently shown unmasked.
    pub fn show_revenue(&self) -> bool {
        self.state.show_revenue
    }

    /// Sold count for a product in the active shop (0 when never sold).
    pub fn sold_count(&self, product_id: &str) -> u32 {
        self.state.sold_count(&self.state.active_shop, product_id)
    }

    /// Remaining stock for a product in the active shop.
    pub fn remaining_stock(&self, product_id: &str) -> AppResult<u32> {
        let shop = self.active_shop()?;
        let product = shop
            .product(product_id)
            .ok_or_else(|| CoreError::ProductNotFound {
                shop_id: shop.id.clone(),
                product_id: product_id.to_string(),
            })?;

        Ok(match self.state.counters(&shop.id) {
            Some(counters) => ledger::remaining_stock(product, counters),
            None => product.stock,
        })
    }

    /// Revenue for one shop.
    pub fn revenue_by_shop(&self, shop_id: &str) -> AppResult<Money> {
        Ok(ledger::revenue_by_shop(&self.catalog, &self.state, shop_id)?)
    }

    /// Total revenue across all shops.
    pub fn total_revenue(&self) -> Money {
        ledger::total_revenue(&self.catalog, &self.state)
    }

    /// Whether changes may not be reaching durable storage - either the
    /// store never opened, or a background save has failed. The shell
    /// surfaces this as a non-blocking warning; tallying keeps working.
    pub fn degraded(&self) -> bool {
        match &self.store {
            Some(queue) => queue.is_degraded(),
            None => true,
        }
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Records one unit sold for a product in the active shop.
    ///
    /// Sold out → silent no-op (`changed: false`), per the boundary-guard
    /// contract. Unknown product → error.
    pub fn increment(&mut self, product_id: &str) -> AppResult<Mutation> {
        let shop_id = self.state.active_shop.clone();
        debug!(shop = %shop_id, product = %product_id, "increment");

        let changed = ledger::increment(&self.catalog, &mut self.state, &shop_id, product_id)?;
        Ok(self.finish(changed))
    }

    /// Returns one unit for a product in the active shop.
    ///
    /// Already at zero → silent no-op (`changed: false`).
    pub fn decrement(&mut self, product_id: &str) -> AppResult<Mutation> {
        let shop_id = self.state.active_shop.clone();
        debug!(shop = %shop_id, product = %product_id, "decrement");

        let changed = ledger::decrement(&self.catalog, &mut self.state, &shop_id, product_id)?;
        Ok(self.finish(changed))
    }

    /// Switches the active shop.
    ///
    /// Always persists and signals a re-render, even when the id matches
    /// the current active shop.
    pub fn set_active_shop(&mut self, shop_id: &str) -> AppResult<Mutation> {
        if !self.catalog.contains_shop(shop_id) {
            return Err(CoreError::ShopNotFound(shop_id.to_string()).into());
        }

        debug!(shop = %shop_id, "set_active_shop");
        self.state.active_shop = shop_id.to_string();
        Ok(self.finish(true))
    }

    /// Toggles whether revenue figures are shown unmasked.
    pub fn toggle_revenue_visibility(&mut self) -> Mutation {
        self.state.show_revenue = !self.state.show_revenue;
        debug!(show_revenue = self.state.show_revenue, "toggle_revenue_visibility");
        self.finish(true)
    }

    // -------------------------------------------------------------------------
    // Export
    // -------------------------------------------------------------------------

    /// Builds an export snapshot of the full state plus catalog, stamped
    /// with the current time.
    pub fn export_snapshot(&self) -> Snapshot {
        Snapshot::build(&self.catalog, &self.state, Utc::now())
    }

    /// Builds a snapshot and writes it to a backup file as pretty JSON.
    ///
    /// Shells usually offer [`tally_core::DEFAULT_BACKUP_FILENAME`] as the
    /// file name.
    pub fn export_to_file(&self, path: &Path) -> AppResult<()> {
        let snapshot = self.export_snapshot();
        let json = snapshot
            .to_json_pretty()
            .map_err(|e| AppError::storage(format!("Cannot serialize backup: {e}")))?;

        std::fs::write(path, json).map_err(|e| {
            AppError::storage(format!("Cannot write backup {}: {}", path.display(), e))
        })?;

        info!(path = %path.display(), "Backup written");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Enqueues a save when the mutation changed anything.
    fn finish(&self, changed: bool) -> Mutation {
        let persist = if changed {
            match &self.store {
                Some(queue) => queue.enqueue(self.state.clone()),
                None => PersistTask::skipped(),
            }
        } else {
            PersistTask::skipped()
        };

        Mutation { changed, persist }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
