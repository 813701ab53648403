//! # State Repository
//!
//! Load/save of the singleton application-state record.
//!
//! ## Storage Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  app_state table                            │
//! │                                                             │
//! │  key      │ payload                        │ updated_at     │
//! │  ─────────┼────────────────────────────────┼──────────────  │
//! │  "state"  │ {"activeShop":"north", ...}    │ 2026-08-07...  │
//! │                                                             │
//! │  • Exactly one row ever exists                              │
//! │  • save() is ONE upsert statement: atomic by construction   │
//! │  • load() tolerates a missing row (first launch) and a      │
//! │    corrupt payload (treated as absent, logged)              │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::DbResult;
use tally_core::AppState;

/// Fixed key of the singleton state record.
pub const STATE_KEY: &str = "state";

/// Repository for the application-state record.
///
/// ## Usage
/// ```rust,ignore
/// let repo = StateRepository::new(pool);
///
/// let loaded: Option<AppState> = repo.load().await?;
/// repo.save(&state).await?;
/// ```
#[derive(Debug, Clone)]
pub struct StateRepository {
    pool: SqlitePool,
}

impl StateRepository {
    /// Creates a new StateRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StateRepository { pool }
    }

    /// Loads the persisted application state, if any.
    ///
    /// ## Returns
    /// * `Ok(Some(state))` - a prior session saved state
    /// * `Ok(None)` - first launch, or the stored payload was corrupt
    ///   (logged as a warning; the caller starts from defaults)
    /// * `Err(_)` - the store itself could not be read
    ///
    /// Shape drift is tolerated by the payload type itself: unknown
    /// fields are dropped, missing fields take serde defaults, and
    /// reconciliation against the catalog happens in tally-core.
    pub async fn load(&self) -> DbResult<Option<AppState>> {
        let payload: Option<String> =
            sqlx::query_scalar("SELECT payload FROM app_state WHERE key = ?1")
                .bind(STATE_KEY)
                .fetch_optional(&self.pool)
                .await?;

        let Some(payload) = payload else {
            debug!("No persisted state found");
            return Ok(None);
        };

        match serde_json::from_str::<AppState>(&payload) {
            Ok(state) => {
                debug!(shops = state.shops.len(), "Loaded persisted state");
                Ok(Some(state))
            }
            Err(e) => {
                // There is no versioned migration path for the payload;
                // a broken record must not take the session down with it.
                warn!(error = %e, "Persisted state is corrupt, starting fresh");
                Ok(None)
            }
        }
    }

    /// Persists the full application state as one atomic upsert.
    ///
    /// A crash before the statement commits leaves the previous record
    /// intact; a crash after leaves the new one. Nothing in between is
    /// observable.
    pub async fn save(&self, state: &AppState) -> DbResult<()> {
        let payload = serde_json::to_string(state)?;

        sqlx::query(
            r#"
            INSERT INTO app_state (key, payload, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(STATE_KEY)
        .bind(&payload)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        debug!(bytes = payload.len(), "State persisted");
        Ok(())
    }

    /// When the state record was last written, for diagnostics.
    pub async fn last_saved_at(&self) -> DbResult<Option<DateTime<Utc>>> {
        let updated_at: Option<DateTime<Utc>> =
            sqlx::query_scalar("SELECT updated_at FROM app_state WHERE key = ?1")
                .bind(STATE_KEY)
                .fetch_optional(&self.pool)
                .await?;

        Ok(updated_at)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn repo() -> StateRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().state()
    }

    fn sample_state() -> AppState {
        let mut state = AppState::default();
        state.active_shop = "north".to_string();
        state.show_revenue = true;
        state
            .counters_mut("north")
            .sold
            .insert("yakisoba".to_string(), 12);
        state
    }

    #[tokio::test]
    async fn test_load_on_fresh_store_returns_none() {
        let repo = repo().await;
        assert!(repo.load().await.unwrap().is_none());
        assert!(repo.last_saved_at().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let repo = repo().await;
        let state = sample_state();

        repo.save(&state).await.unwrap();

        let loaded = repo.load().await.unwrap().unwrap();
        assert_eq!(loaded, state);
        assert!(repo.last_saved_at().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_save_is_an_upsert_of_one_row() {
        let repo = repo().await;

        repo.save(&sample_state()).await.unwrap();

        let mut newer = sample_state();
        newer.counters_mut("north").sold.insert("yakisoba".to_string(), 13);
        repo.save(&newer).await.unwrap();

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM app_state")
            .fetch_one(&repo.pool)
            .await
            .unwrap();
        assert_eq!(rows, 1);

        let loaded = repo.load().await.unwrap().unwrap();
        assert_eq!(loaded.sold_count("north", "yakisoba"), 13);
    }

    #[tokio::test]
    async fn test_corrupt_payload_loads_as_none() {
        let repo = repo().await;

        sqlx::query("INSERT INTO app_state (key, payload, updated_at) VALUES (?1, ?2, ?3)")
            .bind(STATE_KEY)
            .bind("{not json")
            .bind(Utc::now())
            .execute(&repo.pool)
            .await
            .unwrap();

        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_fields_in_payload_are_tolerated() {
        let repo = repo().await;

        // A payload written by a future (or past) schema.
        let payload = r#"{"activeShop":"north","showRevenue":false,"shops":{},"theme":"dark"}"#;
        sqlx::query("INSERT INTO app_state (key, payload, updated_at) VALUES (?1, ?2, ?3)")
            .bind(STATE_KEY)
            .bind(payload)
            .bind(Utc::now())
            .execute(&repo.pool)
            .await
            .unwrap();

        let loaded = repo.load().await.unwrap().unwrap();
        assert_eq!(loaded.active_shop, "north");
    }
}
