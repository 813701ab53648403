//! # Application Configuration
//!
//! Paths and display settings loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`TALLY_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tally_core::Money;

/// Placeholder rendered instead of an amount while revenue is hidden.
const MASK: &str = "•••••";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Path of the SQLite state store file.
    pub db_path: PathBuf,

    /// Path of the catalog JSON file.
    pub catalog_path: PathBuf,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency (0 for yen-style prices)
    pub currency_decimals: u8,
}

impl Default for AppConfig {
    /// Returns default configuration.
    ///
    /// ## Default Values
    /// - State store: `<platform data dir>/tally.db`
    /// - Catalog: `./catalog.json`
    /// - Currency: ¥, no decimals
    fn default() -> Self {
        AppConfig {
            db_path: default_db_path(),
            catalog_path: PathBuf::from("catalog.json"),
            currency_symbol: "¥".to_string(),
            currency_decimals: 0,
        }
    }
}

/// Platform-specific default location for the state store.
///
/// - **macOS**: `~/Library/Application Support/com.eventtally.tally/tally.db`
/// - **Windows**: `%APPDATA%\eventtally\tally\tally.db`
/// - **Linux**: `~/.local/share/tally/tally.db`
///
/// Falls back to the working directory when the platform refuses to name
/// a data dir (containers without a home, mostly).
fn default_db_path() -> PathBuf {
    match ProjectDirs::from("com", "eventtally", "tally") {
        Some(dirs) => dirs.data_dir().join("tally.db"),
        None => PathBuf::from("tally.db"),
    }
}

impl AppConfig {
    /// Creates an AppConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `TALLY_DB_PATH`: Override the state store path
    /// - `TALLY_CATALOG_PATH`: Override the catalog file path
    /// - `TALLY_CURRENCY_SYMBOL`: Override the display currency symbol
    pub fn from_env() -> Self {
        let mut config = AppConfig::default();

        if let Ok(db_path) = std::env::var("TALLY_DB_PATH") {
            config.db_path = PathBuf::from(db_path);
        }

        if let Ok(catalog_path) = std::env::var("TALLY_CATALOG_PATH") {
            config.catalog_path = PathBuf::from(catalog_path);
        }

        if let Ok(symbol) = std::env::var("TALLY_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        config
    }

    /// Formats a money amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use tally_app::config::AppConfig;
    /// use tally_core::Money;
    ///
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_money(Money::from_minor(500)), "¥500");
    /// ```
    pub fn format_money(&self, amount: Money) -> String {
        let minor = amount.minor();
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = minor / divisor;
        let frac = (minor % divisor).abs();

        format!(
            "{}{}{}",
            if minor < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                whole.abs().to_string()
            }
        )
    }

    /// Formats a revenue figure, masking the amount while revenue display
    /// is toggled off.
    ///
    /// ## Example
    /// ```rust
    /// use tally_app::config::AppConfig;
    /// use tally_core::Money;
    ///
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_revenue(Money::from_minor(500), true), "¥500");
    /// assert_eq!(config.format_revenue(Money::from_minor(500), false), "¥•••••");
    /// ```
    pub fn format_revenue(&self, amount: Money, show_revenue: bool) -> String {
        if show_revenue {
            self.format_money(amount)
        } else {
            format!("{}{}", self.currency_symbol, MASK)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
