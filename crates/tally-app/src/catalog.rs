//! # Catalog Loading
//!
//! Reads and validates the catalog file at startup.
//!
//! ## Catalog File Format
//! A bare JSON array of shops:
//! ```json
//! [
//!   {"id": "north", "name": "North Stand", "products": [
//!     {"id": "yakisoba", "name": "Yakisoba", "category": "Food",
//!      "stock": 30, "price": 500}
//!   ]}
//! ]
//! ```
//!
//! The catalog is the one input the whole session hangs off, so unlike
//! persistence failures (which degrade), a missing or invalid catalog
//! file is a hard startup error.

use std::path::Path;

use tracing::info;

use crate::error::{AppError, AppResult};
use tally_core::validation::validate_catalog;
use tally_core::Catalog;

/// Loads and validates the catalog from a JSON file.
///
/// ## Returns
/// * `Ok(Catalog)` - parsed and validated
/// * `Err(AppError)` - unreadable file, malformed JSON, or a catalog that
///   fails validation (duplicate ids, empty names, negative prices)
pub fn load_catalog(path: &Path) -> AppResult<Catalog> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        AppError::storage(format!("Cannot read catalog file {}: {}", path.display(), e))
    })?;

    let catalog: Catalog = serde_json::from_str(&raw).map_err(|e| {
        AppError::validation(format!("Catalog file {} is not valid: {}", path.display(), e))
    })?;

    validate_catalog(&catalog)?;

    info!(
        path = %path.display(),
        shops = catalog.len(),
        "Catalog loaded"
    );

    Ok(catalog)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("tally-catalog-test-{name}.json"));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_valid_catalog() {
        let path = write_temp(
            "valid",
            r#"[
                {"id": "north", "name": "North Stand", "products": [
                    {"id": "yakisoba", "name": "Yakisoba", "category": "Food",
                     "stock": 30, "price": 500}
                ]}
            ]"#,
        );

        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.product("north", "yakisoba").is_some());
    }

    #[test]
    fn test_missing_file_is_storage_error() {
        let err = load_catalog(Path::new("/definitely/not/here.json")).unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageError);
    }

    #[test]
    fn test_malformed_json_is_validation_error() {
        let path = write_temp("malformed", "[{not json");
        let err = load_catalog(&path).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_invalid_catalog_is_rejected() {
        // Two shops with the same id.
        let path = write_temp(
            "duplicate",
            r#"[
                {"id": "north", "name": "A", "products": []},
                {"id": "north", "name": "B", "products": []}
            ]"#,
        );
        let err = load_catalog(&path).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
