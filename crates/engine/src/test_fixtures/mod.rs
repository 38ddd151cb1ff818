//! Test fixtures: a small SRD-flavoured catalog, draft builders, and a
//! loader for JSON files under `test_data/`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_fixtures::{catalog, drafts};
//!
//! #[test]
//! fn fighter_is_proficient_in_strength_saves() {
//!     let data = Aggregator::new(&catalog::srd()).aggregate(&drafts::dwarf_fighter(5));
//!     // ... test logic
//! }
//! ```

pub mod catalog;
pub mod drafts;

use std::path::PathBuf;

/// Path of a file under `test_data/`.
pub fn fixture_path(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_data")
        .join(path)
}

/// Load a JSON fixture from the `test_data/` directory.
///
/// # Panics
///
/// Panics if the fixture file cannot be read or parsed.
pub fn load_fixture<T: serde::de::DeserializeOwned>(path: &str) -> T {
    let fixture_path = fixture_path(path);
    let content = std::fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read fixture '{}': {}",
            fixture_path.display(),
            e
        )
    });
    serde_json::from_str(&content).unwrap_or_else(|e| {
        panic!(
            "Failed to parse fixture '{}': {}",
            fixture_path.display(),
            e
        )
    })
}
