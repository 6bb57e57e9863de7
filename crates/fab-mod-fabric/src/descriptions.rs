//! Bundled Spanish descriptions for well-known fabric patterns.
//!
//! The table is data, not code: `resources/descriptions.json` is embedded at
//! compile time and parsed once on first use. Patterns missing from the table
//! simply have no description.

use std::collections::HashMap;
use std::sync::LazyLock;

static DESCRIPTIONS: LazyLock<HashMap<String, String>> = LazyLock::new(|| {
    serde_json::from_str(include_str!("../resources/descriptions.json")).unwrap_or_default()
});

/// Spanish description for a pattern, if the bundled table has one.
pub fn describe(pattern: &str) -> Option<&'static str> {
    DESCRIPTIONS.get(pattern).map(String::as_str)
}

/// Number of patterns the bundled table covers.
pub fn len() -> usize {
    DESCRIPTIONS.len()
}
