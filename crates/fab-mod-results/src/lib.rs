//! Flat-directory store for generated results.
//!
//! Each result is a timestamped markdown file (`resultado_YYYYMMDD_HHMMSS.md`)
//! with an optional rendered PDF sibling sharing the same stem.

mod store;

pub use store::{DESCRIPTION_FALLBACK, ResultStore, describe_content, timestamp_name};
