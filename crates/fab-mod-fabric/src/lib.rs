//! Everything fabrica knows about the external `fabric` CLI: building the
//! command lines it runs, fetching and caching its pattern list, and the
//! bundled Spanish descriptions for well-known patterns.

pub mod catalog;
pub mod command;
pub mod descriptions;

pub use catalog::{PatternCatalog, parse_pattern_list};
pub use command::{GenerationRequest, InputMode, build_command, normalize_model};
