//! Pattern list retrieval (`fabric -l`) with an in-memory TTL cache.

use std::time::{Duration, Instant};

use fab_base::process;

/// The parsed output of `fabric -l`, remembered together with when it was
/// fetched. Held by the UI state; `is_stale` decides when to refresh.
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    pub patterns: Vec<String>,
    fetched_at: Instant,
}

impl PatternCatalog {
    pub fn new(patterns: Vec<String>) -> Self {
        Self { patterns, fetched_at: Instant::now() }
    }

    pub fn is_stale(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() >= ttl
    }
}

/// Extract pattern names from `fabric -l` stdout: one per line, trimmed,
/// dropping blanks and the "Available ..." / "== ... ==" header lines.
pub fn parse_pattern_list(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !line.starts_with("Available") && !line.starts_with("=="))
        .map(str::to_string)
        .collect()
}

/// Run `<fabric_bin> -l` and parse the result into a fresh catalog.
pub fn fetch(fabric_bin: &str) -> Result<PatternCatalog, String> {
    let out = process::run_program(fabric_bin, ["-l"]).map_err(|e| process::spawn_error_message(fabric_bin, &e))?;
    let patterns = parse_pattern_list(&out.stdout);
    if patterns.is_empty() && !out.success() {
        let detail = if out.stderr.trim().is_empty() {
            format!("código de salida {}", out.code.unwrap_or(-1))
        } else {
            out.stderr.trim().to_string()
        };
        return Err(format!("'{} -l' falló: {}", fabric_bin, detail));
    }
    Ok(PatternCatalog::new(patterns))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filters_headers_and_blanks() {
        let stdout = "Available patterns:\n\n== CORE ==\n  summarize  \nextract_wisdom\n\n==\nanalyze_claims\n";
        let patterns = parse_pattern_list(stdout);
        assert_eq!(patterns, vec!["summarize", "extract_wisdom", "analyze_claims"]);
    }

    #[test]
    fn test_parse_keeps_order() {
        let patterns = parse_pattern_list("b\na\nc\n");
        assert_eq!(patterns, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_parse_empty_stdout() {
        assert!(parse_pattern_list("").is_empty());
        assert!(parse_pattern_list("\n\n  \n").is_empty());
    }

    #[test]
    fn test_fresh_catalog_is_not_stale() {
        let catalog = PatternCatalog::new(vec!["summarize".to_string()]);
        assert!(!catalog.is_stale(Duration::from_secs(3600)));
    }

    #[test]
    fn test_zero_ttl_is_always_stale() {
        let catalog = PatternCatalog::new(vec![]);
        assert!(catalog.is_stale(Duration::ZERO));
    }

    #[test]
    fn test_fetch_missing_binary_reports_install_hint() {
        let err = fetch("fabrica-no-such-binary").unwrap_err();
        assert!(err.contains("No se encontró"), "got: {}", err);
    }
}
