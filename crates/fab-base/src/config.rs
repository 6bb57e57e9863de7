//! User configuration loaded from `.fabrica/config.json`.
//!
//! Every field has a default, so a missing or partial file still yields a
//! working config. A file that fails to parse is ignored the same way a
//! missing one is.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants::{
    APP_DIR, CONFIG_FILE, DEFAULT_CATALOG_TTL_SECS, DEFAULT_FABRIC_BIN, DEFAULT_LANGUAGE,
    DEFAULT_RESULTS_DIR, DEFAULT_WHISPER_BIN,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory where generated markdown/PDF results live.
    pub results_dir: PathBuf,
    /// Executable name (or path) of the fabric CLI.
    pub fabric_bin: String,
    /// Executable name (or path) of the whisper CLI.
    pub whisper_bin: String,
    /// Language requested from fabric via `--language=`.
    pub language: String,
    /// Models offered in the model picker.
    pub models: Vec<String>,
    /// Whisper model sizes offered in the transcription screen.
    pub whisper_models: Vec<String>,
    /// Seconds before the cached pattern list is refreshed.
    pub catalog_ttl_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
            fabric_bin: DEFAULT_FABRIC_BIN.to_string(),
            whisper_bin: DEFAULT_WHISPER_BIN.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            models: vec![
                "gpt-4o-mini".to_string(),
                "gpt-4-0125-preview".to_string(),
                "claude-3-5-sonnet-20240620".to_string(),
            ],
            whisper_models: vec![
                "tiny".to_string(),
                "base".to_string(),
                "small".to_string(),
                "medium".to_string(),
                "large".to_string(),
            ],
            catalog_ttl_secs: DEFAULT_CATALOG_TTL_SECS,
        }
    }
}

impl AppConfig {
    /// Load the config from `.fabrica/config.json` in the working directory.
    pub fn load() -> Self {
        Self::load_from(Path::new(APP_DIR))
    }

    /// Load the config from `<dir>/config.json`, falling back to defaults.
    pub fn load_from(dir: &Path) -> Self {
        match std::fs::read_to_string(dir.join(CONFIG_FILE)) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.results_dir, PathBuf::from("resultados"));
        assert_eq!(config.fabric_bin, "fabric");
        assert_eq!(config.language, "es");
        assert_eq!(config.models.len(), 3);
        assert_eq!(config.whisper_models.len(), 5);
        assert_eq!(config.catalog_ttl_secs, 3600);
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(dir.path());
        assert_eq!(config.fabric_bin, "fabric");
    }

    #[test]
    fn test_load_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.json"), r#"{"language": "en", "models": ["gpt-4o"]}"#)
            .unwrap();
        let config = AppConfig::load_from(dir.path());
        assert_eq!(config.language, "en");
        assert_eq!(config.models, vec!["gpt-4o".to_string()]);
        // Untouched fields keep defaults
        assert_eq!(config.results_dir, PathBuf::from("resultados"));
        assert_eq!(config.whisper_bin, "whisper");
    }

    #[test]
    fn test_load_malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.json"), "{not json").unwrap();
        let config = AppConfig::load_from(dir.path());
        assert_eq!(config.fabric_bin, "fabric");
    }
}
