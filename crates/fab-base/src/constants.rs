// =============================================================================
// PERSISTENCE
// =============================================================================

/// Directory for app config and crash logs
pub const APP_DIR: &str = "./.fabrica";

/// Config file name inside APP_DIR
pub const CONFIG_FILE: &str = "config.json";

/// Crash logs subdirectory inside APP_DIR
pub const ERRORS_DIR: &str = "errors";

/// Directory for generated results (markdown + PDF)
pub const DEFAULT_RESULTS_DIR: &str = "resultados";

// =============================================================================
// EXTERNAL TOOLS
// =============================================================================

/// Default fabric executable name
pub const DEFAULT_FABRIC_BIN: &str = "fabric";

/// Default whisper executable name
pub const DEFAULT_WHISPER_BIN: &str = "whisper";

/// Output language requested from fabric (--language=)
pub const DEFAULT_LANGUAGE: &str = "es";

/// Seconds before the cached pattern list is considered stale
pub const DEFAULT_CATALOG_TTL_SECS: u64 = 3600;

// =============================================================================
// FORM DEFAULTS
// =============================================================================

/// Text preloaded in the prompt input
pub const DEFAULT_PROMPT: &str = "Haz un chiste con manzanas";

/// URL preloaded when switching to YouTube mode
pub const DEFAULT_YOUTUBE_URL: &str = "https://www.youtube.com/watch?v=5rUa0wGzgdA";

/// URL preloaded when switching to web page mode
pub const DEFAULT_WEB_URL: &str =
    "https://medium.com/stackademic/16-killer-web-applications-to-boost-your-workflow-with-ai-38153ace9352";

// =============================================================================
// UI LAYOUT
// =============================================================================

/// Width of the results sidebar in characters
pub const SIDEBAR_WIDTH: u16 = 44;

/// Height of the status bar
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Lines scrolled per arrow key in the output view
pub const SCROLL_ARROW_AMOUNT: usize = 1;

/// Lines scrolled per PageUp/PageDown in the output view
pub const SCROLL_PAGE_AMOUNT: usize = 10;
