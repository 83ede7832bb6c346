use crate::constants::DEFAULT_KEYWORD;
use crate::errors::{AppError, AppResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolved configuration with all values filled in (no Options).
///
/// This struct carries the crawl defaults and can be deserialized by the TOML
/// loader. All fields have concrete values, making it safe to access directly
/// without unwrapping.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolvedConfig {
    /// WebDriver endpoint (a running chromedriver)
    pub webdriver_url: String,
    /// Whether the browser runs without a visible window
    pub headless: bool,
    /// Root directory for exported CSV/JSON files
    pub output_dir: PathBuf,
    /// Directory for per-run log files
    pub logs_dir: PathBuf,

    // Waiting
    /// Total budget in milliseconds shared across one candidate-selector list
    pub element_timeout_ms: u64,
    /// Floor in milliseconds granted to each individual candidate
    pub min_candidate_timeout_ms: u64,
    /// Budget in milliseconds for a page to settle after navigation
    pub page_settle_timeout_ms: u64,
    /// Pause in milliseconds between failed candidate attempts
    pub attempt_pause_ms: u64,

    // Export
    /// CSV field delimiter (single ASCII character)
    pub csv_delimiter: char,
    /// Whether to also write a pretty-printed JSON dump next to the CSV
    pub json_dump: bool,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".to_string(),
            headless: true,
            output_dir: PathBuf::from("data/export"),
            logs_dir: PathBuf::from("logs"),
            element_timeout_ms: 15_000,
            min_candidate_timeout_ms: 3_000,
            page_settle_timeout_ms: 30_000,
            attempt_pause_ms: 200,
            csv_delimiter: ';',
            json_dump: false,
        }
    }
}

/// Configuration that can be loaded from a TOML file.
///
/// Deserializes the required crawl targets (region, keyword) and optional
/// crawl settings. The parser rejects unknown keys to catch typos.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolvedConfigFile {
    /// Region name: `"sur"`, `"este"`, `"oeste"`, `"centro"` or `"todas"`
    pub region: String,
    /// Free-text filter for the "Objeto del contrato" field
    #[serde(default = "default_keyword")]
    pub keyword: String,
    /// Flattened resolved configuration with crawl defaults
    #[serde(flatten)]
    pub resolved: ResolvedConfig,
}

impl ResolvedConfigFile {
    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the TOML is malformed, unknown keys are
    /// present, the keyword is empty, the delimiter is not ASCII, or any
    /// timeout is zero.
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path)?;
        let config: ResolvedConfigFile = toml::from_str(&contents)
            .map_err(|e| AppError::InvalidInput(format!("Failed to parse config: {e}")))?;

        validate(&config.resolved)?;
        if config.keyword.trim().is_empty() {
            return Err(AppError::InvalidInput("Keyword must not be empty".into()));
        }

        Ok(config)
    }
}

fn validate(config: &ResolvedConfig) -> AppResult<()> {
    if config.element_timeout_ms == 0 || config.page_settle_timeout_ms == 0 {
        return Err(AppError::InvalidInput(
            "Timeouts must be greater than 0".into(),
        ));
    }
    if config.min_candidate_timeout_ms == 0 {
        return Err(AppError::InvalidInput(
            "Minimum candidate timeout must be greater than 0".into(),
        ));
    }
    if !config.csv_delimiter.is_ascii() {
        return Err(AppError::InvalidInput(
            "CSV delimiter must be a single ASCII character".into(),
        ));
    }
    Ok(())
}

fn default_keyword() -> String {
    DEFAULT_KEYWORD.to_string()
}
