//! Tests for config module

use licita_crawler::config::{ResolvedConfig, ResolvedConfigFile};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("licita.toml");

    let config_content = r#"
region = "todas"
keyword = "mobiliario"
webdriver_url = "http://localhost:4444"
headless = false
element_timeout_ms = 20000
csv_delimiter = ","
json_dump = true
"#;

    fs::write(&config_path, config_content).unwrap();

    let config = ResolvedConfigFile::from_toml_file(&config_path).unwrap();

    assert_eq!(config.region, "todas");
    assert_eq!(config.keyword, "mobiliario");
    assert_eq!(config.resolved.webdriver_url, "http://localhost:4444");
    assert!(!config.resolved.headless);
    assert_eq!(config.resolved.element_timeout_ms, 20000);
    assert_eq!(config.resolved.csv_delimiter, ',');
    assert!(config.resolved.json_dump);
}

#[test]
fn test_config_defaults() {
    let config = ResolvedConfig::default();

    assert_eq!(config.webdriver_url, "http://localhost:9515");
    assert!(config.headless);
    assert_eq!(config.element_timeout_ms, 15_000);
    assert_eq!(config.min_candidate_timeout_ms, 3_000);
    assert_eq!(config.page_settle_timeout_ms, 30_000);
    assert_eq!(config.attempt_pause_ms, 200);
    assert_eq!(config.csv_delimiter, ';');
    assert!(!config.json_dump);
}

#[test]
fn test_config_partial() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("licita.toml");

    let config_content = r#"
region = "oeste"
"#;

    fs::write(&config_path, config_content).unwrap();

    let config = ResolvedConfigFile::from_toml_file(&config_path).unwrap();

    // Required field is present, everything else falls back to defaults.
    assert_eq!(config.region, "oeste");
    assert_eq!(config.keyword, "alimentación");
    assert!(config.resolved.headless);
}

#[test]
fn test_config_rejects_unknown_keys() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("licita.toml");

    fs::write(
        &config_path,
        r#"
region = "sur"
tipo = "suministros"
"#,
    )
    .unwrap();

    assert!(ResolvedConfigFile::from_toml_file(&config_path).is_err());
}

#[test]
fn test_config_rejects_zero_settle_timeout() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("licita.toml");

    fs::write(
        &config_path,
        r#"
region = "sur"
page_settle_timeout_ms = 0
"#,
    )
    .unwrap();

    assert!(ResolvedConfigFile::from_toml_file(&config_path).is_err());
}

#[test]
fn test_config_missing_file_errors() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nope.toml");
    assert!(ResolvedConfigFile::from_toml_file(&config_path).is_err());
}
