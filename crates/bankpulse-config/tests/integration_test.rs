//! Integration tests for bankpulse-config crate.

use bankpulse_common::test_utils::config_fixtures::minimal_config_yaml;
use bankpulse_config::{Config, ConfigLoader, SortOrder};

#[test]
fn test_default_config_validation() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.collector.apps.len(), 3);
    assert_eq!(config.collector.max_reviews, 450);
    assert_eq!(config.collector.sort, SortOrder::MostRelevant);
    assert_eq!(config.paths.figures_dir.to_str(), Some("reports/figs"));
}

#[test]
fn test_partial_yaml_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bankpulse.yaml");
    std::fs::write(&path, minimal_config_yaml()).unwrap();

    let config = ConfigLoader::parse_file(&path).unwrap();

    assert_eq!(config.database.url, "sqlite::memory:");
    assert_eq!(config.collector.page_delay_ms, 0);
    assert_eq!(config.collector.max_reviews, 50);
    assert_eq!(config.collector.lang, "en");
    assert_eq!(config.graphs.word_cloud.bank, "BOA");
    assert!(config.validate().is_ok());
}

#[test]
fn test_toml_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bankpulse.toml");
    std::fs::write(
        &path,
        r#"
[collector]
sort = "newest"
country = "KE"

[[collector.apps]]
bank = "CBE"
app_id = "com.combanketh.mobilebanking"
"#,
    )
    .unwrap();

    let config = ConfigLoader::parse_file(&path).unwrap();

    assert_eq!(config.collector.sort, SortOrder::Newest);
    assert_eq!(config.collector.country, "KE");
    assert_eq!(config.collector.apps.len(), 1);
    assert!(config.validate().is_ok());
}

#[test]
fn test_invalid_yaml_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bankpulse.yml");
    std::fs::write(&path, "database: [unclosed").unwrap();

    assert!(ConfigLoader::new(&path).load().is_err());
}
