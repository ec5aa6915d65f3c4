//! Integration tests for bankpulse-common crate.

use bankpulse_common::{
    format_date, init_logging, normalize_text, parse_canonical_date, truncate_chars, BankId,
    LogFormat, LoggingConfig, NewReview, SentimentLabel, BANK_CATALOG,
};
use chrono::NaiveDate;
use std::collections::HashSet;

#[test]
fn test_id_display() {
    assert_eq!(BankId(2).to_string(), "2");
}

#[test]
fn test_catalog_names_and_apps_are_unique() {
    let names: HashSet<_> = BANK_CATALOG.iter().map(|seed| seed.bank_name).collect();
    let apps: HashSet<_> = BANK_CATALOG.iter().map(|seed| seed.app_id).collect();

    assert_eq!(names.len(), BANK_CATALOG.len());
    assert_eq!(apps.len(), BANK_CATALOG.len());
    assert!(BANK_CATALOG.iter().all(|seed| seed.bank_name.len() <= 50));
    assert!(BANK_CATALOG.iter().all(|seed| seed.app_name.len() <= 100));
}

#[test]
fn test_canonical_dates() {
    let date = NaiveDate::from_ymd_opt(2024, 2, 9).unwrap();
    assert_eq!(format_date(date), "2024-02-09");
    assert_eq!(parse_canonical_date(" 2024-02-09 "), Some(date));
    assert_eq!(parse_canonical_date("2024-2-9"), None);
    assert_eq!(parse_canonical_date("09/02/2024"), None);
}

#[test]
fn test_text_helpers_respect_characters() {
    assert_eq!(normalize_text("  Slow LOGIN  "), "slow login");
    assert_eq!(truncate_chars("ባንክ መተግበሪያ", 3), "ባንክ");
    assert_eq!(truncate_chars("short", 1000), "short");
}

#[test]
fn test_sentiment_label_serde_is_lowercase() {
    let json = serde_json::to_string(&SentimentLabel::Negative).unwrap();
    assert_eq!(json, "\"negative\"");
    assert_eq!(SentimentLabel::default(), SentimentLabel::Neutral);

    let err = "furious".parse::<SentimentLabel>().unwrap_err();
    assert!(err.to_string().contains("furious"));
}

#[test]
fn test_new_review_serializes_date_canonically() {
    let review = NewReview {
        bank_id: BankId(1),
        review_text: "transfers are quick".to_string(),
        rating: 5.0,
        review_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        sentiment_label: SentimentLabel::Positive,
        sentiment_score: Some(0.64),
        theme: "Transaction Performance".to_string(),
        source: "Google Play".to_string(),
    };

    let value = serde_json::to_value(&review).unwrap();
    assert_eq!(value["review_date"], "2024-06-01");
    assert_eq!(value["sentiment_label"], "positive");
}

#[test]
fn test_file_logging_initializes_once() {
    let dir = tempfile::tempdir().unwrap();
    let config = LoggingConfig {
        level: "debug".to_string(),
        format: LogFormat::Json,
        file_path: Some(dir.path().join("logs").join("bankpulse.log")),
        ..LoggingConfig::default()
    };

    let guard = init_logging(config.clone()).unwrap();
    tracing::info!(stage = "test", "logging ready");
    assert!(dir.path().join("logs").is_dir());

    // A second global subscriber is refused
    assert!(init_logging(config).is_err());
    drop(guard);
}
