//! Shared fixtures for unit and integration tests across the workspace.

use chrono::NaiveDate;

use crate::{CleanReviewRow, RawReviewRow, SOURCE_GOOGLE_PLAY};

/// Create a temporary directory for tests that automatically cleans up.
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Build a fully populated raw row.
pub fn raw_row(review: &str, rating: &str, date: &str, bank: &str) -> RawReviewRow {
    RawReviewRow {
        review: Some(review.to_string()),
        rating: Some(rating.to_string()),
        date: Some(date.to_string()),
        user_name: Some("Test User".to_string()),
        reply_content: None,
        bank: Some(bank.to_string()),
        source: Some(SOURCE_GOOGLE_PLAY.to_string()),
    }
}

/// Build a cleaned row.
pub fn clean_row(review: &str, rating: f64, date: (i32, u32, u32), bank: &str) -> CleanReviewRow {
    CleanReviewRow {
        review: review.to_string(),
        rating,
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).expect("valid fixture date"),
        bank: bank.to_string(),
        source: SOURCE_GOOGLE_PLAY.to_string(),
    }
}

/// A small raw scrape covering every cleaning stage.
pub fn sample_raw_rows() -> Vec<RawReviewRow> {
    vec![
        raw_row("The app keeps crashing on login", "1", "2024-05-01 08:15:00", "CBE"),
        // exact duplicate of the first row
        raw_row("The app keeps crashing on login", "1", "2024-05-01 08:15:00", "CBE"),
        raw_row("Transfers are fast and reliable", "5", "2024-05-02 10:00:00", "BOA"),
        RawReviewRow {
            review: None,
            ..raw_row("", "4", "2024-05-03 09:00:00", "BOA")
        },
        raw_row("Decent but the OTP never arrives", "2", "not a date", "Dashen"),
        raw_row("  Good  ", "4", "2024-05-04 12:00:00", "Dashen"),
        raw_row("Would be great with dark mode", "4", "2024-05-05 18:30:00", "Dashen"),
    ]
}

/// Configuration-related fixtures.
pub mod config_fixtures {
    /// A minimal YAML configuration overriding a few defaults.
    pub fn minimal_config_yaml() -> &'static str {
        r#"
database:
  url: "sqlite::memory:"
  max_connections: 1
collector:
  base_url: "http://127.0.0.1:9/store"
  page_delay_ms: 0
  app_delay_ms: 0
  max_reviews: 50
"#
    }
}
