//! Shared text, date, and number helpers.

use chrono::{DateTime, NaiveDate, Utc};

/// Canonical calendar date layout used in every output file.
pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Formats a timestamp the way side log files expect it.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(CANONICAL_DATE_FORMAT).to_string()
}

/// Parses a strict `YYYY-MM-DD` date.
pub fn parse_canonical_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    // chrono accepts unpadded fields; the canonical form is always 10 chars.
    if trimmed.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, CANONICAL_DATE_FORMAT).ok()
}

/// Lowercases and trims review text.
pub fn normalize_text(input: &str) -> String {
    input.to_lowercase().trim().to_string()
}

/// Length of a string in characters rather than bytes.
pub fn char_len(input: &str) -> usize {
    input.chars().count()
}

/// Truncates a string to at most `max_chars` characters without splitting a code point.
pub fn truncate_chars(input: &str, max_chars: usize) -> String {
    match input.char_indices().nth(max_chars) {
        Some((byte_index, _)) => input[..byte_index].to_string(),
        None => input.to_string(),
    }
}

/// Rounds to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Arithmetic mean, or `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp() {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(format_timestamp(timestamp), "2024-01-01 12:00:00");
    }

    #[test]
    fn test_canonical_date_round_trip() {
        let date = parse_canonical_date("2024-03-09").unwrap();
        assert_eq!(format_date(date), "2024-03-09");
        assert!(parse_canonical_date("2024-3-9").is_none());
        assert!(parse_canonical_date("09/03/2024").is_none());
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  Great APP!\n"), "great app!");
    }

    #[test]
    fn test_truncate_chars_respects_code_points() {
        assert_eq!(truncate_chars("ሰላም ነው", 3), "ሰላም");
        assert_eq!(truncate_chars("short", 20), "short");
        assert_eq!(char_len("ሰላም"), 3);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.123_456, 2), 0.12);
        assert_eq!(round_to(33.333_33, 1), 33.3);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
    }
}
