//! Permissive review date parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Date-only layouts, tried in order. Slash dates are month first.
const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%b %d, %Y", "%B %d, %Y"];

/// Date-time layouts without an offset.
const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Date-time layouts carrying an offset.
const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
];

/// Parse a review date in any of the layouts scrapes are known to contain.
///
/// Returns `None` for anything unrecognised. Values with an offset resolve to
/// the calendar date in that offset, the way the text reads.
pub fn parse_review_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if value.bytes().all(|b| b.is_ascii_digit()) {
        return parse_numeric(value);
    }

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
    {
        return Some(date);
    }

    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
    {
        return Some(dt.date());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }

    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(value, fmt).ok())
    {
        return Some(dt.date_naive());
    }

    DateTime::parse_from_rfc2822(value)
        .ok()
        .map(|dt| dt.date_naive())
}

/// `YYYYMMDD` for eight digits, Unix epoch seconds otherwise
fn parse_numeric(value: &str) -> Option<NaiveDate> {
    if value.len() == 8 {
        if let Ok(date) = NaiveDate::parse_from_str(value, "%Y%m%d") {
            return Some(date);
        }
    }

    let seconds: i64 = value.parse().ok()?;
    DateTime::from_timestamp(seconds, 0).map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_iso_variants() {
        assert_eq!(parse_review_date("2024-05-01"), ymd(2024, 5, 1));
        assert_eq!(parse_review_date("2024-05-01 08:15:00"), ymd(2024, 5, 1));
        assert_eq!(parse_review_date("2024-05-01 08:15:00.123456"), ymd(2024, 5, 1));
        assert_eq!(parse_review_date("2024-05-01T08:15:00"), ymd(2024, 5, 1));
        assert_eq!(parse_review_date("2024-05-01T23:15:00Z"), ymd(2024, 5, 1));
        assert_eq!(parse_review_date("2024-05-01T23:15:00+03:00"), ymd(2024, 5, 1));
        assert_eq!(parse_review_date("2024-05-01 08:15:00+0300"), ymd(2024, 5, 1));
    }

    #[test]
    fn test_regional_layouts() {
        assert_eq!(parse_review_date("2024/05/01"), ymd(2024, 5, 1));
        assert_eq!(parse_review_date("05/01/2024"), ymd(2024, 5, 1));
        assert_eq!(parse_review_date("May 1, 2024"), ymd(2024, 5, 1));
        assert_eq!(parse_review_date("September 12, 2023"), ymd(2023, 9, 12));
        assert_eq!(parse_review_date("Wed, 01 May 2024 08:15:00 +0000"), ymd(2024, 5, 1));
    }

    #[test]
    fn test_numeric_values() {
        assert_eq!(parse_review_date("20240501"), ymd(2024, 5, 1));
        assert_eq!(parse_review_date("1714551300"), ymd(2024, 5, 1));
    }

    #[test]
    fn test_garbage_is_none() {
        assert_eq!(parse_review_date(""), None);
        assert_eq!(parse_review_date("   "), None);
        assert_eq!(parse_review_date("not a date"), None);
        assert_eq!(parse_review_date("2024-13-45"), None);
        assert_eq!(parse_review_date("UNKNOWN"), None);
    }
}
