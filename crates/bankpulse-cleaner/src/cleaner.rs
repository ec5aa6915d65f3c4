//! The five cleaning stages and their counters

use crate::dates::parse_review_date;
use bankpulse_common::{
    char_len, format_date, mean, normalize_text, CleanReviewRow, RawReviewRow, RATING_RANGE,
    UNKNOWN_SENTINEL,
};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashSet};
use tracing::{info, instrument};

/// Reviews at or under this many characters are dropped.
pub const MIN_REVIEW_CHARS: usize = 10;

/// Row counts recorded while cleaning
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleaningReport {
    pub initial_rows: usize,
    pub duplicates_dropped: usize,
    pub missing_dropped: usize,
    pub invalid_dates_dropped: usize,
    pub short_text_dropped: usize,
    pub final_rows: usize,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub per_bank: BTreeMap<String, usize>,
    pub average_rating: Option<f64>,
}

impl CleaningReport {
    /// Emit the counters through tracing
    pub fn log(&self) {
        info!("Initial rows: {}", self.initial_rows);
        info!("After dropping duplicates: -{}", self.duplicates_dropped);
        info!("After dropping missing text or rating: -{}", self.missing_dropped);
        info!("After dropping invalid dates: -{}", self.invalid_dates_dropped);
        info!("After dropping short reviews: -{}", self.short_text_dropped);
        info!("Final rows: {}", self.final_rows);
        if let Some((start, end)) = self.date_range {
            info!("Date range: {} to {}", start, end);
        }
        for (bank, count) in &self.per_bank {
            info!("  {}: {}", bank, count);
        }
        if let Some(avg) = self.average_rating {
            info!("Average rating: {:.2}", avg);
        }
    }

    fn summarize(&mut self, rows: &[CleanReviewRow]) {
        self.final_rows = rows.len();
        self.date_range = rows
            .iter()
            .map(|row| row.date)
            .min()
            .zip(rows.iter().map(|row| row.date).max());
        self.per_bank = BTreeMap::new();
        for row in rows {
            *self.per_bank.entry(row.bank.clone()).or_insert(0) += 1;
        }
        let ratings: Vec<f64> = rows.iter().map(|row| row.rating).collect();
        self.average_rating = mean(&ratings);
    }
}

/// Parse a rating cell, treating anything outside 1..=5 as missing
pub fn parse_rating(raw: &str) -> Option<f64> {
    let rating: f64 = raw.trim().parse().ok()?;
    RATING_RANGE.contains(&rating).then_some(rating)
}

/// Identity used for duplicate detection, for rows the later stages keep.
///
/// Text and date are compared in their cleaned form, so rows that would
/// become identical after cleaning collapse on the first pass. Rows that
/// stages (b) or (c) will drop have no key and never shadow a valid row.
fn dedup_key(row: &RawReviewRow) -> Option<(String, String)> {
    let text = row.review.as_deref()?;
    parse_rating(row.rating.as_deref()?)?;
    let date = parse_review_date(row.date.as_deref()?)?;
    Some((normalize_text(text), format_date(date)))
}

/// Run every cleaning stage over a raw scrape.
#[instrument(skip(rows), fields(count = rows.len()))]
pub fn clean_rows(rows: Vec<RawReviewRow>) -> (Vec<CleanReviewRow>, CleaningReport) {
    let mut report = CleaningReport {
        initial_rows: rows.len(),
        ..CleaningReport::default()
    };

    // (a) duplicates, first valid occurrence wins
    let mut seen = HashSet::new();
    let unique: Vec<RawReviewRow> = rows
        .into_iter()
        .filter(|row| dedup_key(row).map_or(true, |key| seen.insert(key)))
        .collect();
    report.duplicates_dropped = report.initial_rows - unique.len();

    // (b) missing text or rating
    let before = unique.len();
    let complete: Vec<(String, f64, RawReviewRow)> = unique
        .into_iter()
        .filter_map(|row| {
            let text = row.review.clone()?;
            let rating = parse_rating(row.rating.as_deref()?)?;
            Some((text, rating, row))
        })
        .collect();
    report.missing_dropped = before - complete.len();

    // (c) dates
    let before = complete.len();
    let dated: Vec<(String, f64, NaiveDate, RawReviewRow)> = complete
        .into_iter()
        .filter_map(|(text, rating, row)| {
            let date = parse_review_date(row.date.as_deref()?)?;
            Some((text, rating, date, row))
        })
        .collect();
    report.invalid_dates_dropped = before - dated.len();

    // (d) normalize, (e) length
    let before = dated.len();
    let cleaned: Vec<CleanReviewRow> = dated
        .into_iter()
        .map(|(text, rating, date, row)| CleanReviewRow {
            review: normalize_text(&text),
            rating,
            date,
            bank: row.bank.unwrap_or_else(|| UNKNOWN_SENTINEL.to_string()),
            source: row.source.unwrap_or_else(|| UNKNOWN_SENTINEL.to_string()),
        })
        .filter(|row| char_len(&row.review) > MIN_REVIEW_CHARS)
        .collect();
    report.short_text_dropped = before - cleaned.len();

    report.summarize(&cleaned);
    (cleaned, report)
}
