//! Combined raw CSV output and run summary

use crate::collector::RAW_DATE_FORMAT;
use bankpulse_common::{mean, RawReviewRow, Result};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// Counts reported at the end of a collection run
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSummary {
    pub total: usize,
    pub per_bank: BTreeMap<String, usize>,
    pub average_rating: Option<f64>,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

impl CollectionSummary {
    pub fn from_rows(rows: &[RawReviewRow]) -> Self {
        let mut per_bank = BTreeMap::new();
        for row in rows {
            let bank = row.bank.clone().unwrap_or_default();
            *per_bank.entry(bank).or_insert(0) += 1;
        }

        let ratings: Vec<f64> = rows
            .iter()
            .filter_map(|row| row.rating.as_deref()?.parse().ok())
            .collect();

        let dates: Vec<NaiveDate> = rows
            .iter()
            .filter_map(|row| {
                NaiveDateTime::parse_from_str(row.date.as_deref()?, RAW_DATE_FORMAT)
                    .ok()
                    .map(|dt| dt.date())
            })
            .collect();
        let date_range = dates
            .iter()
            .min()
            .zip(dates.iter().max())
            .map(|(min, max)| (*min, *max));

        Self {
            total: rows.len(),
            per_bank,
            average_rating: mean(&ratings),
            date_range,
        }
    }

    /// Emit the summary through tracing
    pub fn log(&self) {
        info!("Total reviews collected: {}", self.total);
        for (bank, count) in &self.per_bank {
            info!("  {}: {}", bank, count);
        }
        if let Some(avg) = self.average_rating {
            info!("Average rating overall: {:.2}", avg);
        }
        if let Some((start, end)) = self.date_range {
            info!("Date range: {} to {}", start, end);
        }
    }
}

/// Write the combined scrape to CSV, creating parent directories
pub fn write_raw_reviews(path: &Path, rows: &[RawReviewRow]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!("Raw data saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bankpulse_common::test_utils::raw_row;

    #[test]
    fn test_summary_counts() {
        let rows = vec![
            raw_row("one review text", "5", "2024-05-01 08:00:00", "CBE"),
            raw_row("two review text", "3", "2024-05-03 08:00:00", "CBE"),
            raw_row("three review text", "1", "2024-04-30 08:00:00", "BOA"),
        ];

        let summary = CollectionSummary::from_rows(&rows);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.per_bank.get("CBE"), Some(&2));
        assert_eq!(summary.per_bank.get("BOA"), Some(&1));
        assert_eq!(summary.average_rating, Some(3.0));
        assert_eq!(
            summary.date_range,
            Some((
                NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
                NaiveDate::from_ymd_opt(2024, 5, 3).unwrap()
            ))
        );
    }

    #[test]
    fn test_write_raw_reviews_header_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw").join("reviews_raw.csv");
        let rows = vec![raw_row("Great app overall", "5", "2024-05-01 08:00:00", "CBE")];

        write_raw_reviews(&path, &rows).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("review,rating,date,userName,replyContent,bank,source")
        );
        assert_eq!(
            lines.next(),
            Some("Great app overall,5,2024-05-01 08:00:00,Test User,,CBE,Google Play")
        );
    }
}
