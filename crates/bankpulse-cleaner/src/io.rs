//! Reading raw scrapes and writing cleaned files

use crate::cleaner::{clean_rows, CleaningReport};
use bankpulse_common::{CleanReviewRow, PulseError, RawReviewRow, Result, UNKNOWN_SENTINEL};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// Columns every raw file must carry after loading.
pub const REQUIRED_COLUMNS: [&str; 5] = ["review", "rating", "date", "bank", "source"];

/// Result of a full preprocessing run
#[derive(Debug, Clone, PartialEq)]
pub struct CleaningOutcome {
    pub output_path: PathBuf,
    pub report: CleaningReport,
    /// Required columns absent from the input and filled with the sentinel
    pub filled_columns: Vec<String>,
    pub unreadable_rows: usize,
}

/// Raw rows plus the required columns the file lacked
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub rows: Vec<RawReviewRow>,
    pub filled_columns: Vec<String>,
    /// Records that could not be decoded and were left out
    pub unreadable_rows: usize,
}

fn fill_column(row: &mut RawReviewRow, column: &str) {
    let slot = match column {
        "review" => &mut row.review,
        "rating" => &mut row.rating,
        "date" => &mut row.date,
        "bank" => &mut row.bank,
        "source" => &mut row.source,
        _ => return,
    };
    *slot = Some(UNKNOWN_SENTINEL.to_string());
}

/// Load a raw scrape, filling absent required columns with the sentinel.
///
/// Short records read as missing cells. Records that fail to decode are
/// skipped and counted; only an absent file is an error.
#[instrument]
pub fn read_raw_reviews(path: &Path) -> Result<RawTable> {
    if !path.exists() {
        return Err(PulseError::missing_input(path));
    }

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = reader.headers()?.clone();
    let filled_columns: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|h| h.trim() == **column))
        .map(|column| column.to_string())
        .collect();

    for column in &filled_columns {
        warn!("Column '{}' missing; filling with {}", column, UNKNOWN_SENTINEL);
    }

    let mut rows = Vec::new();
    let mut unreadable_rows = 0;
    for record in reader.deserialize::<RawReviewRow>() {
        let mut row = match record {
            Ok(row) => row,
            Err(e) => {
                warn!("Skipping unreadable raw row: {}", e);
                unreadable_rows += 1;
                continue;
            }
        };
        for column in &filled_columns {
            fill_column(&mut row, column);
        }
        rows.push(row);
    }

    info!("Loaded {} raw rows from {}", rows.len(), path.display());
    Ok(RawTable {
        rows,
        filled_columns,
        unreadable_rows,
    })
}

/// Write cleaned rows, creating the parent directory
pub fn write_clean_reviews(path: &Path, rows: &[CleanReviewRow]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a cleaned file back
pub fn read_clean_reviews(path: &Path) -> Result<Vec<CleanReviewRow>> {
    if !path.exists() {
        return Err(PulseError::missing_input(path));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let rows = reader.deserialize().collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Read, clean, and write a raw scrape
#[instrument]
pub fn preprocess_reviews(raw_path: &Path, processed_path: &Path) -> Result<CleaningOutcome> {
    let table = read_raw_reviews(raw_path)?;
    let (rows, report) = clean_rows(table.rows);
    report.log();

    write_clean_reviews(processed_path, &rows)?;
    info!("Clean data saved to {}", processed_path.display());

    Ok(CleaningOutcome {
        output_path: processed_path.to_path_buf(),
        report,
        filled_columns: table.filled_columns,
        unreadable_rows: table.unreadable_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_is_typed() {
        let dir = tempfile::tempdir().unwrap();
        let err = preprocess_reviews(&dir.path().join("absent.csv"), &dir.path().join("out.csv"))
            .unwrap_err();
        assert!(matches!(err, PulseError::MissingInput { .. }));
    }

    #[test]
    fn test_absent_columns_are_filled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.csv");
        std::fs::write(
            &path,
            "review,rating,date,bank\nThe new update is wonderful,5,2024-05-01,CBE\n",
        )
        .unwrap();

        let table = read_raw_reviews(&path).unwrap();

        assert_eq!(table.filled_columns, vec!["source".to_string()]);
        assert_eq!(table.rows[0].source.as_deref(), Some(UNKNOWN_SENTINEL));
        assert_eq!(table.rows[0].user_name, None);
    }

    #[test]
    fn test_empty_cells_read_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.csv");
        std::fs::write(
            &path,
            "review,rating,date,userName,replyContent,bank,source\n,4,2024-05-01,,,CBE,Google Play\n",
        )
        .unwrap();

        let table = read_raw_reviews(&path).unwrap();

        assert!(table.filled_columns.is_empty());
        assert_eq!(table.rows[0].review, None);
    }

    #[test]
    fn test_ragged_rows_do_not_abort() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("raw.csv");
        let out = dir.path().join("clean.csv");
        std::fs::write(
            &raw,
            "review,rating,date,userName,replyContent,bank,source\n\
             Transfers are quick and easy,5,2024-05-01,abebe,,CBE,Google Play\n\
             Truncated row from a bad export,4\n",
        )
        .unwrap();

        let outcome = preprocess_reviews(&raw, &out).unwrap();

        assert_eq!(outcome.report.initial_rows, 2);
        assert_eq!(outcome.report.invalid_dates_dropped, 1);
        assert_eq!(outcome.report.final_rows, 1);
        assert_eq!(outcome.unreadable_rows, 0);
    }

    #[test]
    fn test_undecodable_row_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("raw.csv");
        let mut content = b"review,rating,date,bank,source\n".to_vec();
        content.extend_from_slice(b"Bad bytes \xff\xfe here,3,2024-05-01,BOA,Google Play\n");
        content.extend_from_slice(b"Balance updates are instant,4,2024-05-02,BOA,Google Play\n");
        std::fs::write(&raw, content).unwrap();

        let table = read_raw_reviews(&raw).unwrap();

        assert_eq!(table.unreadable_rows, 1);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].bank.as_deref(), Some("BOA"));
    }

    #[test]
    fn test_clean_file_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processed").join("clean.csv");
        let rows = vec![CleanReviewRow {
            review: "works fine for transfers".to_string(),
            rating: 4.0,
            date: chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            bank: "BOA".to_string(),
            source: "Google Play".to_string(),
        }];

        write_clean_reviews(&path, &rows).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("review,rating,date,bank,source"));
        assert_eq!(
            lines.next(),
            Some("works fine for transfers,4.0,2024-05-01,BOA,Google Play")
        );
        assert_eq!(read_clean_reviews(&path).unwrap(), rows);
    }
}
