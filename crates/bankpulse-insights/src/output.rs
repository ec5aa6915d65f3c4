//! Insight files written for the renderer and read back by it

use crate::aggregate::{Insights, SentimentSummaryRow, ThemeMatrix};
use crate::query::InsightRow;
use bankpulse_common::{PulseError, Result};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

pub const FULL_REVIEWS_FILE: &str = "full_reviews_db.csv";
pub const SENTIMENT_SUMMARY_FILE: &str = "sentiment_summary.csv";
pub const THEME_SENTIMENT_FILE: &str = "theme_sentiment.csv";

/// Locations of the files written by [`write_insights`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightPaths {
    pub full_reviews: PathBuf,
    pub sentiment_summary: PathBuf,
    pub theme_sentiment: PathBuf,
}

impl InsightPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            full_reviews: dir.join(FULL_REVIEWS_FILE),
            sentiment_summary: dir.join(SENTIMENT_SUMMARY_FILE),
            theme_sentiment: dir.join(THEME_SENTIMENT_FILE),
        }
    }
}

fn write_serialized<T: serde::Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn read_serialized<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Err(PulseError::missing_input(path));
    }
    let mut reader = csv::Reader::from_path(path)?;
    let rows = reader.deserialize().collect::<std::result::Result<Vec<T>, _>>()?;
    Ok(rows)
}

/// Write the joined table, the per-bank summary, and the theme matrix
#[instrument(skip(insights))]
pub fn write_insights(dir: &Path, insights: &Insights) -> Result<InsightPaths> {
    std::fs::create_dir_all(dir)?;
    let paths = InsightPaths::in_dir(dir);

    write_serialized(&paths.full_reviews, &insights.rows)?;
    write_serialized(&paths.sentiment_summary, &insights.summary)?;
    write_theme_matrix(&paths.theme_sentiment, &insights.theme_matrix)?;

    info!("Insights saved to {}", dir.display());
    Ok(paths)
}

fn write_theme_matrix(path: &Path, matrix: &ThemeMatrix) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = vec!["bank_name".to_string()];
    header.extend(matrix.themes.iter().cloned());
    writer.write_record(&header)?;

    for (bank, values) in matrix.banks.iter().zip(&matrix.values) {
        let mut record = vec![bank.clone()];
        record.extend(values.iter().map(|v| v.to_string()));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

pub fn read_full_reviews(path: &Path) -> Result<Vec<InsightRow>> {
    read_serialized(path)
}

pub fn read_sentiment_summary(path: &Path) -> Result<Vec<SentimentSummaryRow>> {
    read_serialized(path)
}

/// Read a matrix written by [`write_insights`]
pub fn read_theme_matrix(path: &Path) -> Result<ThemeMatrix> {
    if !path.exists() {
        return Err(PulseError::missing_input(path));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let themes: Vec<String> = reader.headers()?.iter().skip(1).map(str::to_string).collect();

    let mut matrix = ThemeMatrix {
        themes,
        ..ThemeMatrix::default()
    };
    for record in reader.records() {
        let record = record?;
        let bank = record.get(0).unwrap_or_default().to_string();
        let values = record
            .iter()
            .skip(1)
            .map(|cell| {
                cell.trim().parse::<f64>().map_err(|_| {
                    PulseError::validation_field(
                        format!("Matrix cell '{}' for {} is not a number", cell, bank),
                        "theme_sentiment",
                    )
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        matrix.banks.push(bank);
        matrix.values.push(values);
    }

    Ok(matrix)
}
