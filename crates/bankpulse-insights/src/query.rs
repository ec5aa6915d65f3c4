//! The bank/review join feeding every aggregate

use bankpulse_common::Result;
use bankpulse_store::Database;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// One stored review joined with its bank name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct InsightRow {
    pub bank_name: String,
    pub review_text: String,
    pub rating: f64,
    pub sentiment_label: String,
    pub sentiment_score: Option<f64>,
    pub theme: String,
    pub review_date: NaiveDate,
}

const INSIGHT_QUERY: &str = r#"
    SELECT b.bank_name,
           COALESCE(r.review_text, '') AS review_text,
           r.rating,
           r.sentiment_label,
           r.sentiment_score,
           COALESCE(r.theme, 'Other') AS theme,
           r.review_date
    FROM banks b JOIN reviews r ON b.bank_id = r.bank_id
    ORDER BY r.review_id
"#;

/// Load every review with its bank name, in insertion order
#[instrument(skip(db))]
pub async fn fetch_insight_rows(db: &Database) -> Result<Vec<InsightRow>> {
    let rows: Vec<InsightRow> = sqlx::query_as(INSIGHT_QUERY).fetch_all(db.pool()).await?;
    info!("Queried {} reviews from DB", rows.len());
    Ok(rows)
}
