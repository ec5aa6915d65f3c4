//! # bankpulse insights
//!
//! Read-only aggregates over the stored reviews: per-bank sentiment, the
//! share of negative reviews, and a bank by theme sentiment matrix. Results
//! are written to CSV for the renderer.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregate;
pub mod output;
pub mod query;

pub use aggregate::{
    compute_insights, negative_percentage, sentiment_by_bank, theme_sentiment_matrix,
    BankSentiment, Insights, SentimentSummaryRow, ThemeMatrix,
};
pub use output::{
    read_full_reviews, read_sentiment_summary, read_theme_matrix, write_insights, InsightPaths,
    FULL_REVIEWS_FILE, SENTIMENT_SUMMARY_FILE, THEME_SENTIMENT_FILE,
};
pub use query::{fetch_insight_rows, InsightRow};
