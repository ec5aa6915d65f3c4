//! Review pipeline domain types and newtype wrappers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PulseError;

/// Source tag attached to every collected review.
pub const SOURCE_GOOGLE_PLAY: &str = "Google Play";

/// Placeholder written into required columns that are absent from an input file.
pub const UNKNOWN_SENTINEL: &str = "UNKNOWN";

/// Theme assigned when the analysis step did not provide one.
pub const DEFAULT_THEME: &str = "Other";

/// Scores strictly below this value count as negative reviews.
pub const NEGATIVE_SENTIMENT_THRESHOLD: f64 = -0.05;

/// Maximum stored length of a review text, in characters.
pub const MAX_REVIEW_TEXT_CHARS: usize = 1000;

/// Valid star rating range.
pub const RATING_RANGE: std::ops::RangeInclusive<f64> = 1.0..=5.0;

/// Primary key of a row in the `banks` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BankId(pub i64);

impl fmt::Display for BankId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Polarity label produced by the external sentiment step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl SentimentLabel {
    /// Lowercase name as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = PulseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Self::Positive),
            "negative" => Ok(Self::Negative),
            "neutral" => Ok(Self::Neutral),
            other => Err(PulseError::validation_field(
                format!("Unknown sentiment label '{}'", other),
                "sentiment_label",
            )),
        }
    }
}

/// A tracked institution in the bank catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankRecord {
    pub bank_id: BankId,
    /// Canonical short name, unique across the catalog.
    pub bank_name: String,
    pub app_name: String,
}

/// Catalog entry used to seed the `banks` table and drive collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BankSeed {
    pub bank_name: &'static str,
    pub app_name: &'static str,
    /// Store package identifier of the bank's mobile app.
    pub app_id: &'static str,
}

/// The fixed list of tracked banks.
pub const BANK_CATALOG: [BankSeed; 3] = [
    BankSeed {
        bank_name: "CBE",
        app_name: "Commercial Bank of Ethiopia Mobile",
        app_id: "com.combanketh.mobilebanking",
    },
    BankSeed {
        bank_name: "BOA",
        app_name: "Bank of Abyssinia Mobile",
        app_id: "com.boa.boaMobileBanking",
    },
    BankSeed {
        bank_name: "Dashen",
        app_name: "Dashen Bank SuperApp",
        app_id: "com.dashen.dashensuperapp",
    },
];

/// A typed review ready to be inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReview {
    pub bank_id: BankId,
    pub review_text: String,
    pub rating: f64,
    pub review_date: NaiveDate,
    pub sentiment_label: SentimentLabel,
    pub sentiment_score: Option<f64>,
    pub theme: String,
    pub source: String,
}

/// One row of the raw reviews table, kept as untyped cells.
///
/// Column names follow the combined scrape file: `review, rating, date,
/// userName, replyContent, bank, source`. Absent columns and empty cells
/// both read as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawReviewRow {
    #[serde(default)]
    pub review: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, rename = "userName")]
    pub user_name: Option<String>,
    #[serde(default, rename = "replyContent")]
    pub reply_content: Option<String>,
    #[serde(default)]
    pub bank: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// One row of the cleaned reviews table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanReviewRow {
    pub review: String,
    pub rating: f64,
    pub date: NaiveDate,
    pub bank: String,
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_label_parsing_is_case_insensitive() {
        assert_eq!("POSITIVE".parse::<SentimentLabel>().unwrap(), SentimentLabel::Positive);
        assert_eq!(" negative ".parse::<SentimentLabel>().unwrap(), SentimentLabel::Negative);
        assert_eq!("Neutral".parse::<SentimentLabel>().unwrap(), SentimentLabel::Neutral);
        assert!("mixed".parse::<SentimentLabel>().is_err());
    }

    #[test]
    fn test_sentiment_label_default_is_neutral() {
        assert_eq!(SentimentLabel::default(), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::default().to_string(), "neutral");
    }

    #[test]
    fn test_catalog_names_are_unique() {
        let mut names: Vec<_> = BANK_CATALOG.iter().map(|b| b.bank_name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), BANK_CATALOG.len());
    }

    #[test]
    fn test_id_display() {
        assert_eq!(BankId(3).to_string(), "3");
    }
}
