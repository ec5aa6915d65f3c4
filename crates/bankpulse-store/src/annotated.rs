//! Rows produced by the external sentiment and theme analysis

use bankpulse_common::{
    parse_canonical_date, truncate_chars, BankId, NewReview, PulseError, Result, SentimentLabel,
    DEFAULT_THEME, MAX_REVIEW_TEXT_CHARS, RATING_RANGE, SOURCE_GOOGLE_PLAY,
};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;
use tracing::{info, instrument};

/// Valid sentiment compound scores.
pub const SENTIMENT_SCORE_RANGE: RangeInclusive<f64> = -1.0..=1.0;

/// A cleaned review with its analysis annotations, as read from CSV.
///
/// The analysis columns are optional; numeric cells stay textual until
/// [`AnnotatedReviewRow::to_new_review`] so a bad value surfaces as a
/// validation error naming the column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedReviewRow {
    pub review: String,
    pub rating: String,
    pub date: String,
    pub bank: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub sentiment_label: Option<String>,
    #[serde(default)]
    pub sentiment_compound: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl AnnotatedReviewRow {
    /// Convert into an insertable record for the given bank
    pub fn to_new_review(&self, bank_id: BankId) -> Result<NewReview> {
        let rating: f64 = self.rating.trim().parse().map_err(|_| {
            PulseError::validation_field(format!("Rating '{}' is not a number", self.rating), "rating")
        })?;
        if !RATING_RANGE.contains(&rating) {
            return Err(PulseError::validation_field(
                format!("Rating {} is outside 1-5", rating),
                "rating",
            ));
        }

        let review_date = parse_canonical_date(&self.date).ok_or_else(|| {
            PulseError::validation_field(format!("Date '{}' is not YYYY-MM-DD", self.date), "date")
        })?;

        let sentiment_label = match non_empty(&self.sentiment_label) {
            Some(label) => label.parse()?,
            None => SentimentLabel::Neutral,
        };

        let sentiment_score = match non_empty(&self.sentiment_compound) {
            Some(raw) => {
                let score: f64 = raw.parse().map_err(|_| {
                    PulseError::validation_field(
                        format!("Sentiment score '{}' is not a number", raw),
                        "sentiment_compound",
                    )
                })?;
                if !SENTIMENT_SCORE_RANGE.contains(&score) {
                    return Err(PulseError::validation_field(
                        format!("Sentiment score {} is outside -1..1", score),
                        "sentiment_compound",
                    ));
                }
                Some(score)
            }
            None => None,
        };

        Ok(NewReview {
            bank_id,
            review_text: truncate_chars(&self.review, MAX_REVIEW_TEXT_CHARS),
            rating,
            review_date,
            sentiment_label,
            sentiment_score,
            theme: non_empty(&self.theme).unwrap_or(DEFAULT_THEME).to_string(),
            source: non_empty(&self.source).unwrap_or(SOURCE_GOOGLE_PLAY).to_string(),
        })
    }
}

/// Read the analysis output file
#[instrument]
pub fn load_annotated_reviews(path: &Path) -> Result<Vec<AnnotatedReviewRow>> {
    if !path.exists() {
        return Err(PulseError::missing_input(path));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let rows = reader
        .deserialize()
        .collect::<std::result::Result<Vec<AnnotatedReviewRow>, _>>()?;

    info!("Loaded {} annotated reviews from {}", rows.len(), path.display());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row() -> AnnotatedReviewRow {
        AnnotatedReviewRow {
            review: "app crashes when i open statements".to_string(),
            rating: "2.0".to_string(),
            date: "2024-05-01".to_string(),
            bank: "BOA".to_string(),
            source: Some("Google Play".to_string()),
            sentiment_label: Some("NEGATIVE".to_string()),
            sentiment_compound: Some("-0.42".to_string()),
            theme: Some("Reliability".to_string()),
        }
    }

    #[test]
    fn test_full_conversion() {
        let review = row().to_new_review(BankId(2)).unwrap();

        assert_eq!(review.bank_id, BankId(2));
        assert_eq!(review.rating, 2.0);
        assert_eq!(review.review_date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(review.sentiment_label, SentimentLabel::Negative);
        assert_eq!(review.sentiment_score, Some(-0.42));
        assert_eq!(review.theme, "Reliability");
    }

    #[test]
    fn test_optional_columns_default() {
        let bare = AnnotatedReviewRow {
            source: None,
            sentiment_label: None,
            sentiment_compound: Some("  ".to_string()),
            theme: None,
            ..row()
        };

        let review = bare.to_new_review(BankId(1)).unwrap();

        assert_eq!(review.sentiment_label, SentimentLabel::Neutral);
        assert_eq!(review.sentiment_score, None);
        assert_eq!(review.theme, DEFAULT_THEME);
        assert_eq!(review.source, SOURCE_GOOGLE_PLAY);
    }

    #[test]
    fn test_text_capped() {
        let long = AnnotatedReviewRow {
            review: "é".repeat(1500),
            ..row()
        };

        let review = long.to_new_review(BankId(1)).unwrap();
        assert_eq!(review.review_text.chars().count(), MAX_REVIEW_TEXT_CHARS);
    }

    #[test]
    fn test_invalid_values_name_the_field() {
        let cases = [
            (AnnotatedReviewRow { rating: "great".to_string(), ..row() }, "rating"),
            (AnnotatedReviewRow { rating: "9".to_string(), ..row() }, "rating"),
            (AnnotatedReviewRow { date: "05/01/2024".to_string(), ..row() }, "date"),
            (
                AnnotatedReviewRow { sentiment_compound: Some("1.5".to_string()), ..row() },
                "sentiment_compound",
            ),
        ];

        for (bad, expected) in cases {
            match bad.to_new_review(BankId(1)) {
                Err(PulseError::Validation { field, .. }) => {
                    assert_eq!(field.as_deref(), Some(expected))
                }
                other => panic!("expected validation error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_unknown_label_rejected() {
        let bad = AnnotatedReviewRow {
            sentiment_label: Some("angry".to_string()),
            ..row()
        };
        assert!(matches!(bad.to_new_review(BankId(1)), Err(PulseError::Validation { .. })));
    }
}
