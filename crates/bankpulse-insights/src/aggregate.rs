//! Per-bank sentiment aggregates

use crate::query::InsightRow;
use bankpulse_common::{mean, round_to, NEGATIVE_SENTIMENT_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{info, instrument};

/// Mean and count of non-null sentiment scores for one bank
#[derive(Debug, Clone, PartialEq)]
pub struct BankSentiment {
    pub bank_name: String,
    /// `None` when the bank has no scored reviews
    pub mean: Option<f64>,
    pub count: usize,
}

/// One line of `sentiment_summary.csv`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummaryRow {
    pub bank_name: String,
    pub mean: Option<f64>,
    pub count: usize,
    pub negative_pct: f64,
}

/// Bank by theme mean sentiment, zero where a pair has no scores
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeMatrix {
    pub banks: Vec<String>,
    pub themes: Vec<String>,
    /// Row per bank, column per theme
    pub values: Vec<Vec<f64>>,
}

impl ThemeMatrix {
    pub fn get(&self, bank: &str, theme: &str) -> Option<f64> {
        let row = self.banks.iter().position(|b| b == bank)?;
        let col = self.themes.iter().position(|t| t == theme)?;
        self.values.get(row)?.get(col).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.banks.is_empty() || self.themes.is_empty()
    }

    /// Largest absolute value, used to centre color scales
    pub fn max_abs(&self) -> f64 {
        self.values
            .iter()
            .flatten()
            .fold(0.0_f64, |acc, value| acc.max(value.abs()))
    }
}

/// Everything the aggregator produces
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Insights {
    pub rows: Vec<InsightRow>,
    pub summary: Vec<SentimentSummaryRow>,
    pub theme_matrix: ThemeMatrix,
}

fn group_by_bank(rows: &[InsightRow]) -> BTreeMap<&str, Vec<&InsightRow>> {
    let mut groups: BTreeMap<&str, Vec<&InsightRow>> = BTreeMap::new();
    for row in rows {
        groups.entry(row.bank_name.as_str()).or_default().push(row);
    }
    groups
}

/// Mean and count of sentiment score per bank, ignoring null scores
pub fn sentiment_by_bank(rows: &[InsightRow]) -> Vec<BankSentiment> {
    group_by_bank(rows)
        .into_iter()
        .map(|(bank, reviews)| {
            let scores: Vec<f64> = reviews.iter().filter_map(|r| r.sentiment_score).collect();
            BankSentiment {
                bank_name: bank.to_string(),
                mean: mean(&scores),
                count: scores.len(),
            }
        })
        .collect()
}

/// Share of each bank's reviews scoring below `threshold`, in percent.
///
/// The denominator counts every review of the bank, scored or not.
pub fn negative_percentage(rows: &[InsightRow], threshold: f64) -> Vec<(String, f64)> {
    group_by_bank(rows)
        .into_iter()
        .map(|(bank, reviews)| {
            let negatives = reviews
                .iter()
                .filter(|r| r.sentiment_score.map_or(false, |s| s < threshold))
                .count();
            (bank.to_string(), negatives as f64 / reviews.len() as f64 * 100.0)
        })
        .collect()
}

/// Mean sentiment for every bank and theme pair
pub fn theme_sentiment_matrix(rows: &[InsightRow]) -> ThemeMatrix {
    let mut cells: BTreeMap<(&str, &str), Vec<f64>> = BTreeMap::new();
    let mut banks = BTreeSet::new();
    let mut themes = BTreeSet::new();

    for row in rows {
        banks.insert(row.bank_name.as_str());
        themes.insert(row.theme.as_str());
        if let Some(score) = row.sentiment_score {
            cells
                .entry((row.bank_name.as_str(), row.theme.as_str()))
                .or_default()
                .push(score);
        }
    }

    let values: Vec<Vec<f64>> = banks
        .iter()
        .map(|bank| {
            themes
                .iter()
                .map(|theme| {
                    cells
                        .get(&(*bank, *theme))
                        .and_then(|scores| mean(scores))
                        .unwrap_or(0.0)
                })
                .collect()
        })
        .collect();

    ThemeMatrix {
        banks: banks.into_iter().map(str::to_string).collect(),
        themes: themes.into_iter().map(str::to_string).collect(),
        values,
    }
}

/// Compute every aggregate over the joined rows
#[instrument(skip(rows), fields(count = rows.len()))]
pub fn compute_insights(rows: Vec<InsightRow>) -> Insights {
    let negatives: BTreeMap<String, f64> =
        negative_percentage(&rows, NEGATIVE_SENTIMENT_THRESHOLD).into_iter().collect();

    let summary: Vec<SentimentSummaryRow> = sentiment_by_bank(&rows)
        .into_iter()
        .map(|s| SentimentSummaryRow {
            negative_pct: round_to(negatives.get(&s.bank_name).copied().unwrap_or(0.0), 1),
            mean: s.mean.map(|m| round_to(m, 2)),
            count: s.count,
            bank_name: s.bank_name,
        })
        .collect();

    let mut theme_matrix = theme_sentiment_matrix(&rows);
    for row in &mut theme_matrix.values {
        for value in row.iter_mut() {
            *value = round_to(*value, 2);
        }
    }

    for line in &summary {
        info!(
            "{}: mean sentiment {:?}, {} scored, {:.1}% negative",
            line.bank_name, line.mean, line.count, line.negative_pct
        );
    }

    Insights {
        rows,
        summary,
        theme_matrix,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bankpulse_common::test_utils::assert_approx_eq;
    use chrono::NaiveDate;

    fn row(bank: &str, score: Option<f64>, theme: &str) -> InsightRow {
        InsightRow {
            bank_name: bank.to_string(),
            review_text: "sample review text".to_string(),
            rating: 3.0,
            sentiment_label: "neutral".to_string(),
            sentiment_score: score,
            theme: theme.to_string(),
            review_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        }
    }

    #[test]
    fn test_three_scores_one_bank() {
        let rows = vec![
            row("CBE", Some(0.2), "Other"),
            row("CBE", Some(-0.2), "Other"),
            row("CBE", Some(0.0), "Other"),
        ];

        let sentiment = sentiment_by_bank(&rows);
        assert_eq!(sentiment.len(), 1);
        assert_approx_eq(sentiment[0].mean.unwrap(), 0.0, 1e-12);
        assert_eq!(sentiment[0].count, 3);

        let negatives = negative_percentage(&rows, NEGATIVE_SENTIMENT_THRESHOLD);
        assert_eq!(negatives[0].0, "CBE");
        assert_approx_eq(negatives[0].1, 100.0 / 3.0, 1e-9);

        let insights = compute_insights(rows);
        assert_eq!(insights.summary[0].negative_pct, 33.3);
        assert_eq!(insights.summary[0].mean, Some(0.0));
    }

    #[test]
    fn test_null_scores_ignored_in_mean_but_counted_in_share() {
        let rows = vec![
            row("BOA", Some(-0.5), "Reliability"),
            row("BOA", None, "Reliability"),
            row("Dashen", None, "Other"),
        ];

        let sentiment = sentiment_by_bank(&rows);
        assert_eq!(sentiment[0].bank_name, "BOA");
        assert_eq!(sentiment[0].mean, Some(-0.5));
        assert_eq!(sentiment[0].count, 1);
        assert_eq!(sentiment[1].mean, None);
        assert_eq!(sentiment[1].count, 0);

        let negatives = negative_percentage(&rows, NEGATIVE_SENTIMENT_THRESHOLD);
        assert_eq!(negatives, vec![("BOA".to_string(), 50.0), ("Dashen".to_string(), 0.0)]);
    }

    #[test]
    fn test_matrix_fills_missing_pairs_with_zero() {
        let rows = vec![
            row("BOA", Some(-0.4), "Reliability"),
            row("BOA", Some(-0.2), "Reliability"),
            row("CBE", Some(0.6), "User Interface"),
        ];

        let matrix = theme_sentiment_matrix(&rows);

        assert_eq!(matrix.banks, vec!["BOA", "CBE"]);
        assert_eq!(matrix.themes, vec!["Reliability", "User Interface"]);
        assert_approx_eq(matrix.get("BOA", "Reliability").unwrap(), -0.3, 1e-12);
        assert_eq!(matrix.get("BOA", "User Interface"), Some(0.0));
        assert_eq!(matrix.get("CBE", "Reliability"), Some(0.0));
        assert_eq!(matrix.get("Dashen", "Reliability"), None);
        assert_approx_eq(matrix.max_abs(), 0.6, 1e-12);
    }

    #[test]
    fn test_empty_rows() {
        let insights = compute_insights(Vec::new());
        assert!(insights.summary.is_empty());
        assert!(insights.theme_matrix.is_empty());
    }
}
