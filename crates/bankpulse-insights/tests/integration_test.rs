//! Integration tests for bankpulse-insights crate.

use bankpulse_common::test_utils::create_temp_dir;
use bankpulse_insights::{compute_insights, fetch_insight_rows, read_sentiment_summary, write_insights};
use bankpulse_store::{AnnotatedReviewRow, Database};

fn annotated(review: &str, bank: &str, score: Option<&str>, theme: &str) -> AnnotatedReviewRow {
    AnnotatedReviewRow {
        review: review.to_string(),
        rating: "3".to_string(),
        date: "2024-05-01".to_string(),
        bank: bank.to_string(),
        source: None,
        sentiment_label: None,
        sentiment_compound: score.map(str::to_string),
        theme: Some(theme.to_string()),
    }
}

async fn seeded_db() -> Database {
    let db = Database::connect("sqlite::memory:", 1).await.unwrap();
    db.create_tables().await.unwrap();
    db.seed_banks().await.unwrap();
    db.insert_reviews(&[
        annotated("quick and easy transfers", "CBE", Some("0.2"), "Transaction Performance"),
        annotated("app freezes during payment", "CBE", Some("-0.2"), "Reliability"),
        annotated("works as expected mostly", "CBE", Some("0.0"), "Reliability"),
        annotated("keeps logging me out again", "BOA", Some("-0.6"), "Reliability"),
        annotated("no opinion on this update", "BOA", None, "Other"),
    ])
    .await
    .unwrap();
    db
}

#[tokio::test]
async fn test_join_returns_every_review() {
    let db = seeded_db().await;

    let rows = fetch_insight_rows(&db).await.unwrap();

    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0].bank_name, "CBE");
    assert_eq!(rows[0].review_text, "quick and easy transfers");
    assert_eq!(rows[4].sentiment_score, None);
    assert_eq!(rows[4].sentiment_label, "neutral");
    db.close().await;
}

#[tokio::test]
async fn test_insights_from_database() {
    let db = seeded_db().await;
    let dir = create_temp_dir();

    let insights = compute_insights(fetch_insight_rows(&db).await.unwrap());
    let paths = write_insights(dir.path(), &insights).unwrap();
    db.close().await;

    let summary = read_sentiment_summary(&paths.sentiment_summary).unwrap();
    assert_eq!(summary.len(), 2);

    let boa = &summary[0];
    assert_eq!(boa.bank_name, "BOA");
    assert_eq!(boa.mean, Some(-0.6));
    assert_eq!(boa.count, 1);
    assert_eq!(boa.negative_pct, 50.0);

    let cbe = &summary[1];
    assert_eq!(cbe.mean, Some(0.0));
    assert_eq!(cbe.count, 3);
    assert_eq!(cbe.negative_pct, 33.3);

    assert_eq!(insights.theme_matrix.get("BOA", "Transaction Performance"), Some(0.0));
    assert_eq!(insights.theme_matrix.get("CBE", "Reliability"), Some(-0.1));
    assert!(paths.full_reviews.exists());
}
