//! Integration tests for bankpulse-store crate.

use bankpulse_common::test_utils::create_temp_dir;
use bankpulse_common::{BankSeed, PulseError, BANK_CATALOG};
use bankpulse_store::{load_annotated_reviews, AnnotatedReviewRow, Database};

fn annotated(review: &str, bank: &str, label: &str, score: &str) -> AnnotatedReviewRow {
    AnnotatedReviewRow {
        review: review.to_string(),
        rating: "4.0".to_string(),
        date: "2024-05-01".to_string(),
        bank: bank.to_string(),
        source: Some("Google Play".to_string()),
        sentiment_label: Some(label.to_string()),
        sentiment_compound: Some(score.to_string()),
        theme: Some("Transaction Performance".to_string()),
    }
}

async fn memory_db() -> Database {
    let db = Database::connect("sqlite::memory:", 1).await.unwrap();
    db.create_tables().await.unwrap();
    db
}

#[tokio::test]
async fn test_unknown_bank_is_skipped() {
    let db = memory_db().await;
    let partial: Vec<BankSeed> = BANK_CATALOG
        .iter()
        .copied()
        .filter(|seed| seed.bank_name != "Dashen")
        .collect();
    db.seed_catalog(&partial).await.unwrap();

    let rows = vec![
        annotated("transfers are instant now", "CBE", "positive", "0.6"),
        annotated("login keeps failing for me", "BOA", "negative", "-0.4"),
        annotated("the superapp is very slow", "Dashen", "negative", "-0.3"),
    ];
    let report = db.insert_reviews(&rows).await.unwrap();

    assert_eq!(report.inserted, 2);
    assert_eq!(report.skipped, 1);

    let verification = db.verify_data().await.unwrap();
    assert_eq!(verification.total_reviews, 2);
    assert_eq!(
        verification.reviews_per_bank,
        vec![("CBE".to_string(), 1), ("BOA".to_string(), 1)]
    );
    assert_eq!(verification.average_rating, Some(4.0));
    db.close().await;
}

#[tokio::test]
async fn test_failed_batch_commits_nothing() {
    let db = memory_db().await;
    db.seed_banks().await.unwrap();

    let rows = vec![
        annotated("transfers are instant now", "CBE", "positive", "0.6"),
        annotated("balance page shows errors", "BOA", "furious", "-0.4"),
    ];
    let err = db.insert_reviews(&rows).await.unwrap_err();

    assert!(matches!(err, PulseError::Validation { .. }));
    assert_eq!(db.verify_data().await.unwrap().total_reviews, 0);
    db.close().await;
}

#[tokio::test]
async fn test_stored_values_use_defaults() {
    let db = memory_db().await;
    db.seed_banks().await.unwrap();

    let row = AnnotatedReviewRow {
        sentiment_label: None,
        sentiment_compound: None,
        theme: None,
        source: None,
        ..annotated("works fine most of the time", "Dashen", "", "")
    };
    db.insert_reviews(&[row]).await.unwrap();

    let (label, score, theme, source, date): (String, Option<f64>, String, String, String) =
        sqlx::query_as(
            "SELECT sentiment_label, sentiment_score, theme, source, review_date FROM reviews",
        )
        .fetch_one(db.pool())
        .await
        .unwrap();

    assert_eq!(label, "neutral");
    assert_eq!(score, None);
    assert_eq!(theme, "Other");
    assert_eq!(source, "Google Play");
    assert_eq!(date, "2024-05-01");
    db.close().await;
}

#[tokio::test]
async fn test_file_database_is_created() {
    let dir = create_temp_dir();
    let path = dir.path().join("nested").join("bank_reviews.db");
    let url = format!("sqlite://{}", path.display());

    let db = Database::connect(&url, 2).await.unwrap();
    db.create_tables().await.unwrap();
    db.close().await;

    assert!(path.exists());
}

#[test]
fn test_load_annotated_reviews() {
    let dir = create_temp_dir();
    let path = dir.path().join("annotated.csv");
    std::fs::write(
        &path,
        "review,rating,date,bank,source,sentiment_label,sentiment_compound,theme\n\
         app crashes on every login,1.0,2024-05-01,BOA,Google Play,Negative,-0.62,Reliability\n\
         nice and simple interface,5.0,2024-05-02,CBE,Google Play,,,\n",
    )
    .unwrap();

    let rows = load_annotated_reviews(&path).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].sentiment_compound.as_deref(), Some("-0.62"));
    assert_eq!(rows[1].sentiment_label, None);
    assert_eq!(rows[1].theme, None);
}

#[test]
fn test_missing_annotated_file() {
    let err = load_annotated_reviews(std::path::Path::new("/nonexistent/annotated.csv")).unwrap_err();
    assert!(matches!(err, PulseError::MissingInput { .. }));
}
