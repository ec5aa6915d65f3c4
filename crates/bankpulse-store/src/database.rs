//! SQLite-backed storage for the bank catalog and annotated reviews
//!
//! A [`Database`] is opened once at startup, handed to every stage that
//! needs it, and closed before the process exits.

use crate::annotated::AnnotatedReviewRow;
use crate::schema::SCHEMA_STATEMENTS;
use bankpulse_common::{BankId, BankRecord, BankSeed, NewReview, Result, BANK_CATALOG};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, Sqlite, SqlitePool, Transaction};
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info, instrument, warn};

/// Outcome of a bulk insert
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertReport {
    pub inserted: usize,
    /// Rows whose bank label has no catalog entry
    pub skipped: usize,
}

/// Post-insert integrity summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerificationReport {
    pub reviews_per_bank: Vec<(String, i64)>,
    pub average_rating: Option<f64>,
    pub total_reviews: i64,
}

impl VerificationReport {
    pub fn log(&self) {
        info!("Reviews per bank: {:?}", self.reviews_per_bank);
        match self.average_rating {
            Some(avg) => info!("Avg rating in DB: {:.2}", avg),
            None => info!("Avg rating in DB: n/a"),
        }
        info!("Total reviews in DB: {}", self.total_reviews);
    }
}

/// File backing a `sqlite:` URL, if it names one
fn sqlite_file(url: &str) -> Option<PathBuf> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

/// Connection handle to the review database
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open a connection pool, creating the database file if needed
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        info!("Connecting to database: {}", url);

        if let Some(parent) = sqlite_file(url)
            .as_deref()
            .and_then(|path| path.parent())
            .filter(|parent| !parent.as_os_str().is_empty())
        {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Underlying pool, for read-only queries in other crates
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every pooled connection
    pub async fn close(self) {
        self.pool.close().await;
        debug!("Database connections closed");
    }

    /// Create both tables if they are absent
    #[instrument(skip(self))]
    pub async fn create_tables(&self) -> Result<()> {
        for statement in SCHEMA_STATEMENTS {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("Tables created/verified: banks, reviews");
        Ok(())
    }

    /// Seed the fixed bank catalog
    pub async fn seed_banks(&self) -> Result<usize> {
        self.seed_catalog(&BANK_CATALOG).await
    }

    /// Insert catalog entries that are not present yet, returning how many were added
    #[instrument(skip(self, seeds), fields(count = seeds.len()))]
    pub async fn seed_catalog(&self, seeds: &[BankSeed]) -> Result<usize> {
        let mut added = 0;
        for seed in seeds {
            let result = sqlx::query("INSERT OR IGNORE INTO banks (bank_name, app_name) VALUES (?, ?)")
                .bind(seed.bank_name)
                .bind(seed.app_name)
                .execute(&self.pool)
                .await?;
            added += result.rows_affected() as usize;
        }

        info!("Banks seeded: {} new, {} in catalog", added, seeds.len());
        Ok(added)
    }

    /// All banks ordered by id
    pub async fn banks(&self) -> Result<Vec<BankRecord>> {
        let rows = sqlx::query("SELECT bank_id, bank_name, app_name FROM banks ORDER BY bank_id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| BankRecord {
                bank_id: BankId(row.get("bank_id")),
                bank_name: row.get("bank_name"),
                app_name: row.get::<Option<String>, _>("app_name").unwrap_or_default(),
            })
            .collect())
    }

    /// Insert annotated rows in a single transaction.
    ///
    /// Rows for banks missing from the catalog are skipped. Any conversion or
    /// database failure rolls the whole batch back.
    #[instrument(skip(self, rows), fields(count = rows.len()))]
    pub async fn insert_reviews(&self, rows: &[AnnotatedReviewRow]) -> Result<InsertReport> {
        let bank_ids: HashMap<String, BankId> = self
            .banks()
            .await?
            .into_iter()
            .map(|bank| (bank.bank_name, bank.bank_id))
            .collect();

        info!("Inserting {} reviews...", rows.len());
        let mut report = InsertReport::default();
        let mut tx = self.pool.begin().await?;

        for row in rows {
            let Some(bank_id) = bank_ids.get(&row.bank) else {
                warn!("Skipping review for unknown bank: {}", row.bank);
                report.skipped += 1;
                continue;
            };

            let review = row.to_new_review(*bank_id)?;
            insert_review(&mut tx, &review).await?;
            report.inserted += 1;
        }

        tx.commit().await?;
        info!(
            "Inserted {} reviews successfully, skipped {}",
            report.inserted, report.skipped
        );
        Ok(report)
    }

    /// Summarize what the reviews table holds
    pub async fn verify_data(&self) -> Result<VerificationReport> {
        let per_bank = sqlx::query(
            r#"
            SELECT b.bank_name, COUNT(*) AS review_count
            FROM reviews r JOIN banks b ON b.bank_id = r.bank_id
            GROUP BY r.bank_id
            ORDER BY r.bank_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let average_rating: Option<f64> = sqlx::query_scalar("SELECT AVG(rating) FROM reviews")
            .fetch_one(&self.pool)
            .await?;

        let total_reviews: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews")
            .fetch_one(&self.pool)
            .await?;

        Ok(VerificationReport {
            reviews_per_bank: per_bank
                .into_iter()
                .map(|row| (row.get("bank_name"), row.get("review_count")))
                .collect(),
            average_rating,
            total_reviews,
        })
    }
}

async fn insert_review(tx: &mut Transaction<'_, Sqlite>, review: &NewReview) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO reviews (
            bank_id, review_text, rating, review_date,
            sentiment_label, sentiment_score, source, theme
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(review.bank_id.0)
    .bind(&review.review_text)
    .bind(review.rating)
    .bind(review.review_date)
    .bind(review.sentiment_label.as_str())
    .bind(review.sentiment_score)
    .bind(&review.source)
    .bind(&review.theme)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
