//! One function per pipeline stage, shared by the binaries and tests

use bankpulse_cleaner::{preprocess_reviews, CleaningOutcome};
use bankpulse_collector::{
    write_raw_reviews, CollectionSettings, CollectionSummary, Collector, ReviewSource, StoreClient,
};
use bankpulse_common::Result;
use bankpulse_config::Config;
use bankpulse_graphs::{GraphManager, RenderReport};
use bankpulse_insights::{compute_insights, fetch_insight_rows, write_insights, InsightPaths};
use bankpulse_store::{load_annotated_reviews, Database, InsertReport, VerificationReport};
use tracing::{info, instrument, warn};

/// Scrape every configured app from the store API
pub async fn scrape(config: &Config) -> Result<CollectionSummary> {
    let client = StoreClient::new(&config.collector)?;
    scrape_from(client, config).await
}

/// Scrape every configured app from `source` and write the raw CSV.
///
/// An empty scrape leaves any existing raw file untouched.
#[instrument(skip_all, fields(apps = config.collector.apps.len()))]
pub async fn scrape_from<S: ReviewSource>(source: S, config: &Config) -> Result<CollectionSummary> {
    let collector = Collector::new(source, CollectionSettings::from(&config.collector));
    let rows = collector.scrape_all(&config.collector.apps).await;

    if rows.is_empty() {
        warn!(
            "No reviews scraped; keeping {} as it was",
            config.paths.raw_reviews.display()
        );
    } else {
        write_raw_reviews(&config.paths.raw_reviews, &rows)?;
        info!("Saved raw data to {}", config.paths.raw_reviews.display());
    }

    let summary = CollectionSummary::from_rows(&rows);
    summary.log();
    Ok(summary)
}

/// Clean the raw scrape into the processed file
pub fn preprocess(config: &Config) -> Result<CleaningOutcome> {
    preprocess_reviews(&config.paths.raw_reviews, &config.paths.processed_reviews)
}

/// Create the tables and seed the bank catalog, returning new banks
pub async fn setup_db(db: &Database) -> Result<usize> {
    db.create_tables().await?;
    let seeded = db.seed_banks().await?;
    info!("Tables created and {} banks seeded", seeded);
    Ok(seeded)
}

/// Load the annotated file, insert it and report what the tables hold
pub async fn insert_reviews(
    db: &Database,
    config: &Config,
) -> Result<(InsertReport, VerificationReport)> {
    let rows = load_annotated_reviews(&config.paths.annotated_reviews)?;
    let report = db.insert_reviews(&rows).await?;

    let verification = db.verify_data().await?;
    verification.log();
    Ok((report, verification))
}

/// Join, aggregate and write the insight files
pub async fn query_insights(db: &Database, config: &Config) -> Result<InsightPaths> {
    let rows = fetch_insight_rows(db).await?;
    let insights = compute_insights(rows);
    write_insights(&config.paths.insights_dir, &insights)
}

/// Draw the charts from the insight files
pub async fn visualize(config: &Config) -> Result<RenderReport> {
    GraphManager::new(config.graphs.clone(), &config.paths.figures_dir)
        .render_from_dir(&config.paths.insights_dir)
        .await
}
