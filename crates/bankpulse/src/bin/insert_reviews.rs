//! Insert the annotated reviews into the database

use anyhow::Context;
use bankpulse::stages;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, _guard) = bankpulse::init()?;

    let db = bankpulse::connect(&config).await?;
    let result = stages::insert_reviews(&db, &config).await;
    db.close().await;

    let (report, _) = result.with_context(|| {
        format!(
            "Inserting {} failed",
            config.paths.annotated_reviews.display()
        )
    })?;
    if report.skipped > 0 {
        tracing::warn!("{} reviews had no matching bank", report.skipped);
    }
    Ok(())
}
