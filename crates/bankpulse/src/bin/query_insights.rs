//! Aggregate the stored reviews into insight files

use anyhow::Context;
use bankpulse::stages;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, _guard) = bankpulse::init()?;

    let db = bankpulse::connect(&config).await?;
    let result = stages::query_insights(&db, &config).await;
    db.close().await;

    let paths = result.context("Insight query failed")?;
    tracing::info!("Summary written to {}", paths.sentiment_summary.display());
    Ok(())
}
