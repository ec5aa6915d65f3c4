//! Collect store reviews for every configured bank app

use anyhow::Context;
use bankpulse::stages;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, _guard) = bankpulse::init()?;

    info!("Scraping {} apps", config.collector.apps.len());
    let summary = stages::scrape(&config).await.context("Scrape failed")?;

    if summary.total == 0 {
        tracing::warn!("No reviews were collected");
    }
    Ok(())
}
