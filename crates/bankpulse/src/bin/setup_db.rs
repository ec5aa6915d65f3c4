//! Create the review tables and seed the bank catalog

use anyhow::Context;
use bankpulse::stages;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, _guard) = bankpulse::init()?;

    let db = bankpulse::connect(&config).await?;
    let result = stages::setup_db(&db).await;
    db.close().await;

    result.context("Database setup failed")?;
    Ok(())
}
