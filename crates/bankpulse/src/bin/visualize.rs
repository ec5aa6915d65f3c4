//! Draw the insight charts

use anyhow::Context;
use bankpulse::stages;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, _guard) = bankpulse::init()?;

    let report = stages::visualize(&config)
        .await
        .context("Rendering charts failed")?;

    for path in &report.written {
        tracing::info!("Wrote {}", path.display());
    }
    Ok(())
}
