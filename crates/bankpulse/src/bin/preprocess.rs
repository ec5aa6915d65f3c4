//! Clean the raw review scrape

use anyhow::Context;
use bankpulse::stages;

fn main() -> anyhow::Result<()> {
    let (config, _guard) = bankpulse::init()?;

    let outcome = stages::preprocess(&config).with_context(|| {
        format!("Preprocessing {} failed", config.paths.raw_reviews.display())
    })?;

    tracing::info!(
        "Kept {} of {} rows in {}",
        outcome.report.final_rows,
        outcome.report.initial_rows,
        outcome.output_path.display()
    );
    Ok(())
}
