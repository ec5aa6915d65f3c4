//! # bankpulse
//!
//! Stage entry points of the review pipeline. Each binary under `src/bin`
//! loads the configuration, starts logging and runs one stage from
//! [`stages`].

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod stages;

use anyhow::Context;
use bankpulse_common::{init_logging, LoggingConfig, LoggingGuard};
use bankpulse_config::{Config, ConfigLoader};
use bankpulse_store::Database;

/// Load the configuration and start logging.
///
/// Keep the returned guard alive until `main` returns, or buffered file
/// output is lost.
pub fn init() -> anyhow::Result<(Config, LoggingGuard)> {
    let config = ConfigLoader::discover()
        .load()
        .context("Failed to load configuration")?;
    let guard = init_logging(LoggingConfig::from(&config.logging))
        .context("Failed to initialize logging")?;
    Ok((config, guard))
}

/// Open the configured database
pub async fn connect(config: &Config) -> anyhow::Result<Database> {
    Database::connect(&config.database.url, config.database.max_connections)
        .await
        .with_context(|| format!("Failed to connect to {}", config.database.url))
}
