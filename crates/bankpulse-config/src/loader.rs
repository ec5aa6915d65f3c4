//! Configuration loading utilities

use crate::schema::Config;
use bankpulse_common::{PulseError, Result};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable pointing at an explicit configuration file.
pub const CONFIG_PATH_VAR: &str = "BANKPULSE_CONFIG";

/// File names searched in the working directory when no path is given.
const DEFAULT_CONFIG_FILES: [&str; 3] = ["bankpulse.yaml", "bankpulse.yml", "bankpulse.toml"];

/// Configuration loader for the pipeline stages
pub struct ConfigLoader {
    path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Creates a loader for a specific file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Creates a loader that discovers its file from the environment or working directory.
    pub fn discover() -> Self {
        let path = env::var_os(CONFIG_PATH_VAR).map(PathBuf::from).or_else(|| {
            DEFAULT_CONFIG_FILES
                .iter()
                .map(PathBuf::from)
                .find(|candidate| candidate.exists())
        });
        Self { path }
    }

    /// Loads, overrides from the environment, and validates the configuration.
    pub fn load(&self) -> Result<Config> {
        let mut config = match &self.path {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                Self::parse_file(path)?
            }
            None => {
                debug!("No configuration file found, using defaults");
                Config::default()
            }
        };

        apply_env_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a YAML or TOML file, chosen by extension.
    pub fn parse_file(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(PulseError::missing_input(path));
        }
        let content = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(toml::from_str(&content)?),
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
            other => Err(PulseError::config(format!(
                "Unsupported configuration format: {}",
                other.unwrap_or("<none>")
            ))),
        }
    }
}

/// Parse an environment variable into a typed value
fn parse_var<T>(var: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.trim().parse().map_err(|e| {
        PulseError::config_with_source(format!("Failed to parse environment variable '{}'", var), e)
    })
}

/// Apply environment variable overrides to configuration
pub fn apply_env_overrides(config: &mut Config) -> Result<()> {
    apply_overrides_from(config, |name| env::var(name).ok())
}

/// Apply overrides read through `lookup`, so tests need not touch the process environment
pub fn apply_overrides_from<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("BANKPULSE_DATABASE_URL") {
        config.database.url = url;
    }

    if let Some(url) = lookup("BANKPULSE_STORE_URL") {
        config.collector.base_url = url;
    }

    if let Some(lang) = lookup("BANKPULSE_LANG") {
        config.collector.lang = lang;
    }

    if let Some(country) = lookup("BANKPULSE_COUNTRY") {
        config.collector.country = country;
    }

    if let Some(value) = lookup("BANKPULSE_MAX_REVIEWS") {
        config.collector.max_reviews = parse_var("BANKPULSE_MAX_REVIEWS", &value)?;
    }

    if let Some(value) = lookup("BANKPULSE_PAGE_DELAY_MS") {
        config.collector.page_delay_ms = parse_var("BANKPULSE_PAGE_DELAY_MS", &value)?;
    }

    if let Some(value) = lookup("BANKPULSE_APP_DELAY_MS") {
        config.collector.app_delay_ms = parse_var("BANKPULSE_APP_DELAY_MS", &value)?;
    }

    if let Some(value) = lookup("BANKPULSE_FIGURES_DIR") {
        config.paths.figures_dir = PathBuf::from(value);
    }

    if let Some(level) = lookup("BANKPULSE_LOG_LEVEL") {
        config.logging.level = level;
    }

    if let Some(file) = lookup("BANKPULSE_LOG_FILE") {
        config.logging.file = Some(PathBuf::from(file));
    }

    Ok(())
}
