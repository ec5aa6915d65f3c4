//! Configuration schema definitions using serde.

use bankpulse_common::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Review collection configuration.
    pub collector: CollectorConfig,
    /// Input and output file locations.
    pub paths: PathsConfig,
    /// Chart rendering configuration.
    pub graphs: GraphsConfig,
    /// Logging configuration.
    pub logging: LogSettings,
}

/// Database connection configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Connection string, e.g. `sqlite://data/bank_reviews.db`.
    pub url: String,
    /// Maximum pooled connections.
    pub max_connections: u32,
}

/// Ordering requested from the store API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Store's relevance ranking.
    MostRelevant,
    /// Most recent first.
    Newest,
    /// Ordered by star rating.
    Rating,
}

impl SortOrder {
    /// Query parameter value sent to the store API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MostRelevant => "most_relevant",
            Self::Newest => "newest",
            Self::Rating => "rating",
        }
    }
}

/// One app to scrape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppTarget {
    /// Bank label attached to every review of this app.
    pub bank: String,
    /// Store package identifier.
    pub app_id: String,
}

/// Review collection configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Base URL of the review-listing API.
    pub base_url: String,
    /// Review language filter.
    pub lang: String,
    /// Store country filter.
    pub country: String,
    /// Requested ordering.
    pub sort: SortOrder,
    /// Reviews requested per page.
    pub page_size: u32,
    /// Reviews kept per app after paging.
    pub max_reviews: usize,
    /// Pause between two page requests, in milliseconds.
    pub page_delay_ms: u64,
    /// Pause between two apps, in milliseconds.
    pub app_delay_ms: u64,
    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,
    /// Side file receiving per-app failures.
    pub error_log_path: PathBuf,
    /// Apps to scrape, in order.
    pub apps: Vec<AppTarget>,
}

/// File locations shared by all stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Combined scrape output.
    pub raw_reviews: PathBuf,
    /// Cleaner output.
    pub processed_reviews: PathBuf,
    /// Cleaned reviews annotated by the sentiment/theme step.
    pub annotated_reviews: PathBuf,
    /// Directory receiving aggregate CSV files.
    pub insights_dir: PathBuf,
    /// Directory receiving chart images.
    pub figures_dir: PathBuf,
}

/// Chart rendering configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphsConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Background color (hex).
    pub background_color: String,
    /// Series palette (hex), cycled per bank.
    pub palette: Vec<String>,
    /// Word cloud slice.
    pub word_cloud: WordCloudConfig,
}

/// Which reviews feed the word cloud.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordCloudConfig {
    /// Bank to sample.
    pub bank: String,
    /// Theme to sample.
    pub theme: String,
    /// Maximum number of reviews joined into the cloud text.
    pub max_reviews: usize,
    /// Maximum number of words drawn.
    pub max_words: usize,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Filter directive, overridden by `RUST_LOG`.
    pub level: String,
    /// Output layout.
    pub format: LogFormat,
    /// Optional log file.
    pub file: Option<PathBuf>,
}

impl From<&LogSettings> for bankpulse_common::LoggingConfig {
    fn from(settings: &LogSettings) -> Self {
        Self {
            level: settings.level.clone(),
            format: settings.format,
            file_path: settings.file.clone(),
            ..Self::default()
        }
    }
}
