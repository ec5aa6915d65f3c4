//! Default values matching the pipeline's standard file layout.

use crate::schema::*;
use bankpulse_common::{LogFormat, BANK_CATALOG};
use std::path::PathBuf;

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            collector: CollectorConfig::default(),
            paths: PathsConfig::default(),
            graphs: GraphsConfig::default(),
            logging: LogSettings::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://data/bank_reviews.db".to_string(),
            max_connections: 5,
        }
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/store/v1".to_string(),
            lang: "en".to_string(),
            country: "ET".to_string(),
            sort: SortOrder::MostRelevant,
            page_size: 100,
            max_reviews: 450,
            page_delay_ms: 2000,
            app_delay_ms: 5000,
            timeout_secs: 30,
            error_log_path: PathBuf::from("scrape_errors.log"),
            apps: BANK_CATALOG
                .iter()
                .map(|seed| AppTarget {
                    bank: seed.bank_name.to_string(),
                    app_id: seed.app_id.to_string(),
                })
                .collect(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            raw_reviews: PathBuf::from("data/raw/reviews_raw.csv"),
            processed_reviews: PathBuf::from("data/processed/reviews_clean.csv"),
            annotated_reviews: PathBuf::from("data/processed/reviews_with_sentiment_themes.csv"),
            insights_dir: PathBuf::from("data/insights"),
            figures_dir: PathBuf::from("reports/figs"),
        }
    }
}

impl Default for GraphsConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            background_color: "#ffffff".to_string(),
            palette: vec![
                "#1f77b4".to_string(),
                "#ff7f0e".to_string(),
                "#2ca02c".to_string(),
                "#d62728".to_string(),
                "#9467bd".to_string(),
            ],
            word_cloud: WordCloudConfig::default(),
        }
    }
}

impl Default for WordCloudConfig {
    fn default() -> Self {
        Self {
            bank: "BOA".to_string(),
            theme: "Reliability".to_string(),
            max_reviews: 50,
            max_words: 100,
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            file: None,
        }
    }
}
