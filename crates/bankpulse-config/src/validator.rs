//! Runtime validation of loaded configuration.

use crate::schema::Config;
use bankpulse_common::{PulseError, Result};
use std::collections::HashSet;

/// Returns true for `#rrggbb` strings.
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.database.url.trim().is_empty() {
            return Err(PulseError::validation_field("Database URL cannot be empty", "database.url"));
        }
        if self.database.max_connections == 0 {
            return Err(PulseError::validation_field(
                "Max connections must be at least 1",
                "database.max_connections",
            ));
        }

        let collector = &self.collector;
        url::Url::parse(&collector.base_url).map_err(|e| {
            PulseError::config_with_source(
                format!("Store URL is not a valid URL: {}", collector.base_url),
                e,
            )
        })?;
        if !(1..=200).contains(&collector.page_size) {
            return Err(PulseError::validation_field(
                "Page size must be between 1 and 200",
                "collector.page_size",
            ));
        }
        if collector.apps.is_empty() {
            return Err(PulseError::validation_field("At least one app is required", "collector.apps"));
        }
        let mut banks = HashSet::new();
        for app in &collector.apps {
            if app.bank.trim().is_empty() || app.app_id.trim().is_empty() {
                return Err(PulseError::validation_field(
                    "App entries need a bank label and an app id",
                    "collector.apps",
                ));
            }
            if !banks.insert(app.bank.as_str()) {
                return Err(PulseError::validation_field(
                    format!("Bank '{}' is listed more than once", app.bank),
                    "collector.apps",
                ));
            }
        }

        let graphs = &self.graphs;
        for (name, value) in [("graphs.width", graphs.width), ("graphs.height", graphs.height)] {
            if !(100..=4000).contains(&value) {
                return Err(PulseError::validation_field(
                    "Image dimensions must be between 100 and 4000 pixels",
                    name,
                ));
            }
        }
        if !is_hex_color(&graphs.background_color) {
            return Err(PulseError::validation_field(
                "Background color must be a hex color like #ffffff",
                "graphs.background_color",
            ));
        }
        if graphs.palette.is_empty() || !graphs.palette.iter().all(|c| is_hex_color(c)) {
            return Err(PulseError::validation_field(
                "Palette must contain hex colors",
                "graphs.palette",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::AppTarget;

    #[test]
    fn test_hex_color() {
        assert!(is_hex_color("#a1B2c3"));
        assert!(!is_hex_color("a1b2c3"));
        assert!(!is_hex_color("#a1b2cz"));
        assert!(!is_hex_color("#fff"));
    }

    #[test]
    fn test_duplicate_bank_rejected() {
        let mut config = Config::default();
        config.collector.apps.push(AppTarget {
            bank: "CBE".to_string(),
            app_id: "com.example.other".to_string(),
        });
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_page_size_bounds() {
        let mut config = Config::default();
        config.collector.page_size = 0;
        assert!(config.validate().is_err());
        config.collector.page_size = 200;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_store_url() {
        let mut config = Config::default();
        config.collector.base_url = "not a url".to_string();
        assert!(matches!(config.validate(), Err(PulseError::Config { .. })));
    }
}
