//! Mean sentiment per bank bar chart

use crate::{GraphConfig, GraphRenderer};
use async_trait::async_trait;
use bankpulse_common::{PulseError, Result};
use bankpulse_insights::SentimentSummaryRow;
use plotters::prelude::*;
use std::path::Path;

pub const SENTIMENT_BY_BANK_FILE: &str = "sentiment_by_bank.png";

/// One bar of the chart
#[derive(Debug, Clone, PartialEq)]
pub struct BankBar {
    pub bank_name: String,
    pub mean: f64,
}

/// Bar chart of mean sentiment score per bank
#[derive(Debug, Default)]
pub struct SentimentByBankGraph {
    pub data: Vec<BankBar>,
}

impl SentimentByBankGraph {
    /// Banks without any scored review are left out
    pub fn from_summary(summary: &[SentimentSummaryRow]) -> Self {
        Self {
            data: summary
                .iter()
                .filter_map(|row| {
                    row.mean.map(|mean| BankBar {
                        bank_name: row.bank_name.clone(),
                        mean,
                    })
                })
                .collect(),
        }
    }

    /// Y range always containing zero, padded by 10%
    pub fn value_range(&self) -> (f64, f64) {
        let low = self.data.iter().map(|b| b.mean).fold(0.0_f64, f64::min);
        let high = self.data.iter().map(|b| b.mean).fold(0.0_f64, f64::max);
        let padding = ((high - low) * 0.1).max(0.05);
        (low - padding, high + padding)
    }

    fn draw(&self, config: &GraphConfig, path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        root.fill(&self.get_background_color(config))?;

        let (y_min, y_max) = self.value_range();
        let title_font = (config.style.title_font.family.as_str(), config.style.title_font.size);
        let mut chart = ChartBuilder::on(&root)
            .caption(&config.title, title_font)
            .margin(config.style.margins.top as i32)
            .x_label_area_size(config.style.margins.bottom)
            .y_label_area_size(config.style.margins.left)
            .build_cartesian_2d((0..self.data.len()).into_segmented(), y_min..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(config.x_label.as_deref().unwrap_or("Bank"))
            .y_desc(config.y_label.as_deref().unwrap_or("Mean sentiment score"))
            .x_label_formatter(&|x| match x {
                SegmentValue::CenterOf(i) => self
                    .data
                    .get(*i)
                    .map(|bar| bar.bank_name.clone())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .draw()?;

        let colors = self.get_colors(&config.style.color_scheme);
        let label_font = (config.style.label_font.family.as_str(), config.style.label_font.size);

        for (i, bar) in self.data.iter().enumerate() {
            let color = colors[i % colors.len()];
            let mut rect = Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0.0),
                    (SegmentValue::Exact(i + 1), bar.mean),
                ],
                color.filled(),
            );
            rect.set_margin(0, 0, 20, 20);
            chart.draw_series(std::iter::once(rect))?;

            chart.draw_series(std::iter::once(Text::new(
                format!("{:.2}", bar.mean),
                (SegmentValue::CenterOf(i), bar.mean),
                label_font.into_font().color(&BLACK),
            )))?;
        }

        root.present()?;
        Ok(())
    }
}

#[async_trait]
impl GraphRenderer for SentimentByBankGraph {
    fn file_name(&self) -> String {
        SENTIMENT_BY_BANK_FILE.to_string()
    }

    fn has_data(&self) -> bool {
        !self.data.is_empty()
    }

    async fn render_to_file(&self, config: &GraphConfig, path: &Path) -> Result<()> {
        if self.data.is_empty() {
            return Err(PulseError::graph("No scored reviews for sentiment by bank chart"));
        }
        self.draw(config, path)?;
        tracing::info!("Rendered sentiment by bank chart to {}", path.display());
        Ok(())
    }
}
