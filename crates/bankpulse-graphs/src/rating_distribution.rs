//! Rating histogram with one bar group per bin and one bar per bank

use crate::{GraphConfig, GraphRenderer};
use async_trait::async_trait;
use bankpulse_common::{PulseError, Result};
use bankpulse_insights::InsightRow;
use plotters::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;

pub const RATING_DISTRIBUTION_FILE: &str = "rating_distribution.png";

pub const RATING_BINS: usize = 5;
const BIN_WIDTH: f64 = 0.8;
const GROUP_WIDTH: f64 = 0.8;

/// Histogram bin for a rating in `1..=5`, five equal bins over that range
pub fn rating_bin(rating: f64) -> usize {
    let bin = ((rating - 1.0) / BIN_WIDTH).floor().max(0.0) as usize;
    bin.min(RATING_BINS - 1)
}

/// Per-bank rating counts, sorted by bank name
pub fn rating_bins(rows: &[InsightRow]) -> Vec<(String, [usize; RATING_BINS])> {
    let mut bins: BTreeMap<&str, [usize; RATING_BINS]> = BTreeMap::new();
    for row in rows {
        bins.entry(row.bank_name.as_str()).or_default()[rating_bin(row.rating)] += 1;
    }
    bins.into_iter()
        .map(|(bank, counts)| (bank.to_string(), counts))
        .collect()
}

#[derive(Debug, Default)]
pub struct RatingDistributionGraph {
    pub bins: Vec<(String, [usize; RATING_BINS])>,
}

impl RatingDistributionGraph {
    pub fn from_rows(rows: &[InsightRow]) -> Self {
        Self {
            bins: rating_bins(rows),
        }
    }

    fn max_count(&self) -> usize {
        self.bins
            .iter()
            .flat_map(|(_, counts)| counts.iter().copied())
            .max()
            .unwrap_or(0)
    }

    /// Horizontal extent of one bank's bar inside a bin group
    pub fn bar_span(&self, bin: usize, bank_index: usize) -> (f64, f64) {
        let banks = self.bins.len().max(1) as f64;
        let width = GROUP_WIDTH / banks;
        let start = (bin + 1) as f64 - GROUP_WIDTH / 2.0 + bank_index as f64 * width;
        (start, start + width)
    }

    fn draw(&self, config: &GraphConfig, path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        root.fill(&self.get_background_color(config))?;

        let y_max = (self.max_count() as f64 * 1.1).ceil().max(1.0);
        let title_font = (config.style.title_font.family.as_str(), config.style.title_font.size);
        let mut chart = ChartBuilder::on(&root)
            .caption(&config.title, title_font)
            .margin(config.style.margins.top as i32)
            .x_label_area_size(config.style.margins.bottom)
            .y_label_area_size(config.style.margins.left)
            .build_cartesian_2d(0.5f64..5.5f64, 0f64..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(RATING_BINS)
            .x_desc(config.x_label.as_deref().unwrap_or("Rating"))
            .y_desc(config.y_label.as_deref().unwrap_or("Reviews"))
            .x_label_formatter(&|x| format!("{:.0}", x))
            .draw()?;

        let colors = self.get_colors(&config.style.color_scheme);
        for (bank_index, (bank, counts)) in self.bins.iter().enumerate() {
            let color = colors[bank_index % colors.len()];
            chart
                .draw_series(counts.iter().enumerate().map(|(bin, count)| {
                    let (x0, x1) = self.bar_span(bin, bank_index);
                    Rectangle::new([(x0, 0.0), (x1, *count as f64)], color.filled())
                }))?
                .label(bank.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
        }

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }
}

#[async_trait]
impl GraphRenderer for RatingDistributionGraph {
    fn file_name(&self) -> String {
        RATING_DISTRIBUTION_FILE.to_string()
    }

    fn has_data(&self) -> bool {
        !self.bins.is_empty()
    }

    async fn render_to_file(&self, config: &GraphConfig, path: &Path) -> Result<()> {
        if self.bins.is_empty() {
            return Err(PulseError::graph("No reviews for rating distribution"));
        }
        self.draw(config, path)?;
        tracing::info!("Rendered rating distribution to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bankpulse_common::test_utils::assert_approx_eq;
    use chrono::NaiveDate;

    fn row(bank: &str, rating: f64) -> InsightRow {
        InsightRow {
            bank_name: bank.to_string(),
            review_text: "app keeps logging me out".to_string(),
            rating,
            sentiment_label: "negative".to_string(),
            sentiment_score: Some(-0.3),
            theme: "Reliability".to_string(),
            review_date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        }
    }

    #[test]
    fn test_integer_ratings_land_in_their_own_bin() {
        let bins: Vec<usize> = [1.0, 2.0, 3.0, 4.0, 5.0].iter().map(|r| rating_bin(*r)).collect();
        assert_eq!(bins, vec![0, 1, 2, 3, 4]);
        assert_eq!(rating_bin(0.2), 0);
        assert_eq!(rating_bin(9.0), 4);
    }

    #[test]
    fn test_rating_bins_per_bank() {
        let rows = vec![
            row("CBE", 5.0),
            row("BOA", 1.0),
            row("CBE", 5.0),
            row("BOA", 3.0),
        ];

        let bins = rating_bins(&rows);

        assert_eq!(bins[0], ("BOA".to_string(), [1, 0, 1, 0, 0]));
        assert_eq!(bins[1], ("CBE".to_string(), [0, 0, 0, 0, 2]));
    }

    #[test]
    fn test_bars_are_dodged_inside_each_bin() {
        let graph = RatingDistributionGraph::from_rows(&[row("BOA", 1.0), row("CBE", 2.0)]);

        let (a0, a1) = graph.bar_span(0, 0);
        let (b0, b1) = graph.bar_span(0, 1);
        assert_approx_eq(a0, 0.6, 1e-12);
        assert_approx_eq(a1, b0, 1e-12);
        assert_approx_eq(b1, 1.4, 1e-12);
        assert_eq!(graph.max_count(), 1);
    }
}
