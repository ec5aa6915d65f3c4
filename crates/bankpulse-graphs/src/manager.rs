//! Renders every chart into the figures directory

use crate::rating_distribution::RatingDistributionGraph;
use crate::sentiment_by_bank::SentimentByBankGraph;
use crate::theme_heatmap::ThemeHeatmapGraph;
use crate::word_cloud::{select_slice, word_cloud_file_name, WordCloudGraph};
use crate::{GraphConfig, GraphRenderer};
use bankpulse_common::{Result, NEGATIVE_SENTIMENT_THRESHOLD};
use bankpulse_config::GraphsConfig;
use bankpulse_insights::{
    read_full_reviews, read_sentiment_summary, read_theme_matrix, InsightPaths, InsightRow,
    SentimentSummaryRow, ThemeMatrix,
};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// What a render pass produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub written: Vec<PathBuf>,
    /// File names of charts left out for lack of data
    pub skipped: Vec<String>,
}

pub struct GraphManager {
    settings: GraphsConfig,
    figures_dir: PathBuf,
}

impl GraphManager {
    pub fn new(settings: GraphsConfig, figures_dir: impl Into<PathBuf>) -> Self {
        Self {
            settings,
            figures_dir: figures_dir.into(),
        }
    }

    /// Charts in drawing order, each with its own labels
    pub fn charts(
        &self,
        rows: &[InsightRow],
        summary: &[SentimentSummaryRow],
        matrix: &ThemeMatrix,
    ) -> Vec<(Box<dyn GraphRenderer>, GraphConfig)> {
        let cloud = &self.settings.word_cloud;
        let texts = select_slice(
            rows,
            &cloud.bank,
            &cloud.theme,
            NEGATIVE_SENTIMENT_THRESHOLD,
            cloud.max_reviews,
        );

        vec![
            (
                Box::new(SentimentByBankGraph::from_summary(summary)) as Box<dyn GraphRenderer>,
                self.config("Mean Sentiment Score by Bank")
                    .with_labels("Bank", "Mean sentiment score"),
            ),
            (
                Box::new(ThemeHeatmapGraph::new(matrix.clone())) as Box<dyn GraphRenderer>,
                self.config("Mean Sentiment by Bank and Theme")
                    .with_labels("Theme", "Bank"),
            ),
            (
                Box::new(RatingDistributionGraph::from_rows(rows)) as Box<dyn GraphRenderer>,
                self.config("Rating Distribution by Bank")
                    .with_labels("Rating", "Reviews"),
            ),
            (
                Box::new(WordCloudGraph::new(
                    &cloud.bank,
                    &cloud.theme,
                    &texts,
                    cloud.max_words,
                )) as Box<dyn GraphRenderer>,
                self.config(&format!("{} {} Complaints", cloud.bank, cloud.theme)),
            ),
        ]
    }

    fn config(&self, title: &str) -> GraphConfig {
        GraphConfig::from_settings(&self.settings, title)
    }

    /// Render every chart that has data, creating the figures directory
    #[instrument(skip_all, fields(dir = %self.figures_dir.display()))]
    pub async fn render_all(
        &self,
        rows: &[InsightRow],
        summary: &[SentimentSummaryRow],
        matrix: &ThemeMatrix,
    ) -> Result<RenderReport> {
        std::fs::create_dir_all(&self.figures_dir)?;

        let mut report = RenderReport::default();
        for (chart, config) in self.charts(rows, summary, matrix) {
            let file_name = chart.file_name();
            if !chart.has_data() {
                warn!("Skipping {}: no data to draw", file_name);
                report.skipped.push(file_name);
                continue;
            }

            let path = self.figures_dir.join(&file_name);
            chart.render_to_file(&config, &path).await?;
            report.written.push(path);
        }

        info!(
            "Saved {} charts to {} ({} skipped)",
            report.written.len(),
            self.figures_dir.display(),
            report.skipped.len()
        );
        Ok(report)
    }

    /// Load the aggregator's files from `insights_dir` and render them
    pub async fn render_from_dir(&self, insights_dir: &Path) -> Result<RenderReport> {
        let paths = InsightPaths::in_dir(insights_dir);
        let rows = read_full_reviews(&paths.full_reviews)?;
        let summary = read_sentiment_summary(&paths.sentiment_summary)?;
        let matrix = read_theme_matrix(&paths.theme_sentiment)?;
        self.render_all(&rows, &summary, &matrix).await
    }

    /// File name the word cloud is written under
    pub fn word_cloud_file(&self) -> String {
        word_cloud_file_name(&self.settings.word_cloud.bank, &self.settings.word_cloud.theme)
    }
}
