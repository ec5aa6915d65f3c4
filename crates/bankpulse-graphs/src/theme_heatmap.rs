//! Bank by theme sentiment heatmap

use crate::renderer::diverging_color;
use crate::{GraphConfig, GraphRenderer};
use async_trait::async_trait;
use bankpulse_common::{PulseError, Result};
use bankpulse_insights::ThemeMatrix;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

pub const THEME_HEATMAP_FILE: &str = "theme_sentiment_heatmap.png";

/// Heatmap with one row per bank and one column per theme
#[derive(Debug, Default)]
pub struct ThemeHeatmapGraph {
    pub matrix: ThemeMatrix,
}

impl ThemeHeatmapGraph {
    pub fn new(matrix: ThemeMatrix) -> Self {
        Self { matrix }
    }

    /// Color for one cell, symmetric around zero
    pub fn cell_color(&self, value: f64) -> RGBColor {
        diverging_color(value, self.matrix.max_abs())
    }

    fn draw(&self, config: &GraphConfig, path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        root.fill(&self.get_background_color(config))?;

        let themes = &self.matrix.themes;
        let banks = &self.matrix.banks;
        let title_font = (config.style.title_font.family.as_str(), config.style.title_font.size);
        let mut chart = ChartBuilder::on(&root)
            .caption(&config.title, title_font)
            .margin(config.style.margins.top as i32)
            .x_label_area_size(config.style.margins.bottom)
            .y_label_area_size(config.style.margins.left)
            .build_cartesian_2d(
                (0..themes.len()).into_segmented(),
                (0..banks.len()).into_segmented(),
            )?;

        let label_for = |names: &[String], value: &SegmentValue<usize>| match value {
            SegmentValue::CenterOf(i) => names.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        };
        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(config.x_label.as_deref().unwrap_or("Theme"))
            .y_desc(config.y_label.as_deref().unwrap_or("Bank"))
            .x_label_formatter(&|x| label_for(themes, x))
            .y_label_formatter(&|y| label_for(banks, y))
            .draw()?;

        let cells = banks.iter().enumerate().flat_map(|(row, _)| {
            (0..themes.len()).map(move |col| (row, col))
        });
        chart.draw_series(cells.map(|(row, col)| {
            let value = self.matrix.values[row][col];
            Rectangle::new(
                [
                    (SegmentValue::Exact(col), SegmentValue::Exact(row)),
                    (SegmentValue::Exact(col + 1), SegmentValue::Exact(row + 1)),
                ],
                self.cell_color(value).filled(),
            )
        }))?;

        let label_font = (config.style.label_font.family.as_str(), config.style.label_font.size);
        for (row, values) in self.matrix.values.iter().enumerate() {
            for (col, value) in values.iter().enumerate() {
                let style = label_font
                    .into_font()
                    .color(&BLACK)
                    .pos(Pos::new(HPos::Center, VPos::Center));
                chart.draw_series(std::iter::once(Text::new(
                    format!("{:.2}", value),
                    (SegmentValue::CenterOf(col), SegmentValue::CenterOf(row)),
                    style,
                )))?;
            }
        }

        root.present()?;
        Ok(())
    }
}

#[async_trait]
impl GraphRenderer for ThemeHeatmapGraph {
    fn file_name(&self) -> String {
        THEME_HEATMAP_FILE.to_string()
    }

    fn has_data(&self) -> bool {
        !self.matrix.is_empty()
    }

    async fn render_to_file(&self, config: &GraphConfig, path: &Path) -> Result<()> {
        if self.matrix.is_empty() {
            return Err(PulseError::graph("No bank/theme pairs for heatmap"));
        }
        self.draw(config, path)?;
        tracing::info!("Rendered theme sentiment heatmap to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_colors_follow_matrix_extent() {
        let graph = ThemeHeatmapGraph::new(ThemeMatrix {
            banks: vec!["BOA".to_string(), "CBE".to_string()],
            themes: vec!["Reliability".to_string()],
            values: vec![vec![-0.4], vec![0.2]],
        });

        assert!(graph.has_data());
        assert_eq!(graph.cell_color(-0.4), RGBColor(215, 48, 39));
        assert_eq!(graph.cell_color(0.0), RGBColor(255, 255, 191));
        let half_green = graph.cell_color(0.2);
        assert!(half_green.1 > 152 && half_green.1 < 255);
    }

    #[test]
    fn test_empty_matrix_has_no_data() {
        assert!(!ThemeHeatmapGraph::default().has_data());
    }
}
