//! Graph rendering trait and shared color helpers

use crate::{ColorScheme, GraphConfig};
use async_trait::async_trait;
use bankpulse_common::Result;
use plotters::prelude::*;
use std::path::Path;

/// A chart that can be drawn to a PNG file
#[async_trait]
pub trait GraphRenderer: Send + Sync {
    /// File name under the figures directory
    fn file_name(&self) -> String;

    /// Whether there is anything to draw
    fn has_data(&self) -> bool;

    /// Render the chart to a file path
    async fn render_to_file(&self, config: &GraphConfig, path: &Path) -> Result<()>;

    /// Get colors from color scheme
    fn get_colors(&self, scheme: &ColorScheme) -> Vec<RGBColor> {
        match scheme {
            ColorScheme::Default => vec![
                RGBColor(31, 119, 180),  // Blue
                RGBColor(255, 127, 14),  // Orange
                RGBColor(44, 160, 44),   // Green
                RGBColor(214, 39, 40),   // Red
                RGBColor(148, 103, 189), // Purple
            ],
            ColorScheme::Custom(colors) if !colors.is_empty() => colors
                .iter()
                .map(|color_str| self.parse_color(color_str))
                .collect(),
            ColorScheme::Custom(_) => self.get_colors(&ColorScheme::Default),
        }
    }

    /// Parse a color string (hex format) to RGBColor
    fn parse_color(&self, color_str: &str) -> RGBColor {
        parse_hex_color(color_str).unwrap_or(RGBColor(0, 0, 0))
    }

    /// Get background color from style config
    fn get_background_color(&self, config: &GraphConfig) -> RGBColor {
        config
            .style
            .background_color
            .as_deref()
            .and_then(parse_hex_color)
            .unwrap_or(RGBColor(255, 255, 255))
    }
}

/// `#rrggbb` to a color
pub fn parse_hex_color(color_str: &str) -> Option<RGBColor> {
    let hex = color_str.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(RGBColor(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

const DIVERGING_LOW: (f64, f64, f64) = (215.0, 48.0, 39.0);
const DIVERGING_MID: (f64, f64, f64) = (255.0, 255.0, 191.0);
const DIVERGING_HIGH: (f64, f64, f64) = (26.0, 152.0, 80.0);

/// Red-yellow-green color for `value`, with yellow at zero and full
/// saturation at `limit` in either direction
pub fn diverging_color(value: f64, limit: f64) -> RGBColor {
    let limit = if limit > 0.0 { limit } else { 1.0 };
    let t = (value / limit).clamp(-1.0, 1.0);
    let (from, to, weight) = if t < 0.0 {
        (DIVERGING_MID, DIVERGING_LOW, -t)
    } else {
        (DIVERGING_MID, DIVERGING_HIGH, t)
    };
    let mix = |a: f64, b: f64| (a + (b - a) * weight).round() as u8;
    RGBColor(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}
