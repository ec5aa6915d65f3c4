//! # bankpulse graphs
//!
//! Static PNG charts drawn from the aggregator's CSV files: mean sentiment
//! per bank, a bank by theme heatmap, rating histograms and a word cloud
//! of negative reviews.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod manager;
pub mod rating_distribution;
pub mod renderer;
pub mod sentiment_by_bank;
pub mod theme_heatmap;
pub mod types;
pub mod word_cloud;

pub use manager::{GraphManager, RenderReport};
pub use rating_distribution::{rating_bin, rating_bins, RatingDistributionGraph};
pub use renderer::{diverging_color, parse_hex_color, GraphRenderer};
pub use sentiment_by_bank::{BankBar, SentimentByBankGraph};
pub use theme_heatmap::ThemeHeatmapGraph;
pub use types::*;
pub use word_cloud::{
    layout_words, select_slice, word_cloud_file_name, word_frequencies, PlacedWord,
    WordCloudGraph,
};
