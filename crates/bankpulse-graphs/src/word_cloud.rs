//! Word cloud of negative reviews for one bank and theme
//!
//! Word frequencies and placement are computed up front, so the layout can
//! be checked without any font available. Drawing only writes the already
//! placed words.

use crate::{GraphConfig, GraphRenderer};
use async_trait::async_trait;
use bankpulse_common::{PulseError, Result};
use bankpulse_insights::InsightRow;
use once_cell::sync::Lazy;
use plotters::prelude::*;
use std::collections::{HashMap, HashSet};
use std::path::Path;

pub const MIN_FONT_SIZE: u32 = 12;
pub const MAX_FONT_SIZE: u32 = 80;

/// Text width per character as a fraction of the font size
const CHAR_WIDTH_RATIO: f64 = 0.6;
const SPIRAL_STEP: f64 = 0.1;
const SPIRAL_GROWTH: f64 = 1.5;
const MAX_SPIRAL_STEPS: usize = 4000;

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and",
        "any", "are", "as", "at", "be", "because", "been", "before", "being", "below",
        "between", "both", "but", "by", "can", "could", "did", "do", "does", "doing", "don",
        "down", "during", "each", "even", "ever", "few", "for", "from", "further", "get", "had",
        "has", "have", "having", "he", "her", "here", "hers", "herself", "him", "himself",
        "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just", "me",
        "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once",
        "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same",
        "she", "should", "so", "some", "such", "than", "that", "the", "their", "theirs",
        "them", "themselves", "then", "there", "these", "they", "this", "those", "through",
        "to", "too", "under", "until", "up", "very", "was", "we", "were", "what", "when",
        "where", "which", "while", "who", "whom", "why", "will", "with", "would", "you",
        "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(word)
}

/// Lowercased texts of the first `max_reviews` reviews of `bank` and
/// `theme` scoring below `threshold`. Unscored reviews never match.
pub fn select_slice(
    rows: &[InsightRow],
    bank: &str,
    theme: &str,
    threshold: f64,
    max_reviews: usize,
) -> Vec<String> {
    rows.iter()
        .filter(|row| row.bank_name == bank && row.theme == theme)
        .filter(|row| row.sentiment_score.map_or(false, |score| score < threshold))
        .take(max_reviews)
        .map(|row| row.review_text.to_lowercase())
        .collect()
}

/// Word counts over `texts`, most frequent first with ties broken
/// alphabetically, capped at `max_words`.
///
/// Tokens are runs of alphanumeric characters and apostrophes. Single
/// characters, numbers and stopwords are dropped.
pub fn word_frequencies(texts: &[String], max_words: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for text in texts {
        let tokens = text
            .split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .map(|token| token.trim_matches('\''))
            .filter(|token| token.chars().count() > 1)
            .filter(|token| !token.chars().all(|c| c.is_numeric()));
        for token in tokens {
            let word = token.to_lowercase();
            if !is_stopword(&word) {
                *counts.entry(word).or_default() += 1;
            }
        }
    }

    let mut frequencies: Vec<(String, usize)> = counts.into_iter().collect();
    frequencies.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    frequencies.truncate(max_words);
    frequencies
}

/// A word with its pixel box, top-left anchored
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub word: String,
    pub count: usize,
    pub font_size: u32,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PlacedWord {
    pub fn overlaps(&self, other: &PlacedWord) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }

    pub fn fits_in(&self, width: u32, height: u32) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x + self.width <= width as i32
            && self.y + self.height <= height as i32
    }
}

/// Font size scaled linearly between the minimum and maximum by count
pub fn font_size_for(count: usize, max_count: usize) -> u32 {
    if max_count == 0 {
        return MIN_FONT_SIZE;
    }
    let share = count.min(max_count) as f64 / max_count as f64;
    MIN_FONT_SIZE + ((MAX_FONT_SIZE - MIN_FONT_SIZE) as f64 * share).round() as u32
}

fn text_box(word: &str, font_size: u32) -> (i32, i32) {
    let width = (word.chars().count() as f64 * font_size as f64 * CHAR_WIDTH_RATIO).ceil();
    (width as i32, font_size as i32)
}

/// Place words along an archimedean spiral from the canvas centre.
///
/// Each word takes the first spiral position where it neither leaves the
/// canvas nor overlaps an earlier word; if none exists it is retried one
/// font step smaller and dropped once it reaches the minimum size. The
/// result depends only on the input.
pub fn layout_words(frequencies: &[(String, usize)], width: u32, height: u32) -> Vec<PlacedWord> {
    let max_count = frequencies.iter().map(|(_, count)| *count).max().unwrap_or(0);
    let centre = (width as f64 / 2.0, height as f64 / 2.0);
    let mut placed: Vec<PlacedWord> = Vec::new();

    for (word, count) in frequencies {
        let mut font_size = font_size_for(*count, max_count);
        loop {
            let (w, h) = text_box(word, font_size);
            let position = (0..MAX_SPIRAL_STEPS).find_map(|step| {
                let angle = step as f64 * SPIRAL_STEP;
                let radius = SPIRAL_GROWTH * angle;
                let candidate = PlacedWord {
                    word: String::new(),
                    count: *count,
                    font_size,
                    x: (centre.0 + radius * angle.cos() - w as f64 / 2.0).round() as i32,
                    y: (centre.1 + radius * angle.sin() - h as f64 / 2.0).round() as i32,
                    width: w,
                    height: h,
                };
                let free = candidate.fits_in(width, height)
                    && placed.iter().all(|other| !candidate.overlaps(other));
                free.then_some(candidate)
            });

            match position {
                Some(candidate) => {
                    placed.push(PlacedWord {
                        word: word.clone(),
                        ..candidate
                    });
                    break;
                }
                None if font_size > MIN_FONT_SIZE => {
                    font_size = (font_size * 3 / 4).max(MIN_FONT_SIZE);
                }
                None => {
                    tracing::debug!("No room left for '{}' in word cloud", word);
                    break;
                }
            }
        }
    }

    placed
}

/// `wordcloud_<bank>_<theme>.png`, theme lowercased and spaces turned
/// into underscores
pub fn word_cloud_file_name(bank: &str, theme: &str) -> String {
    format!("wordcloud_{}_{}.png", bank, theme.to_lowercase()).replace(' ', "_")
}

#[derive(Debug)]
pub struct WordCloudGraph {
    pub bank: String,
    pub theme: String,
    pub frequencies: Vec<(String, usize)>,
}

impl WordCloudGraph {
    pub fn new(bank: &str, theme: &str, texts: &[String], max_words: usize) -> Self {
        Self {
            bank: bank.to_string(),
            theme: theme.to_string(),
            frequencies: word_frequencies(texts, max_words),
        }
    }

    fn draw(&self, config: &GraphConfig, path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        root.fill(&self.get_background_color(config))?;

        let colors = self.get_colors(&config.style.color_scheme);
        let family = config.style.label_font.family.as_str();
        for (i, word) in layout_words(&self.frequencies, config.width, config.height)
            .iter()
            .enumerate()
        {
            let style = (family, word.font_size)
                .into_font()
                .color(&colors[i % colors.len()]);
            root.draw_text(&word.word, &style, (word.x, word.y))?;
        }

        root.present()?;
        Ok(())
    }
}

#[async_trait]
impl GraphRenderer for WordCloudGraph {
    fn file_name(&self) -> String {
        word_cloud_file_name(&self.bank, &self.theme)
    }

    fn has_data(&self) -> bool {
        !self.frequencies.is_empty()
    }

    async fn render_to_file(&self, config: &GraphConfig, path: &Path) -> Result<()> {
        if self.frequencies.is_empty() {
            return Err(PulseError::graph(format!(
                "No words for {} {} word cloud",
                self.bank, self.theme
            )));
        }
        self.draw(config, path)?;
        tracing::info!("Rendered word cloud to {}", path.display());
        Ok(())
    }
}
