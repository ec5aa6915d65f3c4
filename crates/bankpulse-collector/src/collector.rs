//! Per-app review scraping with failure isolation

use crate::client::{PageRequest, ReviewSource, StoreReview};
use bankpulse_common::{format_timestamp, PulseError, RawReviewRow, Result, RATING_RANGE, SOURCE_GOOGLE_PLAY};
use bankpulse_config::{AppTarget, CollectorConfig, SortOrder};
use chrono::Utc;
use std::collections::HashSet;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// Layout of the `date` column in raw files.
pub const RAW_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Settings that drive a collection run
#[derive(Debug, Clone)]
pub struct CollectionSettings {
    pub lang: String,
    pub country: String,
    pub sort: SortOrder,
    pub page_size: u32,
    /// Reviews kept per app
    pub max_reviews: usize,
    pub page_delay: Duration,
    pub app_delay: Duration,
    /// Side file receiving per-app failures
    pub error_log_path: PathBuf,
}

impl From<&CollectorConfig> for CollectionSettings {
    fn from(config: &CollectorConfig) -> Self {
        Self {
            lang: config.lang.clone(),
            country: config.country.clone(),
            sort: config.sort,
            page_size: config.page_size,
            max_reviews: config.max_reviews,
            page_delay: Duration::from_millis(config.page_delay_ms),
            app_delay: Duration::from_millis(config.app_delay_ms),
            error_log_path: config.error_log_path.clone(),
        }
    }
}

/// Scrapes reviews app by app from a [`ReviewSource`]
pub struct Collector<S> {
    source: S,
    settings: CollectionSettings,
}

impl<S: ReviewSource> Collector<S> {
    pub fn new(source: S, settings: CollectionSettings) -> Self {
        Self { source, settings }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Page through every review of an app, pausing between pages.
    ///
    /// Paging stops when the store sends no token or one already followed.
    #[instrument(skip(self))]
    pub async fn fetch_all_reviews(&self, app_id: &str) -> Result<Vec<StoreReview>> {
        let mut reviews = Vec::new();
        let mut request = PageRequest {
            app_id: app_id.to_string(),
            lang: self.settings.lang.clone(),
            country: self.settings.country.clone(),
            sort: self.settings.sort,
            count: self.settings.page_size,
            token: None,
        };
        let mut pages = 0usize;
        let mut seen_tokens = HashSet::new();

        loop {
            let page = self.source.fetch_page(&request).await?;
            pages += 1;
            reviews.extend(page.reviews);

            match page.next_token {
                Some(token) if !seen_tokens.insert(token.clone()) => {
                    warn!("Store returned continuation token '{}' again, stopping", token);
                    break;
                }
                Some(token) => {
                    request.token = Some(token);
                    tokio::time::sleep(self.settings.page_delay).await;
                }
                None => break,
            }
        }

        debug!("Fetched {} reviews in {} pages", reviews.len(), pages);
        Ok(reviews)
    }

    /// Scrape a single app; failures are logged and yield an empty result
    #[instrument(skip(self))]
    pub async fn scrape_reviews(&self, bank: &str, app_id: &str) -> Vec<RawReviewRow> {
        info!(
            "Fetching all reviews for {} ({}), keeping at most {}",
            bank, app_id, self.settings.max_reviews
        );

        let reviews = match self.fetch_all_reviews(app_id).await {
            Ok(reviews) => reviews,
            Err(e) => {
                error!("Error scraping {} ({}): {}", app_id, bank, e);
                self.record_failure(bank, &e);
                return Vec::new();
            }
        };

        if reviews.is_empty() {
            warn!("No reviews found for {}. Check app id, lang, or country filters.", app_id);
            return Vec::new();
        }

        let rows = select_reviews(reviews, bank, self.settings.max_reviews);
        info!("Scraped and kept {} reviews for {}", rows.len(), bank);
        rows
    }

    /// Scrape every app in order, pausing between apps
    pub async fn scrape_all(&self, apps: &[AppTarget]) -> Vec<RawReviewRow> {
        let mut combined = Vec::new();

        for (index, app) in apps.iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(self.settings.app_delay).await;
            }

            info!("Starting scrape for {} ({})", app.bank, app.app_id);
            let rows = self.scrape_reviews(&app.bank, &app.app_id).await;
            if rows.is_empty() {
                warn!("Skipping {} due to empty results", app.bank);
            } else {
                combined.extend(rows);
            }
        }

        combined
    }

    /// Append a failure line to the side log
    fn record_failure(&self, bank: &str, err: &PulseError) {
        let line = format!("{} - {}: {}\n", format_timestamp(Utc::now()), bank, err);
        let written = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.settings.error_log_path)
            .and_then(|mut file| file.write_all(line.as_bytes()));

        if let Err(e) = written {
            warn!(
                "Could not write to {}: {}",
                self.settings.error_log_path.display(),
                e
            );
        }
    }
}

/// Project store entries to raw rows, truncate, then drop incomplete ones
pub fn select_reviews(reviews: Vec<StoreReview>, bank: &str, max_reviews: usize) -> Vec<RawReviewRow> {
    reviews
        .into_iter()
        .take(max_reviews)
        .filter(|review| {
            review.content.is_some()
                && review.score.map_or(false, |score| RATING_RANGE.contains(&score))
        })
        .map(|review| project_review(review, bank))
        .collect()
}

/// Map a store entry onto the raw row layout
pub fn project_review(review: StoreReview, bank: &str) -> RawReviewRow {
    RawReviewRow {
        review: review.content,
        rating: review.score.map(|score| score.to_string()),
        date: review.at.map(|at| at.format(RAW_DATE_FORMAT).to_string()),
        user_name: review.user_name,
        reply_content: review.reply_content,
        bank: Some(bank.to_string()),
        source: Some(SOURCE_GOOGLE_PLAY.to_string()),
    }
}
