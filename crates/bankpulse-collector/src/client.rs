//! Review store API client
//!
//! [`ReviewSource`] is the seam between the collector and the third-party
//! review-listing API. [`StoreClient`] is the HTTP implementation; tests
//! substitute their own sources.

use async_trait::async_trait;
use bankpulse_common::{PulseError, Result};
use bankpulse_config::{CollectorConfig, SortOrder};
use chrono::{DateTime, Utc};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Parameters of one page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub app_id: String,
    pub lang: String,
    pub country: String,
    pub sort: SortOrder,
    pub count: u32,
    /// Continuation token returned by the previous page, if any.
    pub token: Option<String>,
}

/// One review as returned by the store API.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreReview {
    /// Review body
    pub content: Option<String>,
    /// Star rating
    pub score: Option<f64>,
    /// Time the review was posted
    pub at: Option<DateTime<Utc>>,
    pub user_name: Option<String>,
    /// Developer reply, if any
    pub reply_content: Option<String>,
}

/// A page of reviews plus the token for the next one.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPage {
    #[serde(default)]
    pub reviews: Vec<StoreReview>,
    pub next_token: Option<String>,
}

/// Source of paginated store reviews
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewSource: Send + Sync {
    /// Fetch a single page of reviews
    async fn fetch_page(&self, request: &PageRequest) -> Result<ReviewPage>;
}

/// HTTP client for the review-listing API
#[derive(Debug, Clone)]
pub struct StoreClient {
    client: Client,
    base_url: String,
}

impl StoreClient {
    /// Create a new client from collector settings
    pub fn new(config: &CollectorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PulseError::network_with_source("Failed to create HTTP client", e))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build the listing URL for an app
    fn build_url(&self, app_id: &str) -> String {
        format!("{}/apps/{}/reviews", self.base_url, app_id)
    }

    /// Turn non-success statuses into typed errors
    fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(PulseError::store_api_with_status(
                format!("Review listing returned {}", status),
                status.as_u16(),
            ))
        }
    }
}

#[async_trait]
impl ReviewSource for StoreClient {
    #[instrument(skip(self), fields(app_id = %request.app_id))]
    async fn fetch_page(&self, request: &PageRequest) -> Result<ReviewPage> {
        let url = self.build_url(&request.app_id);
        let count = request.count.to_string();

        let mut query = vec![
            ("lang", request.lang.as_str()),
            ("country", request.country.as_str()),
            ("sort", request.sort.as_str()),
            ("count", count.as_str()),
        ];
        if let Some(token) = request.token.as_deref() {
            query.push(("token", token));
        }

        debug!("Requesting {} with {} parameters", url, query.len());
        let response = self.client.get(&url).query(&query).send().await?;
        let page: ReviewPage = Self::check_status(response)?.json().await?;

        debug!(
            "Received {} reviews, more pages: {}",
            page.reviews.len(),
            page.next_token.is_some()
        );
        Ok(page)
    }
}
