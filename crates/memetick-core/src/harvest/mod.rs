//! External content sources the extractor feeds on.
//!
//! Both clients degrade the same way: any transport, status, or payload
//! problem surfaces as a [`HarvestError`], and the pipeline turns that into
//! an empty candidate list for the affected source.

use std::sync::Arc;

use scraper::Html;
use serde::Deserialize;
use thiserror::Error;

use crate::http_client::{HttpClient, HttpRequest};
use crate::ForumPost;

const HARVEST_TIMEOUT_MS: u64 = 15_000;

const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// A content source request failed or returned unusable content.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HarvestError {
    #[error("source transport error: {0}")]
    Transport(String),
    #[error("source returned status {0}")]
    Status(u16),
    #[error("source payload was unparseable: {0}")]
    UnexpectedPayload(String),
}

/// Fetches the sentiment-aggregation page and reduces it to visible text.
#[derive(Clone)]
pub struct SentimentPageClient {
    http: Arc<dyn HttpClient>,
    url: String,
}

impl SentimentPageClient {
    pub fn new(http: Arc<dyn HttpClient>, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    pub async fn fetch_page_text(&self) -> Result<String, HarvestError> {
        let request = HttpRequest::get(&self.url)
            .with_header("user-agent", BROWSER_USER_AGENT)
            .with_timeout_ms(HARVEST_TIMEOUT_MS);

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|error| HarvestError::Transport(error.message().to_owned()))?;

        if !response.is_success() {
            return Err(HarvestError::Status(response.status));
        }

        Ok(visible_text(&response.body))
    }
}

/// Fetches the most-active posts of one forum community.
#[derive(Clone)]
pub struct ForumClient {
    http: Arc<dyn HttpClient>,
    community: String,
    post_limit: usize,
}

impl ForumClient {
    pub fn new(http: Arc<dyn HttpClient>, community: impl Into<String>, post_limit: usize) -> Self {
        Self {
            http,
            community: community.into(),
            post_limit,
        }
    }

    pub async fn fetch_hot_posts(&self) -> Result<Vec<ForumPost>, HarvestError> {
        let endpoint = format!(
            "https://www.reddit.com/r/{}/hot.json?limit={}&raw_json=1",
            urlencoding::encode(&self.community),
            self.post_limit
        );

        let request = HttpRequest::get(&endpoint)
            .with_header("user-agent", BROWSER_USER_AGENT)
            .with_timeout_ms(HARVEST_TIMEOUT_MS);

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|error| HarvestError::Transport(error.message().to_owned()))?;

        if !response.is_success() {
            return Err(HarvestError::Status(response.status));
        }

        let listing: ListingResponse = serde_json::from_str(&response.body)
            .map_err(|error| HarvestError::UnexpectedPayload(error.to_string()))?;

        Ok(listing
            .data
            .children
            .into_iter()
            .map(|child| ForumPost::new(child.data.title, child.data.selftext))
            .collect())
    }
}

fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    document
        .root_element()
        .text()
        .collect::<Vec<_>>()
        .join(" ")
}

// Listing envelope of the public hot-posts endpoint.
#[derive(Debug, Clone, Deserialize)]
struct ListingResponse {
    data: ListingData,
}

#[derive(Debug, Clone, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<ListingChild>,
}

#[derive(Debug, Clone, Deserialize)]
struct ListingChild {
    data: PostData,
}

#[derive(Debug, Clone, Deserialize)]
struct PostData {
    #[serde(default)]
    title: String,
    #[serde(default)]
    selftext: String,
}
