use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

/// The remote "everything" search endpoint.
pub const EVERYTHING_ENDPOINT: &str = "https://newsapi.org/v2/everything";

/// Largest page size the remote service accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Error, Debug)]
pub enum NewsError {
    #[error("request to news API failed: {0}")]
    Transport(#[from] reqwest::Error),
    // The remote reports failures as a plain-text or JSON body; surface it raw.
    #[error("{body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("malformed news API response: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArticleSource {
    pub id: Option<String>,
    pub name: String,
}

/// One article as returned by the remote index. `author`, `description`,
/// `urlToImage` and `content` come back as JSON null often enough that a
/// single null must not fail the whole page of results.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub source: ArticleSource,
    pub author: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub url_to_image: Option<String>,
    pub published_at: DateTime<Utc>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub status: String,
    pub total_results: u32,
    pub articles: Vec<Article>,
}

/// Client for the remote news article index. Cheap to clone; the inner
/// `reqwest::Client` is a connection-pooled handle.
#[derive(Debug, Clone)]
pub struct NewsClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    page_size: u32,
}

impl NewsClient {
    pub fn new(http: reqwest::Client, api_key: impl Into<String>, page_size: u32) -> NewsClient {
        Self::with_endpoint(http, EVERYTHING_ENDPOINT, api_key, page_size)
    }

    /// Same as [`NewsClient::new`] but against a different endpoint. Tests
    /// use this to target a local stub server.
    pub fn with_endpoint(
        http: reqwest::Client,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        page_size: u32,
    ) -> NewsClient {
        NewsClient {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            page_size: page_size.min(MAX_PAGE_SIZE),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Performs one search round trip. `page` is the 1-based page number as
    /// it arrived in the inbound request; it is passed through unvalidated.
    /// Timeouts are governed by the `reqwest::Client` this was built with.
    pub async fn fetch_everything(
        &self,
        query: &str,
        page: &str,
    ) -> Result<SearchResults, NewsError> {
        let page_size = self.page_size.to_string();
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("q", query),
                ("pageSize", page_size.as_str()),
                ("page", page),
                ("apiKey", self.api_key.as_str()),
                ("sortBy", "publishedAt"),
                ("language", "en"),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(NewsError::Api { status, body });
        }

        let results = serde_json::from_str(&body)?;
        Ok(results)
    }
}
