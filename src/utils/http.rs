// src/utils/http.rs

//! HTTP client utilities and the page-fetch seam.

use std::time::Duration;

use async_trait::async_trait;
use scraper::Html;

use crate::error::{AppError, Result};
use crate::models::CrawlerConfig;

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &CrawlerConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Retrieves documents for the scan. One attempt per page, no retry.
#[async_trait]
pub trait PageFetcher {
    /// Fetch the raw document body at `url`.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Fetcher backed by a reqwest client.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::fetch(url, e))?;
        response.text().await.map_err(|e| AppError::fetch(url, e))
    }
}

/// Fetch a page and parse it as HTML.
pub async fn fetch_page(fetcher: &dyn PageFetcher, url: &str) -> Result<Html> {
    let body = fetcher.fetch(url).await?;
    Ok(Html::parse_document(&body))
}
