//! Client for the Finnhub REST API (quote, company profile, news).

use crate::config::Settings;
use crate::error::{AppError, Result};
use crate::models::{ProfileRecord, QuoteRecord};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Browser-like User-Agent sent on upstream calls; some endpoints reject
/// default library agents
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

/// Finnhub API client.
///
/// The inner reqwest client is built once with the configured timeout and is
/// safe to share across concurrent requests. No retries: a failed or timed
/// out call surfaces as an error for that request only.
#[derive(Clone)]
pub struct FinnhubClient {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

impl FinnhubClient {
    /// Create a new client from process settings
    pub fn new(settings: &Settings) -> Result<Self> {
        let base_url = settings
            .finnhub_base_url
            .trim()
            .trim_end_matches('/')
            .to_string();

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.upstream_timeout_secs))
            .user_agent(BROWSER_USER_AGENT)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            token: settings.finnhub_api_key.clone(),
            client,
        })
    }

    /// Fetch current quote data for a symbol
    pub async fn fetch_quote(&self, ticker: &str) -> Result<QuoteRecord> {
        let url = format!(
            "{}/quote?symbol={}&token={}",
            self.base_url, ticker, self.token
        );
        debug!(ticker, "Fetching quote");
        self.get_json(&url).await
    }

    /// Fetch company profile (market cap, shares outstanding) for a symbol
    pub async fn fetch_profile(&self, ticker: &str) -> Result<ProfileRecord> {
        let url = format!(
            "{}/stock/profile2?symbol={}&token={}",
            self.base_url, ticker, self.token
        );
        debug!(ticker, "Fetching profile");
        self.get_json(&url).await
    }

    /// Fetch market news for a category, relayed verbatim as JSON
    pub async fn fetch_news(&self, category: &str) -> Result<Value> {
        let url = format!(
            "{}/news?category={}&token={}",
            self.base_url, category, self.token
        );
        debug!(category, "Fetching news");
        self.get_json(&url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::UpstreamTimeout(format!("Upstream request timed out: {}", e))
            } else {
                AppError::Network(format!("Upstream request failed: {}", e))
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            return Err(AppError::UpstreamStatus(format!(
                "Upstream returned status {}: {}",
                status, body
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::Network(format!("Failed to read response body: {}", e)))?;

        serde_json::from_str(&body)
            .map_err(|e| AppError::UpstreamParse(format!("Failed to parse upstream JSON: {}", e)))
    }
}
