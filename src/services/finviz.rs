//! Client for the Finviz Elite screener CSV export.
//!
//! Pure pass-through: the query is forwarded with the auth token appended and
//! the CSV body is relayed verbatim to the dashboard.

use crate::config::Settings;
use crate::error::{AppError, Result};
use std::time::Duration;
use tracing::debug;

#[derive(Clone)]
pub struct FinvizClient {
    base_url: String,
    auth: String,
    client: reqwest::Client,
}

impl FinvizClient {
    /// Create a new client from process settings
    pub fn new(settings: &Settings) -> Result<Self> {
        let base_url = settings
            .finviz_base_url
            .trim()
            .trim_end_matches('/')
            .to_string();

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.upstream_timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            auth: settings.finviz_api_key.clone(),
            client,
        })
    }

    /// Fetch screener results as CSV text.
    ///
    /// A non-empty `signal` takes precedence over `filters` in the upstream
    /// URL.
    pub async fn fetch_screener(
        &self,
        filters: &str,
        signal: &str,
        columns: &str,
    ) -> Result<String> {
        let url = if !signal.is_empty() {
            format!(
                "{}/export.ashx?v=111&s={}&c={}&auth={}",
                self.base_url, signal, columns, self.auth
            )
        } else {
            format!(
                "{}/export.ashx?v=111&f={}&c={}&auth={}",
                self.base_url, filters, columns, self.auth
            )
        };

        debug!(filters, signal, columns, "Fetching screener export");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::UpstreamTimeout(format!("Screener request timed out: {}", e))
            } else {
                AppError::Network(format!("Screener request failed: {}", e))
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            return Err(AppError::UpstreamStatus(format!(
                "Screener returned status {}: {}",
                status, body
            )));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::Network(format!("Failed to read screener body: {}", e)))
    }
}
