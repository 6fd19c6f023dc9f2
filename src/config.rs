//! Process-wide configuration.
//!
//! All settings are read from the environment once at startup and passed by
//! reference into the upstream clients. Request handlers never read ambient
//! environment state.

use tracing::warn;

/// Default Finnhub REST API base URL (quote, profile and news endpoints)
pub const DEFAULT_FINNHUB_BASE_URL: &str = "https://finnhub.io/api/v1";

/// Default Finviz Elite base URL (CSV screener export)
pub const DEFAULT_FINVIZ_BASE_URL: &str = "https://elite.finviz.com";

/// Default per-call upstream timeout in seconds
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Immutable server settings, loaded once at startup
#[derive(Debug, Clone)]
pub struct Settings {
    /// Finnhub API token (quote, profile and news endpoints)
    pub finnhub_api_key: String,
    /// Finviz Elite auth token (screener export)
    pub finviz_api_key: String,
    /// Finnhub base URL, overridable for testing
    pub finnhub_base_url: String,
    /// Finviz base URL, overridable for testing
    pub finviz_base_url: String,
    /// Timeout applied to each outbound upstream call
    pub upstream_timeout_secs: u64,
    /// Local port to bind the HTTP server on
    pub port: u16,
}

impl Settings {
    /// Load settings from environment variables, falling back to defaults
    pub fn from_env(port: u16) -> Self {
        let finnhub_api_key = std::env::var("FINNHUB_API_KEY").unwrap_or_default();
        let finviz_api_key = std::env::var("FINVIZ_API_KEY").unwrap_or_default();

        if finnhub_api_key.is_empty() {
            warn!("FINNHUB_API_KEY is not set; quote/profile/news requests will be rejected upstream");
        }
        if finviz_api_key.is_empty() {
            warn!("FINVIZ_API_KEY is not set; screener requests will be rejected upstream");
        }

        let upstream_timeout_secs = std::env::var("UPSTREAM_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS);

        Self {
            finnhub_api_key,
            finviz_api_key,
            finnhub_base_url: std::env::var("FINNHUB_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_FINNHUB_BASE_URL.to_string()),
            finviz_base_url: std::env::var("FINVIZ_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_FINVIZ_BASE_URL.to_string()),
            upstream_timeout_secs,
            port,
        }
    }
}
