//! HTTP handlers for the proxy routes.

use crate::error::AppError;
use crate::server::AppState;
use crate::services::snapshot::build_snapshot;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, instrument, warn};

/// All error kinds map uniformly to HTTP 500 with the message in the body.
/// No error terminates the server; each request is isolated.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        warn!(error = %self, "Request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

/// GET /api/stock/{ticker} - Normalized stock snapshot
///
/// Fetches the quote and profile endpoints concurrently, joins both outcomes,
/// and assembles the display-ready snapshot. Fail-fast: if either fetch
/// fails, the whole request fails rather than returning a partial snapshot —
/// misleading half-data is worse than an error in a trading context.
#[instrument(skip(state))]
pub async fn stock_handler(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let ticker = ticker.to_uppercase();
    debug!(ticker, "Received snapshot request");

    // Join, not race: both outcomes are observed before proceeding
    let (quote, profile) = tokio::join!(
        state.finnhub.fetch_quote(&ticker),
        state.finnhub.fetch_profile(&ticker),
    );
    let quote = quote?;
    let profile = profile?;

    let snapshot = build_snapshot(&ticker, &quote, &profile);

    info!(
        ticker,
        price = %snapshot.price,
        change_percent = %snapshot.change_percent,
        "Returning snapshot"
    );

    Ok(Json(snapshot))
}

/// Query parameters for /api/screener
#[derive(Debug, Deserialize)]
pub struct ScreenerQuery {
    /// Screener filters
    #[serde(default)]
    pub f: String,
    /// Screener signal; takes precedence over filters when non-empty
    #[serde(default)]
    pub s: String,
    /// Column selection
    #[serde(default = "default_columns")]
    pub c: String,
}

fn default_columns() -> String {
    "0,1,2,3,4,5,6".to_string()
}

/// GET /api/screener - Finviz Elite screener proxy
///
/// Verbatim query forwarding, verbatim CSV relay.
#[instrument(skip(state))]
pub async fn screener_handler(
    State(state): State<AppState>,
    Query(params): Query<ScreenerQuery>,
) -> Result<impl IntoResponse, AppError> {
    let csv = state
        .finviz
        .fetch_screener(&params.f, &params.s, &params.c)
        .await?;

    info!(bytes = csv.len(), "Relaying screener export");
    Ok(([(CONTENT_TYPE, "text/csv")], csv))
}

/// Query parameters for /api/finnhub/news
#[derive(Debug, Deserialize)]
pub struct NewsQuery {
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    "general".to_string()
}

/// GET /api/finnhub/news - Finnhub news proxy
#[instrument(skip(state))]
pub async fn news_handler(
    State(state): State<AppState>,
    Query(params): Query<NewsQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let news = state.finnhub.fetch_news(&params.category).await?;
    Ok(Json(news))
}

/// Health check payload
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub uptime_secs: u64,
    pub current_system_time: String,
}

/// GET /health - Health check endpoint
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthStatus {
        status: "ok",
        uptime_secs: state.started_at.elapsed().as_secs(),
        current_system_time: Utc::now().to_rfc3339(),
    })
}
