pub mod api;

use crate::config::Settings;
use crate::error::Result;
use crate::services::{FinnhubClient, FinvizClient};
use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::time::Instant;
use tower_http::cors::CorsLayer;

/// Application state shared across all handlers.
///
/// Everything here is read-only after startup; the reqwest clients carry
/// their own clone-safe connection pools.
#[derive(Clone)]
pub struct AppState {
    pub finnhub: FinnhubClient,
    pub finviz: FinvizClient,
    pub started_at: Instant,
}

impl AppState {
    /// Build clients from settings, loaded once at startup
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            finnhub: FinnhubClient::new(settings)?,
            finviz: FinvizClient::new(settings)?,
            started_at: Instant::now(),
        })
    }
}

/// Build the proxy router with all routes and the CORS layer.
///
/// CORS is permissive: the whole point of the proxy is to shield a local
/// browser dashboard from cross-origin restrictions.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/stock/{ticker}", get(api::stock_handler))
        .route("/api/screener", get(api::screener_handler))
        .route("/api/finnhub/news", get(api::news_handler))
        .route("/health", get(api::health_handler))
        .layer(cors)
        .with_state(state)
}

/// Start the axum server
pub async fn serve(
    state: AppState,
    port: u16,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Starting harris-proxy server");
    tracing::info!("Registering routes:");
    tracing::info!("  GET /api/stock/{{ticker}}");
    tracing::info!("  GET /api/screener?f=...&s=...&c=...");
    tracing::info!("  GET /api/finnhub/news?category=...");
    tracing::info!("  GET /health");

    let app = build_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    tracing::info!(%addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
