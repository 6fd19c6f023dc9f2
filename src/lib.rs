//! Local market-data proxy for the trading dashboard.
//!
//! Shields the browser from cross-origin restrictions and API-key exposure:
//! screener queries go to Finviz Elite, news and stock data to Finnhub. The
//! `/api/stock/{ticker}` endpoint aggregates the Finnhub quote and profile
//! endpoints into one normalized, display-ready snapshot.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
