//! Snapshot derivation and formatting.
//!
//! Pure functions from (quote, profile) to the display-ready snapshot. No
//! I/O, no state; the same inputs always produce the same output.

use crate::models::{ProfileRecord, QuoteRecord, StockSnapshot};

/// Placeholder for fields with no underlying data
pub const NOT_AVAILABLE: &str = "N/A";

/// Assumed free-float share of shares outstanding.
///
/// There is no real float data source; 70% is a fixed estimate.
pub const FLOAT_RATIO: f64 = 0.7;

/// Raw change metrics before formatting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedMetrics {
    pub change: f64,
    pub change_percent: f64,
}

/// Compute price change and percent change from a quote.
///
/// Missing values default to zero for the arithmetic. When the previous close
/// is zero or missing, the percent change is `0.0` rather than a division by
/// zero; the display layer then renders it as `"N/A"`.
pub fn derive_metrics(quote: &QuoteRecord) -> DerivedMetrics {
    let current_price = quote.c.unwrap_or(0.0);
    let prev_close = quote.pc.unwrap_or(0.0);

    let change = current_price - prev_close;
    let change_percent = if prev_close != 0.0 {
        change / prev_close * 100.0
    } else {
        0.0
    };

    DerivedMetrics {
        change,
        change_percent,
    }
}

/// Format a value in millions as `"{v/1000:.2}B"`, `"{v:.2}M"` or `"N/A"`.
///
/// Used for both market capitalization and the float estimate.
pub fn format_magnitude(value_in_millions: f64) -> String {
    if value_in_millions >= 1000.0 {
        format!("{:.2}B", value_in_millions / 1000.0)
    } else if value_in_millions >= 1.0 {
        format!("{:.2}M", value_in_millions)
    } else {
        NOT_AVAILABLE.to_string()
    }
}

/// Render an optional price-like value with 2 decimals, `"N/A"` when zero or
/// missing
fn format_price(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 => format!("{:.2}", v),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Render a signed value with an explicit leading `+`/`-`, `"N/A"` when
/// exactly zero.
///
/// An exactly-zero change (including a genuinely flat day) renders as
/// `"N/A"`; kept as-is from the source behavior.
fn format_signed(value: f64) -> String {
    if value != 0.0 {
        format!("{:+.2}", value)
    } else {
        NOT_AVAILABLE.to_string()
    }
}

/// Render a `"low - high"` range, keyed off the low value being present
fn format_range(low: Option<f64>, high: Option<f64>) -> String {
    match low {
        Some(l) if l != 0.0 => format!("{:.2} - {:.2}", l, high.unwrap_or(0.0)),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Render an optional value in millions through [`format_magnitude`],
/// short-circuiting to `"N/A"` when zero or missing
fn format_millions(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 => format_magnitude(v),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Assemble the display-ready snapshot for one ticker.
///
/// `volume`, `avgVolume`, `short` and `beta` have no data source in this
/// system and are always `"N/A"`.
pub fn build_snapshot(
    ticker: &str,
    quote: &QuoteRecord,
    profile: &ProfileRecord,
) -> StockSnapshot {
    let metrics = derive_metrics(quote);

    let float = match profile.share_outstanding {
        Some(shares) if shares != 0.0 => format_magnitude(shares * FLOAT_RATIO),
        _ => NOT_AVAILABLE.to_string(),
    };

    StockSnapshot {
        ticker: ticker.to_string(),
        price: format_price(quote.c),
        change: format_signed(metrics.change),
        change_percent: format_signed(metrics.change_percent),
        volume: NOT_AVAILABLE.to_string(),
        avg_volume: NOT_AVAILABLE.to_string(),
        market_cap: format_millions(profile.market_capitalization),
        float,
        short: NOT_AVAILABLE.to_string(),
        beta: NOT_AVAILABLE.to_string(),
        open: format_price(quote.o),
        prev_close: format_price(quote.pc),
        day_range: format_range(quote.l, quote.h),
        range52w: format_range(quote.week52_low, quote.week52_high),
    }
}
