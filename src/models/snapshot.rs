//! Upstream records and the normalized snapshot returned to the dashboard.

use serde::{Deserialize, Serialize};

/// Quote data for a symbol, as returned by the Finnhub `/quote` endpoint.
///
/// Every field is optional at the parse boundary. Display logic additionally
/// treats an exactly-zero value as unknown, matching the upstream convention
/// of sending `0` for symbols it has no data for. A genuinely zero-valued
/// field is therefore indistinguishable from a missing one; this is a known
/// limitation of the data source, kept as-is.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteRecord {
    /// Current price
    pub c: Option<f64>,
    /// Previous close
    pub pc: Option<f64>,
    /// Open price
    pub o: Option<f64>,
    /// Day low
    pub l: Option<f64>,
    /// Day high
    pub h: Option<f64>,
    /// 52-week low (not sent by the basic quote endpoint)
    #[serde(rename = "52_week_low")]
    pub week52_low: Option<f64>,
    /// 52-week high (not sent by the basic quote endpoint)
    #[serde(rename = "52_week_high")]
    pub week52_high: Option<f64>,
}

/// Company fundamentals from the Finnhub `/stock/profile2` endpoint.
///
/// Both values are denominated in millions. Unknown symbols come back as an
/// empty object, so every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileRecord {
    #[serde(rename = "marketCapitalization")]
    pub market_capitalization: Option<f64>,
    #[serde(rename = "shareOutstanding")]
    pub share_outstanding: Option<f64>,
}

/// Display-ready stock snapshot for one ticker.
///
/// Every field is a formatted string; fields with no underlying data are the
/// literal `"N/A"`. A snapshot is a pure function of one `QuoteRecord` and
/// one `ProfileRecord` — nothing is cached or carried across requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSnapshot {
    pub ticker: String,
    pub price: String,
    pub change: String,
    pub change_percent: String,
    pub volume: String,
    pub avg_volume: String,
    pub market_cap: String,
    pub float: String,
    pub short: String,
    pub beta: String,
    pub open: String,
    pub prev_close: String,
    pub day_range: String,
    pub range52w: String,
}
