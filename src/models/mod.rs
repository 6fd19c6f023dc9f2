pub mod snapshot;

pub use snapshot::{ProfileRecord, QuoteRecord, StockSnapshot};
