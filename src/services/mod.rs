pub mod finnhub;
pub mod finviz;
pub mod snapshot;

pub use finnhub::FinnhubClient;
pub use finviz::FinvizClient;
