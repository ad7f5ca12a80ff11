//! Quote acquisition and memoization.

pub mod cache;
pub mod fetch;
pub mod provider;
pub mod yahoo;

pub use cache::QuoteCache;
pub use fetch::fetch_all;
pub use provider::{CompanySeries, DataError, FetchProgress, PricePoint, QuoteProvider};
pub use yahoo::YahooProvider;
