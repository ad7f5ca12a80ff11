//! priceboard-core — data layer for the price dashboard.
//!
//! Pipeline: fetch daily closing prices per ticker → reshape into a wide
//! company × date table → filter/melt for presentation. The TUI and CLI
//! crates sit on top of this.

pub mod config;
pub mod data;
pub mod selection;
pub mod table;

pub use config::{ConfigError, TickerEntry, TickerMap};
pub use data::cache::QuoteCache;
pub use data::provider::{CompanySeries, DataError, PricePoint, QuoteProvider};
pub use selection::{BoardError, ChartData, Selection};
pub use table::{LongRecord, PriceTable};
