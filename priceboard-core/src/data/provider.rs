//! Quote provider trait and structured error types.
//!
//! The QuoteProvider trait abstracts over market-data sources so the
//! fetch pipeline can be mocked for tests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One daily closing-price observation for one ticker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Closing-price history for one company.
///
/// Points are sorted ascending by date, one per trading day the provider
/// returned within the lookback window. Non-trading days are not filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySeries {
    pub label: String,
    pub symbol: String,
    pub points: Vec<PricePoint>,
}

impl CompanySeries {
    /// First observation date, if any.
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    /// Last observation date, if any.
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}

/// Structured error types for quote operations.
///
/// Displayable in both CLI and TUI contexts.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("provider returned no history for '{symbol}'")]
    EmptyHistory { symbol: String },

    #[error("data error: {0}")]
    Other(String),
}

/// Trait for quote providers (Yahoo Finance, mocks).
///
/// `days` is the trailing lookback window in calendar days. Callers are
/// responsible for keeping it within the UI control's 1..=180 range.
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch the trailing `days`-day daily closing-price history for a symbol.
    fn fetch_closes(&self, symbol: &str, days: u32) -> Result<Vec<PricePoint>, DataError>;
}

/// Progress callback for multi-ticker fetches.
pub trait FetchProgress: Send {
    /// Called when starting to fetch a symbol.
    fn on_start(&self, label: &str, symbol: &str, index: usize, total: usize);

    /// Called when a symbol fetch completes.
    fn on_complete(&self, label: &str, index: usize, total: usize, result: &Result<(), DataError>);

    /// Called when the entire batch is done.
    fn on_batch_complete(&self, succeeded: usize, total: usize);
}

/// No-op progress reporter.
pub struct SilentProgress;

impl FetchProgress for SilentProgress {
    fn on_start(&self, _label: &str, _symbol: &str, _index: usize, _total: usize) {}
    fn on_complete(
        &self,
        _label: &str,
        _index: usize,
        _total: usize,
        _result: &Result<(), DataError>,
    ) {
    }
    fn on_batch_complete(&self, _succeeded: usize, _total: usize) {}
}

/// Progress reporter that prints to stdout, for the CLI.
pub struct StdoutProgress;

impl FetchProgress for StdoutProgress {
    fn on_start(&self, label: &str, symbol: &str, index: usize, total: usize) {
        println!("[{}/{}] Fetching {label} ({symbol})...", index + 1, total);
    }

    fn on_complete(
        &self,
        label: &str,
        _index: usize,
        _total: usize,
        result: &Result<(), DataError>,
    ) {
        match result {
            Ok(()) => println!("  OK: {label}"),
            Err(e) => println!("  FAIL: {label}: {e}"),
        }
    }

    fn on_batch_complete(&self, succeeded: usize, total: usize) {
        println!("\nFetch complete: {succeeded}/{total} companies");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_date_bounds() {
        let series = CompanySeries {
            label: "apple".into(),
            symbol: "AAPL".into(),
            points: vec![
                PricePoint {
                    date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
                    close: 170.0,
                },
                PricePoint {
                    date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
                    close: 171.5,
                },
            ],
        };
        assert_eq!(series.start_date(), NaiveDate::from_ymd_opt(2024, 3, 4));
        assert_eq!(series.end_date(), NaiveDate::from_ymd_opt(2024, 3, 5));
    }

    #[test]
    fn empty_series_has_no_bounds() {
        let series = CompanySeries {
            label: "apple".into(),
            symbol: "AAPL".into(),
            points: vec![],
        };
        assert_eq!(series.start_date(), None);
        assert_eq!(series.end_date(), None);
    }
}
