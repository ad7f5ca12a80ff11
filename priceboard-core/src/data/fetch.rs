//! Multi-ticker fetch orchestration.
//!
//! Walks the ticker map in configured order, one provider call per entry.
//! The first provider error aborts the batch and propagates: the dashboard
//! shows either a complete table or an error, never a partial one.

use super::provider::{CompanySeries, DataError, FetchProgress, QuoteProvider};
use crate::config::TickerMap;

/// Fetch the trailing `days`-day close history for every configured company.
///
/// Returns one `CompanySeries` per ticker-map entry, in map order.
pub fn fetch_all(
    provider: &dyn QuoteProvider,
    tickers: &TickerMap,
    days: u32,
    progress: &dyn FetchProgress,
) -> Result<Vec<CompanySeries>, DataError> {
    let total = tickers.len();
    let mut series = Vec::with_capacity(total);

    for (i, entry) in tickers.iter().enumerate() {
        progress.on_start(&entry.label, &entry.symbol, i, total);

        match provider.fetch_closes(&entry.symbol, days) {
            Ok(points) => {
                progress.on_complete(&entry.label, i, total, &Ok(()));
                series.push(CompanySeries {
                    label: entry.label.clone(),
                    symbol: entry.symbol.clone(),
                    points,
                });
            }
            Err(e) => {
                let failed: Result<(), DataError> = Err(e);
                progress.on_complete(&entry.label, i, total, &failed);
                return failed.map(|()| Vec::new());
            }
        }
    }

    progress.on_batch_complete(series.len(), total);
    Ok(series)
}
