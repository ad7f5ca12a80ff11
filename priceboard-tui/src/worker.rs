//! Background fetch worker — network calls stay off the render thread.
//!
//! Communication with the TUI main thread is via `mpsc` channels. The worker
//! owns the quote cache, so repeating a lookback window within a session is
//! answered without touching the provider.

use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use priceboard_core::data::provider::{DataError, FetchProgress, QuoteProvider};
use priceboard_core::data::yahoo::YahooProvider;
use priceboard_core::{PriceTable, QuoteCache, TickerMap};

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    FetchPrices { days: u32, tickers: TickerMap },
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    FetchProgress {
        label: String,
        index: usize,
        total: usize,
    },
    FetchSymbolDone {
        label: String,
        success: bool,
        error: Option<String>,
    },
    FetchDone {
        days: u32,
        table: PriceTable,
    },
    FetchFailed {
        category: String,
        message: String,
    },
}

/// Spawn the background worker thread with the default Yahoo provider.
pub fn spawn_worker(rx: Receiver<WorkerCommand>, tx: Sender<WorkerResponse>) -> JoinHandle<()> {
    thread::Builder::new()
        .name("priceboard-worker".into())
        .spawn(move || {
            let provider = YahooProvider::new();
            worker_loop(rx, tx, &provider);
        })
        .expect("failed to spawn worker thread")
}

fn worker_loop(
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
    provider: &dyn QuoteProvider,
) {
    let mut cache = QuoteCache::default();

    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(WorkerCommand::FetchPrices { days, tickers }) => {
                handle_fetch(days, &tickers, provider, &mut cache, &tx);
            }
        }
    }
}

fn handle_fetch(
    days: u32,
    tickers: &TickerMap,
    provider: &dyn QuoteProvider,
    cache: &mut QuoteCache,
    tx: &Sender<WorkerResponse>,
) {
    let progress = ChannelProgress { tx: tx.clone() };

    match cache.get_or_fetch(provider, tickers, days, &progress) {
        Ok(series) => {
            let table = PriceTable::from_series(&series);
            let _ = tx.send(WorkerResponse::FetchDone { days, table });
        }
        Err(e) => {
            let category = match &e {
                DataError::NetworkUnreachable(_) | DataError::RateLimited { .. } => "network",
                _ => "data",
            };
            let _ = tx.send(WorkerResponse::FetchFailed {
                category: category.into(),
                message: e.to_string(),
            });
        }
    }
}

/// FetchProgress implementation that sends messages through a channel.
struct ChannelProgress {
    tx: Sender<WorkerResponse>,
}

impl FetchProgress for ChannelProgress {
    fn on_start(&self, label: &str, _symbol: &str, index: usize, total: usize) {
        let _ = self.tx.send(WorkerResponse::FetchProgress {
            label: label.to_string(),
            index,
            total,
        });
    }

    fn on_complete(
        &self,
        label: &str,
        _index: usize,
        _total: usize,
        result: &Result<(), DataError>,
    ) {
        let _ = self.tx.send(WorkerResponse::FetchSymbolDone {
            label: label.to_string(),
            success: result.is_ok(),
            error: result.as_ref().err().map(|e| e.to_string()),
        });
    }

    fn on_batch_complete(&self, _succeeded: usize, _total: usize) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use priceboard_core::data::provider::PricePoint;
    use std::sync::mpsc;

    struct FixedProvider;

    impl QuoteProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        fn fetch_closes(&self, symbol: &str, _days: u32) -> Result<Vec<PricePoint>, DataError> {
            if symbol == "BAD" {
                return Err(DataError::SymbolNotFound {
                    symbol: symbol.to_string(),
                });
            }
            Ok(vec![PricePoint {
                date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
                close: 100.0,
            }])
        }
    }

    fn tiny_map(symbol: &str) -> TickerMap {
        TickerMap {
            companies: vec![priceboard_core::config::TickerEntry {
                label: "only".into(),
                symbol: symbol.into(),
            }],
        }
    }

    #[test]
    fn worker_shutdown() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, _resp_rx) = mpsc::channel();

        let handle = spawn_worker(cmd_rx, resp_tx);
        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().expect("worker should join cleanly");
    }

    #[test]
    fn fetch_produces_table_response() {
        let (tx, rx) = mpsc::channel();
        let mut cache = QuoteCache::default();

        handle_fetch(30, &tiny_map("OK"), &FixedProvider, &mut cache, &tx);

        let responses: Vec<WorkerResponse> = rx.try_iter().collect();
        match responses.last() {
            Some(WorkerResponse::FetchDone { days, table }) => {
                assert_eq!(*days, 30);
                assert_eq!(table.row_count(), 1);
            }
            other => panic!("expected FetchDone, got {other:?}"),
        }
    }

    #[test]
    fn provider_failure_becomes_status_not_panic() {
        let (tx, rx) = mpsc::channel();
        let mut cache = QuoteCache::default();

        handle_fetch(30, &tiny_map("BAD"), &FixedProvider, &mut cache, &tx);

        let responses: Vec<WorkerResponse> = rx.try_iter().collect();
        match responses.last() {
            Some(WorkerResponse::FetchFailed { category, message }) => {
                assert_eq!(category, "data");
                assert!(message.contains("BAD"));
            }
            other => panic!("expected FetchFailed, got {other:?}"),
        }
    }
}
