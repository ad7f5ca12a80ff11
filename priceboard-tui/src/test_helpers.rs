//! Shared fixtures for TUI unit tests.

use std::sync::mpsc;

use chrono::NaiveDate;
use priceboard_core::data::provider::{CompanySeries, PricePoint};
use priceboard_core::{PriceTable, TickerMap};

use crate::app::AppState;

/// An app wired to dangling channels, no data fetched yet.
pub fn new_app() -> AppState {
    let (tx, _rx) = mpsc::channel();
    let (_tx2, rx2) = mpsc::channel();
    AppState::new(TickerMap::default_us(), tx, rx2)
}

/// A small two-company table covering three trading days.
pub fn sample_table() -> PriceTable {
    let point = |d: u32, close: f64| PricePoint {
        date: NaiveDate::from_ymd_opt(2024, 3, d).unwrap(),
        close,
    };
    PriceTable::from_series(&[
        CompanySeries {
            label: "google".into(),
            symbol: "GOOGL".into(),
            points: vec![point(4, 140.0), point(5, 141.0), point(6, 139.5)],
        },
        CompanySeries {
            label: "amazon".into(),
            symbol: "AMZN".into(),
            points: vec![point(4, 175.0), point(5, 176.0), point(6, 177.5)],
        },
    ])
}

/// An app holding `sample_table` with its view computed.
pub fn app_with_table() -> AppState {
    let mut app = new_app();
    app.companies.deselect_all();
    app.companies.selected.insert("google".into());
    app.companies.selected.insert("amazon".into());
    app.full_table = Some(sample_table());
    app.recompute_view();
    app
}
