//! Presentation selection and the dashboard's typed failure model.
//!
//! A `Selection` is pure presentation state: the chosen companies plus the
//! y-axis clamp. It is recreated on every interaction and never persisted.

use crate::data::provider::DataError;
use crate::table::{LongRecord, PriceTable};
use thiserror::Error;

/// Bounds of the lookback-days control.
pub const DAYS_MIN: u32 = 1;
pub const DAYS_MAX: u32 = 180;
pub const DAYS_DEFAULT: u32 = 90;

/// Bounds of the y-range control.
pub const Y_MIN: f64 = 0.0;
pub const Y_MAX: f64 = 800.0;

/// User selection: companies to plot and the y-axis clamp range.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub companies: Vec<String>,
    pub y_range: (f64, f64),
}

impl Selection {
    /// Select every company of the table with the full default y-range.
    pub fn all_of(table: &PriceTable) -> Self {
        Self {
            companies: table.labels().into_iter().map(String::from).collect(),
            y_range: (Y_MIN, Y_MAX),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }
}

/// Dashboard failure kinds.
///
/// Replaces a catch-all handler: callers and tests can distinguish an empty
/// selection from a provider failure from a rendering failure.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("select at least one company")]
    EmptySelection,

    #[error("data fetch failed: {0}")]
    DataFetch(#[from] DataError),

    #[error("render failed: {0}")]
    Render(String),
}

/// Data prepared for the chart: long-form records of the selected companies
/// plus the y-clamp.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    /// Companies actually plotted, in table row order.
    pub companies: Vec<String>,
    pub records: Vec<LongRecord>,
    pub y_range: (f64, f64),
}

/// Filter the table to the selection and melt it for charting.
///
/// An empty selection is the one locally-detected failure; everything else
/// (fetch, render) carries its own `BoardError` variant from where it arose.
pub fn chart_data(table: &PriceTable, selection: &Selection) -> Result<ChartData, BoardError> {
    if selection.is_empty() {
        return Err(BoardError::EmptySelection);
    }

    let filtered = table.filter(&selection.companies);
    let companies = filtered.labels().into_iter().map(String::from).collect();
    Ok(ChartData {
        companies,
        records: filtered.melt(),
        y_range: selection.y_range,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::provider::{CompanySeries, PricePoint};
    use chrono::NaiveDate;

    fn table() -> PriceTable {
        let point = |d: u32, close: f64| PricePoint {
            date: NaiveDate::from_ymd_opt(2024, 3, d).unwrap(),
            close,
        };
        PriceTable::from_series(&[
            CompanySeries {
                label: "google".into(),
                symbol: "GOOGL".into(),
                points: vec![point(4, 140.0), point(5, 141.0)],
            },
            CompanySeries {
                label: "amazon".into(),
                symbol: "AMZN".into(),
                points: vec![point(4, 175.0), point(5, 176.0)],
            },
        ])
    }

    #[test]
    fn empty_selection_is_its_own_error() {
        let selection = Selection {
            companies: vec![],
            y_range: (Y_MIN, Y_MAX),
        };
        let err = chart_data(&table(), &selection).unwrap_err();
        assert!(matches!(err, BoardError::EmptySelection));
        assert_eq!(err.to_string(), "select at least one company");
    }

    #[test]
    fn fetch_errors_keep_their_kind() {
        let err: BoardError = DataError::SymbolNotFound {
            symbol: "NOPE".into(),
        }
        .into();
        assert!(matches!(err, BoardError::DataFetch(_)));
        assert_ne!(err.to_string(), BoardError::EmptySelection.to_string());
    }

    #[test]
    fn chart_data_melts_selected_rows() {
        let selection = Selection {
            companies: vec!["amazon".into()],
            y_range: (0.0, 400.0),
        };
        let data = chart_data(&table(), &selection).unwrap();

        assert_eq!(data.companies, vec!["amazon"]);
        assert_eq!(data.records.len(), 2);
        assert!(data.records.iter().all(|r| r.company == "amazon"));
        assert_eq!(data.y_range, (0.0, 400.0));
    }

    #[test]
    fn select_all_covers_every_row() {
        let t = table();
        let selection = Selection::all_of(&t);
        let data = chart_data(&t, &selection).unwrap();

        assert_eq!(data.companies, vec!["google", "amazon"]);
        assert_eq!(data.records.len(), 4);
    }
}
