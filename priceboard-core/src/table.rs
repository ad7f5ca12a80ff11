//! Wide price table — one row per company, one cell per trading date.
//!
//! Column labels are human-readable date strings (e.g. "05 March 2024"),
//! matching the dashboard's display format. Labels are opaque strings and
//! only accidentally sort correctly within a single month; the real
//! `NaiveDate` is carried alongside every cell so the chart can use a true
//! temporal axis. Rows may have differing column sets when the provider
//! returns differing date ranges — no deduplication, no interpolation.

use crate::data::provider::CompanySeries;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Format a date the way the table displays it.
pub fn format_date_label(date: NaiveDate) -> String {
    date.format("%d %B %Y").to_string()
}

/// One cell of the wide table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceCell {
    pub date: NaiveDate,
    pub date_label: String,
    pub close: f64,
}

/// One row of the wide table: a company and its dated closes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRow {
    pub label: String,
    pub cells: Vec<PriceCell>,
}

/// The wide company × date table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceTable {
    pub rows: Vec<CompanyRow>,
}

/// One record of the melted (long-form) table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongRecord {
    pub company: String,
    pub date: NaiveDate,
    pub date_label: String,
    pub close: f64,
}

impl PriceTable {
    /// Build the table from per-company series, preserving input order.
    pub fn from_series(series: &[CompanySeries]) -> Self {
        let rows = series
            .iter()
            .map(|s| CompanyRow {
                label: s.label.clone(),
                cells: s
                    .points
                    .iter()
                    .map(|p| PriceCell {
                        date: p.date,
                        date_label: format_date_label(p.date),
                        close: p.close,
                    })
                    .collect(),
            })
            .collect();
        Self { rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Company labels in row order.
    pub fn labels(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.label.as_str()).collect()
    }

    /// Look up a row by company label.
    pub fn row(&self, label: &str) -> Option<&CompanyRow> {
        self.rows.iter().find(|r| r.label == label)
    }

    /// Column labels: the union of every row's date labels, in first-seen
    /// order across rows (union-by-concatenation).
    pub fn columns(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        let mut cols = Vec::new();
        for row in &self.rows {
            for cell in &row.cells {
                if seen.insert(cell.date_label.as_str()) {
                    cols.push(cell.date_label.as_str());
                }
            }
        }
        cols
    }

    /// Restrict rows to the given company labels, keeping the table's
    /// original relative row order. Unknown labels are ignored.
    pub fn filter(&self, labels: &[String]) -> PriceTable {
        let wanted: std::collections::HashSet<&str> =
            labels.iter().map(|l| l.as_str()).collect();
        PriceTable {
            rows: self
                .rows
                .iter()
                .filter(|r| wanted.contains(r.label.as_str()))
                .cloned()
                .collect(),
        }
    }

    /// Rows sorted by company label, for the data-table view.
    pub fn sorted_by_label(&self) -> PriceTable {
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| a.label.cmp(&b.label));
        PriceTable { rows }
    }

    /// Melt wide → long: one record per (company, date) cell.
    ///
    /// Produces exactly the cells present — the melt itself introduces no
    /// nulls and no synthetic dates.
    pub fn melt(&self) -> Vec<LongRecord> {
        self.rows
            .iter()
            .flat_map(|row| {
                row.cells.iter().map(|cell| LongRecord {
                    company: row.label.clone(),
                    date: cell.date,
                    date_label: cell.date_label.clone(),
                    close: cell.close,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::provider::PricePoint;
    use proptest::prelude::*;

    fn series(label: &str, start_day: u32, closes: &[f64]) -> CompanySeries {
        CompanySeries {
            label: label.to_string(),
            symbol: label.to_uppercase(),
            points: closes
                .iter()
                .enumerate()
                .map(|(i, &close)| PricePoint {
                    date: NaiveDate::from_ymd_opt(2024, 3, start_day + i as u32).unwrap(),
                    close,
                })
                .collect(),
        }
    }

    #[test]
    fn date_label_format() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_date_label(date), "05 March 2024");
    }

    #[test]
    fn row_count_and_order_match_input() {
        let input = vec![
            series("google", 4, &[140.0, 141.0]),
            series("amazon", 4, &[175.0, 176.0]),
            series("apple", 4, &[170.0, 171.0]),
        ];
        let table = PriceTable::from_series(&input);

        assert_eq!(table.row_count(), 3);
        assert_eq!(table.labels(), vec!["google", "amazon", "apple"]);
    }

    #[test]
    fn columns_union_in_first_seen_order() {
        let input = vec![
            series("google", 4, &[140.0, 141.0]),
            // amazon's range starts a day later and extends past google's
            series("amazon", 5, &[176.0, 177.0]),
        ];
        let table = PriceTable::from_series(&input);

        assert_eq!(
            table.columns(),
            vec!["04 March 2024", "05 March 2024", "06 March 2024"]
        );
    }

    #[test]
    fn filter_keeps_original_relative_order() {
        let input = vec![
            series("google", 4, &[140.0]),
            series("amazon", 4, &[175.0]),
            series("apple", 4, &[170.0]),
        ];
        let table = PriceTable::from_series(&input);

        let filtered = table.filter(&["apple".to_string(), "google".to_string()]);
        assert_eq!(filtered.labels(), vec!["google", "apple"]);
    }

    #[test]
    fn filter_ignores_unknown_labels() {
        let table = PriceTable::from_series(&[series("google", 4, &[140.0])]);
        let filtered = table.filter(&["google".to_string(), "yahoo".to_string()]);
        assert_eq!(filtered.labels(), vec!["google"]);
    }

    #[test]
    fn sorted_by_label_orders_rows() {
        let input = vec![
            series("netflix", 4, &[600.0]),
            series("apple", 4, &[170.0]),
            series("meta", 4, &[500.0]),
        ];
        let sorted = PriceTable::from_series(&input).sorted_by_label();
        assert_eq!(sorted.labels(), vec!["apple", "meta", "netflix"]);
    }

    #[test]
    fn melt_two_rows_by_n_dates() {
        let n = 5;
        let closes: Vec<f64> = (0..n).map(|i| 100.0 + i as f64).collect();
        let table = PriceTable::from_series(&[
            series("google", 4, &closes),
            series("amazon", 4, &closes),
        ]);

        let long = table.melt();
        assert_eq!(long.len(), 2 * n);
        for rec in &long {
            assert!(!rec.company.is_empty());
            assert!(!rec.date_label.is_empty());
            assert!(rec.close.is_finite());
        }
    }

    proptest! {
        #[test]
        fn melt_count_equals_cell_count(
            lens in proptest::collection::vec(0usize..20, 1..6)
        ) {
            let input: Vec<CompanySeries> = lens
                .iter()
                .enumerate()
                .map(|(i, &len)| {
                    let closes: Vec<f64> = (0..len).map(|j| 50.0 + j as f64).collect();
                    series(&format!("co{i}"), 1, &closes)
                })
                .collect();
            let table = PriceTable::from_series(&input);

            let expected: usize = lens.iter().sum();
            prop_assert_eq!(table.melt().len(), expected);
            prop_assert_eq!(table.row_count(), lens.len());
        }

        #[test]
        fn filter_is_subset_preserving_order(select in proptest::collection::vec(0usize..4, 0..4)) {
            let input = vec![
                series("a", 1, &[1.0]),
                series("b", 1, &[2.0]),
                series("c", 1, &[3.0]),
                series("d", 1, &[4.0]),
            ];
            let table = PriceTable::from_series(&input);
            let all = ["a", "b", "c", "d"];
            let labels: Vec<String> = select.iter().map(|&i| all[i].to_string()).collect();

            let filtered = table.filter(&labels);
            let kept = filtered.labels();
            // Row order matches the parent table, not the selection order.
            let expected: Vec<&str> = all
                .iter()
                .copied()
                .filter(|l| labels.iter().any(|s| s == l))
                .collect();
            prop_assert_eq!(kept, expected);
        }
    }
}
