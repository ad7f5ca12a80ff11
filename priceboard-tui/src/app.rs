//! Application state — single-owner, main-thread only.
//!
//! All TUI state lives here. The fetch worker communicates via channels.
//! Control changes recompute only the derived state they affect: selection
//! and y-range changes rebuild the view from the cached table, while a
//! lookback change marks the table stale until the next fetch.

use std::collections::{HashSet, VecDeque};
use std::sync::mpsc::{Receiver, Sender};

use chrono::NaiveDateTime;

use priceboard_core::selection::{
    chart_data, BoardError, Selection, DAYS_DEFAULT, DAYS_MAX, DAYS_MIN, Y_MAX, Y_MIN,
};
use priceboard_core::{ChartData, PriceTable, TickerMap};

use crate::worker::{WorkerCommand, WorkerResponse};

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Controls,
    Companies,
    Table,
    Chart,
    Help,
}

impl Panel {
    pub fn index(self) -> usize {
        match self {
            Panel::Controls => 0,
            Panel::Companies => 1,
            Panel::Table => 2,
            Panel::Chart => 3,
            Panel::Help => 4,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Controls),
            1 => Some(Panel::Companies),
            2 => Some(Panel::Table),
            3 => Some(Panel::Chart),
            4 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Controls => "Controls",
            Panel::Companies => "Companies",
            Panel::Table => "Table",
            Panel::Chart => "Chart",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % 5).unwrap()
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + 4) % 5).unwrap()
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Render,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Network => "NET",
            ErrorCategory::Data => "DATA",
            ErrorCategory::Render => "RNDR",
            ErrorCategory::Other => "ERR",
        }
    }
}

/// The sidebar controls: lookback window and y-axis clamp.
#[derive(Debug)]
pub struct ControlsState {
    pub days: u32,
    pub y_min: f64,
    pub y_max: f64,
    /// 0 = days, 1 = y-min, 2 = y-max.
    pub cursor: usize,
    /// Lookback changed since the last fetch.
    pub stale: bool,
    pub fetch_in_progress: bool,
    pub fetch_current: Option<String>,
    pub fetch_done: usize,
    pub fetch_total: usize,
}

pub const CONTROL_COUNT: usize = 3;
const Y_STEP: f64 = 10.0;

impl ControlsState {
    pub fn new() -> Self {
        Self {
            days: DAYS_DEFAULT,
            y_min: Y_MIN,
            y_max: Y_MAX,
            cursor: 0,
            stale: false,
            fetch_in_progress: false,
            fetch_current: None,
            fetch_done: 0,
            fetch_total: 0,
        }
    }

    /// Step the lookback window, clamped to the widget's 1..=180 range.
    pub fn adjust_days(&mut self, delta: i32) {
        let next = (self.days as i64 + delta as i64).clamp(DAYS_MIN as i64, DAYS_MAX as i64);
        if next as u32 != self.days {
            self.days = next as u32;
            self.stale = true;
        }
    }

    /// Step the lower y-bound; never crosses the upper bound.
    pub fn adjust_y_min(&mut self, delta: i32) {
        self.y_min = (self.y_min + Y_STEP * delta as f64).clamp(Y_MIN, self.y_max);
    }

    /// Step the upper y-bound; never crosses the lower bound.
    pub fn adjust_y_max(&mut self, delta: i32) {
        self.y_max = (self.y_max + Y_STEP * delta as f64).clamp(self.y_min, Y_MAX);
    }
}

impl Default for ControlsState {
    fn default() -> Self {
        Self::new()
    }
}

/// Companies panel state — multi-select in ticker-map order.
#[derive(Debug)]
pub struct CompaniesState {
    pub labels: Vec<String>,
    pub selected: HashSet<String>,
    pub cursor: usize,
}

impl CompaniesState {
    /// All companies selected by default, matching the dashboard's default.
    pub fn new(tickers: &TickerMap) -> Self {
        let labels: Vec<String> = tickers.labels().into_iter().map(String::from).collect();
        let selected = labels.iter().cloned().collect();
        Self {
            labels,
            selected,
            cursor: 0,
        }
    }

    pub fn toggle_at_cursor(&mut self) {
        if let Some(label) = self.labels.get(self.cursor) {
            if !self.selected.remove(label) {
                self.selected.insert(label.clone());
            }
        }
    }

    pub fn select_all(&mut self) {
        self.selected = self.labels.iter().cloned().collect();
    }

    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    /// Selected labels in ticker-map order.
    pub fn selected_in_order(&self) -> Vec<String> {
        self.labels
            .iter()
            .filter(|l| self.selected.contains(*l))
            .cloned()
            .collect()
    }
}

/// Derived presentation state, rebuilt on selection or y-range change.
#[derive(Debug)]
pub struct DerivedView {
    /// Selected companies' rows, sorted by label for the table view.
    pub table: PriceTable,
    pub chart: ChartData,
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Welcome,
    ErrorHistory,
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub running: bool,

    // Configuration
    pub tickers: TickerMap,

    // Panel states
    pub controls: ControlsState,
    pub companies: CompaniesState,
    pub table_col_offset: usize,

    // Fetched and derived data
    pub full_table: Option<PriceTable>,
    pub view: Option<Result<DerivedView, BoardError>>,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
}

impl AppState {
    pub fn new(
        tickers: TickerMap,
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
    ) -> Self {
        let companies = CompaniesState::new(&tickers);
        Self {
            active_panel: Panel::Controls,
            running: true,
            tickers,
            controls: ControlsState::new(),
            companies,
            table_col_offset: 0,
            full_table: None,
            view: None,
            worker_tx,
            worker_rx,
            status_message: None,
            error_history: VecDeque::with_capacity(50),
            error_scroll: 0,
            overlay: Overlay::Welcome,
        }
    }

    /// The current presentation selection, recreated per interaction.
    pub fn selection(&self) -> Selection {
        Selection {
            companies: self.companies.selected_in_order(),
            y_range: (self.controls.y_min, self.controls.y_max),
        }
    }

    /// Rebuild the derived view from the cached table and current selection.
    ///
    /// Does not touch the network: lookback changes go through
    /// `request_fetch` instead.
    pub fn recompute_view(&mut self) {
        let Some(table) = &self.full_table else {
            self.view = None;
            return;
        };

        let selection = self.selection();
        self.view = Some(chart_data(table, &selection).map(|chart| DerivedView {
            table: table.filter(&selection.companies).sorted_by_label(),
            chart,
        }));
        self.table_col_offset = 0;
    }

    /// Kick off a background fetch for the current lookback window.
    pub fn request_fetch(&mut self) {
        if self.controls.fetch_in_progress {
            return;
        }
        self.controls.fetch_in_progress = true;
        self.controls.fetch_current = None;
        self.controls.fetch_done = 0;
        self.controls.fetch_total = self.tickers.len();
        let _ = self.worker_tx.send(WorkerCommand::FetchPrices {
            days: self.controls.days,
            tickers: self.tickers.clone(),
        });
        self.set_status(format!("Fetching {} days of prices...", self.controls.days));
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > 50 {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}
