//! Priceboard TUI — five-panel terminal stock dashboard.
//!
//! Panels:
//! 1. Controls — lookback-days and y-range sliders, fetch trigger
//! 2. Companies — multi-select of the configured companies
//! 3. Table — closing prices, one column per trading day
//! 4. Chart — overlaid close-price lines for the selection
//! 5. Help — keyboard shortcuts and documentation

mod app;
mod input;
#[cfg(test)]
mod test_helpers;
mod theme;
mod ui;
mod worker;

use std::io::{self, stdout};
use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use priceboard_core::TickerMap;

use crate::app::{AppState, ErrorCategory};
use crate::worker::{WorkerCommand, WorkerResponse};

const TICKERS_FILE: &str = "tickers.toml";

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Company -> symbol map: tickers.toml if present, built-in set otherwise.
    let tickers = if Path::new(TICKERS_FILE).exists() {
        TickerMap::from_file(Path::new(TICKERS_FILE))?
    } else {
        TickerMap::default_us()
    };

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();

    // Spawn worker
    let worker_handle = worker::spawn_worker(cmd_rx, resp_tx);

    // Build app state
    let mut app = AppState::new(tickers, cmd_tx.clone(), resp_rx);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the main event loop
    let result = run_app(&mut terminal, &mut app);

    // Shutdown worker
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            handle_worker_response(app, resp);
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

fn handle_worker_response(app: &mut AppState, resp: WorkerResponse) {
    match resp {
        WorkerResponse::FetchProgress {
            label,
            index,
            total,
        } => {
            app.controls.fetch_current = Some(label);
            app.controls.fetch_done = index;
            app.controls.fetch_total = total;
        }
        WorkerResponse::FetchSymbolDone {
            label,
            success,
            error,
        } => {
            if !success {
                if let Some(err) = error {
                    app.push_error(ErrorCategory::Network, format!("Failed to fetch: {err}"), label);
                    return;
                }
            }
            app.controls.fetch_done += 1;
        }
        WorkerResponse::FetchDone { days, table } => {
            app.controls.fetch_in_progress = false;
            app.controls.fetch_current = None;
            app.controls.stale = false;
            let companies = table.row_count();
            app.full_table = Some(table);
            app.recompute_view();
            app.set_status(format!(
                "Fetch complete: {companies} companies over {days} days"
            ));
        }
        WorkerResponse::FetchFailed { category, message } => {
            app.controls.fetch_in_progress = false;
            app.controls.fetch_current = None;
            let cat = match category.as_str() {
                "network" => ErrorCategory::Network,
                "data" => ErrorCategory::Data,
                _ => ErrorCategory::Other,
            };
            app.push_error(cat, message, "price fetch".into());
        }
    }
}
