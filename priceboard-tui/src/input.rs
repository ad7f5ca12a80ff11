//! Keyboard input dispatch — global keys → overlays → panel-specific handlers.
//!
//! Each control registers its own handler; a change recomputes only the
//! derived state it affects. Selection and y-range edits rebuild the view
//! from the cached table, lookback edits mark it stale, and only an explicit
//! fetch touches the network.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Overlay, Panel, CONTROL_COUNT};

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match &app.overlay {
        Overlay::Welcome => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys (always available).
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('1') => { app.active_panel = Panel::Controls; return; }
        KeyCode::Char('2') => { app.active_panel = Panel::Companies; return; }
        KeyCode::Char('3') => { app.active_panel = Panel::Table; return; }
        KeyCode::Char('4') => { app.active_panel = Panel::Chart; return; }
        KeyCode::Char('5') => { app.active_panel = Panel::Help; return; }
        KeyCode::Char('f') => {
            app.request_fetch();
            return;
        }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_panel = app.active_panel.prev();
            } else {
                app.active_panel = app.active_panel.next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        _ => {}
    }

    // 3. Panel-specific keys.
    match app.active_panel {
        Panel::Controls => handle_controls_key(app, key),
        Panel::Companies => handle_companies_key(app, key),
        Panel::Table => handle_table_key(app, key),
        Panel::Chart => {} // display only
        Panel::Help => handle_help_key(app, key),
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_controls_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.controls.cursor + 1 < CONTROL_COUNT {
                app.controls.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.controls.cursor = app.controls.cursor.saturating_sub(1);
        }
        KeyCode::Char('h') | KeyCode::Left => adjust_control(app, -1),
        KeyCode::Char('l') | KeyCode::Right => adjust_control(app, 1),
        KeyCode::Char('H') => adjust_control(app, -10),
        KeyCode::Char('L') => adjust_control(app, 10),
        KeyCode::Enter => app.request_fetch(),
        _ => {}
    }
}

/// Apply a step to the control under the cursor and recompute what depends
/// on it: the y-range feeds the chart clamp only, the lookback needs a fetch.
fn adjust_control(app: &mut AppState, direction: i32) {
    match app.controls.cursor {
        0 => {
            app.controls.adjust_days(direction);
            if app.controls.stale {
                app.set_warning("Lookback changed — press Enter or f to fetch");
            }
        }
        1 => {
            app.controls.adjust_y_min(direction);
            app.recompute_view();
        }
        2 => {
            app.controls.adjust_y_max(direction);
            app.recompute_view();
        }
        _ => {}
    }
}

fn handle_companies_key(app: &mut AppState, key: KeyEvent) {
    let count = app.companies.labels.len();

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if count > 0 && app.companies.cursor + 1 < count {
                app.companies.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.companies.cursor = app.companies.cursor.saturating_sub(1);
        }
        KeyCode::Char(' ') => {
            app.companies.toggle_at_cursor();
            app.recompute_view();
        }
        KeyCode::Char('a') => {
            app.companies.select_all();
            app.recompute_view();
        }
        KeyCode::Char('d') => {
            app.companies.deselect_all();
            app.recompute_view();
        }
        _ => {}
    }
}

fn handle_table_key(app: &mut AppState, key: KeyEvent) {
    let col_count = match &app.view {
        Some(Ok(view)) => view.table.columns().len(),
        _ => 0,
    };

    match key.code {
        KeyCode::Char('l') | KeyCode::Right => {
            if col_count > 0 && app.table_col_offset + 1 < col_count {
                app.table_col_offset += 1;
            }
        }
        KeyCode::Char('h') | KeyCode::Left => {
            app.table_col_offset = app.table_col_offset.saturating_sub(1);
        }
        KeyCode::Char('g') => {
            app.table_col_offset = 0;
        }
        KeyCode::Char('G') => {
            app.table_col_offset = col_count.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_help_key(app: &mut AppState, key: KeyEvent) {
    if let KeyCode::Char('e') = key.code {
        app.overlay = Overlay::ErrorHistory;
        app.error_scroll = 0;
    }
}
