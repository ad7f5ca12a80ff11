//! Panel 3 — Table: selected companies' closes, sorted by label,
//! one column per date label, horizontally scrollable.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use priceboard_core::selection::BoardError;

use crate::app::AppState;
use crate::theme;

const LABEL_WIDTH: usize = 12;
const CELL_WIDTH: usize = 16;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    let view = match &app.view {
        None => {
            render_hint(f, area, "No data yet. Fetch from the Controls panel (press 1, then Enter).");
            return;
        }
        Some(Err(BoardError::EmptySelection)) => {
            render_error(f, area, &BoardError::EmptySelection.to_string());
            return;
        }
        Some(Err(e)) => {
            render_error(f, area, &e.to_string());
            return;
        }
        Some(Ok(view)) => view,
    };

    let table = &view.table;
    let columns = table.columns();
    if columns.is_empty() {
        render_hint(f, area, "The selected companies have no price history.");
        return;
    }

    // How many date columns fit beside the label column.
    let visible = ((area.width as usize).saturating_sub(LABEL_WIDTH + 1) / CELL_WIDTH).max(1);
    let start = app.table_col_offset.min(columns.len() - 1);
    let end = (start + visible).min(columns.len());

    lines.push(Line::from(vec![
        Span::styled("Prices (USD)  ", theme::muted()),
        Span::styled(
            format!("columns {}-{} of {}", start + 1, end, columns.len()),
            theme::accent(),
        ),
        Span::styled("  [h/l]scroll [g/G]ends", theme::muted()),
    ]));
    lines.push(Line::from(""));

    // Header row of date labels.
    let mut header = vec![Span::styled(
        format!("{:<LABEL_WIDTH$} ", "Name"),
        theme::accent_bold(),
    )];
    for col in &columns[start..end] {
        header.push(Span::styled(
            format!("{col:>width$}", width = CELL_WIDTH),
            theme::accent_bold(),
        ));
    }
    lines.push(Line::from(header));

    // One row per company; a row may lack some union columns.
    for row in &table.rows {
        let mut spans = vec![Span::styled(
            format!("{:<LABEL_WIDTH$} ", row.label),
            theme::accent(),
        )];
        for col in &columns[start..end] {
            let cell = row.cells.iter().find(|c| c.date_label == *col);
            let text = match cell {
                Some(c) => format!("{:>width$.2}", c.close, width = CELL_WIDTH),
                None => format!("{:>width$}", "-", width = CELL_WIDTH),
            };
            let style = if cell.is_some() {
                theme::neutral()
            } else {
                theme::muted()
            };
            spans.push(Span::styled(text, style));
        }
        lines.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn render_hint(f: &mut Frame, area: Rect, msg: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(msg.to_string(), theme::muted())),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_error(f: &mut Frame, area: Rect, msg: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(msg.to_string(), theme::negative())),
    ];
    f.render_widget(Paragraph::new(lines), area);
}
