//! Panel 2 — Companies: checkbox multi-select in ticker-map order.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let companies = &app.companies;
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled("Selected: ", theme::muted()),
        Span::styled(
            format!("{}/{}", companies.selected.len(), companies.labels.len()),
            theme::accent(),
        ),
        Span::styled("  [Space]toggle [a]ll [d]eselect", theme::muted()),
    ]));
    lines.push(Line::from(""));

    for (i, label) in companies.labels.iter().enumerate() {
        let is_cursor = i == companies.cursor;
        let is_selected = companies.selected.contains(label);

        let check = if is_selected { "[x]" } else { "[ ]" };
        let symbol = app.tickers.symbol_for(label).unwrap_or("?");

        let label_style = if is_cursor {
            theme::accent().add_modifier(Modifier::REVERSED)
        } else if is_selected {
            theme::accent()
        } else {
            theme::muted()
        };

        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::raw(check),
            Span::raw(" "),
            Span::styled(format!("{label:<12}"), label_style),
            Span::styled(format!(" {symbol}"), theme::neutral()),
        ]));
    }

    if companies.selected.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Select at least one company to see the table and chart.",
            theme::negative(),
        )));
    }

    f.render_widget(Paragraph::new(lines), area);
}
