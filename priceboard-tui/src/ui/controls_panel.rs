//! Panel 1 — Controls: lookback-days and y-range sliders, fetch progress.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use priceboard_core::selection::{DAYS_MAX, DAYS_MIN, Y_MAX, Y_MIN};

use crate::app::AppState;
use crate::theme;

const BAR_WIDTH: usize = 30;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let c = &app.controls;
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        "[j/k]navigate [h/l]adjust [H/L]coarse [Enter/f]fetch",
        theme::muted(),
    )));
    lines.push(Line::from(""));

    // Fetch progress
    if c.fetch_in_progress {
        let label = c.fetch_current.as_deref().unwrap_or("...");
        lines.push(Line::from(vec![
            Span::styled("Fetching ", theme::warning()),
            Span::styled(label, theme::accent()),
            Span::styled(
                format!("... [{}/{}]", c.fetch_done, c.fetch_total),
                theme::muted(),
            ),
        ]));
        lines.push(Line::from(""));
    } else if c.stale {
        lines.push(Line::from(Span::styled(
            "Lookback changed — table is stale, press Enter to fetch",
            theme::warning(),
        )));
        lines.push(Line::from(""));
    }

    slider_line(
        &mut lines,
        "Lookback days",
        (c.days - DAYS_MIN) as f64 / (DAYS_MAX - DAYS_MIN) as f64,
        format!("{} d", c.days),
        c.cursor == 0,
    );
    slider_line(
        &mut lines,
        "Y min (USD)",
        (c.y_min - Y_MIN) / (Y_MAX - Y_MIN),
        format!("{:.0}", c.y_min),
        c.cursor == 1,
    );
    slider_line(
        &mut lines,
        "Y max (USD)",
        (c.y_max - Y_MIN) / (Y_MAX - Y_MIN),
        format!("{:.0}", c.y_max),
        c.cursor == 2,
    );

    lines.push(Line::from(""));
    let selected = app.companies.selected.len();
    lines.push(Line::from(vec![
        Span::styled("Companies selected: ", theme::muted()),
        Span::styled(
            format!("{selected}/{}", app.companies.labels.len()),
            theme::accent(),
        ),
        Span::styled("  (edit in panel 2)", theme::muted()),
    ]));

    if let Some(table) = &app.full_table {
        let span = table
            .rows
            .first()
            .and_then(|r| r.cells.first().zip(r.cells.last()))
            .map(|(first, last)| format!("{} … {}", first.date_label, last.date_label))
            .unwrap_or_else(|| "no dates".into());
        lines.push(Line::from(vec![
            Span::styled("Data: ", theme::muted()),
            Span::styled(format!("{} companies, {span}", table.row_count()), theme::neutral()),
        ]));
    } else {
        lines.push(Line::from(Span::styled(
            "No data yet — press Enter or f to fetch",
            theme::muted(),
        )));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn slider_line(lines: &mut Vec<Line<'_>>, label: &str, frac: f64, value: String, active: bool) {
    let style = if active {
        theme::accent().add_modifier(Modifier::REVERSED)
    } else {
        theme::muted()
    };

    let filled = (frac.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    let empty = BAR_WIDTH.saturating_sub(filled);
    let bar = format!("[{}{}]", "=".repeat(filled), " ".repeat(empty));

    lines.push(Line::from(vec![
        Span::styled(format!("{label:>16}: "), style),
        Span::styled(bar, if active { theme::accent() } else { theme::muted() }),
        Span::styled(format!(" {value}"), style),
    ]));
}
