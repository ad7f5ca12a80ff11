//! Panel 4 — Chart: overlaid close-price lines, one per selected company.
//!
//! X is temporal (days since the first plotted date, labeled with real
//! dates); Y is clamped to the user-chosen range, points outside it are
//! simply not plotted.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use priceboard_core::selection::BoardError;
use priceboard_core::table::format_date_label;
use priceboard_core::ChartData;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    match &app.view {
        None => render_hint(
            f,
            area,
            "No data yet. Fetch from the Controls panel (press 1, then Enter).",
        ),
        Some(Err(BoardError::EmptySelection)) => {
            render_message(f, area, &BoardError::EmptySelection.to_string())
        }
        Some(Err(e)) => render_message(f, area, &e.to_string()),
        Some(Ok(view)) => render_chart(f, area, &view.chart),
    }
}

fn render_hint(f: &mut Frame, area: Rect, msg: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(msg.to_string(), theme::muted())),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_message(f: &mut Frame, area: Rect, msg: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(msg.to_string(), theme::negative())),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_chart(f: &mut Frame, area: Rect, chart: &ChartData) {
    let Some(first_date) = chart.records.iter().map(|r| r.date).min() else {
        render_hint(f, area, "The selected companies have no price history.");
        return;
    };
    let last_date = chart
        .records
        .iter()
        .map(|r| r.date)
        .max()
        .unwrap_or(first_date);

    let (y_min, y_max) = chart.y_range;
    let x_max = (last_date - first_date).num_days().max(1) as f64;

    // One point series per company, x = days since first plotted date.
    let series: Vec<(String, Vec<(f64, f64)>)> = chart
        .companies
        .iter()
        .map(|company| {
            let points: Vec<(f64, f64)> = chart
                .records
                .iter()
                .filter(|r| &r.company == company)
                .map(|r| ((r.date - first_date).num_days() as f64, r.close))
                .collect();
            (company.clone(), points)
        })
        .collect();

    let datasets: Vec<Dataset> = series
        .iter()
        .enumerate()
        .map(|(i, (company, points))| {
            Dataset::default()
                .name(company.as_str())
                .marker(symbols::Marker::Braille)
                .style(Style::default().fg(theme::series_color(i)))
                .graph_type(GraphType::Line)
                .data(points)
        })
        .collect();

    let widget = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title(Span::styled("Date", theme::muted()))
                .style(theme::muted())
                .bounds([0.0, x_max])
                .labels(vec![
                    Span::styled(format_date_label(first_date), theme::muted()),
                    Span::styled(format_date_label(last_date), theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Stock Prices (USD)", theme::muted()))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{y_min:.0}"), theme::muted()),
                    Span::styled(format!("{:.0}", (y_min + y_max) / 2.0), theme::muted()),
                    Span::styled(format!("{y_max:.0}"), theme::muted()),
                ]),
        );

    f.render_widget(widget, area);
}
