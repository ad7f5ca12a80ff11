//! Panel 5 — Help: keyboard shortcuts and documentation.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, _app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global Navigation");
    key(&mut lines, "1-5", "Switch to panel by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle panels forward / back");
    key(&mut lines, "f", "Fetch prices for the current lookback");
    key(&mut lines, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 1 — Controls");
    key(&mut lines, "j / k", "Move between sliders");
    key(&mut lines, "h / l", "Adjust value by one step");
    key(&mut lines, "H / L", "Adjust value by ten steps");
    key(&mut lines, "Enter", "Fetch prices");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 2 — Companies");
    key(&mut lines, "j / k", "Move cursor down / up");
    key(&mut lines, "Space", "Toggle company selection");
    key(&mut lines, "a", "Select all companies");
    key(&mut lines, "d", "Deselect all companies");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 3 — Table");
    key(&mut lines, "h / l", "Scroll date columns left / right");
    key(&mut lines, "g / G", "Jump to first / last column");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 4 — Chart");
    key(&mut lines, "", "Overlaid close-price lines for the selection");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 5 — Help (this panel)");
    key(&mut lines, "e", "Open error history overlay");
    lines.push(Line::from(""));

    section(&mut lines, "Notes");
    key(&mut lines, "Lookback", "Changing it marks the data stale; refetch with Enter");
    key(&mut lines, "Y range", "Applies instantly to the chart, no refetch");
    key(&mut lines, "tickers.toml", "Optional file mapping company labels to symbols");

    let para = Paragraph::new(lines);
    f.render_widget(para, area);
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key<'a>(lines: &mut Vec<Line<'a>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>20}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
