//! Neon theme tokens — dark background, electric accents.

use ratatui::style::{Color, Modifier, Style};

pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);

/// Electric cyan — focus and highlights.
pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

/// Steel blue — secondary text.
pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

/// Cool purple — neutral info.
pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

/// Neon green — success.
pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

/// Hot pink — errors.
pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

/// Neon orange — warnings.
pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

/// Per-series line colors for the chart, cycled by company index.
const SERIES_PALETTE: [Color; 12] = [
    Color::Rgb(0, 255, 255),
    Color::Rgb(0, 255, 128),
    Color::Rgb(255, 20, 147),
    Color::Rgb(255, 140, 0),
    Color::Rgb(147, 112, 219),
    Color::Rgb(255, 255, 0),
    Color::Rgb(100, 149, 237),
    Color::Rgb(255, 105, 180),
    Color::Rgb(127, 255, 212),
    Color::Rgb(255, 69, 0),
    Color::Rgb(173, 255, 47),
    Color::Rgb(218, 112, 214),
];

pub fn series_color(index: usize) -> Color {
    SERIES_PALETTE[index % SERIES_PALETTE.len()]
}
