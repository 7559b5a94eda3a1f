//! Terminal colours for the board's swatches and text styles.

use ratatui::prelude::*;

use crate::board::NotificationLevel;
use crate::render::Swatch;
use crate::render::markup::{SpanStyle, StyledLine};

pub fn swatch_color(swatch: Swatch) -> Color {
    match swatch {
        Swatch::Gray => Color::Gray,
        Swatch::Amber => Color::Yellow,
        Swatch::Green => Color::Green,
        Swatch::Red => Color::Red,
        Swatch::Blue => Color::Blue,
        Swatch::Rose => Color::LightRed,
    }
}

pub fn level_color(level: NotificationLevel) -> Color {
    match level {
        NotificationLevel::Info => Color::Cyan,
        NotificationLevel::Success => Color::Green,
        NotificationLevel::Warning => Color::Yellow,
        NotificationLevel::Error => Color::Red,
    }
}

/// Border style of the focused/selected element.
pub fn highlight() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn span_style(style: SpanStyle) -> Style {
    let mut out = Style::default();
    if style.bold {
        out = out.add_modifier(Modifier::BOLD);
    }
    if style.italic {
        out = out.add_modifier(Modifier::ITALIC);
    }
    if style.code {
        out = out.fg(Color::LightYellow);
    }
    if style.heading {
        out = out.add_modifier(Modifier::UNDERLINED);
    }
    out
}

/// Convert a rendered markup line into a ratatui line.
pub fn styled_line(line: &StyledLine) -> Line<'static> {
    Line::from(
        line.spans
            .iter()
            .map(|span| Span::styled(span.text.clone(), span_style(span.style)))
            .collect::<Vec<_>>(),
    )
}
