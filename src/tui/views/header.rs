//! Header: board title, filter control and the add button.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::board::{Board, TypeFilter};
use crate::tui::theme;

const ADD_BUTTON: &str = "[+ Add Item]";

pub fn render(frame: &mut Frame, area: Rect, board: &Board) {
    let mut spans = vec![
        Span::styled(" Project Roadmap ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
    ];

    for (index, filter) in TypeFilter::ALL.iter().enumerate() {
        let label = format!(" {} {} ", index + 1, filter.label());
        let style = if *filter == board.filter() {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            theme::muted()
        };
        spans.push(Span::styled(label, style));
    }

    let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding = usize::from(area.width)
        .saturating_sub(used + ADD_BUTTON.chars().count() + 3);
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(ADD_BUTTON, Style::default().fg(Color::Green)));

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}
