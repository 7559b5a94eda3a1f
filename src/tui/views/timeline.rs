//! Timeline strip above the cards.

use std::collections::HashMap;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::board::Board;
use crate::render::timeline::{draw_strip, marker_column};
use crate::tui::theme;

/// Rows taken by the strip, borders included.
pub const HEIGHT: u16 = 5;

pub fn render(frame: &mut Frame, area: Rect, board: &Board) {
    let block = Block::default().borders(Borders::ALL).title(" Timeline ");
    let inner = block.inner(area);
    let markers = board.timeline();

    if markers.is_empty() {
        let empty = Paragraph::new("No items to display")
            .style(theme::muted())
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let width = inner.width.max(1);
    let [axis, upper, lower] = draw_strip(&markers, width);

    // Colour each dot by its item's status
    let colors: HashMap<u16, Color> = markers
        .iter()
        .map(|m| (marker_column(m.position, width), theme::swatch_color(m.color)))
        .collect();
    let axis_line = Line::from(
        axis.chars()
            .enumerate()
            .map(|(col, ch)| match colors.get(&(col as u16)) {
                Some(color) => Span::styled(ch.to_string(), Style::default().fg(*color)),
                None => Span::styled(ch.to_string(), theme::muted()),
            })
            .collect::<Vec<_>>(),
    );

    let lines = vec![axis_line, Line::raw(upper), Line::raw(lower)];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
