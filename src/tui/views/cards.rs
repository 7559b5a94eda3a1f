//! Card grid - two columns of item cards with keyboard selection.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::board::Board;
use crate::render::CardContent;
use crate::tui::theme;

/// Rows per card, borders included.
pub const CARD_HEIGHT: u16 = 8;

const COLUMNS: usize = 2;

/// First grid row to draw so the selected card stays on screen.
fn first_visible_row(selected: usize, visible_rows: usize) -> usize {
    let selected_row = selected / COLUMNS;
    selected_row.saturating_sub(visible_rows.saturating_sub(1))
}

pub fn render(frame: &mut Frame, area: Rect, board: &Board) {
    let items = board.visible_items();
    if items.is_empty() {
        let empty = Paragraph::new("No items match this filter. Press 'a' to add one.")
            .style(theme::muted())
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    }

    let visible_rows = usize::from((area.height / CARD_HEIGHT).max(1));
    let first_row = first_visible_row(board.selected_index(), visible_rows);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); visible_rows])
        .split(area);

    for (row_offset, row_area) in rows.iter().enumerate() {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(*row_area);

        for (col, cell) in columns.iter().enumerate() {
            let index = (first_row + row_offset) * COLUMNS + col;
            if let Some(item) = items.get(index) {
                let content = CardContent::from_item(item);
                render_card(frame, *cell, &content, index == board.selected_index());
            }
        }
    }
}

fn render_card(frame: &mut Frame, area: Rect, card: &CardContent, selected: bool) {
    let border = if selected {
        theme::highlight()
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(format!(" {} ", card.title))
        .title_bottom(Line::from(" e: edit ").right_aligned());

    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("[{}]", card.badge),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            format!("● {}", card.status),
            Style::default().fg(theme::swatch_color(card.status_color)),
        ),
        Span::raw("  "),
        Span::styled(
            format!("▲ {}", card.priority),
            Style::default().fg(theme::swatch_color(card.priority_color)),
        ),
    ])];
    lines.extend(card.description.iter().map(theme::styled_line));
    lines.push(Line::styled(card.due.clone(), theme::muted()));

    let body = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(body, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_visible_row_scrolls_with_selection() {
        assert_eq!(first_visible_row(0, 2), 0);
        assert_eq!(first_visible_row(3, 2), 0);
        assert_eq!(first_visible_row(4, 2), 1);
        assert_eq!(first_visible_row(7, 1), 3);
    }
}
