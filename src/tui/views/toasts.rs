//! Toast stack and notification history overlay.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use super::dialog::centered_rect;
use crate::board::NotificationManager;
use crate::tui::theme;

const TOAST_WIDTH: u16 = 44;
const TOAST_HEIGHT: u16 = 4;

/// Draw active toasts stacked in the top-right corner, newest on top.
pub fn render_toasts(frame: &mut Frame, area: Rect, notifications: &NotificationManager) {
    let width = TOAST_WIDTH.min(area.width);
    let x = area.x + area.width.saturating_sub(width + 1);
    let mut y = area.y + 1;

    for toast in notifications.visible_toasts() {
        if y + TOAST_HEIGHT > area.bottom() {
            break;
        }
        let rect = Rect::new(x, y, width, TOAST_HEIGHT);
        let color = theme::level_color(toast.level);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(Span::styled(
                format!(" {} {} ", toast.level.icon(), toast.title),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ));
        let body = Paragraph::new(toast.description.as_str())
            .block(block)
            .wrap(Wrap { trim: true });

        frame.render_widget(Clear, rect);
        frame.render_widget(body, rect);
        y += TOAST_HEIGHT;
    }

    if notifications.overflow_count > 0 && y < area.bottom() {
        let text = format!("+{} more", notifications.overflow_count);
        let rect = Rect::new(x, y, width, 1);
        frame.render_widget(
            Paragraph::new(text)
                .style(theme::muted())
                .alignment(Alignment::Right),
            rect,
        );
    }
}

/// Draw the notification history overlay.
pub fn render_history(frame: &mut Frame, area: Rect, notifications: &NotificationManager) {
    let popup = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Notifications ")
        .title_bottom(Line::from(" j/k: move  c: clear  n/Esc: close ").centered());

    if notifications.history_is_empty() {
        let empty = Paragraph::new("No notifications yet")
            .style(theme::muted())
            .block(block);
        frame.render_widget(empty, popup);
        return;
    }

    let items: Vec<ListItem> = notifications
        .history()
        .map(|entry| {
            let color = theme::level_color(entry.level);
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        format!("{} {}", entry.level.icon(), entry.title),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!("  {}", entry.relative_time()), theme::muted()),
                ]),
                Line::raw(format!("  {}", entry.description)),
            ])
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(notifications.history_selected));
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_stateful_widget(list, popup, &mut state);
}
