//! Modal add/edit dialog.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::board::{FormField, FormState};
use crate::render::markup;
use crate::tui::theme;

/// Helper function to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn field_lines(form: &FormState, field: FormField) -> Vec<Line<'static>> {
    let focused = form.focus() == field;
    let marker = if focused { "> " } else { "  " };
    let required = if field.is_required() { " *" } else { "" };
    let label_style = if focused {
        theme::highlight()
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let mut lines = vec![Line::from(Span::styled(
        format!("{}{}{}", marker, field.label(), required),
        label_style,
    ))];

    if let Some(text) = form.text(field) {
        let cursor = if focused { "_" } else { "" };
        let rows: Vec<&str> = text.split('\n').collect();
        let last = rows.len() - 1;
        for (i, row) in rows.iter().enumerate() {
            let suffix = if i == last { cursor } else { "" };
            lines.push(Line::raw(format!("    {}{}", row, suffix)));
        }
    } else if let Some(choice) = form.choice_label(field) {
        let text = if focused {
            format!("    < {} >", choice)
        } else {
            format!("    {}", choice)
        };
        lines.push(Line::raw(text));
    }

    if let Some(issue) = form.issue_for(field) {
        lines.push(Line::styled(
            format!("    {}", issue),
            Style::default().fg(Color::Red),
        ));
    }

    lines
}

pub fn render(frame: &mut Frame, area: Rect, form: &FormState) {
    let popup = centered_rect(70, 90, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::highlight())
        .title(format!(" {} ", form.kind.title()))
        .title_bottom(
            Line::from(format!(
                " Ctrl+S: {}  Esc: Cancel  Tab: next field  ←/→: change choice ",
                form.kind.submit_label()
            ))
            .centered(),
        );
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let mut lines = Vec::new();
    for field in FormField::ALL {
        lines.extend(field_lines(form, field));
    }

    // Rendered description while it is being edited
    if form.focus() == FormField::Description && !form.description.trim().is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::styled("  Preview", theme::muted()));
        for line in markup::render(&form.description) {
            let mut styled = theme::styled_line(&line);
            styled.spans.insert(0, Span::raw("    "));
            lines.push(styled);
        }
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(60, 50, outer);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 20);
        assert_eq!(popup.x, 20);
    }

    #[test]
    fn test_choice_field_shows_arrows_when_focused() {
        let mut form = FormState::blank();
        form.set_focus(FormField::Status);
        let lines = field_lines(&form, FormField::Status);
        assert_eq!(lines[1].spans[0].content, "    < Planned >");
    }
}
