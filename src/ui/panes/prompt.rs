//! One-line command prompt

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render_prompt(frame: &mut Frame, area: Rect, input: &str, is_active: bool) {
    let line = if is_active {
        Line::from(vec![
            Span::styled(
                ":",
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(input.to_string(), Style::default().fg(DEFAULT_THEME.fg)),
            Span::styled("█", Style::default().fg(DEFAULT_THEME.secondary)),
        ])
    } else {
        Line::from(Span::styled(
            concat!(
                " build 1 2 3 null 4 · insert 7 bst · search 4 · delete 2",
                " · traverse pre · demo sparse · clear"
            ),
            Style::default().fg(DEFAULT_THEME.comment),
        ))
    };

    frame.render_widget(Paragraph::new(line), area);
}
