//! Step log for the action under the cursor
//!
//! Lists every snapshot of the current action with its highlight kind and
//! message. The entry under the cursor is marked and kept in view.

use crate::snapshot::Snapshot;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Data needed to render the step log
pub struct StepsRenderData<'a> {
    /// Snapshots of the current action, in order
    pub steps: &'a [Snapshot],
    /// Index of the cursor within `steps`
    pub current: usize,
    /// Display form of the action, if known
    pub title: Option<&'a str>,
}

pub fn render_steps_pane(
    frame: &mut Frame,
    area: Rect,
    data: StepsRenderData,
    is_focused: bool,
    scroll: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let title = match data.title {
        Some(action) => format!(" Steps: {} ", action),
        None => " Steps ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    if data.steps.is_empty() {
        let items = vec![ListItem::new(Line::from(Span::styled(
            "Press : and enter a command, e.g. demo bst",
            Style::default().fg(DEFAULT_THEME.comment),
        )))];
        frame.render_widget(List::new(items).block(block), area);
        return;
    }

    let visible = area.height.saturating_sub(2) as usize;

    // Keep the current step visible
    if data.current < *scroll {
        *scroll = data.current;
    } else if visible > 0 && data.current >= *scroll + visible {
        *scroll = data.current + 1 - visible;
    }
    let max_scroll = data.steps.len().saturating_sub(visible);
    if *scroll > max_scroll {
        *scroll = max_scroll;
    }

    let items: Vec<ListItem> = data
        .steps
        .iter()
        .enumerate()
        .skip(*scroll)
        .take(visible.max(1))
        .map(|(index, snapshot)| {
            let is_current = index == data.current;
            let kind = snapshot.kind();
            let marker = if is_current { "▶ " } else { "  " };

            let mut line_style = Style::default().fg(DEFAULT_THEME.fg);
            if is_current {
                line_style = line_style
                    .bg(DEFAULT_THEME.current_line_bg)
                    .add_modifier(Modifier::BOLD);
            }

            let spans = vec![
                Span::styled(marker, line_style.fg(DEFAULT_THEME.secondary)),
                Span::styled(format!("{:>3} ", index + 1), line_style.fg(DEFAULT_THEME.comment)),
                Span::styled(
                    format!("{:<9}", kind.label()),
                    line_style.fg(DEFAULT_THEME.kind_color(kind)),
                ),
                Span::styled(snapshot.highlight.message().to_string(), line_style),
            ];
            ListItem::new(Line::from(spans))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
