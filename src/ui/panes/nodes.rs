//! Flat node table (`nodesById`) for the snapshot under the cursor

use crate::snapshot::Highlight;
use crate::tree::ids::NodeId;
use crate::tree::serial::NodesById;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Data needed to render the node table
pub struct NodesRenderData<'a> {
    pub nodes_by_id: Option<&'a NodesById>,
    pub highlight: Option<&'a Highlight>,
}

fn link(child: Option<NodeId>) -> String {
    child.map_or_else(|| "·".to_string(), |id| format!("#{}", id))
}

pub fn render_nodes_pane(
    frame: &mut Frame,
    area: Rect,
    data: NodesRenderData,
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

    let block = Block::default()
        .title(" Nodes ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let mut rows: Vec<_> = data
        .nodes_by_id
        .map(|records| records.iter().collect())
        .unwrap_or_default();
    rows.sort_by_key(|(id, _)| **id);

    let visible = area.height.saturating_sub(3) as usize;
    let max_scroll = rows.len().saturating_sub(visible);
    if *scroll > max_scroll {
        *scroll = max_scroll;
    }

    let header = ListItem::new(Line::from(Span::styled(
        format!("{:>5}  {:<10} {:>6} {:>6}", "id", "value", "left", "right"),
        Style::default()
            .fg(DEFAULT_THEME.comment)
            .add_modifier(Modifier::BOLD),
    )));

    let highlighted = data.highlight.and_then(|h| h.id);
    let items = std::iter::once(header).chain(rows.iter().skip(*scroll).take(visible).map(
        |(id, record)| {
            let style = if highlighted == Some(**id) {
                Style::default()
                    .fg(data
                        .highlight
                        .map_or(DEFAULT_THEME.fg, |h| DEFAULT_THEME.kind_color(h.kind)))
                    .bg(DEFAULT_THEME.current_line_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>5}  ", format!("#{}", id)), style),
                Span::styled(format!("{:<10} ", record.value.to_string()), style),
                Span::styled(
                    format!("{:>6} {:>6}", link(record.left), link(record.right)),
                    style.fg(DEFAULT_THEME.comment),
                ),
            ]))
        },
    ));

    frame.render_widget(List::new(items.collect::<Vec<_>>()).block(block), area);
}
