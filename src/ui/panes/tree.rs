//! Tree diagram pane
//!
//! Nodes are placed by in-order index (column) and depth (row), so a BST
//! reads left to right in sorted order. Every node row is followed by a
//! connector row drawn with box characters:
//!
//! ```text
//!     2
//!  ┌──┴──┐
//!  1     3
//! ```

use crate::action::TreeType;
use crate::snapshot::Highlight;
use crate::tree::ids::NodeId;
use crate::tree::{Node, Tree};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rustc_hash::FxHashMap;

const MAX_LABEL_WIDTH: usize = 8;
const MIN_CELL_WIDTH: usize = 3;

/// A node with its position in the diagram
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedNode {
    pub id: NodeId,
    pub label: String,
    /// Center column
    pub x: usize,
    pub depth: usize,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

/// Positions for every node of a tree
#[derive(Debug, Clone, Default)]
pub struct TreeLayout {
    pub nodes: Vec<PlacedNode>,
    pub cell_width: usize,
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Cell {
    Blank,
    Edge(char),
    Label(char, NodeId),
}

fn label_for(node: &Node) -> String {
    let label = node.value.to_string();
    if label.chars().count() <= MAX_LABEL_WIDTH {
        return label;
    }
    let mut short: String = label.chars().take(MAX_LABEL_WIDTH - 1).collect();
    short.push('…');
    short
}

/// Compute the layout of `tree`
pub fn layout_tree(tree: &Tree) -> TreeLayout {
    // In-order walk with depth
    let mut ordered: Vec<(&Node, usize)> = Vec::new();
    let mut stack: Vec<(&Node, usize)> = Vec::new();
    let mut current = tree.root().map(|node| (node, 0));
    loop {
        while let Some((node, depth)) = current {
            stack.push((node, depth));
            current = node.left.as_deref().map(|left| (left, depth + 1));
        }
        let Some((node, depth)) = stack.pop() else {
            break;
        };
        ordered.push((node, depth));
        current = node.right.as_deref().map(|right| (right, depth + 1));
    }

    if ordered.is_empty() {
        return TreeLayout::default();
    }

    let labels: Vec<String> = ordered.iter().map(|(node, _)| label_for(node)).collect();
    let widest = labels.iter().map(|l| l.chars().count()).max().unwrap_or(1);
    let cell_width = (widest + 1).max(MIN_CELL_WIDTH);
    let max_depth = ordered.iter().map(|(_, depth)| *depth).max().unwrap_or(0);

    let nodes = ordered
        .iter()
        .zip(labels)
        .enumerate()
        .map(|(index, ((node, depth), label))| PlacedNode {
            id: node.id,
            label,
            x: index * cell_width + cell_width / 2,
            depth: *depth,
            left: node.left.as_ref().map(|n| n.id),
            right: node.right.as_ref().map(|n| n.id),
        })
        .collect::<Vec<_>>();

    TreeLayout {
        width: nodes.len() * cell_width,
        height: max_depth * 2 + 1,
        nodes,
        cell_width,
    }
}

impl TreeLayout {
    pub fn find(&self, id: NodeId) -> Option<&PlacedNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn grid(&self) -> Vec<Vec<Cell>> {
        let mut grid = vec![vec![Cell::Blank; self.width]; self.height];
        let columns: FxHashMap<NodeId, usize> = self.nodes.iter().map(|n| (n.id, n.x)).collect();

        for node in &self.nodes {
            let row = node.depth * 2;
            let len = node.label.chars().count();
            let start = node.x.saturating_sub(len.saturating_sub(1) / 2);
            for (offset, ch) in node.label.chars().enumerate() {
                if let Some(cell) = grid[row].get_mut(start + offset) {
                    *cell = Cell::Label(ch, node.id);
                }
            }

            let left = node.left.and_then(|id| columns.get(&id).copied());
            let right = node.right.and_then(|id| columns.get(&id).copied());
            if left.is_none() && right.is_none() {
                continue;
            }

            let connectors = &mut grid[row + 1];
            if let Some(lx) = left {
                connectors[lx] = Cell::Edge('┌');
                for cell in &mut connectors[lx + 1..node.x] {
                    *cell = Cell::Edge('─');
                }
            }
            if let Some(rx) = right {
                for cell in &mut connectors[node.x + 1..rx] {
                    *cell = Cell::Edge('─');
                }
                connectors[rx] = Cell::Edge('┐');
            }
            connectors[node.x] = Cell::Edge(match (left, right) {
                (Some(_), Some(_)) => '┴',
                (Some(_), None) => '┘',
                _ => '└',
            });
        }

        grid
    }

    /// Plain text rows, trailing blanks trimmed
    pub fn to_lines(&self) -> Vec<String> {
        self.grid()
            .iter()
            .map(|row| {
                let text: String = row
                    .iter()
                    .map(|cell| match cell {
                        Cell::Blank => ' ',
                        Cell::Edge(ch) | Cell::Label(ch, _) => *ch,
                    })
                    .collect();
                text.trim_end().to_string()
            })
            .collect()
    }
}

/// Data needed to render the tree pane
pub struct TreeRenderData<'a> {
    pub tree: Option<&'a Tree>,
    pub highlight: Option<&'a Highlight>,
    pub tree_type: TreeType,
}

fn node_style(id: NodeId, highlight: Option<&Highlight>) -> Style {
    match highlight {
        Some(h) if h.id == Some(id) => Style::default()
            .fg(DEFAULT_THEME.kind_color(h.kind))
            .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        Some(h) if h.path.contains(&id) => Style::default()
            .fg(DEFAULT_THEME.path)
            .add_modifier(Modifier::BOLD),
        _ => Style::default().fg(DEFAULT_THEME.number),
    }
}

/// Render the tree pane
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    data: TreeRenderData,
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

    let node_count = data.tree.map_or(0, Tree::len);
    let block = Block::default()
        .title(format!(
            " Tree ({}) · {} node{} ",
            data.tree_type,
            node_count,
            if node_count == 1 { "" } else { "s" }
        ))
        .borders(Borders::ALL)
        .border_style(border_style);

    let layout = data.tree.map(layout_tree).unwrap_or_default();
    if layout.nodes.is_empty() {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            "(empty tree)",
            Style::default().fg(DEFAULT_THEME.comment),
        )))
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let lines: Vec<Line> = layout
        .grid()
        .into_iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .into_iter()
                .map(|cell| match cell {
                    Cell::Blank => Span::raw(" "),
                    Cell::Edge(ch) => {
                        Span::styled(ch.to_string(), Style::default().fg(DEFAULT_THEME.comment))
                    }
                    Cell::Label(ch, id) => {
                        Span::styled(ch.to_string(), node_style(id, data.highlight))
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let inner_width = area.width.saturating_sub(2) as usize;
    let inner_height = area.height.saturating_sub(2) as usize;

    // Keep the highlighted node in view horizontally
    let focus_x = data
        .highlight
        .and_then(|h| h.id)
        .and_then(|id| layout.find(id))
        .map_or(0, |n| n.x);
    let h_offset = if layout.width > inner_width {
        focus_x
            .saturating_sub(inner_width / 2)
            .min(layout.width - inner_width)
    } else {
        0
    };

    let max_scroll = layout.height.saturating_sub(inner_height);
    if *scroll > max_scroll {
        *scroll = max_scroll;
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(if layout.width <= inner_width {
            Alignment::Center
        } else {
            Alignment::Left
        })
        .scroll((clamp_offset(*scroll), clamp_offset(h_offset)));

    frame.render_widget(paragraph, area);
}

/// Paragraph offsets are u16; pin anything larger at the far edge
fn clamp_offset(offset: usize) -> u16 {
    u16::try_from(offset).unwrap_or(u16::MAX)
}
