use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::tree::{NodeId, Tree};
use crate::ui::theme::DEFAULT_THEME;

/// Horizontal cells reserved per in-order rank.
const CELL_WIDTH: usize = 4;

/// Renders the tree two rows per level: one row of node values and one row of
/// `/` and `\` connectors. Columns come from in-order rank, so left subtrees
/// always sit left of their parent.
///
/// `visited` nodes are green, the `current` node is orange.
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    tree: Option<&Tree<i64>>,
    visited: &FxHashSet<NodeId>,
    current: Option<NodeId>,
    is_focused: bool,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let node_count = tree.map_or(0, Tree::len);
    let block = Block::default()
        .title(format!(" Tree ({node_count} nodes) "))
        .borders(Borders::ALL)
        .border_style(border_style);

    let Some(tree) = tree.filter(|t| !t.is_empty()) else {
        let paragraph = Paragraph::new("(empty tree)")
            .style(Style::default().fg(DEFAULT_THEME.comment))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let order = tree.in_order_ids();
    let mut position: FxHashMap<NodeId, (usize, usize)> = FxHashMap::default();
    for (rank, &id) in order.iter().enumerate() {
        position.insert(id, (rank * CELL_WIDTH, 0));
    }
    if let Some(root) = tree.root() {
        let mut stack = vec![(root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            if let Some(entry) = position.get_mut(&id) {
                entry.1 = depth;
            }
            let node = tree.node(id);
            if let Some(left) = node.left {
                stack.push((left, depth + 1));
            }
            if let Some(right) = node.right {
                stack.push((right, depth + 1));
            }
        }
    }

    let style_of = |id: NodeId| {
        if current == Some(id) {
            Style::default()
                .fg(DEFAULT_THEME.secondary)
                .add_modifier(Modifier::BOLD)
        } else if visited.contains(&id) {
            Style::default().fg(DEFAULT_THEME.success)
        } else {
            Style::default().fg(DEFAULT_THEME.fg)
        }
    };
    let connector_style = Style::default().fg(DEFAULT_THEME.comment);

    // Row d*2 holds the values at depth d, row d*2+1 the connectors below.
    let depth = tree.depth();
    let mut rows: Vec<Vec<(usize, String, Style)>> = vec![Vec::new(); depth * 2 - 1];
    for &id in &order {
        let (col, d) = position[&id];
        let node = tree.node(id);
        rows[d * 2].push((col, node.value.to_string(), style_of(id)));
        for (child, glyph) in [(node.left, '/'), (node.right, '\\')] {
            if let Some(child) = child {
                let (child_col, _) = position[&child];
                let mid = (col + child_col) / 2;
                rows[d * 2 + 1].push((mid, glyph.to_string(), connector_style));
            }
        }
    }

    let mut lines: Vec<Line> = Vec::with_capacity(rows.len());
    for mut row in rows {
        row.sort_by_key(|&(col, _, _)| col);
        let mut spans: Vec<Span> = Vec::with_capacity(row.len() * 2);
        let mut cursor = 0usize;
        for (col, text, style) in row {
            if col > cursor {
                spans.push(Span::raw(" ".repeat(col - cursor)));
                cursor = col;
            }
            cursor += text.chars().count();
            spans.push(Span::styled(text, style));
        }
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
