use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::step::{Step, StepKind};
use crate::ui::theme::DEFAULT_THEME;

/// Renders the emitted steps as a scrollable log, one line per step.
///
/// `selected` is the step currently shown in the main pane; its line gets a
/// highlighted background and is kept inside the visible window.
pub fn render_trace_pane(
    frame: &mut Frame,
    area: Rect,
    steps: &[Step<i64>],
    selected: Option<usize>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" Steps ({}) ", steps.len()))
        .borders(Borders::ALL)
        .border_style(border_style);

    if steps.is_empty() {
        let paragraph = Paragraph::new("(no steps yet)")
            .style(Style::default().fg(DEFAULT_THEME.comment))
            .block(block);
        frame.render_widget(paragraph, area);
        *scroll_offset = 0;
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    if steps.len() > visible_height {
        let max_scroll = steps.len() - visible_height;
        if *scroll_offset > max_scroll {
            *scroll_offset = max_scroll;
        }
    } else {
        *scroll_offset = 0;
    }
    // Scrubbing drags the window along with the selected step.
    if let Some(sel) = selected {
        if sel < *scroll_offset {
            *scroll_offset = sel;
        } else if sel >= *scroll_offset + visible_height {
            *scroll_offset = sel + 1 - visible_height;
        }
    }

    let visible_items: Vec<ListItem> = steps
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|step| {
            let (color, detail) = match step.kind {
                StepKind::Compare { a, b } => {
                    (DEFAULT_THEME.primary, format!("[{a}] vs [{b}]"))
                }
                StepKind::Swap { a, b } => (DEFAULT_THEME.error, format!("[{a}] <-> [{b}]")),
                StepKind::Write { index } => {
                    let value = step
                        .snapshot
                        .get(index)
                        .map_or_else(|| "?".to_string(), ToString::to_string);
                    (DEFAULT_THEME.secondary, format!("[{index}] = {value}"))
                }
                StepKind::Visit { .. } => {
                    let value = step
                        .snapshot
                        .last()
                        .map_or_else(|| "?".to_string(), ToString::to_string);
                    (DEFAULT_THEME.success, value)
                }
            };
            let line = Line::from(vec![
                Span::styled(
                    format!("#{:>3} ", step.seq),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(format!("{:<8}", step.kind.label()), Style::default().fg(color)),
                Span::styled(detail, Style::default().fg(DEFAULT_THEME.fg)),
            ]);
            let item = ListItem::new(line);
            if selected == Some(step.seq) {
                item.style(
                    Style::default()
                        .bg(DEFAULT_THEME.status_bg)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                item
            }
        })
        .collect();

    let list = List::new(visible_items).block(block);
    frame.render_widget(list, area);
}
