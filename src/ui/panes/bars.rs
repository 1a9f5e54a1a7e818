use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::step::StepKind;
use crate::ui::theme::DEFAULT_THEME;

/// Renders the sequence as a bar chart, bottom-aligned, one bar per element.
///
/// `active` is the step being viewed: its indices are tinted by step kind
/// (blue for compares, red for swaps, orange for writes). When `done` is set
/// the whole chart turns green instead.
pub fn render_bars_pane(
    frame: &mut Frame,
    area: Rect,
    values: &[i64],
    active: Option<StepKind>,
    done: bool,
    is_focused: bool,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" Sequence ({}) ", values.len()))
        .borders(Borders::ALL)
        .border_style(border_style);

    if values.is_empty() {
        let paragraph = Paragraph::new("(no values)")
            .style(Style::default().fg(DEFAULT_THEME.comment))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let inner_height = area.height.saturating_sub(2).max(1) as usize;
    // A numeric label row only fits when every value prints in two cells.
    let label_row = inner_height >= 3 && values.iter().all(|v| (-9..=99).contains(v));
    let bar_rows = if label_row {
        inner_height - 1
    } else {
        inner_height
    };

    // Scale so the smallest value still shows one cell and the largest fills
    // the pane.
    let min = values.iter().min().copied().unwrap_or(0) as f64;
    let max = values.iter().max().copied().unwrap_or(0) as f64;
    let span = max - min + 1.0;
    let height_of = |v: i64| -> usize {
        let scaled = (v as f64 - min + 1.0) / span * bar_rows as f64;
        (scaled.ceil() as usize).clamp(1, bar_rows)
    };

    let color_of = |index: usize| {
        if done {
            return DEFAULT_THEME.success;
        }
        match active {
            Some(StepKind::Compare { a, b }) if index == a || index == b => DEFAULT_THEME.primary,
            Some(StepKind::Swap { a, b }) if index == a || index == b => DEFAULT_THEME.error,
            Some(StepKind::Write { index: w }) if index == w => DEFAULT_THEME.secondary,
            _ => DEFAULT_THEME.bar,
        }
    };

    let heights: Vec<usize> = values.iter().map(|&v| height_of(v)).collect();
    let mut lines: Vec<Line> = Vec::with_capacity(inner_height);
    for row in 0..bar_rows {
        // Row 0 is the top of the pane; a bar of height h fills the bottom h rows.
        let threshold = bar_rows - row;
        let mut spans: Vec<Span> = Vec::with_capacity(values.len());
        for (i, &h) in heights.iter().enumerate() {
            if h >= threshold {
                spans.push(Span::styled("██ ", Style::default().fg(color_of(i))));
            } else {
                spans.push(Span::raw("   "));
            }
        }
        lines.push(Line::from(spans));
    }
    if label_row {
        let spans: Vec<Span> = values
            .iter()
            .enumerate()
            .map(|(i, v)| Span::styled(format!("{v:<3}"), Style::default().fg(color_of(i))))
            .collect();
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
