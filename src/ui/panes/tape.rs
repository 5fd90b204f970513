//! Tape pane rendering as a hex dump
//!
//! Cells are laid out in rows of a width-dependent number of bytes:
//!
//! ```text
//! 00000 │ 00 48 65 00 │ ·He·
//! ```
//!
//! The cursor cell is highlighted and the pane follows it unless the user has
//! scrolled manually. Rows past both the cursor and the last non-zero cell are
//! not shown, so a mostly empty 30000-cell tape stays short.

use super::utils::{border_style, cell_glyph, clamp_scroll, describe_cell, follow_row};
use crate::memory::Tape;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Scroll state for the tape pane
pub struct TapeScrollState {
    pub offset: usize,
    pub follow: bool,
}

impl Default for TapeScrollState {
    fn default() -> Self {
        TapeScrollState {
            offset: 0,
            follow: true,
        }
    }
}

/// Bytes per row that fit in `content_width` columns (multiple of 4, 4..=16)
pub(crate) fn cells_per_row(content_width: usize) -> usize {
    // "00000 │ " + n * "xx " + "│ " + n glyphs
    let fitting = content_width.saturating_sub(10) / 4;
    (fitting.clamp(4, 16) / 4) * 4
}

/// Render the tape pane
pub fn render_tape_pane(
    frame: &mut Frame,
    area: Rect,
    tape: &Tape,
    is_focused: bool,
    scroll_state: &mut TapeScrollState,
) {
    let title = format!(
        " Tape [:{}] = {} ",
        tape.cursor(),
        describe_cell(tape.read())
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let per_row = cells_per_row(area.width.saturating_sub(2) as usize);

    let last_used = tape
        .cells()
        .iter()
        .rposition(|&value| value != 0)
        .unwrap_or(0)
        .max(tape.cursor());
    let total_rows = (last_used / per_row + 1).min(tape.len().div_ceil(per_row));
    let cursor_row = tape.cursor() / per_row;

    if scroll_state.follow {
        follow_row(&mut scroll_state.offset, cursor_row, visible_height, total_rows);
    } else {
        clamp_scroll(&mut scroll_state.offset, visible_height, total_rows);
    }

    let items: Vec<ListItem> = (scroll_state.offset..total_rows)
        .take(visible_height)
        .map(|row| ListItem::new(render_row(tape, row * per_row, per_row)))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn render_row(tape: &Tape, start: usize, per_row: usize) -> Line<'static> {
    let end = (start + per_row).min(tape.len());
    let cells = &tape.cells()[start..end];
    let cursor = tape.cursor();

    let mut spans = vec![
        Span::styled(
            format!("{:05}", start),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
        Span::styled(" │ ", Style::default().fg(DEFAULT_THEME.border_normal)),
    ];

    for (i, &value) in cells.iter().enumerate() {
        let style = if start + i == cursor {
            Style::default()
                .bg(DEFAULT_THEME.cursor_bg)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD)
        } else if value == 0 {
            Style::default().fg(DEFAULT_THEME.zero_cell)
        } else {
            Style::default().fg(DEFAULT_THEME.fg)
        };
        spans.push(Span::styled(format!("{:02x}", value), style));
        spans.push(Span::raw(" "));
    }

    // Pad a short final row so the glyph gutter lines up
    for _ in cells.len()..per_row {
        spans.push(Span::raw("   "));
    }

    spans.push(Span::styled("│ ", Style::default().fg(DEFAULT_THEME.border_normal)));
    let glyphs: String = cells.iter().map(|&value| cell_glyph(value)).collect();
    spans.push(Span::styled(glyphs, Style::default().fg(DEFAULT_THEME.string)));

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_per_row() {
        assert_eq!(cells_per_row(0), 4);
        assert_eq!(cells_per_row(40), 4);
        assert_eq!(cells_per_row(45), 8);
        assert_eq!(cells_per_row(200), 16);
    }
}
