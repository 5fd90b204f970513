//! Program source pane rendering
//!
//! This module renders the program text with each instruction class colored
//! and the next instruction highlighted.
//!
//! # Features
//!
//! - Per-opcode coloring (movement, arithmetic, I/O, brackets, comments)
//! - Current line background and `▶` marker
//! - Block highlight on the instruction the pointer is at (or `⏹` past the end)
//! - Horizontal scrolling so long one-line programs keep the pointer in view
//! - Line numbering

use super::utils::{border_style, follow_row, opcode_style};
use crate::program::{Program, SourceLocation};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Scroll state for the source pane
pub struct SourceScrollState {
    /// First visible line (0-based)
    pub offset: usize,
    /// Whether the view should follow the instruction pointer
    pub follow: bool,
}

impl Default for SourceScrollState {
    fn default() -> Self {
        SourceScrollState {
            offset: 0,
            follow: true,
        }
    }
}

/// Data needed to render the source pane
pub struct SourceRenderData<'a> {
    pub program: &'a Program,
    pub location: SourceLocation,
    pub at_end: bool,
}

/// Render the program source pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    data: SourceRenderData,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let block = Block::default()
        .title(" Program ")
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let content_width = area.width.saturating_sub(2) as usize;

    let lines: Vec<&str> = data.program.text().split('\n').collect();
    let total_lines = data.program.line_count();
    let current_line = data.location.line - 1;

    if scroll_state.follow {
        follow_row(&mut scroll_state.offset, current_line, visible_height, total_lines);
    } else {
        super::utils::clamp_scroll(&mut scroll_state.offset, visible_height, total_lines);
    }

    let number_width = total_lines.to_string().len();
    let gutter = number_width + 3; // marker + space + number + space
    let text_width = content_width.saturating_sub(gutter).max(1);

    // Shift every line left by the same amount so the pointer column stays visible
    let pointer_col = data.location.column - 1;
    let h_offset = if pointer_col >= text_width {
        pointer_col + 1 - text_width / 2
    } else {
        0
    };

    let rendered: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(index, text)| {
            let is_current = index == current_line;
            let pointer = if is_current { Some(pointer_col) } else { None };
            render_line(index, text, number_width, pointer, data.at_end, h_offset, text_width)
        })
        .collect();

    let paragraph = Paragraph::new(rendered).block(block);
    frame.render_widget(paragraph, area);
}

fn render_line(
    index: usize,
    text: &str,
    number_width: usize,
    pointer: Option<usize>,
    at_end: bool,
    h_offset: usize,
    width: usize,
) -> Line<'static> {
    let is_current = pointer.is_some();
    let line_bg = if is_current {
        DEFAULT_THEME.current_line_bg
    } else {
        Color::Reset
    };

    let marker = if is_current { "▶" } else { " " };
    let mut spans = vec![
        Span::styled(
            format!("{} {:>width$} ", marker, index + 1, width = number_width),
            Style::default().fg(if is_current {
                DEFAULT_THEME.secondary
            } else {
                DEFAULT_THEME.comment
            }),
        ),
    ];

    let chars: Vec<char> = text.trim_end_matches('\r').chars().collect();
    for (col, &c) in chars.iter().enumerate().skip(h_offset).take(width) {
        let mut style = opcode_style(c).bg(line_bg);
        if pointer == Some(col) {
            style = style
                .bg(DEFAULT_THEME.cursor_bg)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD);
        }
        spans.push(Span::styled(c.to_string(), style));
    }

    // The pointer sits past the last character once the program has finished
    if let Some(col) = pointer {
        if col >= chars.len() && col >= h_offset {
            let span = if at_end {
                Span::styled(
                    "⏹",
                    Style::default()
                        .fg(DEFAULT_THEME.cursor_bg)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                // Pointer on a newline (a comment character)
                Span::styled(
                    "↵",
                    Style::default().bg(DEFAULT_THEME.cursor_bg).fg(Color::Black),
                )
            };
            spans.push(span);
        }
    }

    Line::from(spans).style(Style::default().bg(line_bg))
}
