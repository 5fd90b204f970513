//! Terminal output pane rendering

use super::utils::{border_style, clamp_scroll};
use crate::snapshot::MockTerminal;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the terminal output pane
pub fn render_terminal_pane(
    frame: &mut Frame,
    area: Rect,
    terminal: &MockTerminal,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(format!(" Output ({} bytes) ", terminal.len()))
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let lines = terminal.get_output();

    if lines.is_empty() {
        let paragraph = Paragraph::new("(no output)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
    } else {
        let block = block.padding(Padding::new(1, 0, 0, 0));

        let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1
        clamp_scroll(scroll_offset, visible_height, lines.len());

        // Take only visible items
        let visible_items: Vec<ListItem> = lines
            .into_iter()
            .skip(*scroll_offset)
            .take(visible_height)
            .map(|line| ListItem::new(line).style(Style::default().fg(DEFAULT_THEME.fg)))
            .collect();

        let list = List::new(visible_items).block(block);
        frame.render_widget(list, area);
    }
}
