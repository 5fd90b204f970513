//! Loop stack pane rendering

use super::utils::{border_style, clamp_scroll};
use crate::memory::LoopStack;
use crate::program::Program;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Characters of loop body shown after each entry
const BODY_PREVIEW_LEN: usize = 24;

/// Render the loop stack, innermost loop first
pub fn render_loop_pane(
    frame: &mut Frame,
    area: Rect,
    loop_stack: &LoopStack,
    program: &Program,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(format!(" Loop Stack ({}) ", loop_stack.depth()))
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    if loop_stack.is_empty() {
        let items = vec![ListItem::new("(no open loops)")
            .style(Style::default().fg(DEFAULT_THEME.comment))];
        frame.render_widget(List::new(items).block(block), area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let total = loop_stack.depth();
    clamp_scroll(scroll_offset, visible_height, total);

    let items: Vec<ListItem> = loop_stack
        .entries()
        .iter()
        .enumerate()
        .rev()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(depth, &position)| {
            let is_top = depth + 1 == total;
            let location = program.location(position);
            let preview: String = program
                .chars()
                .iter()
                .skip(position)
                .take(BODY_PREVIEW_LEN)
                .map(|&c| if c.is_control() { ' ' } else { c })
                .collect();

            let depth_style = if is_top {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("#{:<3}", depth + 1), depth_style),
                Span::styled(
                    format!("@{:<6}", position),
                    Style::default().fg(DEFAULT_THEME.primary),
                ),
                Span::styled(
                    format!("{}:{:<5}", location.line, location.column),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(preview, Style::default().fg(DEFAULT_THEME.bracket)),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
