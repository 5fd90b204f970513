use crate::interpreter::dump::escape_byte;
use crate::program::Opcode;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::style::{Modifier, Style};

/// Border style shared by every pane
pub(crate) fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    }
}

/// Highlight style for one program character, grouped by instruction kind
pub(crate) fn opcode_style(c: char) -> Style {
    match Opcode::from_char(c) {
        Opcode::MoveRight | Opcode::MoveLeft => Style::default().fg(DEFAULT_THEME.primary),
        Opcode::Increment | Opcode::Decrement => Style::default().fg(DEFAULT_THEME.number),
        Opcode::Output | Opcode::Input => Style::default().fg(DEFAULT_THEME.string),
        Opcode::LoopStart | Opcode::LoopEnd => Style::default()
            .fg(DEFAULT_THEME.bracket)
            .add_modifier(Modifier::BOLD),
        Opcode::Comment => Style::default().fg(DEFAULT_THEME.comment),
    }
}

/// One-column rendering of a byte for the tape's character gutter
pub(crate) fn cell_glyph(byte: u8) -> char {
    if byte.is_ascii_graphic() || byte == b' ' {
        byte as char
    } else {
        '·'
    }
}

/// Describe a cell value as `65 'A'`
pub(crate) fn describe_cell(byte: u8) -> String {
    format!("{} '{}'", byte, escape_byte(byte))
}

/// Keep `target` inside a window of `visible` rows starting at `*offset`,
/// recentering when it falls outside, then clamp to the content length.
pub(crate) fn follow_row(offset: &mut usize, target: usize, visible: usize, total: usize) {
    let visible = visible.max(1);
    if target < *offset || target >= *offset + visible {
        *offset = target.saturating_sub(visible / 2);
    }
    clamp_scroll(offset, visible, total);
}

/// Clamp a scroll offset so the last page stays full
pub(crate) fn clamp_scroll(offset: &mut usize, visible: usize, total: usize) {
    if total > visible {
        *offset = (*offset).min(total - visible);
    } else {
        *offset = 0;
    }
}
