//! Human-readable machine state dump
//!
//! Used by `--trace` and by anyone wanting a quick look at a stopped machine.
//! The dump has four lines:
//!
//! ```text
//! +[>+<-]          the source line holding the instruction pointer
//!    ^             caret under the next instruction
//! [:1] 0 '\0'      cursor, current cell as a number and as an escaped char
//! LS: 1 (1)        loop stack depth, then its top entry when non-empty
//! ```

use crate::memory::{LoopStack, Tape};
use crate::program::Program;
use std::fmt::Write;

/// Escape a byte for display.
///
/// Printable ASCII passes through, the common control characters use their C
/// escape, and everything else becomes `\xNN`.
pub fn escape_byte(byte: u8) -> String {
    match byte {
        0x20..=0x7e => (byte as char).to_string(),
        0 => "\\0".to_string(),
        0x07 => "\\a".to_string(),
        0x08 => "\\b".to_string(),
        0x0c => "\\f".to_string(),
        b'\n' => "\\n".to_string(),
        b'\r' => "\\r".to_string(),
        b'\t' => "\\t".to_string(),
        0x0b => "\\v".to_string(),
        _ => format!("\\x{:02x}", byte),
    }
}

/// Render the machine state at `position`
pub fn render_state(program: &Program, position: usize, tape: &Tape, loop_stack: &LoopStack) -> String {
    let location = program.location(position);
    let line_text = program
        .text()
        .lines()
        .nth(location.line - 1)
        .unwrap_or("");

    let mut out = String::new();
    let _ = writeln!(out, "{}", line_text);
    // Tabs are copied so the caret lines up under tab-indented source
    let caret_pad: String = line_text
        .chars()
        .chain(std::iter::repeat(' '))
        .take(location.column - 1)
        .map(|c| if c == '\t' { '\t' } else { ' ' })
        .collect();
    let _ = writeln!(out, "{}^", caret_pad);

    let value = tape.read();
    let _ = writeln!(
        out,
        "[:{}] {} '{}'",
        tape.cursor(),
        value,
        escape_byte(value)
    );

    let _ = write!(out, "LS: {}", loop_stack.depth());
    if let Some(top) = loop_stack.top() {
        let _ = write!(out, " ({})", top);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_printable() {
        assert_eq!(escape_byte(b'A'), "A");
        assert_eq!(escape_byte(b' '), " ");
        assert_eq!(escape_byte(b'~'), "~");
    }

    #[test]
    fn test_escape_control_characters() {
        let expected = [
            (0u8, "\\0"),
            (7, "\\a"),
            (8, "\\b"),
            (12, "\\f"),
            (10, "\\n"),
            (13, "\\r"),
            (9, "\\t"),
            (11, "\\v"),
        ];
        for (byte, escaped) in expected {
            assert_eq!(escape_byte(byte), escaped);
        }
    }

    #[test]
    fn test_escape_hex() {
        assert_eq!(escape_byte(0x01), "\\x01");
        assert_eq!(escape_byte(0x7f), "\\x7f");
        assert_eq!(escape_byte(0xff), "\\xff");
    }

    #[test]
    fn test_render_state() {
        let program = Program::new("+[>+<-]").unwrap();
        let mut tape = Tape::new(4);
        tape.increment();
        let mut stack = LoopStack::new();
        stack.push(1);

        let dump = render_state(&program, 3, &tape, &stack);
        assert_eq!(dump, "+[>+<-]\n   ^\n[:0] 1 '\\x01'\nLS: 1 (1)");
    }

    #[test]
    fn test_caret_follows_tabs() {
        let program = Program::new("\t\t+ x>").unwrap();
        let tape = Tape::new(1);
        let dump = render_state(&program, 5, &tape, &LoopStack::new());
        let caret_line = dump.lines().nth(1).unwrap();
        assert_eq!(caret_line, "\t\t   ^");
    }

    #[test]
    fn test_caret_past_end_of_line() {
        let program = Program::new("\t+").unwrap();
        let tape = Tape::new(1);
        let dump = render_state(&program, 2, &tape, &LoopStack::new());
        assert_eq!(dump.lines().nth(1), Some("\t ^"));
    }

    #[test]
    fn test_render_state_empty_stack_and_second_line() {
        let program = Program::new("+\n.").unwrap();
        let tape = Tape::new(1);
        let dump = render_state(&program, 2, &tape, &LoopStack::new());
        assert_eq!(dump, ".\n^\n[:0] 0 '\\0'\nLS: 0");
    }
}
