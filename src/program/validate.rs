//! Load-time bracket validation
//!
//! The interpreter resolves loops lazily: a false `[` scans forward for its
//! partner and a `]` jumps back to the position recorded on the loop stack.
//! Both only terminate on a balanced program, so balance is checked once,
//! before execution, and a [`MalformedProgramError`] stops the program from
//! running at all.

use super::opcode::Opcode;
use super::source::{Program, SourceLocation};
use std::fmt;

/// Which bracket was left without a partner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedKind {
    /// A `[` that is never closed
    UnmatchedOpen,
    /// A `]` with no open loop before it
    UnmatchedClose,
}

/// Program rejected before execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedProgramError {
    pub kind: MalformedKind,
    pub position: usize,
    pub location: SourceLocation,
}

impl fmt::Display for MalformedProgramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            MalformedKind::UnmatchedOpen => "unmatched '['",
            MalformedKind::UnmatchedClose => "unmatched ']'",
        };
        write!(
            f,
            "Malformed program at line {}, column {}: {}",
            self.location.line, self.location.column, what
        )
    }
}

impl std::error::Error for MalformedProgramError {}

/// Check that every `[` has a matching `]` and vice versa.
///
/// A stray `]` is reported at the first one found. An unclosed `[` is reported
/// at the innermost bracket still open when the text ends.
pub fn check_brackets(program: &Program) -> Result<(), MalformedProgramError> {
    let mut open: Vec<usize> = Vec::new();

    for (position, &c) in program.chars().iter().enumerate() {
        match Opcode::from_char(c) {
            Opcode::LoopStart => open.push(position),
            Opcode::LoopEnd => {
                if open.pop().is_none() {
                    return Err(MalformedProgramError {
                        kind: MalformedKind::UnmatchedClose,
                        position,
                        location: program.location(position),
                    });
                }
            }
            _ => {}
        }
    }

    match open.pop() {
        Some(position) => Err(MalformedProgramError {
            kind: MalformedKind::UnmatchedOpen,
            position,
            location: program.location(position),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_programs_pass() {
        for text in ["", "+", "[]", "[[]]", "+[>+<-]", "[[][[]]]", "[x]y[z]"] {
            assert!(Program::new(text).is_ok(), "rejected {:?}", text);
        }
    }

    #[test]
    fn test_unmatched_open() {
        let err = Program::new("+[>[-]").unwrap_err();
        assert_eq!(err.kind, MalformedKind::UnmatchedOpen);
        assert_eq!(err.position, 1);
        assert_eq!(err.location, SourceLocation::new(1, 2));
    }

    #[test]
    fn test_innermost_unclosed_open_is_reported() {
        let err = Program::new("[[").unwrap_err();
        assert_eq!(err.kind, MalformedKind::UnmatchedOpen);
        assert_eq!(err.position, 1);
    }

    #[test]
    fn test_unmatched_close() {
        let err = Program::new("+\n]").unwrap_err();
        assert_eq!(err.kind, MalformedKind::UnmatchedClose);
        assert_eq!(err.position, 2);
        assert_eq!(err.location, SourceLocation::new(2, 1));
    }

    #[test]
    fn test_close_before_open() {
        let err = Program::new("][").unwrap_err();
        assert_eq!(err.kind, MalformedKind::UnmatchedClose);
        assert_eq!(err.position, 0);
    }

    #[test]
    fn test_error_message() {
        let err = Program::new("[").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Malformed program at line 1, column 1: unmatched '['"
        );
    }
}
