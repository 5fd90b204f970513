//! Loop control flow (`[` and `]`).
//!
//! Adds `impl Interpreter` methods for the two loop instructions and the
//! forward scan used to skip a loop whose guard is false on entry.
//!
//! # Protocol
//!
//! ```text
//! [ with cell != 0  →  push position, continue at position + 1
//! [ with cell == 0  →  skip_loop: continue just past the matching ]
//! ] with cell != 0  →  peek top, continue at top + 1 (stack unchanged)
//! ] with cell == 0  →  pop, continue at position + 1
//! ```
//!
//! Skipped loops never touch the stack, so its depth is always the number of
//! entered loops enclosing the instruction pointer.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::program::{Opcode, Program};

/// Find the position just past the `]` matching the `[` at `open`.
///
/// Scans forward one character at a time keeping only a nesting counter, so
/// cost is proportional to the distance to the matching bracket. Running off
/// the end of the program is reported as [`RuntimeError::UnterminatedLoop`].
pub fn skip_loop(program: &Program, open: usize) -> Result<usize, RuntimeError> {
    let mut depth = 0usize;
    let mut position = open + 1;

    while let Some(opcode) = program.opcode_at(position) {
        position += 1;
        match opcode {
            Opcode::LoopStart => depth += 1,
            Opcode::LoopEnd => {
                if depth == 0 {
                    return Ok(position);
                }
                depth -= 1;
            }
            _ => {}
        }
    }

    Err(RuntimeError::UnterminatedLoop {
        location: program.location(open),
    })
}

impl Interpreter {
    /// Executes `[` at `position` and returns the next position.
    pub(crate) fn enter_loop(&mut self, position: usize) -> Result<usize, RuntimeError> {
        if self.tape.read() != 0 {
            self.loop_stack.push(position);
            Ok(position + 1)
        } else {
            skip_loop(&self.program, position)
        }
    }

    /// Executes `]` at `position` and returns the next position.
    ///
    /// A non-zero cell jumps back into the loop body without popping; the
    /// entry is only removed once the guard is false here.
    pub(crate) fn repeat_or_exit_loop(&mut self, position: usize) -> Result<usize, RuntimeError> {
        let underflow = || RuntimeError::LoopStackUnderflow {
            location: self.program.location(position),
        };

        if self.tape.read() != 0 {
            let start = self.loop_stack.top().ok_or_else(underflow)?;
            Ok(start + 1)
        } else {
            self.loop_stack.pop().ok_or_else(underflow)?;
            Ok(position + 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::SourceLocation;

    #[test]
    fn test_skip_empty_loop() {
        let program = Program::new("[]+").unwrap();
        assert_eq!(skip_loop(&program, 0), Ok(2));
    }

    #[test]
    fn test_skip_nested_loops() {
        let program = Program::new("[[-][+]]>").unwrap();
        assert_eq!(skip_loop(&program, 0), Ok(8));
        assert_eq!(skip_loop(&program, 1), Ok(4));
        assert_eq!(skip_loop(&program, 4), Ok(7));
    }

    #[test]
    fn test_skip_ignores_comments() {
        let program = Program::new("[ skip [me] ] done").unwrap();
        assert_eq!(skip_loop(&program, 0), Ok(13));
    }

    #[test]
    fn test_skip_to_exact_end() {
        let program = Program::new("+[-]").unwrap();
        assert_eq!(skip_loop(&program, 1), Ok(program.len()));
    }

    #[test]
    fn test_skip_unterminated_loop_fails() {
        let program = Program::unvalidated("+[[]");
        assert_eq!(
            skip_loop(&program, 1),
            Err(RuntimeError::UnterminatedLoop {
                location: SourceLocation::new(1, 2)
            })
        );
    }
}
