//! Immutable program source
//!
//! A [`Program`] owns the program text as a random-access character sequence.
//! The interpreter addresses it with plain `usize` positions; [`Program::location`]
//! converts a position back to a line/column pair for diagnostics and the UI.

use super::opcode::Opcode;
use super::validate::{check_brackets, MalformedProgramError};

/// Source location information for error reporting (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A validated program: the instruction stream the interpreter executes
#[derive(Debug, Clone)]
pub struct Program {
    text: String,
    chars: Vec<char>,
    line_starts: Vec<usize>, // Position of the first char of each line
}

impl Program {
    /// Load a program, rejecting unbalanced loop brackets before anything runs
    pub fn new(text: &str) -> Result<Self, MalformedProgramError> {
        let program = Self::unvalidated(text);
        check_brackets(&program)?;
        Ok(program)
    }

    /// Build a program without bracket validation
    pub(crate) fn unvalidated(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let mut line_starts = vec![0];
        for (i, c) in chars.iter().enumerate() {
            if *c == '\n' {
                line_starts.push(i + 1);
            }
        }

        Program {
            text: text.to_string(),
            chars,
            line_starts,
        }
    }

    /// Number of characters (instructions and comments) in the program
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Character at `position`, or `None` past the end
    pub fn get(&self, position: usize) -> Option<char> {
        self.chars.get(position).copied()
    }

    /// Decoded instruction at `position`, or `None` past the end
    pub fn opcode_at(&self, position: usize) -> Option<Opcode> {
        self.get(position).map(Opcode::from_char)
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// The program text as loaded
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of source lines
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Map a position to its line and column.
    ///
    /// The end-of-program position maps to the column just past the last character.
    pub fn location(&self, position: usize) -> SourceLocation {
        let line = self.line_starts.partition_point(|&start| start <= position);
        let line_start = self.line_starts[line - 1];
        SourceLocation::new(line, position - line_start + 1)
    }

    /// Count of characters that are actual instructions
    pub fn instruction_count(&self) -> usize {
        self.chars
            .iter()
            .filter(|&&c| Opcode::from_char(c).symbol().is_some())
            .count()
    }
}
