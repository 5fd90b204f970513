//! Loop stack
//!
//! Records the program position of every `[` entered with a non-zero cell.
//! Its depth equals the number of loops the instruction pointer is currently
//! inside of; loops skipped by the forward scan never push.

/// LIFO record of open loop positions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopStack {
    entries: Vec<usize>,
}

impl LoopStack {
    pub fn new() -> Self {
        LoopStack {
            entries: Vec::new(),
        }
    }

    /// Open a loop whose `[` sits at `position`
    pub fn push(&mut self, position: usize) {
        self.entries.push(position);
    }

    /// Close the innermost loop
    pub fn pop(&mut self) -> Option<usize> {
        self.entries.pop()
    }

    /// Position of the innermost open loop's `[`
    pub fn top(&self) -> Option<usize> {
        self.entries.last().copied()
    }

    /// Number of open loops
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Open loop positions, outermost first (for UI display)
    pub fn entries(&self) -> &[usize] {
        &self.entries
    }
}
