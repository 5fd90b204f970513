// Snapshot management for reverse execution

use crate::interpreter::dump::escape_byte;
use crate::memory::{LoopStack, Tape};
use rustc_hash::FxHashMap;

/// Mock terminal for capturing `.` output
///
/// Bytes are only ever appended by live execution. Rewinding through history
/// shrinks the visible prefix instead of discarding bytes, so stepping forward
/// again shows them without re-running anything.
#[derive(Debug, Clone)]
pub struct MockTerminal {
    bytes: Vec<u8>,
    visible: usize,
}

impl MockTerminal {
    pub fn new() -> Self {
        MockTerminal {
            bytes: Vec::new(),
            visible: 0,
        }
    }

    /// Append one output byte. Anything past the visible prefix is dropped first.
    pub fn write_byte(&mut self, byte: u8) {
        self.bytes.truncate(self.visible);
        self.bytes.push(byte);
        self.visible = self.bytes.len();
    }

    /// Show only the first `len` bytes (clamped to what was recorded)
    pub fn set_visible(&mut self, len: usize) {
        self.visible = len.min(self.bytes.len());
    }

    /// Output produced up to the current point in history
    pub fn bytes(&self) -> &[u8] {
        &self.bytes[..self.visible]
    }

    pub fn len(&self) -> usize {
        self.visible
    }

    pub fn is_empty(&self) -> bool {
        self.visible == 0
    }

    /// Get the visible output as display lines, with unprintable bytes escaped
    pub fn get_output(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .bytes()
            .split(|&b| b == b'\n')
            .map(|line| line.iter().map(|&b| escape_byte(b)).collect())
            .collect();
        // Remove trailing empty string if output ended with newline
        if lines.last().is_some_and(|s| s.is_empty()) {
            lines.pop();
        }
        lines
    }
}

impl Default for MockTerminal {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of execution state after one instruction
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub cells: FxHashMap<usize, u8>, // Non-zero cells only
    pub cursor: usize,
    pub loop_stack: LoopStack,
    pub position: usize,
    pub output_len: usize,
    pub steps: u64,
}

impl Snapshot {
    pub fn new(
        tape: &Tape,
        loop_stack: &LoopStack,
        position: usize,
        output_len: usize,
        steps: u64,
    ) -> Self {
        Snapshot {
            cells: tape.non_zero_cells(),
            cursor: tape.cursor(),
            loop_stack: loop_stack.clone(),
            position,
            output_len,
            steps,
        }
    }

    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        // Rough estimate: hash map entries carry a key, a value and some table overhead
        let cells_size = self.cells.len() * 24;
        let stack_size = self.loop_stack.depth() * std::mem::size_of::<usize>();
        std::mem::size_of::<Snapshot>() + cells_size + stack_size
    }
}

/// Manages execution history for reverse execution
#[derive(Debug)]
pub struct SnapshotManager {
    snapshots: Vec<Snapshot>,
    max_memory: usize,
    current_memory: usize,
}

impl SnapshotManager {
    pub fn new(max_memory: usize) -> Self {
        SnapshotManager {
            snapshots: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Start a history from the machine's initial state.
    ///
    /// The initial snapshot is always kept, even when it alone exceeds the
    /// limit, so a history is never empty.
    pub fn with_initial(max_memory: usize, initial: Snapshot) -> Self {
        let mut manager = Self::new(max_memory);
        manager.current_memory = initial.estimated_size();
        manager.snapshots.push(initial);
        manager
    }

    /// Add a snapshot to history
    pub fn push(&mut self, snapshot: Snapshot) -> Result<(), String> {
        let snapshot_size = snapshot.estimated_size();

        if self.current_memory + snapshot_size > self.max_memory {
            return Err(format!(
                "Snapshot memory limit exceeded: {} + {} > {}",
                self.current_memory, snapshot_size, self.max_memory
            ));
        }

        self.current_memory += snapshot_size;
        self.snapshots.push(snapshot);
        Ok(())
    }

    /// Drop every snapshot from index `len` onward
    pub fn truncate(&mut self, len: usize) {
        for dropped in self.snapshots.iter().skip(len) {
            self.current_memory -= dropped.estimated_size();
        }
        self.snapshots.truncate(len);
    }

    /// Get a snapshot by index
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    /// Get the number of snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Get current memory usage
    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    /// Get max memory limit
    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_at(position: usize) -> Snapshot {
        Snapshot::new(&Tape::new(8), &LoopStack::new(), position, 0, 0)
    }

    #[test]
    fn test_terminal_lines() {
        let mut terminal = MockTerminal::new();
        for &b in b"Hi\n\x01x\n" {
            terminal.write_byte(b);
        }
        assert_eq!(terminal.get_output(), vec!["Hi", "\\x01x"]);
    }

    #[test]
    fn test_terminal_rewind_and_overwrite() {
        let mut terminal = MockTerminal::new();
        for &b in b"abc" {
            terminal.write_byte(b);
        }
        terminal.set_visible(1);
        assert_eq!(terminal.bytes(), b"a");

        terminal.set_visible(3);
        assert_eq!(terminal.bytes(), b"abc");

        terminal.set_visible(1);
        terminal.write_byte(b'z');
        assert_eq!(terminal.bytes(), b"az");
        terminal.set_visible(10);
        assert_eq!(terminal.bytes(), b"az");
    }

    #[test]
    fn test_manager_enforces_limit() {
        let size = snapshot_at(0).estimated_size();
        let mut manager = SnapshotManager::new(size * 2);
        assert!(manager.push(snapshot_at(0)).is_ok());
        assert!(manager.push(snapshot_at(1)).is_ok());
        assert!(manager.push(snapshot_at(2)).is_err());
        assert_eq!(manager.len(), 2);
        assert_eq!(manager.memory_usage(), size * 2);
    }

    #[test]
    fn test_initial_snapshot_ignores_limit() {
        let mut manager = SnapshotManager::with_initial(1, snapshot_at(0));
        assert_eq!(manager.len(), 1);
        assert!(manager.memory_usage() > manager.memory_limit());
        assert!(manager.push(snapshot_at(1)).is_err());
        assert_eq!(manager.get(0).map(|s| s.position), Some(0));
    }

    #[test]
    fn test_manager_truncate_releases_memory() {
        let mut manager = SnapshotManager::new(usize::MAX);
        for i in 0..4 {
            manager.push(snapshot_at(i)).unwrap();
        }
        let per_snapshot = manager.memory_usage() / 4;
        manager.truncate(1);
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.memory_usage(), per_snapshot);
        assert_eq!(manager.get(0).map(|s| s.position), Some(0));
    }

    #[test]
    fn test_snapshot_is_sparse() {
        let mut tape = Tape::new(30_000);
        tape.write(5);
        let snapshot = Snapshot::new(&tape, &LoopStack::new(), 0, 0, 0);
        assert_eq!(snapshot.cells.len(), 1);
        assert_eq!(snapshot.cells.get(&0), Some(&5));
    }
}
