// Execution engine for the tape machine

use crate::interpreter::config::{EofBehavior, InterpreterConfig};
use crate::interpreter::dump::render_state;
use crate::interpreter::errors::RuntimeError;
use crate::memory::{LoopStack, Tape};
use crate::program::{Opcode, Program, SourceLocation};
use crate::snapshot::{MockTerminal, Snapshot, SnapshotManager};
use std::io::{self, Read, Write};

/// The main interpreter that executes a program
pub struct Interpreter {
    /// Validated program text
    pub(crate) program: Program,

    /// Memory tape and cursor
    pub(crate) tape: Tape,

    /// Positions of the currently open loops
    pub(crate) loop_stack: LoopStack,

    /// Instruction pointer: index of the next character to execute
    position: usize,

    config: InterpreterConfig,

    /// Source of bytes for `,`
    input: Box<dyn Read>,

    /// Live sink for `.`; when absent, output is captured in `terminal`
    output: Option<Box<dyn Write>>,

    /// Captured output
    terminal: MockTerminal,

    /// Number of instructions executed so far (comments included)
    steps: u64,

    /// Snapshot history; `None` when recording is disabled
    snapshot_manager: Option<SnapshotManager>,

    /// Index of the snapshot the current state corresponds to
    history_position: usize,

    /// Whether `run` reached the end of the program
    finished: bool,
}

impl Interpreter {
    /// Create an interpreter with an empty input stream and captured output
    pub fn new(program: Program, config: InterpreterConfig) -> Self {
        let tape = Tape::new(config.tape_len);
        let loop_stack = LoopStack::new();
        let snapshot_manager = config.snapshot_limit.map(|limit| {
            SnapshotManager::with_initial(limit, Snapshot::new(&tape, &loop_stack, 0, 0, 0))
        });

        Interpreter {
            program,
            tape,
            loop_stack,
            position: 0,
            config,
            input: Box::new(io::empty()),
            output: None,
            terminal: MockTerminal::new(),
            steps: 0,
            snapshot_manager,
            history_position: 0,
            finished: false,
        }
    }

    /// Read `,` bytes from `input`
    pub fn with_input(mut self, input: impl Read + 'static) -> Self {
        self.input = Box::new(input);
        self
    }

    /// Stream `.` bytes to `output` instead of capturing them
    pub fn with_output(mut self, output: impl Write + 'static) -> Self {
        self.output = Some(Box::new(output));
        self
    }

    /// Run the program until the instruction pointer reaches the end of the text
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        let outcome = self.run_to_end();
        let flushed = self.flush_output();
        outcome?;
        flushed
    }

    fn run_to_end(&mut self) -> Result<(), RuntimeError> {
        while self.step()? {}
        Ok(())
    }

    /// Execute the next instruction.
    ///
    /// Returns `Ok(false)` once the instruction pointer is at the end of the program.
    pub fn step(&mut self) -> Result<bool, RuntimeError> {
        debug_assert!(self.position <= self.program.len());

        if self.at_end() {
            self.finished = true;
            return Ok(false);
        }

        if self.config.trace {
            eprintln!("{}", self.dump());
        }

        self.position = self.execute_instruction(self.position)?;
        self.steps += 1;
        self.take_snapshot()?;
        Ok(true)
    }

    /// Execute exactly one instruction at `position` and return the next position
    pub(crate) fn execute_instruction(&mut self, position: usize) -> Result<usize, RuntimeError> {
        let opcode = match self.program.opcode_at(position) {
            Some(opcode) => opcode,
            None => return Ok(position),
        };

        match opcode {
            Opcode::MoveRight => {
                self.tape
                    .move_right()
                    .map_err(|overflow| RuntimeError::TapeOverflow {
                        cursor: overflow.cursor,
                        len: overflow.len,
                        location: self.program.location(position),
                    })?;
                Ok(position + 1)
            }
            Opcode::MoveLeft => {
                self.tape.move_left();
                Ok(position + 1)
            }
            Opcode::Increment => {
                self.tape.increment();
                Ok(position + 1)
            }
            Opcode::Decrement => {
                self.tape.decrement();
                Ok(position + 1)
            }
            Opcode::Output => {
                self.emit(self.tape.read(), position)?;
                Ok(position + 1)
            }
            Opcode::Input => {
                match self.read_input_byte(position)? {
                    Some(byte) => self.tape.write(byte),
                    None => match self.config.eof {
                        EofBehavior::Zero => self.tape.write(0),
                        EofBehavior::Unchanged => {}
                    },
                }
                Ok(position + 1)
            }
            Opcode::LoopStart => self.enter_loop(position),
            Opcode::LoopEnd => self.repeat_or_exit_loop(position),
            Opcode::Comment => Ok(position + 1),
        }
    }

    /// Write one output byte to the live sink, or capture it
    fn emit(&mut self, byte: u8, position: usize) -> Result<(), RuntimeError> {
        match self.output.as_mut() {
            Some(sink) => sink
                .write_all(&[byte])
                .map_err(|e| RuntimeError::OutputFailed {
                    message: e.to_string(),
                    location: self.program.location(position),
                }),
            None => {
                self.terminal.write_byte(byte);
                Ok(())
            }
        }
    }

    /// Read one input byte; `None` at end of input
    fn read_input_byte(&mut self, position: usize) -> Result<Option<u8>, RuntimeError> {
        // Make pending output (prompts) visible before blocking
        self.flush_output()?;

        let mut buf = [0u8; 1];
        loop {
            match self.input.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(RuntimeError::InputFailed {
                        message: e.to_string(),
                        location: self.program.location(position),
                    })
                }
            }
        }
    }

    fn flush_output(&mut self) -> Result<(), RuntimeError> {
        if let Some(sink) = self.output.as_mut() {
            sink.flush().map_err(|e| RuntimeError::OutputFailed {
                message: e.to_string(),
                location: self.program.location(self.position),
            })?;
        }
        Ok(())
    }

    /// Take a snapshot of the current execution state
    fn take_snapshot(&mut self) -> Result<(), RuntimeError> {
        let Some(manager) = self.snapshot_manager.as_mut() else {
            return Ok(());
        };

        // Executing from a rewound state discards the future it replaces
        manager.truncate(self.history_position + 1);

        let snapshot = Snapshot::new(
            &self.tape,
            &self.loop_stack,
            self.position,
            self.terminal.len(),
            self.steps,
        );

        manager
            .push(snapshot)
            .map_err(|_| RuntimeError::SnapshotLimitExceeded {
                current: manager.memory_usage(),
                limit: manager.memory_limit(),
            })?;

        self.history_position = manager.len() - 1;
        Ok(())
    }

    /// Restore execution state from a snapshot
    fn restore_snapshot(&mut self, index: usize) -> Result<(), RuntimeError> {
        let snapshot = self
            .snapshot_manager
            .as_ref()
            .and_then(|manager| manager.get(index))
            .ok_or_else(|| RuntimeError::HistoryOperationFailed {
                message: "Snapshot not found in history".to_string(),
            })?;

        self.tape.restore(snapshot.cursor, &snapshot.cells);
        self.loop_stack = snapshot.loop_stack.clone();
        self.position = snapshot.position;
        self.terminal.set_visible(snapshot.output_len);
        self.steps = snapshot.steps;
        self.history_position = index;
        Ok(())
    }

    fn history_len(&self) -> Result<usize, RuntimeError> {
        self.snapshot_manager
            .as_ref()
            .map(SnapshotManager::len)
            .ok_or_else(|| RuntimeError::HistoryOperationFailed {
                message: "History recording is disabled".to_string(),
            })
    }

    /// Step backward in execution (restore previous snapshot)
    pub fn step_backward(&mut self) -> Result<(), RuntimeError> {
        self.history_len()?;
        if self.history_position == 0 {
            return Err(RuntimeError::HistoryOperationFailed {
                message: "Already at the beginning of execution".to_string(),
            });
        }
        self.restore_snapshot(self.history_position - 1)
    }

    /// Step forward in execution (restore next snapshot)
    pub fn step_forward(&mut self) -> Result<(), RuntimeError> {
        if self.history_position + 1 >= self.history_len()? {
            return Err(RuntimeError::HistoryOperationFailed {
                message: "No more snapshots available (execution finished)".to_string(),
            });
        }
        self.restore_snapshot(self.history_position + 1)
    }

    /// Rewind to the beginning of execution history
    pub fn rewind_to_start(&mut self) -> Result<(), RuntimeError> {
        self.history_len()?;
        self.restore_snapshot(0)
    }

    /// Jump to the last recorded state
    pub fn jump_to_end(&mut self) -> Result<(), RuntimeError> {
        let len = self.history_len()?;
        self.restore_snapshot(len.saturating_sub(1))
    }

    // ========== Getter methods for UI ==========

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn loop_stack(&self) -> &LoopStack {
        &self.loop_stack
    }

    /// Number of loops currently open
    pub fn loop_depth(&self) -> usize {
        self.loop_stack.depth()
    }

    /// Current instruction pointer
    pub fn position(&self) -> usize {
        self.position
    }

    /// Source location of the next instruction
    pub fn current_location(&self) -> SourceLocation {
        self.program.location(self.position)
    }

    /// Whether the instruction pointer sits exactly at the end of the program
    pub fn at_end(&self) -> bool {
        self.position == self.program.len()
    }

    /// Get a reference to the captured output
    pub fn terminal(&self) -> &MockTerminal {
        &self.terminal
    }

    /// Captured output bytes up to the current point in history
    pub fn output(&self) -> &[u8] {
        self.terminal.bytes()
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Get the current history position
    pub fn history_position(&self) -> usize {
        self.history_position
    }

    /// Get the total number of snapshots
    pub fn total_snapshots(&self) -> usize {
        self.snapshot_manager
            .as_ref()
            .map_or(0, SnapshotManager::len)
    }

    /// Check if execution has finished
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Machine state in the trace format
    pub fn dump(&self) -> String {
        render_state(&self.program, self.position, &self.tape, &self.loop_stack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn interpreter(text: &str) -> Interpreter {
        Interpreter::new(Program::new(text).unwrap(), InterpreterConfig::default())
    }

    #[test]
    fn test_dispatch_returns_next_position() {
        let mut interp = interpreter("+>x");
        assert_eq!(interp.execute_instruction(0), Ok(1));
        assert_eq!(interp.execute_instruction(1), Ok(2));
        assert_eq!(interp.execute_instruction(2), Ok(3));
        assert_eq!(interp.tape().get(0), Some(1));
        assert_eq!(interp.tape().cursor(), 1);
    }

    #[test]
    fn test_false_guard_skips_loop() {
        let mut interp = interpreter("[+++]-");
        assert_eq!(interp.execute_instruction(0), Ok(5));
        assert_eq!(interp.loop_depth(), 0);
    }

    #[test]
    fn test_true_guard_pushes_and_loop_end_peeks() {
        let mut interp = interpreter("+[-]");
        interp.execute_instruction(0).unwrap();
        assert_eq!(interp.execute_instruction(1), Ok(2));
        assert_eq!(interp.loop_stack().entries(), &[1]);

        // Cell still non-zero at ']': jump back to the body, stack unchanged
        assert_eq!(interp.execute_instruction(3), Ok(2));
        assert_eq!(interp.loop_depth(), 1);

        interp.execute_instruction(2).unwrap();
        assert_eq!(interp.execute_instruction(3), Ok(4));
        assert_eq!(interp.loop_depth(), 0);
    }

    #[test]
    fn test_loop_end_on_empty_stack_underflows() {
        let mut interp = Interpreter::new(Program::unvalidated("]"), InterpreterConfig::default());
        assert_eq!(
            interp.execute_instruction(0),
            Err(RuntimeError::LoopStackUnderflow {
                location: SourceLocation::new(1, 1)
            })
        );
    }

    #[test]
    fn test_input_reads_bytes_then_eof_zero() {
        let mut interp = interpreter(",>,>+,").with_input(Cursor::new(b"A".to_vec()));
        interp.run().unwrap();
        assert_eq!(&interp.tape().cells()[..3], &[b'A', 0, 0]);
    }

    #[test]
    fn test_eof_unchanged() {
        let config = InterpreterConfig {
            eof: EofBehavior::Unchanged,
            ..InterpreterConfig::default()
        };
        let mut interp = Interpreter::new(Program::new("+++,").unwrap(), config);
        interp.run().unwrap();
        assert_eq!(interp.tape().read(), 3);
    }

    #[test]
    fn test_history_disabled_by_default() {
        let mut interp = interpreter("+");
        interp.run().unwrap();
        assert_eq!(interp.total_snapshots(), 0);
        assert!(interp.step_backward().is_err());
    }

    #[test]
    fn test_tiny_snapshot_limit_keeps_initial_state() {
        let config = InterpreterConfig {
            snapshot_limit: Some(16),
            ..InterpreterConfig::default()
        };
        let mut interp = Interpreter::new(Program::new("+").unwrap(), config);
        assert_eq!(interp.total_snapshots(), 1);

        assert!(matches!(
            interp.run(),
            Err(RuntimeError::SnapshotLimitExceeded { limit: 16, .. })
        ));
        assert_eq!(interp.rewind_to_start(), Ok(()));
        assert_eq!(interp.position(), 0);
        assert_eq!(interp.tape().read(), 0);
    }

    #[test]
    fn test_step_after_end_is_noop() {
        let mut interp = interpreter("+");
        assert_eq!(interp.step(), Ok(true));
        assert_eq!(interp.step(), Ok(false));
        assert!(interp.is_finished());
        assert_eq!(interp.steps(), 1);
    }
}
