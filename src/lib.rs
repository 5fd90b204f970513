//! # Introduction
//!
//! bfc executes programs written in the eight-instruction tape language
//! (`> < + - . , [ ]`). Optionally it captures a snapshot of the machine after
//! every instruction, and the snapshot history can then be navigated forward
//! and backward through a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Program (validated) → Interpreter → Snapshots → TUI
//! ```
//!
//! 1. [`program`]: holds the program text and rejects unbalanced brackets.
//! 2. [`interpreter`]: dispatches one instruction at a time, resolving loops
//!    with a forward scan and the loop stack.
//! 3. [`memory`]: the [`memory::tape::Tape`] and [`memory::loop_stack::LoopStack`].
//! 4. [`snapshot`]: snapshot history with a configurable memory limit and a
//!    [`snapshot::MockTerminal`] that records output.
//! 5. [`cli`]: command-line option parsing for the `bfc` binary.
//! 6. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use bfc::interpreter::config::InterpreterConfig;
//! use bfc::interpreter::engine::Interpreter;
//! use bfc::program::Program;
//!
//! let program = Program::new("+++.").unwrap();
//! let mut interpreter = Interpreter::new(program, InterpreterConfig::default());
//! interpreter.run().unwrap();
//! assert_eq!(interpreter.output(), &[3]);
//! ```

pub mod cli;
pub mod interpreter;
pub mod memory;
pub mod program;
pub mod snapshot;
pub mod ui;
