//! Tape machine execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: Main interpreter, instruction dispatch and history navigation
//! - [`loops`]: Loop entry/exit and the forward scan that skips false loops
//! - [`errors`]: Runtime error types
//! - [`config`]: Interpreter settings (tape length, EOF policy, history budget)
//! - [`dump`]: Text rendering of the machine state and byte escaping
//! - [`constants`]: Defaults and the built-in sample program
//!
//! # Execution Model
//!
//! The driver repeatedly dispatches the instruction at the current position.
//! Dispatch returns the next position explicitly, and the driver stops when
//! that position is exactly the end of the program text. When history is
//! enabled, a snapshot is taken after every instruction so the run can be
//! browsed backward and forward afterward.

pub mod config;
pub mod constants;
pub mod dump;
pub mod engine;
pub mod errors;
pub mod loops;
