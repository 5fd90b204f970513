//! Memory model for the tape machine
//!
//! This module provides the machine's mutable state:
//! - [`tape`]: The fixed-length byte [`Tape`](tape::Tape) and its cursor
//! - [`loop_stack`]: The [`LoopStack`](loop_stack::LoopStack) of open loop positions
//!
//! # Cell Arithmetic
//!
//! Cells are unsigned bytes. Increment and decrement wrap:
//! ```text
//! 255 + 1  →  0
//!   0 - 1  →  255
//! ```
//!
//! # Ownership
//!
//! One interpreter owns exactly one tape and one loop stack. Snapshots hold
//! sparse copies; nothing is shared between running programs.

pub mod loop_stack;
pub mod tape;

pub use loop_stack::LoopStack;
pub use tape::{Tape, TapeOverflow};
