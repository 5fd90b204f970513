//! Runtime error types for the tape machine
//!
//! This module defines [`RuntimeError`], which represents every failure that can
//! stop a running program (as opposed to a [`MalformedProgramError`], which stops
//! a program from being loaded at all).
//!
//! All runtime errors are fatal - execution halts and the partial state and
//! history stay available for inspection.
//!
//! [`MalformedProgramError`]: crate::program::MalformedProgramError

use crate::program::SourceLocation;
use std::fmt;

/// Runtime errors that can occur during execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// `>` executed on the last cell of the tape
    TapeOverflow {
        cursor: usize,
        len: usize,
        location: SourceLocation,
    },

    /// `]` reached with no open loop on the stack
    LoopStackUnderflow { location: SourceLocation },

    /// Forward scan from a false `[` ran off the end of the program
    UnterminatedLoop { location: SourceLocation },

    /// Reading from the input stream failed
    InputFailed {
        message: String,
        location: SourceLocation,
    },

    /// Writing to the output stream failed
    OutputFailed {
        message: String,
        location: SourceLocation,
    },

    /// Snapshot history limit exceeded
    SnapshotLimitExceeded { current: usize, limit: usize },

    /// History/snapshot navigation failed
    HistoryOperationFailed { message: String },
}

impl RuntimeError {
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            RuntimeError::TapeOverflow { location, .. } => Some(location),
            RuntimeError::LoopStackUnderflow { location } => Some(location),
            RuntimeError::UnterminatedLoop { location } => Some(location),
            RuntimeError::InputFailed { location, .. } => Some(location),
            RuntimeError::OutputFailed { location, .. } => Some(location),
            RuntimeError::SnapshotLimitExceeded { .. } => None,
            RuntimeError::HistoryOperationFailed { .. } => None,
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::TapeOverflow {
                cursor,
                len,
                location,
            } => {
                write!(
                    f,
                    "Tape overflow at line {}, column {}: cannot move right from cell {} (tape has {} cells)",
                    location.line, location.column, cursor, len
                )
            }
            RuntimeError::LoopStackUnderflow { location } => {
                write!(
                    f,
                    "Loop end without an open loop at line {}, column {}",
                    location.line, location.column
                )
            }
            RuntimeError::UnterminatedLoop { location } => {
                write!(
                    f,
                    "Loop starting at line {}, column {} has no matching ']'",
                    location.line, location.column
                )
            }
            RuntimeError::InputFailed { message, location } => {
                write!(
                    f,
                    "Input failed at line {}, column {}: {}",
                    location.line, location.column, message
                )
            }
            RuntimeError::OutputFailed { message, location } => {
                write!(
                    f,
                    "Output failed at line {}, column {}: {}",
                    location.line, location.column, message
                )
            }
            RuntimeError::SnapshotLimitExceeded { current, limit } => {
                write!(
                    f,
                    "Snapshot memory limit exceeded: {} bytes used, limit is {}",
                    current, limit
                )
            }
            RuntimeError::HistoryOperationFailed { message } => {
                write!(f, "History operation failed: {}", message)
            }
        }
    }
}

impl std::error::Error for RuntimeError {}
