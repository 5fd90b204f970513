//! Interpreter configuration
//!
//! [`InterpreterConfig`] gathers every tunable of a run. The command line fills
//! it in (see [`crate::cli`]); library users start from `Default` and override
//! fields.

use super::constants::{DEFAULT_SNAPSHOT_LIMIT, DEFAULT_TAPE_LEN};
use std::fmt;
use std::str::FromStr;

/// What `,` stores when the input is exhausted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EofBehavior {
    /// Write 0 to the current cell
    #[default]
    Zero,
    /// Leave the current cell untouched
    Unchanged,
}

impl FromStr for EofBehavior {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zero" => Ok(EofBehavior::Zero),
            "unchanged" => Ok(EofBehavior::Unchanged),
            other => Err(format!(
                "invalid EOF behavior '{}' (expected 'zero' or 'unchanged')",
                other
            )),
        }
    }
}

impl fmt::Display for EofBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EofBehavior::Zero => write!(f, "zero"),
            EofBehavior::Unchanged => write!(f, "unchanged"),
        }
    }
}

/// Settings for one interpreter instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterConfig {
    /// Number of tape cells
    pub tape_len: usize,

    /// Input exhaustion policy for `,`
    pub eof: EofBehavior,

    /// Snapshot memory budget in bytes; `None` disables history recording
    pub snapshot_limit: Option<usize>,

    /// Print the machine state to stderr before every instruction
    pub trace: bool,
}

impl InterpreterConfig {
    /// Configuration for the time-travel debugger: history on, default budget
    pub fn with_history() -> Self {
        InterpreterConfig {
            snapshot_limit: Some(DEFAULT_SNAPSHOT_LIMIT),
            ..Self::default()
        }
    }
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        InterpreterConfig {
            tape_len: DEFAULT_TAPE_LEN,
            eof: EofBehavior::default(),
            snapshot_limit: None,
            trace: false,
        }
    }
}
