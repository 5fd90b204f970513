//! TUI pane rendering modules
//!
//! This module provides the rendering logic for all visual panes in the TUI,
//! organized by responsibility.
//!
//! # Pane Modules
//!
//! - [`source`]: Program text with opcode coloring and the instruction pointer
//! - [`tape`]: Hex dump of the tape with the cursor cell highlighted
//! - [`loops`]: Open loops on the loop stack, innermost first
//! - [`terminal`]: Captured output of `.` instructions
//! - [`status`]: Status bar with keybindings and execution state
//! - `utils`: Shared styling and scrolling helpers
//!
//! # Architecture
//!
//! Each pane module exports a primary `render_*` function that draws from
//! borrowed interpreter state plus the pane's own scroll state. Panes never
//! mutate the interpreter.

mod utils;

pub mod loops;
pub mod source;
pub mod status;
pub mod tape;
pub mod terminal;

// Re-export render functions for convenience
pub use loops::render_loop_pane;
pub use source::{render_source_pane, SourceRenderData, SourceScrollState};
pub use status::{render_status_bar, StatusRenderData};
pub use tape::{render_tape_pane, TapeScrollState};
pub use terminal::render_terminal_pane;
