//! Program source handling
//!
//! This module turns raw program text into a validated, immutable instruction stream:
//! - [`source`]: The [`Program`](source::Program) character sequence and source locations
//! - [`opcode`]: The closed set of eight instructions plus the comment fallthrough
//! - [`validate`]: Load-time bracket balance checking
//!
//! # Comments
//!
//! Any character outside the eight opcodes is a comment and executes as a no-op.
//! There is no tokenizer: the program is executed directly from its characters,
//! and positions are character indices into the text.
//!
//! # Validation
//!
//! [`Program::new`](source::Program::new) rejects programs with unbalanced loop
//! brackets, so the interpreter never has to scan past the end of the text or
//! pop an empty loop stack.

pub mod opcode;
pub mod source;
pub mod validate;

pub use opcode::Opcode;
pub use source::{Program, SourceLocation};
pub use validate::{MalformedKind, MalformedProgramError};
