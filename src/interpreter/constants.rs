// Constants for the tape machine

/// Number of cells on a tape when no length is configured
pub const DEFAULT_TAPE_LEN: usize = 30_000;

/// Memory budget for the snapshot history (256 MB)
pub const DEFAULT_SNAPSHOT_LIMIT: usize = 256 * 1024 * 1024;

/// Program run when none is given on the command line. Prints "Hello World!\n".
pub const HELLO_WORLD: &str = "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.";
