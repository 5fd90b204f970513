//! Command-line option parsing for the `bfc` binary
//!
//! Programs are allowed to start with `-` or `+` (`--->` is a valid program), so
//! only the exact option spellings below are treated as flags. Any other
//! argument is the program text.
//!
//! ```text
//! bfc [OPTIONS] [PROGRAM]
//!
//!   -f, --file <PATH>          read the program from a file
//!   -d, --debug                record history and open the time-travel UI
//!   -t, --trace                dump machine state to stderr before each instruction
//!       --tape <CELLS>         tape length (default 30000)
//!       --eof <zero|unchanged> what ',' stores at end of input (default zero)
//!       --input <TEXT>         input bytes for --debug mode
//!   -h, --help                 show this help
//!       --                     treat every following argument as the program
//! ```

use crate::interpreter::config::{EofBehavior, InterpreterConfig};
use crate::interpreter::constants::HELLO_WORLD;
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Where the program text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramSource {
    /// Given directly on the command line
    Inline(String),
    /// Read from a file
    File(PathBuf),
    /// The built-in Hello World sample
    Sample,
}

/// Parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub source: ProgramSource,
    pub debug: bool,
    /// Input for `,` in debug mode (stdin belongs to the UI there)
    pub input: Option<String>,
    pub config: InterpreterConfig,
}

impl CliOptions {
    /// Load the program text
    pub fn load_source(&self) -> io::Result<String> {
        match &self.source {
            ProgramSource::Inline(text) => Ok(text.clone()),
            ProgramSource::File(path) => fs::read_to_string(path),
            ProgramSource::Sample => Ok(HELLO_WORLD.to_string()),
        }
    }

    /// Human-readable name of the program for diagnostics
    pub fn source_name(&self) -> String {
        match &self.source {
            ProgramSource::Inline(_) => "<argument>".to_string(),
            ProgramSource::File(path) => path.display().to_string(),
            ProgramSource::Sample => "<hello world sample>".to_string(),
        }
    }
}

/// What the binary should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Run(CliOptions),
    Help,
}

/// Invalid command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageError {
    pub message: String,
}

impl UsageError {
    fn new(message: impl Into<String>) -> Self {
        UsageError {
            message: message.into(),
        }
    }
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for UsageError {}

/// Usage text for `--help` and usage errors
pub fn usage(program_name: &str) -> String {
    format!(
        "Usage: {0} [OPTIONS] [PROGRAM]\n\
         \n\
         Runs PROGRAM, or the built-in Hello World sample when none is given.\n\
         \n\
         Options:\n\
         \x20 -f, --file <PATH>          read the program from a file\n\
         \x20 -d, --debug                record history and open the time-travel UI\n\
         \x20 -t, --trace                dump machine state to stderr before each instruction\n\
         \x20     --tape <CELLS>         tape length (default 30000)\n\
         \x20     --eof <zero|unchanged> what ',' stores at end of input (default zero)\n\
         \x20     --input <TEXT>         input bytes for --debug mode\n\
         \x20 -h, --help                 show this help\n\
         \n\
         Examples:\n\
         \x20 {0} '+++++++++[>++++++++<-]>.'   # print 'H'\n\
         \x20 {0} -f hello.bf --debug         # step through a file",
        program_name
    )
}

/// Parse arguments (without the binary name)
pub fn parse_args<I>(args: I) -> Result<CliCommand, UsageError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut inline: Option<String> = None;
    let mut file: Option<PathBuf> = None;
    let mut debug = false;
    let mut input = None;
    let mut config = InterpreterConfig::default();

    while let Some(arg) = args.next() {
        let (name, inline_value) = match arg.split_once('=') {
            Some((name, value)) if name.starts_with("--") && name.len() > 2 => {
                (name.to_string(), Some(value.to_string()))
            }
            _ => (arg.clone(), None),
        };
        let mut value = |option: &str| -> Result<String, UsageError> {
            match inline_value.clone() {
                Some(v) => Ok(v),
                None => args
                    .next()
                    .ok_or_else(|| UsageError::new(format!("option '{}' needs a value", option))),
            }
        };

        match name.as_str() {
            "-h" | "--help" => return Ok(CliCommand::Help),
            "-d" | "--debug" => debug = true,
            "-t" | "--trace" => config.trace = true,
            "-f" | "--file" => file = Some(PathBuf::from(value(&name)?)),
            "--input" => input = Some(value(&name)?),
            "--tape" => {
                let raw = value(&name)?;
                config.tape_len = match raw.parse::<usize>() {
                    Ok(0) | Err(_) => {
                        return Err(UsageError::new(format!(
                            "invalid tape length '{}' (expected a positive integer)",
                            raw
                        )))
                    }
                    Ok(len) => len,
                };
            }
            "--eof" => {
                config.eof = value(&name)?
                    .parse::<EofBehavior>()
                    .map_err(UsageError::new)?
            }
            "--" => {
                let rest: Vec<String> = args.by_ref().collect();
                if !rest.is_empty() {
                    set_inline(&mut inline, rest.join(" "))?;
                }
            }
            _ => set_inline(&mut inline, arg)?,
        }
    }

    let source = match (inline, file) {
        (Some(_), Some(_)) => {
            return Err(UsageError::new(
                "give either a program argument or --file, not both",
            ))
        }
        (Some(text), None) => ProgramSource::Inline(text),
        (None, Some(path)) => ProgramSource::File(path),
        (None, None) => ProgramSource::Sample,
    };

    if input.is_some() && !debug {
        return Err(UsageError::new(
            "--input is only used with --debug; pipe input through stdin instead",
        ));
    }

    Ok(CliCommand::Run(CliOptions {
        source,
        debug,
        input,
        config,
    }))
}

fn set_inline(slot: &mut Option<String>, text: String) -> Result<(), UsageError> {
    if slot.is_some() {
        return Err(UsageError::new(format!("unexpected argument '{}'", text)));
    }
    *slot = Some(text);
    Ok(())
}
