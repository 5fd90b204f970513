// bfc: tape-machine interpreter with time-travel state visualization

use std::io::{self, BufWriter, Cursor};
use std::process::ExitCode;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use bfc::cli::{parse_args, usage, CliCommand, CliOptions};
use bfc::interpreter::config::InterpreterConfig;
use bfc::interpreter::engine::Interpreter;
use bfc::program::Program;
use bfc::ui::App;

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut args = std::env::args();
    let program_name = args.next().unwrap_or_else(|| "bfc".to_string());

    let options = match parse_args(args) {
        Ok(CliCommand::Run(options)) => options,
        Ok(CliCommand::Help) => {
            println!("{}", usage(&program_name));
            return Ok(ExitCode::SUCCESS);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("{}", usage(&program_name));
            return Ok(ExitCode::FAILURE);
        }
    };

    let source = match options.load_source() {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: cannot read '{}': {}", options.source_name(), e);
            return Ok(ExitCode::FAILURE);
        }
    };

    // Malformed programs never start executing
    let program = match Program::new(&source) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("{}: {}", options.source_name(), e);
            return Ok(ExitCode::FAILURE);
        }
    };

    if options.debug {
        run_debugger(program, options)
    } else {
        run_streaming(program, options.config)
    }
}

/// Execute with real stdin/stdout
fn run_streaming(program: Program, config: InterpreterConfig) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut interpreter = Interpreter::new(program, config)
        .with_input(io::stdin().lock())
        .with_output(BufWriter::new(io::stdout().lock()));

    match interpreter.run() {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("Runtime error: {}", e);
            eprintln!("{}", interpreter.dump());
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Execute with history recording, then browse the run in the TUI
fn run_debugger(program: Program, options: CliOptions) -> Result<ExitCode, Box<dyn std::error::Error>> {
    eprintln!(
        "Loaded {}: {} characters, {} instructions.",
        options.source_name(),
        program.len(),
        program.instruction_count()
    );

    let config = InterpreterConfig {
        snapshot_limit: InterpreterConfig::with_history().snapshot_limit,
        ..options.config
    };
    let input = options.input.unwrap_or_default().into_bytes();
    let mut interpreter = Interpreter::new(program, config).with_input(Cursor::new(input));

    let config = interpreter.config();
    eprintln!(
        "Tape: {} cells, EOF policy: {}, history budget: {} bytes.",
        config.tape_len,
        config.eof,
        config.snapshot_limit.unwrap_or_default()
    );

    // Run execution to build history
    eprintln!("Executing program...");
    let error = match interpreter.run() {
        Ok(()) => {
            eprintln!("Execution completed successfully.");
            eprintln!("Total snapshots: {}", interpreter.total_snapshots());
            None
        }
        Err(e) => {
            eprintln!("Runtime error: {}", e);
            eprintln!("Entering TUI with partial execution history...");
            Some(e)
        }
    };

    // Rewind to the beginning for TUI
    if let Err(e) = interpreter.rewind_to_start() {
        eprintln!("Warning: Failed to rewind to start: {}", e);
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(interpreter, error);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
