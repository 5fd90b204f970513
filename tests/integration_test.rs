// Integration tests for the tape machine

use bfc::interpreter::config::{EofBehavior, InterpreterConfig};
use bfc::interpreter::constants::HELLO_WORLD;
use bfc::interpreter::engine::Interpreter;
use bfc::interpreter::errors::RuntimeError;
use bfc::program::{MalformedKind, Program, SourceLocation};
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::time::{Duration, Instant};

fn run(source: &str) -> Interpreter {
    let program = Program::new(source).expect("Program rejected");
    let mut interpreter = Interpreter::new(program, InterpreterConfig::default());
    let result = interpreter.run();
    assert!(result.is_ok(), "Execution failed: {:?}", result);
    interpreter
}

fn run_with_input(source: &str, input: &[u8]) -> Interpreter {
    let program = Program::new(source).expect("Program rejected");
    let mut interpreter = Interpreter::new(program, InterpreterConfig::default())
        .with_input(Cursor::new(input.to_vec()));
    let result = interpreter.run();
    assert!(result.is_ok(), "Execution failed: {:?}", result);
    interpreter
}

fn load_demo(name: &str) -> String {
    let path = Path::new("demos").join(name);
    fs::read_to_string(path).expect("Failed to read demo file")
}

#[test]
fn test_hello_world_sample() {
    let interpreter = run(HELLO_WORLD);
    assert_eq!(interpreter.output(), b"Hello World!\n");
    assert!(interpreter.at_end());
    assert_eq!(interpreter.loop_depth(), 0);
}

#[test]
fn test_commented_hello_world_demo() {
    let interpreter = run(&load_demo("hello.bf"));
    assert_eq!(interpreter.output(), b"Hello World!\n");
}

#[test]
fn test_copy_loop() {
    let interpreter = run("+[>+<-]");
    assert_eq!(interpreter.tape().get(0), Some(0));
    assert_eq!(interpreter.tape().get(1), Some(1));
    assert_eq!(interpreter.tape().cursor(), 0);
}

#[test]
fn test_output_three() {
    let interpreter = run("+++.");
    assert_eq!(interpreter.output(), &[3]);
    assert_eq!(interpreter.position(), 4);
    assert!(interpreter.is_finished());
}

#[test]
fn test_empty_program_terminates_immediately() {
    let interpreter = run("");
    assert_eq!(interpreter.steps(), 0);
    assert!(interpreter.output().is_empty());
}

#[test]
fn test_comments_are_noops() {
    let interpreter = run("plus + plus + done");
    assert_eq!(interpreter.tape().read(), 2);
    assert_eq!(interpreter.steps(), 18);

    // A ',' inside prose still reads: the empty input stores 0
    let interpreter = run("add two: + and +, then stop");
    assert_eq!(interpreter.tape().read(), 0);
}

#[test]
fn test_unmatched_open_is_rejected() {
    let err = Program::new("+[>+").unwrap_err();
    assert_eq!(err.kind, MalformedKind::UnmatchedOpen);
    assert_eq!(err.location, SourceLocation::new(1, 2));
}

#[test]
fn test_unmatched_close_is_rejected() {
    let err = Program::new("+]").unwrap_err();
    assert_eq!(err.kind, MalformedKind::UnmatchedClose);
    assert_eq!(err.position, 1);
}

#[test]
fn test_loop_stack_empty_at_end() {
    let programs = [
        "[]",
        "+[-]",
        "++[>++[>+<-]<-]",
        "+[[-]]",
        "[[[[]]]]+",
        "+++[>+++[>+++[-]<-]<-]",
        HELLO_WORLD,
    ];
    for source in programs {
        let interpreter = run(source);
        assert_eq!(interpreter.loop_depth(), 0, "program {:?}", source);
        assert!(interpreter.at_end(), "program {:?}", source);
    }
}

#[test]
fn test_skipped_loop_at_end_lands_exactly_at_end() {
    let interpreter = run("+-[+[+]+]");
    assert_eq!(interpreter.position(), 9);
    assert_eq!(interpreter.tape().read(), 0);
}

#[test]
fn test_nested_loop_multiplication() {
    // 4 * 5 into cell 1
    let interpreter = run("++++[>+++++<-]");
    assert_eq!(interpreter.tape().get(1), Some(20));
}

#[test]
fn test_tape_overflow_is_an_error() {
    let config = InterpreterConfig {
        tape_len: 3,
        ..InterpreterConfig::default()
    };
    let mut interpreter = Interpreter::new(Program::new(">>+>").unwrap(), config);
    let result = interpreter.run();
    assert_eq!(
        result,
        Err(RuntimeError::TapeOverflow {
            cursor: 2,
            len: 3,
            location: SourceLocation::new(1, 4),
        })
    );
    // The failing move leaves everything else as it was
    assert_eq!(interpreter.tape().cursor(), 2);
    assert_eq!(interpreter.tape().read(), 1);
    assert_eq!(interpreter.position(), 3);
}

#[test]
fn test_move_left_at_origin_is_noop() {
    let interpreter = run("<<<+");
    assert_eq!(interpreter.tape().cursor(), 0);
    assert_eq!(interpreter.tape().get(0), Some(1));
}

#[test]
fn test_cat_demo_echoes_input() {
    let interpreter = run_with_input(&load_demo("cat.bf"), b"echo me\n");
    assert_eq!(interpreter.output(), b"echo me\n");
}

#[test]
fn test_add_demo() {
    let interpreter = run_with_input(&load_demo("add.bf"), b"34");
    assert_eq!(interpreter.output(), b"7");
}

#[test]
fn test_eof_writes_zero_by_default() {
    let interpreter = run_with_input("+++++,", b"");
    assert_eq!(interpreter.tape().read(), 0);
}

#[test]
fn test_eof_unchanged_keeps_cell() {
    let config = InterpreterConfig {
        eof: EofBehavior::Unchanged,
        ..InterpreterConfig::default()
    };
    let mut interpreter = Interpreter::new(Program::new("+++++,").unwrap(), config);
    interpreter.run().expect("Execution failed");
    assert_eq!(interpreter.tape().read(), 5);
}

#[test]
fn test_output_to_sink_is_not_captured() {
    use std::cell::RefCell;
    use std::io::Write;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Shared(Rc<RefCell<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let sink = Shared::default();
    let mut interpreter = Interpreter::new(Program::new(HELLO_WORLD).unwrap(), InterpreterConfig::default())
        .with_output(sink.clone());
    interpreter.run().expect("Execution failed");

    assert_eq!(sink.0.borrow().as_slice(), b"Hello World!\n");
    assert!(interpreter.output().is_empty());
}

// === HISTORY (TIME-TRAVEL) TESTS ===

fn run_with_history(source: &str) -> Interpreter {
    let program = Program::new(source).expect("Program rejected");
    let mut interpreter = Interpreter::new(program, InterpreterConfig::with_history());
    interpreter.run().expect("Execution failed");
    interpreter
}

#[test]
fn test_history_records_every_step() {
    let interpreter = run_with_history("+[-].");
    // Initial state plus one snapshot per executed instruction: + [ - ] .
    assert_eq!(interpreter.steps(), 5);
    assert_eq!(interpreter.total_snapshots(), 6);
    assert_eq!(interpreter.history_position(), 5);
}

#[test]
fn test_step_backward_restores_state() {
    let mut interpreter = run_with_history("++>+.");
    assert_eq!(interpreter.output(), &[1]);

    interpreter.step_backward().unwrap();
    assert_eq!(interpreter.position(), 4);
    assert!(interpreter.output().is_empty());
    assert_eq!(interpreter.tape().cursor(), 1);
    assert_eq!(interpreter.tape().read(), 1);

    interpreter.step_backward().unwrap();
    interpreter.step_backward().unwrap();
    assert_eq!(interpreter.tape().cursor(), 0);
    assert_eq!(interpreter.tape().get(1), Some(0));

    interpreter.rewind_to_start().unwrap();
    assert_eq!(interpreter.position(), 0);
    assert_eq!(interpreter.tape().get(0), Some(0));
    assert!(interpreter.step_backward().is_err());
}

#[test]
fn test_step_forward_replays_state() {
    let mut interpreter = run_with_history("+[>+<-]>.");
    let final_output = interpreter.output().to_vec();
    let final_tape = interpreter.tape().clone();

    interpreter.rewind_to_start().unwrap();
    let mut previous_position = interpreter.history_position();
    while interpreter.step_forward().is_ok() {
        assert_eq!(interpreter.history_position(), previous_position + 1);
        previous_position = interpreter.history_position();
    }

    assert_eq!(interpreter.output(), final_output.as_slice());
    assert_eq!(interpreter.tape(), &final_tape);
    assert!(interpreter.at_end());
}

#[test]
fn test_history_tracks_loop_stack() {
    let mut interpreter = run_with_history("+[-]");
    interpreter.rewind_to_start().unwrap();
    interpreter.step_forward().unwrap(); // after +
    interpreter.step_forward().unwrap(); // after [
    assert_eq!(interpreter.loop_stack().entries(), &[1]);
    interpreter.jump_to_end().unwrap();
    assert_eq!(interpreter.loop_depth(), 0);
}

#[test]
fn test_snapshot_limit_stops_infinite_loop() {
    let config = InterpreterConfig {
        snapshot_limit: Some(64 * 1024),
        ..InterpreterConfig::default()
    };
    let mut interpreter = Interpreter::new(Program::new("+[]").unwrap(), config);
    match interpreter.run() {
        Err(RuntimeError::SnapshotLimitExceeded { limit, .. }) => assert_eq!(limit, 64 * 1024),
        other => panic!("expected snapshot limit error, got {:?}", other),
    }
    // Partial history stays available
    assert!(interpreter.total_snapshots() > 1);
    interpreter.rewind_to_start().unwrap();
    assert_eq!(interpreter.position(), 0);
}

#[test]
fn test_snapshot_cost_does_not_grow_with_tape_length() {
    // Each snapshot only scans the cells the cursor has visited
    let config = InterpreterConfig {
        tape_len: 4_000_000,
        snapshot_limit: Some(4 * 1024 * 1024),
        ..InterpreterConfig::default()
    };
    let mut interpreter = Interpreter::new(Program::new("+[]").unwrap(), config);

    let started = Instant::now();
    let result = interpreter.run();
    assert!(matches!(result, Err(RuntimeError::SnapshotLimitExceeded { .. })));
    assert!(
        started.elapsed() < Duration::from_secs(20),
        "runaway loop took {:?} to hit the snapshot limit",
        started.elapsed()
    );
}

#[test]
fn test_runaway_debug_run_stops_at_default_budget() {
    let mut interpreter = Interpreter::new(Program::new("+[]").unwrap(), InterpreterConfig::with_history());

    let started = Instant::now();
    match interpreter.run() {
        Err(RuntimeError::SnapshotLimitExceeded { current, limit }) => assert!(current <= limit),
        other => panic!("expected snapshot limit error, got {:?}", other),
    }
    assert!(
        started.elapsed() < Duration::from_secs(120),
        "runaway loop took {:?} to hit the snapshot limit",
        started.elapsed()
    );
}

#[test]
fn test_dump_matches_trace_format() {
    let mut interpreter = Interpreter::new(Program::new("+[>+<-]").unwrap(), InterpreterConfig::default());
    interpreter.step().unwrap();
    interpreter.step().unwrap();
    assert_eq!(interpreter.dump(), "+[>+<-]\n  ^\n[:0] 1 '\\x01'\nLS: 1 (1)");
}
