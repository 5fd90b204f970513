//! Main TUI application state and logic

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

use super::panes::{
    render_loop_pane, render_source_pane, render_status_bar, render_tape_pane,
    render_terminal_pane, SourceRenderData, SourceScrollState, StatusRenderData, TapeScrollState,
};

/// Delay between steps in auto-play mode
const PLAY_INTERVAL: Duration = Duration::from_millis(120);

/// Steps taken by PageUp / PageDown
const PAGE_STEPS: usize = 100;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tape,
    Loops,
    Terminal,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> terminal -> tape -> loops)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Terminal,
            FocusedPane::Terminal => FocusedPane::Tape,
            FocusedPane::Tape => FocusedPane::Loops,
            FocusedPane::Loops => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Loops,
            FocusedPane::Terminal => FocusedPane::Source,
            FocusedPane::Tape => FocusedPane::Terminal,
            FocusedPane::Loops => FocusedPane::Tape,
        }
    }
}

/// The main application state
pub struct App {
    /// The interpreter instance, already run to completion (or to its error)
    pub interpreter: Interpreter,

    /// Error that stopped the run, shown when the last snapshot is reached
    pub error: Option<RuntimeError>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll state
    pub source_scroll: SourceScrollState,
    pub tape_scroll: TapeScrollState,
    pub loop_scroll: usize,
    pub terminal_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a new app for an interpreter that has finished running
    pub fn new(interpreter: Interpreter, error: Option<RuntimeError>) -> Self {
        let status_message = match &error {
            Some(_) => String::from("Run stopped with an error; press ↵ to see it"),
            None => String::from("Ready!"),
        };

        App {
            interpreter,
            error,
            focused_pane: FocusedPane::Source,
            source_scroll: SourceScrollState::default(),
            tape_scroll: TapeScrollState::default(),
            loop_scroll: 0,
            terminal_scroll: 0,
            should_quit: false,
            status_message,
            is_playing: false,
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Handle auto-play mode
            if self.is_playing && self.last_play_time.elapsed() >= PLAY_INTERVAL {
                if self.interpreter.step_forward().is_ok() {
                    self.after_step("Playing...".to_string());
                } else {
                    // No more steps available
                    self.is_playing = false;
                    self.after_step("Playback complete".to_string());
                }
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(20))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Create layout: 4 panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        // Split into 2 columns
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(pane_area);

        // Left column: Program (top) | Output (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[0]);

        // Right column: Tape (top) | Loop stack (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[1]);

        let interpreter = &self.interpreter;

        render_source_pane(
            frame,
            left_rows[0],
            SourceRenderData {
                program: interpreter.program(),
                location: interpreter.current_location(),
                at_end: interpreter.at_end(),
            },
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        render_terminal_pane(
            frame,
            left_rows[1],
            interpreter.terminal(),
            self.focused_pane == FocusedPane::Terminal,
            &mut self.terminal_scroll,
        );

        render_tape_pane(
            frame,
            right_rows[0],
            interpreter.tape(),
            self.focused_pane == FocusedPane::Tape,
            &mut self.tape_scroll,
        );

        render_loop_pane(
            frame,
            right_rows[1],
            interpreter.loop_stack(),
            interpreter.program(),
            self.focused_pane == FocusedPane::Loops,
            &mut self.loop_scroll,
        );

        let total_steps = interpreter.total_snapshots();
        let at_last = interpreter.history_position() + 1 >= total_steps;
        render_status_bar(
            frame,
            status_area,
            StatusRenderData {
                message: &self.status_message,
                current_step: interpreter.history_position(),
                total_steps,
                has_error: self.error.is_some() && at_last,
                is_playing: self.is_playing,
            },
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).map_or(1, |d| d as usize);
                self.step_forward_by(n);
            }
            KeyCode::PageDown => {
                self.is_playing = false;
                self.step_forward_by(PAGE_STEPS);
            }
            KeyCode::PageUp => {
                self.is_playing = false;
                self.step_backward_by(PAGE_STEPS);
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.step_backward();
            }
            KeyCode::Right => {
                self.is_playing = false;
                self.step_forward();
            }
            KeyCode::Up => self.scroll(-1),
            KeyCode::Down => self.scroll(1),
            KeyCode::Char('f') => {
                // Re-attach scrolled panes to the pointer/cursor
                self.source_scroll.follow = true;
                self.tape_scroll.follow = true;
                self.status_message = "Following execution".to_string();
            }
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        self.last_play_time = Instant::now()
                            .checked_sub(PLAY_INTERVAL)
                            .unwrap_or(Instant::now());
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                // Jump to end of execution
                self.is_playing = false;
                match self.interpreter.jump_to_end() {
                    Ok(()) => self.after_step("Jumped to end".to_string()),
                    Err(e) => self.status_message = format!("Error: {}", e),
                }
            }
            KeyCode::Backspace => {
                // Jump to start of execution
                self.is_playing = false;
                match self.interpreter.rewind_to_start() {
                    Ok(()) => self.after_step("Jumped to start".to_string()),
                    Err(e) => self.status_message = format!("Error: {}", e),
                }
            }
            _ => {}
        }
    }

    fn scroll(&mut self, delta: isize) {
        let apply = |offset: &mut usize| {
            *offset = offset.saturating_add_signed(delta);
        };
        match self.focused_pane {
            FocusedPane::Source => {
                self.source_scroll.follow = false;
                apply(&mut self.source_scroll.offset);
            }
            FocusedPane::Tape => {
                self.tape_scroll.follow = false;
                apply(&mut self.tape_scroll.offset);
            }
            FocusedPane::Loops => apply(&mut self.loop_scroll),
            FocusedPane::Terminal => apply(&mut self.terminal_scroll),
        }
    }

    /// Status line and scroll bookkeeping after the visible state changed
    fn after_step(&mut self, message: String) {
        // Auto-scroll terminal to bottom
        self.terminal_scroll = usize::MAX;

        let at_last = self.interpreter.history_position() + 1 >= self.interpreter.total_snapshots();
        self.status_message = match (&self.error, at_last) {
            (Some(e), true) => format!("Stopped: {}", e),
            _ => message,
        };
    }

    fn step_forward_by(&mut self, n: usize) {
        let mut stepped = 0;
        for _ in 0..n {
            if self.interpreter.step_forward().is_err() {
                break;
            }
            stepped += 1;
        }
        self.after_step(format!("Stepped forward {} step(s)", stepped));
    }

    fn step_backward_by(&mut self, n: usize) {
        let mut stepped = 0;
        for _ in 0..n {
            if self.interpreter.step_backward().is_err() {
                break;
            }
            stepped += 1;
        }
        self.after_step(format!("Stepped backward {} step(s)", stepped));
    }

    /// Step forward in execution
    fn step_forward(&mut self) {
        match self.interpreter.step_forward() {
            Ok(()) => self.after_step("Stepped forward".to_string()),
            Err(RuntimeError::HistoryOperationFailed { message }) => {
                self.after_step(format!("Cannot step forward: {}", message));
            }
            Err(e) => {
                self.status_message = format!("Error: {}", e);
            }
        }
    }

    /// Step backward in execution
    fn step_backward(&mut self) {
        match self.interpreter.step_backward() {
            Ok(()) => self.after_step("Stepped backward".to_string()),
            Err(RuntimeError::HistoryOperationFailed { message }) => {
                self.status_message = format!("Cannot step backward: {}", message);
            }
            Err(e) => {
                self.status_message = format!("Error: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_cycle_round_trips() {
        let mut pane = FocusedPane::Source;
        for _ in 0..4 {
            pane = pane.next();
        }
        assert_eq!(pane, FocusedPane::Source);
        assert_eq!(FocusedPane::Tape.next().prev(), FocusedPane::Tape);
    }
}
