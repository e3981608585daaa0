//! Main TUI application state and logic

use crate::snapshot::{Replay, StepError};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

use super::panes::{self, QuadRenderData, ScrollState, SourceScrollState, StatusRenderData};

/// Delay between steps in play mode
const PLAY_INTERVAL: Duration = Duration::from_millis(400);

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tokens,
    Quads,
    Symbols,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> tokens -> quads -> symbols)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Quads,
            FocusedPane::Quads => FocusedPane::Symbols,
            FocusedPane::Symbols => FocusedPane::Source,
        }
    }
}

/// The main application state
pub struct App {
    /// Finished compilation and position in its emission history
    pub replay: Replay,

    /// The source code that was compiled
    pub source_code: String,

    pub focused_pane: FocusedPane,

    /// Per-pane scroll state
    pub source_scroll: SourceScrollState,
    pub token_scroll: ScrollState,
    pub quad_scroll: ScrollState,
    pub symbol_scroll: ScrollState,

    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Option<Instant>,
}

impl App {
    pub fn new(replay: Replay, source_code: String) -> Self {
        let status_message = if replay.is_truncated() {
            String::from("History truncated at the memory limit")
        } else {
            String::from("Ready!")
        };
        App {
            replay,
            source_code,
            focused_pane: FocusedPane::Source,
            source_scroll: SourceScrollState::default(),
            token_scroll: ScrollState::default(),
            quad_scroll: ScrollState::default(),
            symbol_scroll: ScrollState::default(),
            should_quit: false,
            status_message,
            is_playing: false,
            last_play_time: Instant::now(),
            last_space_press: None,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.is_playing && self.last_play_time.elapsed() >= PLAY_INTERVAL {
                if self.replay.step_forward().is_ok() {
                    self.status_message = "Playing...".to_string();
                } else {
                    self.is_playing = false;
                    self.status_message = "Playback complete".to_string();
                }
                self.last_play_time = Instant::now();
            }

            // Poll with a timeout so play mode keeps ticking
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(frame.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        // Left column: Source (top) | Tokens (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[0]);

        // Right column: Quadruples (top) | Symbols (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[1]);

        let Some(snapshot) = self.replay.current() else {
            return;
        };
        let compilation = self.replay.compilation();

        // Before the first match there is no current token
        let has_matched = snapshot.event != crate::snapshot::Event::Start;
        let current_line = if has_matched {
            snapshot.source_location.line
        } else {
            0
        };

        panes::render_source_pane(
            frame,
            left_rows[0],
            &self.source_code,
            current_line,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        panes::render_tokens_pane(
            frame,
            left_rows[1],
            compilation.tokens(),
            has_matched.then_some(snapshot.cursor),
            self.focused_pane == FocusedPane::Tokens,
            &mut self.token_scroll,
        );

        let patched_lines = self.replay.patched_lines();
        panes::render_quads_pane(
            frame,
            right_rows[0],
            &QuadRenderData {
                quads: &snapshot.quads,
                touched_line: snapshot.event.touched_line(),
                patched_lines: &patched_lines,
            },
            self.focused_pane == FocusedPane::Quads,
            &mut self.quad_scroll,
        );

        panes::render_symbols_pane(
            frame,
            right_rows[1],
            &snapshot.symbols,
            snapshot.event.touched_symbol(),
            self.focused_pane == FocusedPane::Symbols,
            &mut self.symbol_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &StatusRenderData {
                message: &self.status_message,
                event: snapshot.event.to_string(),
                current_step: self.replay.history_position(),
                total_steps: self.replay.total_snapshots(),
                is_playing: self.is_playing,
                is_truncated: self.replay.is_truncated(),
            },
        );
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).map_or(1, |d| d as usize);
                let stepped = self.replay.step_forward_n(n);
                self.status_message = format!("Stepped forward {} step(s)", stepped);
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Left => {
                self.is_playing = false;
                let result = self.replay.step_backward();
                self.report_step("Stepped backward", result);
            }
            KeyCode::Right => {
                self.is_playing = false;
                let result = self.replay.step_forward();
                self.report_step("Stepped forward", result);
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => self.source_scroll.scroll_up(),
                FocusedPane::Tokens => self.token_scroll.scroll_up(),
                FocusedPane::Quads => self.quad_scroll.scroll_up(),
                FocusedPane::Symbols => self.symbol_scroll.scroll_up(),
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => self.source_scroll.scroll_down(),
                FocusedPane::Tokens => self.token_scroll.scroll_down(),
                FocusedPane::Quads => self.quad_scroll.scroll_down(),
                FocusedPane::Symbols => self.symbol_scroll.scroll_down(),
            },
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                let debounced = self
                    .last_space_press
                    .is_some_and(|at| at.elapsed() < Duration::from_millis(200));
                if !debounced {
                    self.last_space_press = Some(Instant::now());
                    self.toggle_play();
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.replay.jump_to_end();
                self.status_message = "Jumped to end".to_string();
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                self.replay.rewind_to_start();
                self.status_message = "Jumped to start".to_string();
            }
            _ => {}
        }
    }

    fn toggle_play(&mut self) {
        self.is_playing = !self.is_playing;
        if self.is_playing {
            // Take the first step on the next tick
            self.last_play_time = Instant::now()
                .checked_sub(PLAY_INTERVAL)
                .unwrap_or_else(Instant::now);
            self.status_message = "Playing...".to_string();
        } else {
            self.status_message = "Paused".to_string();
        }
    }

    fn report_step(&mut self, done: &str, result: Result<(), StepError>) {
        self.status_message = match result {
            Ok(()) => done.to_string(),
            Err(err) => format!("Cannot step: {}", err),
        };
    }
}
