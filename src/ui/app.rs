//! Main TUI application state and logic

use crate::interpreter::engine::Simulation;
use crate::interpreter::state::Phase;
use crate::parser::ast::Statement;
use crate::scheduler::Scheduler;
use crate::snapshot::Snapshot;
use crate::ui::panes::{
    self, PeripheralsScrollState, PinsRenderData, PinsScrollState, RunIndicator,
    SerialRenderData, SerialScrollState, SourceRenderData, SourceScrollState, StatusRenderData,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Input poll timeout; well under the tick period so ticks stay on time
const INPUT_POLL: Duration = Duration::from_millis(5);

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Serial,
    Pins,
    Peripherals,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> serial -> pins -> peripherals)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Serial,
            FocusedPane::Serial => FocusedPane::Pins,
            FocusedPane::Pins => FocusedPane::Peripherals,
            FocusedPane::Peripherals => FocusedPane::Source,
        }
    }
}

/// The main application state
pub struct App {
    /// The simulation session
    pub sim: Simulation,

    /// Fixed-rate driver for the session
    pub scheduler: Scheduler,

    /// The sketch text being shown
    pub source_code: String,

    /// Sketch text reloaded during a run, shown once the run stops
    pending_source: Option<String>,

    /// File the sketch was read from, for reloading
    source_path: Option<PathBuf>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll state
    pub source_scroll: SourceScrollState,
    pub serial_scroll: SerialScrollState,
    pub pins_scroll: PinsScrollState,
    pub peripherals_scroll: PeripheralsScrollState,

    /// Serial lines hidden by the clear key
    pub serial_hidden_lines: usize,

    /// Whether serial lines show simulated timestamps
    pub show_timestamps: bool,

    /// Steps behind the newest snapshot while reviewing history
    pub review_back: Option<usize>,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create a new app around a session that already has the sketch loaded
    pub fn new(sim: Simulation, scheduler: Scheduler, source_code: String) -> Self {
        App {
            sim,
            scheduler,
            source_code,
            pending_source: None,
            source_path: None,
            focused_pane: FocusedPane::Source,
            source_scroll: SourceScrollState::new(),
            serial_scroll: SerialScrollState { offset: 0 },
            pins_scroll: PinsScrollState { offset: 0 },
            peripherals_scroll: PeripheralsScrollState { offset: 0 },
            serial_hidden_lines: 0,
            show_timestamps: true,
            review_back: None,
            should_quit: false,
            status_message: String::from("Ready! Press space to run"),
        }
    }

    /// Allow `l` to reload the sketch from this file
    pub fn with_source_path(mut self, path: PathBuf) -> Self {
        self.source_path = Some(path);
        self
    }

    pub fn with_timestamps(mut self, show: bool) -> Self {
        self.show_timestamps = show;
        self
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.scheduler.poll(&mut self.sim, Instant::now()) {
                self.serial_scroll.offset = usize::MAX;
            }

            // Use poll with timeout so the scheduler keeps running
            if event::poll(INPUT_POLL)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        self.scheduler.stop(&mut self.sim);
        Ok(())
    }

    /// State to display: a reviewed snapshot or the live session
    fn displayed_snapshot(&self) -> Snapshot {
        self.review_back
            .and_then(|back| self.sim.history().from_newest(back).cloned())
            .unwrap_or_else(|| self.sim.snapshot())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();
        let snapshot = self.displayed_snapshot();

        // Create layout: 4 panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        // Left column: Source (top) | Serial (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[0]);

        // Right column: Pins (top) | Peripherals (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(columns[1]);

        let unrecognized_lines: Vec<usize> = {
            let program = self.sim.program();
            program
                .setup
                .iter()
                .chain(&program.loop_body)
                .filter(|node| node.stmt == Statement::Unrecognized)
                .map(|node| node.location.line)
                .collect()
        };

        panes::render_source_pane(
            frame,
            left_rows[0],
            SourceRenderData {
                source_code: &self.source_code,
                current_line: snapshot.location.map(|l| l.line),
                unrecognized_lines: &unrecognized_lines,
                is_gated: snapshot.state.is_gated(snapshot.time),
            },
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        // Only a reviewed step needs its own copy of the log
        let reviewed_serial;
        let serial = if self.review_back.is_some() {
            reviewed_serial = self.sim.serial().at(snapshot.serial);
            &reviewed_serial
        } else {
            self.sim.serial()
        };

        panes::render_serial_pane(
            frame,
            left_rows[1],
            SerialRenderData {
                serial,
                show_timestamps: self.show_timestamps,
                hidden_lines: self.serial_hidden_lines,
            },
            self.focused_pane == FocusedPane::Serial,
            &mut self.serial_scroll,
        );

        panes::render_pins_pane(
            frame,
            right_rows[0],
            PinsRenderData {
                pins: &snapshot.pins,
                peripherals: &snapshot.peripherals,
            },
            self.focused_pane == FocusedPane::Pins,
            &mut self.pins_scroll,
        );

        panes::render_peripherals_pane(
            frame,
            right_rows[1],
            &snapshot.peripherals,
            self.focused_pane == FocusedPane::Peripherals,
            &mut self.peripherals_scroll,
        );

        let indicator = match self.review_back {
            Some(back) => RunIndicator::Reviewing(back),
            None if self.scheduler.is_running() => RunIndicator::Running,
            None if self.scheduler.is_paused() => RunIndicator::Paused,
            None => RunIndicator::Stopped,
        };

        panes::render_status_bar(
            frame,
            main_chunks[1],
            StatusRenderData {
                message: &self.status_message,
                phase: snapshot.state.phase,
                cursor: snapshot.state.cursor,
                steps_executed: snapshot.steps_executed,
                sim_time: snapshot.time,
                indicator,
            },
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                if self.scheduler.is_stopped() {
                    self.start();
                } else {
                    self.stop();
                    self.status_message = "Stopped".to_string();
                }
            }
            KeyCode::Char('p') => {
                if self.scheduler.is_running() {
                    self.scheduler.pause();
                    self.status_message = "Paused".to_string();
                } else if self.scheduler.is_paused() {
                    self.review_back = None;
                    self.scheduler.resume(Instant::now());
                    self.status_message = "Running...".to_string();
                }
            }
            KeyCode::Right | KeyCode::Char('n') => self.step_forward(),
            KeyCode::Left => self.review_backward(),
            KeyCode::Char('r') => {
                self.stop();
                self.start();
                self.status_message = "Restarted".to_string();
            }
            KeyCode::Char('l') => self.reload(),
            KeyCode::Char('c') => {
                self.serial_hidden_lines = self.sim.serial().lines().len();
                self.status_message = "Serial view cleared".to_string();
            }
            KeyCode::Char('t') => {
                self.show_timestamps = !self.show_timestamps;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling up makes the current line move down visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Serial => {
                    self.serial_scroll.offset = self.serial_scroll.offset.saturating_sub(1);
                }
                FocusedPane::Pins => {
                    self.pins_scroll.offset = self.pins_scroll.offset.saturating_sub(1);
                }
                FocusedPane::Peripherals => {
                    self.peripherals_scroll.offset =
                        self.peripherals_scroll.offset.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Serial => {
                    self.serial_scroll.offset = self.serial_scroll.offset.saturating_add(1);
                }
                FocusedPane::Pins => {
                    self.pins_scroll.offset = self.pins_scroll.offset.saturating_add(1);
                }
                FocusedPane::Peripherals => {
                    self.peripherals_scroll.offset =
                        self.peripherals_scroll.offset.saturating_add(1);
                }
            },
            _ => {}
        }
    }

    fn start(&mut self) {
        self.scheduler.start(&mut self.sim, Instant::now());
        self.status_message = match self.sim.phase() {
            Phase::Halted => "Nothing to run: no setup or loop statements".to_string(),
            _ => "Running...".to_string(),
        };
    }

    /// Stop the run; a sketch reloaded meanwhile becomes visible now
    fn stop(&mut self) {
        self.scheduler.stop(&mut self.sim);
        self.review_back = None;
        self.serial_hidden_lines = 0;
        self.serial_scroll.offset = 0;
        if let Some(source) = self.pending_source.take() {
            self.source_code = source;
        }
    }

    /// Step forward one tick, or one snapshot while reviewing
    fn step_forward(&mut self) {
        match self.review_back {
            Some(0) => {
                self.review_back = None;
                self.status_message = "Back to live state".to_string();
            }
            Some(back) => {
                self.review_back = Some(back - 1);
                self.status_message = format!("Reviewing {} step(s) back", back - 1);
            }
            None => {
                if self.scheduler.is_stopped() {
                    self.scheduler.start(&mut self.sim, Instant::now());
                }
                self.scheduler.pause();
                if self.scheduler.step(&mut self.sim) {
                    self.status_message = match self.sim.current_location() {
                        Some(loc) => format!("Stepped (line {})", loc.line),
                        None => "Stepped".to_string(),
                    };
                    self.serial_scroll.offset = usize::MAX;
                }
            }
        }
    }

    /// Look one snapshot further back; pauses a running simulation
    fn review_backward(&mut self) {
        if self.scheduler.is_stopped() {
            self.status_message = "Nothing to review".to_string();
            return;
        }
        self.scheduler.pause();

        let available = self.sim.history().len();
        let next = self.review_back.map_or(0, |b| b + 1);
        if next < available {
            self.review_back = Some(next);
            self.status_message = format!("Reviewing {} step(s) back", next);
        } else {
            self.status_message = "Start of recorded history".to_string();
        }
    }

    /// Re-read the sketch file; applied immediately when stopped, after stop otherwise
    fn reload(&mut self) {
        let Some(path) = self.source_path.clone() else {
            self.status_message = "No sketch file to reload".to_string();
            return;
        };

        match std::fs::read_to_string(&path) {
            Ok(source) => {
                self.sim.load(&source);
                if self.sim.is_started() {
                    self.pending_source = Some(source);
                    self.status_message = "Reloaded; takes effect after stop".to_string();
                } else {
                    self.source_code = source;
                    self.status_message = "Reloaded".to_string();
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "reload failed");
                self.status_message = format!("Reload failed: {}", e);
            }
        }
    }
}
