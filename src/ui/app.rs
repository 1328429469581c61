//! Main TUI application state and logic

use crate::action::command::parse_command;
use crate::action::{Action, TreeType};
use crate::engine::Session;
use crate::errors::HistoryError;
use crate::snapshot::{HighlightKind, Snapshot, SnapshotHistory};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::ops::Range;
use std::time::{Duration, Instant};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Tree,
    Steps,
    Nodes,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: tree -> steps -> nodes)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Tree => FocusedPane::Steps,
            FocusedPane::Steps => FocusedPane::Nodes,
            FocusedPane::Nodes => FocusedPane::Tree,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Tree => FocusedPane::Nodes,
            FocusedPane::Steps => FocusedPane::Tree,
            FocusedPane::Nodes => FocusedPane::Steps,
        }
    }
}

/// Where key presses go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Command,
}

/// The main application state
pub struct App {
    /// Identifier allocator shared by every action of this session
    pub session: Session,

    /// Every snapshot produced so far, with the replay cursor
    pub history: SnapshotHistory,

    /// Index range and display form of each action in `history`
    pub actions: Vec<(Range<usize>, String)>,

    /// Tree type used when a command does not name one
    pub tree_type: TreeType,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub tree_scroll: usize,
    pub steps_scroll: usize,
    pub nodes_scroll: usize,

    pub input_mode: InputMode,

    /// Command line being typed
    pub input: String,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether the status message reports a failure
    pub status_is_error: bool,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Delay between steps in play mode
    pub play_interval: Duration,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    pub fn new(history_limit: usize, tree_type: TreeType, play_interval: Duration) -> Self {
        App {
            session: Session::new(),
            history: SnapshotHistory::new(history_limit),
            actions: Vec::new(),
            tree_type,
            focused_pane: FocusedPane::Tree,
            tree_scroll: 0,
            steps_scroll: 0,
            nodes_scroll: 0,
            input_mode: InputMode::Normal,
            input: String::new(),
            should_quit: false,
            status_message: String::from("Ready! Press : to enter a command"),
            status_is_error: false,
            is_playing: false,
            play_interval,
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Dispatch `action` against the committed tree and append its snapshots.
    ///
    /// The cursor moves to the action's first snapshot.
    pub fn submit(&mut self, action: Action) -> Result<Range<usize>, HistoryError> {
        let label = action.to_string();
        let snapshots: Vec<Snapshot> = self
            .session
            .dispatch(self.history.committed_tree(), action)
            .collect();

        let outcome = snapshots
            .last()
            .map(|s| (s.kind(), s.message.clone().unwrap_or_default()));

        let range = match self.history.push_action(snapshots) {
            Ok(range) => range,
            Err(e) => {
                self.is_playing = false;
                self.set_error(format!("{}", e));
                return Err(e);
            }
        };

        tracing::debug!(action = %label, steps = range.len(), "action recorded");
        self.actions.push((range.clone(), label));
        self.history.seek(range.start)?;

        match outcome {
            Some((HighlightKind::Error, reason)) => self.set_error(reason),
            Some((_, summary)) => self.set_status(summary),
            None => {}
        }
        Ok(range)
    }

    /// Run startup actions, leaving the cursor on the first snapshot
    pub fn load(&mut self, actions: Vec<Action>) -> Result<(), HistoryError> {
        let count = actions.len();
        for action in actions {
            self.submit(action)?;
        }
        if !self.history.is_empty() {
            self.history.rewind_to_start()?;
            self.set_status(format!(
                "Loaded {} action(s), {} steps",
                count,
                self.history.len()
            ));
        }
        Ok(())
    }

    /// Parse a command line, submit it and start playing its steps
    pub fn submit_command(&mut self, line: &str) {
        let action = match parse_command(line, self.tree_type) {
            Ok(action) => action,
            Err(e) => {
                self.set_error(e.to_string());
                return;
            }
        };
        if self.submit(action).is_ok() {
            self.is_playing = true;
            self.last_play_time = Instant::now();
        }
    }

    /// Forget every snapshot and start numbering nodes from scratch
    pub fn reset(&mut self) {
        self.is_playing = false;
        self.history.clear();
        self.actions.clear();
        self.session.reset();
        self.tree_scroll = 0;
        self.steps_scroll = 0;
        self.nodes_scroll = 0;
        self.set_status("Session reset".to_string());
    }

    fn set_status(&mut self, message: String) {
        self.status_message = message;
        self.status_is_error = false;
    }

    fn set_error(&mut self, message: String) {
        self.status_message = message;
        self.status_is_error = true;
    }

    /// Display form of the action the cursor is in
    pub fn current_action(&self) -> Option<&(Range<usize>, String)> {
        let position = self.history.position();
        self.actions.iter().find(|(range, _)| range.contains(&position))
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.is_playing && self.last_play_time.elapsed() >= self.play_interval {
                self.advance_playback();
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
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

    /// One play-mode tick
    pub fn advance_playback(&mut self) {
        if self.history.step_forward().is_err() {
            self.is_playing = false;
            self.set_status("Playback complete".to_string());
            return;
        }
        if self.history.is_at_end() {
            self.is_playing = false;
        }
        if let Some(current) = self.history.current() {
            let message = current.highlight.message().to_string();
            if current.kind() == HighlightKind::Error {
                self.set_error(message);
            } else {
                self.set_status(message);
            }
        }
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(main_chunks[0]);

        // Right column: Steps (top) | Nodes (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(columns[1]);

        let current = self.history.current();
        let position = self.history.position();

        super::panes::render_tree_pane(
            frame,
            columns[0],
            super::panes::TreeRenderData {
                tree: current.map(|s| &s.tree),
                highlight: current.map(|s| &s.highlight),
                tree_type: self.tree_type,
            },
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        let (range, title) = match self
            .actions
            .iter()
            .find(|(range, _)| range.contains(&position))
        {
            Some((range, label)) => (range.clone(), Some(label.as_str())),
            None => (0..0, None),
        };
        let steps = self.history.snapshots().get(range.clone()).unwrap_or(&[]);

        super::panes::render_steps_pane(
            frame,
            right_rows[0],
            super::panes::StepsRenderData {
                steps,
                current: position.saturating_sub(range.start),
                title,
            },
            self.focused_pane == FocusedPane::Steps,
            &mut self.steps_scroll,
        );

        super::panes::render_nodes_pane(
            frame,
            right_rows[1],
            super::panes::NodesRenderData {
                nodes_by_id: current.map(|s| &s.nodes_by_id),
                highlight: current.map(|s| &s.highlight),
            },
            self.focused_pane == FocusedPane::Nodes,
            &mut self.nodes_scroll,
        );

        super::panes::render_prompt(
            frame,
            main_chunks[1],
            &self.input,
            self.input_mode == InputMode::Command,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[2],
            super::panes::StatusRenderData {
                message: &self.status_message,
                position,
                total: self.history.len(),
                tree_type: self.tree_type,
                is_error: self.status_is_error,
                is_playing: self.is_playing,
                is_command_input: self.input_mode == InputMode::Command,
            },
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match self.input_mode {
            InputMode::Command => self.handle_command_key(key),
            InputMode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_command_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.input.clear();
                self.input_mode = InputMode::Normal;
                self.set_status("Cancelled".to_string());
            }
            KeyCode::Enter => {
                let line = std::mem::take(&mut self.input);
                self.input_mode = InputMode::Normal;
                if !line.trim().is_empty() {
                    self.submit_command(&line);
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char(':') => {
                self.is_playing = false;
                self.input_mode = InputMode::Command;
                self.input.clear();
            }
            KeyCode::Char('t') | KeyCode::Char('T') => {
                self.tree_type = self.tree_type.toggled();
                self.set_status(format!("Tree type: {}", self.tree_type));
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.reset(),
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
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Tree => self.tree_scroll = self.tree_scroll.saturating_sub(1),
                FocusedPane::Steps => self.steps_scroll = self.steps_scroll.saturating_sub(1),
                FocusedPane::Nodes => self.nodes_scroll = self.nodes_scroll.saturating_sub(1),
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Tree => self.tree_scroll = self.tree_scroll.saturating_add(1),
                FocusedPane::Steps => self.steps_scroll = self.steps_scroll.saturating_add(1),
                FocusedPane::Nodes => self.nodes_scroll = self.nodes_scroll.saturating_add(1),
            },
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        self.last_play_time = Instant::now()
                            .checked_sub(self.play_interval)
                            .unwrap_or(Instant::now());
                        self.set_status("Playing...".to_string());
                    } else {
                        self.set_status("Paused".to_string());
                    }
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                if self.history.jump_to_end().is_ok() {
                    self.set_status("Jumped to end".to_string());
                }
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                if self.history.rewind_to_start().is_ok() {
                    self.set_status("Jumped to start".to_string());
                }
            }
            _ => {}
        }
    }

    fn step_forward(&mut self) {
        match self.history.step_forward() {
            Ok(()) => self.set_status("Stepped forward".to_string()),
            Err(e) => self.set_status(format!("Cannot step forward: {}", e)),
        }
    }

    fn step_backward(&mut self) {
        match self.history.step_backward() {
            Ok(()) => self.set_status("Stepped backward".to_string()),
            Err(e) => self.set_status(format!("Cannot step backward: {}", e)),
        }
    }
}
