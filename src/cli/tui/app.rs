//! TUI application state and key handling

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::event::{Event, EventHandler};
use super::terminal::Terminal;
use super::views;
use crate::cli::transition_message;
use crate::config::{Config, Labels};
use crate::domain::{Column, Task, TaskBoard, Transition};

/// How often age labels are refreshed while idle
const AGE_REFRESH: Duration = Duration::from_secs(30);

const HELP: &str =
    "Tab:focus j/k:move Enter/c:complete r:restore d:delete a:add q:quit";

/// Which part of the screen receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    Pending,
    Completed,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Input => Focus::Pending,
            Focus::Pending => Focus::Completed,
            Focus::Completed => Focus::Input,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Input => Focus::Completed,
            Focus::Pending => Focus::Input,
            Focus::Completed => Focus::Pending,
        }
    }

    /// The board column this focus points at, if any
    pub fn column(self) -> Option<Column> {
        match self {
            Focus::Input => None,
            Focus::Pending => Some(Column::Pending),
            Focus::Completed => Some(Column::Completed),
        }
    }
}

/// Application state
pub struct App {
    /// The board being edited
    board: TaskBoard,

    /// Column titles and empty-state copy
    labels: Labels,

    /// Show relative ages next to tasks
    show_age: bool,

    /// Current focus
    focus: Focus,

    /// Selected index in the pending column
    pending_index: usize,

    /// Selected index in the completed column
    completed_index: usize,

    /// Footer message, replaced on every transition
    status_message: Option<String>,

    /// Transitions reported by the board subscription, not yet handled
    transitions: Rc<RefCell<Vec<(Transition, String)>>>,

    /// Whether the screen is stale
    needs_redraw: bool,

    /// When the screen was last drawn
    last_draw: Instant,

    /// Whether to quit
    should_quit: bool,
}

impl App {
    /// Create a new application around an empty board
    pub fn new(config: &Config) -> Self {
        let mut board = TaskBoard::new();
        let transitions = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&transitions);
        board.subscribe(move |transition: &Transition, state| {
            sink.borrow_mut()
                .push((transition.clone(), transition_message(transition, state)));
        });

        Self {
            board,
            labels: config.labels.clone(),
            show_age: config.ui.show_age,
            focus: Focus::Input,
            pending_index: 0,
            completed_index: 0,
            status_message: None,
            transitions,
            needs_redraw: true,
            last_draw: Instant::now(),
            should_quit: false,
        }
    }

    /// Run the main application loop
    pub fn run(&mut self, terminal: &mut Terminal, events: EventHandler) -> Result<()> {
        while !self.should_quit {
            if self.needs_redraw {
                terminal.draw(|frame| views::board::draw(frame, self))?;
                self.needs_redraw = false;
                self.last_draw = Instant::now();
            }

            match events.next()? {
                Event::Key(key) => self.handle_key(key),
                Event::Resize => self.needs_redraw = true,
                Event::Tick => self.on_tick(),
            }
        }

        Ok(())
    }

    /// Redraw periodically so age labels stay current
    fn on_tick(&mut self) {
        if self.show_age
            && !self.board.state().is_empty()
            && self.last_draw.elapsed() >= AGE_REFRESH
        {
            self.needs_redraw = true;
        }
    }

    /// Handle key events
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.focus {
            Focus::Input => self.handle_input_key(key),
            Focus::Pending | Focus::Completed => self.handle_list_key(key),
        }

        self.apply_transitions();
        self.needs_redraw = true;
    }

    /// Handle keys while typing a new task
    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                self.board.submit_draft();
            }
            KeyCode::Esc => {
                self.focus = Focus::Pending;
            }
            KeyCode::Tab => {
                self.focus = self.focus.next();
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
            }
            KeyCode::Backspace => {
                let mut draft = self.board.draft().to_string();
                draft.pop();
                self.board.set_draft(draft);
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                let mut draft = self.board.draft().to_string();
                draft.push(c);
                self.board.set_draft(draft);
            }
            _ => {}
        }
    }

    /// Handle keys while a column has focus
    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }

            // Focus
            KeyCode::Tab => {
                self.focus = self.focus.next();
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
            }
            KeyCode::Char('a') | KeyCode::Char('i') => {
                self.focus = Focus::Input;
            }
            KeyCode::Char('h') | KeyCode::Left => {
                self.focus = Focus::Pending;
            }
            KeyCode::Char('l') | KeyCode::Right => {
                self.focus = Focus::Completed;
            }

            // Selection
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection(-1);
            }

            // Transitions
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('c')
                if self.focus == Focus::Pending =>
            {
                self.complete_selected();
            }
            KeyCode::Char('r') | KeyCode::Char('u') if self.focus == Focus::Completed => {
                self.restore_selected();
            }
            KeyCode::Char('d') | KeyCode::Delete if self.focus == Focus::Completed => {
                self.delete_selected();
            }

            KeyCode::Char('?') => {
                self.status_message = Some(HELP.to_string());
            }
            KeyCode::Esc => {
                self.status_message = None;
            }

            _ => {}
        }
    }

    fn complete_selected(&mut self) {
        match self.selected_task(Column::Pending).map(|t| t.id) {
            Some(id) => {
                self.board.complete_task(id);
            }
            None => self.status_message = Some("Nothing to complete".to_string()),
        }
    }

    fn restore_selected(&mut self) {
        match self.selected_task(Column::Completed).map(|t| t.id) {
            Some(id) => {
                self.board.restore_task(id);
            }
            None => self.status_message = Some("Nothing to restore".to_string()),
        }
    }

    fn delete_selected(&mut self) {
        match self.selected_task(Column::Completed).map(|t| t.id) {
            Some(id) => {
                self.board.delete_task(id);
            }
            None => self.status_message = Some("Nothing to delete".to_string()),
        }
    }

    /// Move the selection in the focused column, wrapping at both ends
    fn move_selection(&mut self, delta: isize) {
        let Some(column) = self.focus.column() else {
            return;
        };
        let len = self.board.state().column(column).len();
        if len == 0 {
            return;
        }

        let index = self.index_mut(column);
        *index = (*index as isize + delta).rem_euclid(len as isize) as usize;
    }

    /// Consume transitions queued by the board subscription
    fn apply_transitions(&mut self) {
        let queued: Vec<_> = self.transitions.borrow_mut().drain(..).collect();

        for (transition, message) in queued {
            if transition != Transition::DraftChanged {
                self.status_message = Some(message);
            }
        }

        for column in [Column::Pending, Column::Completed] {
            let len = self.board.state().column(column).len();
            let index = self.index_mut(column);
            *index = (*index).min(len.saturating_sub(1));
        }
    }

    fn index_mut(&mut self, column: Column) -> &mut usize {
        match column {
            Column::Pending => &mut self.pending_index,
            Column::Completed => &mut self.completed_index,
        }
    }

    // Public accessors for views

    pub fn board(&self) -> &TaskBoard {
        &self.board
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn show_age(&self) -> bool {
        self.show_age
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn selected_index(&self, column: Column) -> usize {
        match column {
            Column::Pending => self.pending_index,
            Column::Completed => self.completed_index,
        }
    }

    pub fn selected_task(&self, column: Column) -> Option<&Task> {
        self.board
            .state()
            .column(column)
            .get(self.selected_index(column))
    }

    #[cfg(test)]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
