//! The Model layer - board state and key handling (no I/O, no Ratatui)
//!
//! Key presses update the board deterministically. Anything that needs the
//! store is returned as a [`BoardAction`] for the caller to perform.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use taskly_core::{Status, Task, TaskId};

/// Requests the board makes of its caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardAction {
    /// Persist a new status for a task
    Move { id: TaskId, to: Status },
    /// Close the board
    Quit,
}

/// One status column
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub status: Status,
    /// Tasks in creation order
    pub tasks: Vec<Task>,
    /// Selected index within the visible (filtered) tasks
    pub selected: usize,
}

impl Column {
    fn new(status: Status) -> Self {
        Self {
            status,
            tasks: Vec::new(),
            selected: 0,
        }
    }

    fn insert(&mut self, task: Task) {
        let pos = self
            .tasks
            .iter()
            .position(|t| (t.created, t.id) > (task.created, task.id))
            .unwrap_or(self.tasks.len());
        self.tasks.insert(pos, task);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    Filtering,
}

/// Board state
#[derive(Debug, Clone)]
pub struct Board {
    columns: Vec<Column>,
    focus: Status,
    filter: String,
    mode: Mode,
    error: Option<String>,
}

impl Board {
    /// Build a board by sorting each task into the column of its status
    pub fn new(tasks: Vec<Task>) -> Self {
        let mut columns: Vec<Column> = Status::all().iter().copied().map(Column::new).collect();
        for task in tasks {
            columns[task.status.index()].insert(task);
        }

        Self {
            columns,
            focus: Status::Todo,
            filter: String::new(),
            mode: Mode::Normal,
            error: None,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, status: Status) -> &Column {
        &self.columns[status.index()]
    }

    /// Status of the focused column
    pub fn focus(&self) -> Status {
        self.focus
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn is_filtering(&self) -> bool {
        self.mode == Mode::Filtering
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error<S: Into<String>>(&mut self, message: S) {
        self.error = Some(message.into());
    }

    /// Tasks of a column that match the current filter
    pub fn visible_tasks(&self, status: Status) -> Vec<&Task> {
        let needle = self.filter.to_lowercase();
        self.column(status)
            .tasks
            .iter()
            .filter(|task| {
                needle.is_empty() || task.filter_value().to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Currently selected task in the focused column
    pub fn selected_task(&self) -> Option<&Task> {
        let selected = self.column(self.focus).selected;
        self.visible_tasks(self.focus).get(selected).copied()
    }

    /// Process a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<BoardAction> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(BoardAction::Quit);
        }
        self.error = None;

        match self.mode {
            Mode::Filtering => {
                self.handle_filter_key(key);
                None
            }
            Mode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Option<BoardAction> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(BoardAction::Quit),
            KeyCode::Left | KeyCode::Char('h') => {
                self.focus = self.focus.prev();
                None
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.focus = self.focus.next();
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let column = &mut self.columns[self.focus.index()];
                column.selected = column.selected.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let max_index = self.visible_tasks(self.focus).len().saturating_sub(1);
                let column = &mut self.columns[self.focus.index()];
                if column.selected < max_index {
                    column.selected += 1;
                }
                None
            }
            KeyCode::Enter | KeyCode::Char('n') => {
                self.selected_task().map(|task| BoardAction::Move {
                    id: task.id,
                    to: task.status.next(),
                })
            }
            KeyCode::Backspace | KeyCode::Char('p') => {
                self.selected_task().map(|task| BoardAction::Move {
                    id: task.id,
                    to: task.status.prev(),
                })
            }
            KeyCode::Char('/') => {
                self.mode = Mode::Filtering;
                None
            }
            _ => None,
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => self.filter.push(c),
            KeyCode::Backspace => {
                self.filter.pop();
            }
            KeyCode::Enter => self.mode = Mode::Normal,
            KeyCode::Esc => {
                self.filter.clear();
                self.mode = Mode::Normal;
            }
            _ => {}
        }
        self.clamp_selections();
    }

    /// Replace a task with its stored version, moving it to the column of
    /// its new status
    pub fn apply_update(&mut self, task: Task) {
        for column in &mut self.columns {
            column.tasks.retain(|t| t.id != task.id);
        }
        self.columns[task.status.index()].insert(task);
        self.clamp_selections();
    }

    fn clamp_selections(&mut self) {
        for status in Status::all() {
            let max_index = self.visible_tasks(*status).len().saturating_sub(1);
            let column = &mut self.columns[status.index()];
            column.selected = column.selected.min(max_index);
        }
    }
}
