//! Terminal loop that drives the board

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout, Stdout};
use std::ops::{Deref, DerefMut};
use taskly_core::{Status, Task, TaskId};
use taskly_local_db::{Database, TaskUpdate};
use tracing::{info, warn};

use crate::error::TuiResult;
use crate::model::{Board, BoardAction};
use crate::ui;

/// Raw-mode alternate-screen terminal, restored on drop
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn enter() -> TuiResult<Self> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
        let terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => terminal,
            Err(e) => {
                restore();
                return Err(e.into());
            }
        };
        Ok(Self { terminal })
    }
}

impl Deref for TerminalGuard {
    type Target = Terminal<CrosstermBackend<Stdout>>;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for TerminalGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore();
        let _ = self.terminal.show_cursor();
    }
}

fn restore() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Kanban board application
pub struct App<'a> {
    db: &'a Database,
    board: Board,
}

impl<'a> App<'a> {
    /// Create a board over the given tasks, writing moves to `db`
    pub fn new(db: &'a Database, tasks: Vec<Task>) -> Self {
        Self {
            db,
            board: Board::new(tasks),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Run until the user quits
    pub fn run(&mut self) -> TuiResult<()> {
        let mut terminal = TerminalGuard::enter()?;

        loop {
            let board = &self.board;
            terminal.draw(|f| {
                let area = f.area();
                ui::draw_board(f, area, board);
            })?;

            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match self.board.handle_key(key) {
                        Some(BoardAction::Quit) => break,
                        Some(BoardAction::Move { id, to }) => self.move_task(id, to),
                        None => {}
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Persist a status change and reflect it on the board. Failures are
    /// shown on the board instead of ending the session.
    pub fn move_task(&mut self, id: TaskId, to: Status) {
        match self
            .db
            .tasks()
            .update(id, TaskUpdate::default().with_status(to))
        {
            Ok(task) => {
                info!(%id, status = %to, "task moved");
                self.board.apply_update(task);
            }
            Err(e) => {
                warn!(%id, error = %e, "failed to move task");
                self.board.set_error(format!("Failed to move task {id}: {e}"));
            }
        }
    }
}
