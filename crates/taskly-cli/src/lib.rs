//! taskly CLI library

pub mod logging;
pub mod table;
pub mod task;

use anyhow::{Context, Result};
use std::io::{self, IsTerminal, Write};
use taskly_local_db::Database;
use tracing::warn;

// Re-export CLI types for testing
pub use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "taskly")]
#[command(about = "A CLI task management tool")]
#[command(
    version,
    long_about = "taskly helps you manage your tasks from the command line.\n\
                  You can add, list, update, delete, and view tasks on a Kanban board."
)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new task
    Add(task::AddArgs),
    /// List all your tasks
    List(task::ListArgs),
    /// Update a task's details (name, project, status)
    Update(task::UpdateArgs),
    /// Delete a task by its ID
    Delete(task::DeleteArgs),
    /// Show the location of the tasks database file
    Where,
    /// View tasks on an interactive Kanban board
    Kanban,
}

impl Cli {
    /// Run the selected command against stdout
    pub fn run(self) -> Result<()> {
        let mut out = io::stdout();
        let color = out.is_terminal() && std::env::var_os("NO_COLOR").is_none();

        if let Commands::Where = self.command {
            return task::print_storage_path(&mut out);
        }

        let mut db = Database::open_default().context("failed to initialize database")?;
        let result = self.command.execute(&db, &mut out, color);
        let closed = db.close().context("failed to close database");
        settle(result, closed)
    }
}

/// Combine a command result with the result of closing the store. The
/// command error wins; a close error behind it is logged, not dropped.
fn settle(result: Result<()>, closed: Result<()>) -> Result<()> {
    match (result, closed) {
        (Err(err), Err(close_err)) => {
            let close_err = format!("{close_err:#}");
            warn!(error = %close_err, "failed to close database");
            Err(err)
        }
        (Err(err), Ok(())) => Err(err),
        (Ok(()), closed) => closed,
    }
}

impl Commands {
    /// Execute the command with an already opened store
    pub fn execute(self, db: &Database, out: &mut dyn Write, color: bool) -> Result<()> {
        match self {
            Commands::Add(args) => args.run(db, out),
            Commands::List(args) => args.run(db, out, color),
            Commands::Update(args) => args.run(db, out),
            Commands::Delete(args) => args.run(db, out),
            Commands::Where => task::print_storage_path(out),
            Commands::Kanban => task::run_kanban(db, out),
        }
    }
}
