use anyhow::{Context, Result};
use clap::Args;
use std::io::Write;
use taskly_core::{Status, TaskId};
use taskly_local_db::{Database, TaskUpdate};
use taskly_tui::App;
use tracing::warn;

use crate::table::render_table;

/// Arguments for adding a task
#[derive(Args)]
pub struct AddArgs {
    /// Name of the task
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Assign task to a specific project
    #[arg(short, long, value_name = "PROJECT", default_value = "")]
    pub project: String,
}

/// Arguments for listing tasks
#[derive(Args)]
pub struct ListArgs {
    /// Only show tasks with this status ("todo", "in progress" or "done")
    #[arg(long, value_name = "LABEL")]
    pub status: Option<Status>,

    /// Print tasks as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Arguments for updating a task
#[derive(Args)]
pub struct UpdateArgs {
    /// ID of the task to update
    #[arg(value_name = "ID")]
    pub id: u64,

    /// Update the name of the task
    #[arg(short, long)]
    pub name: Option<String>,

    /// Update the project of the task
    #[arg(short, long)]
    pub project: Option<String>,

    /// Update status: 0=todo, 1=in progress, 2=done
    #[arg(short, long, value_name = "CODE", allow_negative_numbers = true)]
    pub status: Option<i64>,
}

/// Arguments for deleting a task
#[derive(Args)]
pub struct DeleteArgs {
    /// ID of the task to delete
    #[arg(value_name = "ID")]
    pub id: u64,
}

impl AddArgs {
    pub fn run(self, db: &Database, out: &mut dyn Write) -> Result<()> {
        let task = db
            .tasks()
            .insert(&self.name, &self.project)
            .context("failed to add task")?;
        writeln!(out, "Task ('{}') added.", task.name)?;
        Ok(())
    }
}

impl ListArgs {
    pub fn run(self, db: &Database, out: &mut dyn Write, color: bool) -> Result<()> {
        let store = db.tasks();
        let tasks = match self.status {
            Some(status) => store.list_by_status(status),
            None => store.list(),
        }
        .context("failed to list tasks")?;

        if self.json {
            writeln!(out, "{}", serde_json::to_string_pretty(&tasks)?)?;
            return Ok(());
        }

        if tasks.is_empty() {
            writeln!(out, "No tasks found. Add one with 'taskly add \"My new task\"'")?;
            return Ok(());
        }

        writeln!(out, "{}", render_table(&tasks, color))?;
        Ok(())
    }
}

impl UpdateArgs {
    pub fn run(self, db: &Database, out: &mut dyn Write) -> Result<()> {
        let status = self.status.map(Status::from_code).transpose()?;
        let changes = TaskUpdate {
            name: self.name,
            project: self.project,
            status,
        };

        let task = db
            .tasks()
            .update(TaskId(self.id), changes)
            .with_context(|| format!("failed to update task {}", self.id))?;
        writeln!(out, "Task ('{}') updated.", task.name)?;
        Ok(())
    }
}

impl DeleteArgs {
    pub fn run(self, db: &Database, out: &mut dyn Write) -> Result<()> {
        let id = TaskId(self.id);
        let store = db.tasks();

        // Look the task up first so the confirmation can name it
        let existing = match store.get(id) {
            Ok(task) => Some(task),
            Err(e) if e.is_not_found() => None,
            Err(e) => {
                warn!(%id, error = %e, "could not look up task before deletion");
                None
            }
        };

        store
            .delete(id)
            .with_context(|| format!("failed to delete task {id}"))?;

        match existing {
            Some(task) => writeln!(out, "Task ('{}') deleted.", task.name)?,
            None => writeln!(out, "Task deleted.")?,
        }
        Ok(())
    }
}

/// Print where the database lives without opening it
pub fn print_storage_path(out: &mut dyn Write) -> Result<()> {
    let path = Database::default_path().context("could not determine database path")?;
    writeln!(out, "{}", path.display())?;
    Ok(())
}

/// Show all tasks on the Kanban board
pub fn run_kanban(db: &Database, out: &mut dyn Write) -> Result<()> {
    let tasks = db
        .tasks()
        .list()
        .context("failed to get tasks for kanban")?;

    if tasks.is_empty() {
        writeln!(out, "No tasks found to display on the board.")?;
        return Ok(());
    }

    App::new(db, tasks).run().context("kanban board error")?;
    writeln!(out, "\nKanban board closed.")?;
    Ok(())
}
