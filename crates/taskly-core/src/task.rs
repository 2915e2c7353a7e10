//! Task entity and its status lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a task, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status of a task in its lifecycle.
///
/// The three values form a cycle `todo -> in progress -> done -> todo`.
/// Each value is persisted and displayed as its canonical lowercase label.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Task has been created but work has not started.
    #[default]
    #[serde(rename = "todo")]
    Todo,
    /// Task is being worked on.
    #[serde(rename = "in progress")]
    InProgress,
    /// Task is finished.
    #[serde(rename = "done")]
    Done,
}

impl Status {
    /// All statuses in canonical order.
    pub const ALL: [Status; 3] = [Status::Todo, Status::InProgress, Status::Done];

    /// All statuses in canonical order.
    pub fn all() -> &'static [Status] {
        &Self::ALL
    }

    /// Numeric code of the status (0, 1 or 2).
    pub fn code(self) -> u8 {
        match self {
            Status::Todo => 0,
            Status::InProgress => 1,
            Status::Done => 2,
        }
    }

    /// Position of the status in canonical order, usable as a column index.
    pub fn index(self) -> usize {
        usize::from(self.code())
    }

    /// Canonical lowercase label.
    pub fn label(self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in progress",
            Status::Done => "done",
        }
    }

    /// Look up a status by numeric code, rejecting anything outside 0..=2.
    pub fn from_code(code: i64) -> crate::Result<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|status| i64::from(status.code()) == code)
            .ok_or_else(|| crate::Error::invalid_status_code(code))
    }

    /// The status that follows in the cycle; `done` wraps to `todo`.
    pub fn next(self) -> Self {
        match self {
            Status::Todo => Status::InProgress,
            Status::InProgress => Status::Done,
            Status::Done => Status::Todo,
        }
    }

    /// The status that precedes in the cycle; `todo` wraps to `done`.
    pub fn prev(self) -> Self {
        match self {
            Status::Todo => Status::Done,
            Status::InProgress => Status::Todo,
            Status::Done => Status::InProgress,
        }
    }

    /// Human readable list of valid `code=label` pairs, e.g. `0=todo, 1=in progress, 2=done`.
    pub fn valid_options() -> String {
        Self::all()
            .iter()
            .map(|status| format!("{}={}", status.code(), status.label()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Status {
    type Err = crate::Error;

    /// Parse a canonical label. Matching is exact: no case folding or trimming.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|status| status.label() == s)
            .ok_or_else(|| crate::Error::invalid_status_label(s))
    }
}

/// A single trackable work item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    /// Project label; empty when the task has no project.
    pub project: String,
    pub status: Status,
    pub created: DateTime<Utc>,
}

impl Task {
    /// Project label, or `None` when the task is not grouped into a project.
    pub fn project(&self) -> Option<&str> {
        if self.project.is_empty() {
            None
        } else {
            Some(&self.project)
        }
    }

    /// Key used when filtering tasks on the board.
    pub fn filter_value(&self) -> &str {
        &self.name
    }

    /// Short title shown for the task.
    pub fn title(&self) -> &str {
        &self.name
    }

    /// One-line description derived from the project, if any.
    pub fn description(&self) -> Option<String> {
        self.project().map(|project| format!("Project: {project}"))
    }

    /// Creation date as `YYYY-MM-DD` in local time.
    pub fn created_date(&self) -> String {
        self.created
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d")
            .to_string()
    }
}

/// Reject names that cannot be persisted.
pub fn validate_name(name: &str) -> crate::Result<()> {
    if name.is_empty() {
        return Err(crate::Error::EmptyName);
    }
    Ok(())
}
