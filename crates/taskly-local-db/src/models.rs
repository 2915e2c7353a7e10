//! Task persistence operations.

use crate::connection::Database;
use crate::schema::{tasks, TIMESTAMP_FORMAT};
use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row, ToSql};
use taskly_core::{validate_name, Status, Task, TaskId};
use tracing::debug;

const SELECT_TASKS: &str = "SELECT id, name, project, status, created FROM tasks";
const ORDER_BY_CREATED: &str = "ORDER BY created ASC, id ASC";

/// Fields to change on an existing task. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub name: Option<String>,
    pub project: Option<String>,
    pub status: Option<Status>,
}

impl TaskUpdate {
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_project<S: Into<String>>(mut self, project: S) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.project.is_none() && self.status.is_none()
    }
}

/// Database operations for tasks.
pub struct TaskStore<'a> {
    db: &'a Database,
}

impl<'a> TaskStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Persist a new task with status `todo` and the current time.
    pub fn insert(&self, name: &str, project: &str) -> crate::Result<Task> {
        let conn = self.db.connection()?;
        validate_name(name)?;

        let created = now();
        let status = Status::Todo;
        conn.execute(
            r#"
            INSERT INTO tasks (name, project, status, created)
            VALUES (?, ?, ?, ?)
            "#,
            params![
                name,
                non_empty(project),
                status.label(),
                format_timestamp(&created)
            ],
        )
        .map_err(|e| crate::Error::database("insert task", e))?;

        let id = TaskId(conn.last_insert_rowid() as u64);
        debug!(%id, "task inserted");

        Ok(Task {
            id,
            name: name.to_string(),
            project: project.to_string(),
            status,
            created,
        })
    }

    /// Fetch a single task by ID.
    pub fn get(&self, id: TaskId) -> crate::Result<Task> {
        let conn = self.db.connection()?;
        conn.query_row(
            &format!("{SELECT_TASKS} WHERE id = ?"),
            params![sql_id(id)],
            row_to_task,
        )
        .optional()
        .map_err(|e| crate::Error::database(format!("query task {id}"), e))?
        .ok_or_else(|| crate::Error::not_found("lookup", id))
    }

    /// All tasks, oldest first.
    pub fn list(&self) -> crate::Result<Vec<Task>> {
        self.query(
            &format!("{SELECT_TASKS} {ORDER_BY_CREATED}"),
            params![],
            "list tasks",
        )
    }

    /// Tasks whose status label equals `status`, oldest first.
    pub fn list_by_status(&self, status: Status) -> crate::Result<Vec<Task>> {
        self.query(
            &format!("{SELECT_TASKS} WHERE status = ? {ORDER_BY_CREATED}"),
            params![status.label()],
            &format!("list tasks with status {:?}", status.label()),
        )
    }

    /// Apply the present fields of `changes` to a task.
    ///
    /// The returned task is the fetched record merged with `changes` in
    /// memory. It is not re-read after the write, so anything the database
    /// would rewrite on its own is not reflected.
    pub fn update(&self, id: TaskId, changes: TaskUpdate) -> crate::Result<Task> {
        let conn = self.db.connection()?;
        if let Some(name) = &changes.name {
            validate_name(name)?;
        }

        let mut task = self.get(id).map_err(|e| match e {
            crate::Error::NotFound { .. } => crate::Error::not_found("update", id),
            other => other,
        })?;
        if changes.is_empty() {
            debug!(%id, "nothing to update");
            return Ok(task);
        }

        let mut assignments = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();
        if let Some(name) = changes.name {
            assignments.push(format!("{} = ?", tasks::NAME));
            values.push(Box::new(name.clone()));
            task.name = name;
        }
        if let Some(project) = changes.project {
            assignments.push(format!("{} = ?", tasks::PROJECT));
            values.push(Box::new(non_empty(&project).map(str::to_string)));
            task.project = project;
        }
        if let Some(status) = changes.status {
            assignments.push(format!("{} = ?", tasks::STATUS));
            values.push(Box::new(status.label()));
            task.status = status;
        }
        values.push(Box::new(sql_id(id)));

        let sql = format!(
            "UPDATE tasks SET {} WHERE {} = ?",
            assignments.join(", "),
            tasks::ID
        );
        let params: Vec<&dyn ToSql> = values.iter().map(AsRef::as_ref).collect();

        let affected = conn
            .execute(&sql, params.as_slice())
            .map_err(|e| crate::Error::database(format!("update task {id}"), e))?;
        debug!(%id, affected, columns = assignments.len(), "task updated");

        if affected == 0 {
            return Err(crate::Error::not_found("update", id));
        }
        Ok(task)
    }

    /// Permanently remove a task.
    pub fn delete(&self, id: TaskId) -> crate::Result<()> {
        let conn = self.db.connection()?;
        let affected = conn
            .execute("DELETE FROM tasks WHERE id = ?", params![sql_id(id)])
            .map_err(|e| crate::Error::database(format!("delete task {id}"), e))?;
        debug!(%id, affected, "task deleted");

        if affected == 0 {
            return Err(crate::Error::not_found("deletion", id));
        }
        Ok(())
    }

    fn query(
        &self,
        sql: &str,
        params: &[&dyn ToSql],
        operation: &str,
    ) -> crate::Result<Vec<Task>> {
        let conn = self.db.connection()?;
        let wrap = |e| crate::Error::database(operation, e);

        let mut stmt = conn.prepare(sql).map_err(wrap)?;
        let rows = stmt.query_map(params, row_to_task).map_err(wrap)?;

        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(row.map_err(wrap)?);
        }
        debug!(count = tasks.len(), "{operation}");
        Ok(tasks)
    }
}

fn row_to_task(row: &Row<'_>) -> rusqlite::Result<Task> {
    let id: i64 = row.get(0)?;
    let project: Option<String> = row.get(2)?;

    let status: String = row.get(3)?;
    let status = status
        .parse::<Status>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

    let created: String = row.get(4)?;
    let created = parse_timestamp(&created)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

    Ok(Task {
        id: TaskId(id as u64),
        name: row.get(1)?,
        project: project.unwrap_or_default(),
        status,
        created,
    })
}

fn sql_id(id: TaskId) -> i64 {
    id.0 as i64
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Current time truncated to the stored precision.
fn now() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a stored timestamp. Besides RFC 3339, accepts the space separated
/// forms written by `CURRENT_TIMESTAMP` and by other SQLite clients.
fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f").map(|ts| ts.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamps_round_trip_at_millisecond_precision() {
        let ts = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let text = format_timestamp(&ts);
        assert_eq!(text, "2023-11-14T22:13:20.123Z");
        assert_eq!(parse_timestamp(&text).unwrap(), ts);
    }

    #[test]
    fn legacy_timestamp_forms_parse() {
        let plain = parse_timestamp("2024-05-01 08:30:00").unwrap();
        assert_eq!(plain, Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap());

        let offset = parse_timestamp("2024-05-01 10:30:00.5+02:00").unwrap();
        assert_eq!(offset.timestamp_millis(), plain.timestamp_millis() + 500);

        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn now_has_no_sub_millisecond_part() {
        assert_eq!(now().timestamp_subsec_nanos() % 1_000_000, 0);
    }

    #[test]
    fn update_builder_tracks_presence() {
        assert!(TaskUpdate::default().is_empty());
        let changes = TaskUpdate::default().with_status(Status::Done);
        assert!(!changes.is_empty());
        assert_eq!(changes.name, None);
        assert_eq!(changes.status, Some(Status::Done));
    }
}
