//! Command handlers run against an in-memory store with captured output.

use taskly_cli::{Cli, Parser};
use taskly_core::{Status, Task, TaskId};
use taskly_local_db::{Database, TaskUpdate};

fn open() -> Database {
    Database::open_in_memory().expect("Failed to open in-memory database")
}

fn run(db: &Database, args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(std::iter::once("taskly").chain(args.iter().copied()))?;
    let mut out = Vec::new();
    cli.command.execute(db, &mut out, false)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn add_reports_the_new_task() {
    let db = open();

    let output = run(&db, &["add", "Buy milk", "-p", "home"]).unwrap();
    assert_eq!(output, "Task ('Buy milk') added.\n");

    let tasks = db.tasks().list().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].project, "home");
    assert_eq!(tasks[0].status, Status::Todo);
}

#[test]
fn add_rejects_empty_name() {
    let db = open();

    let err = run(&db, &["add", ""]).unwrap_err();
    assert!(format!("{err:#}").contains("task name must not be empty"));
    assert!(db.tasks().list().unwrap().is_empty());
}

#[test]
fn list_without_tasks_suggests_adding_one() {
    let db = open();

    let output = run(&db, &["list"]).unwrap();
    assert_eq!(output, "No tasks found. Add one with 'taskly add \"My new task\"'\n");
}

#[test]
fn list_renders_a_table() {
    let db = open();
    db.tasks().insert("Buy milk", "home").unwrap();
    db.tasks().insert("Write report", "").unwrap();

    let output = run(&db, &["list"]).unwrap();
    assert!(output.contains("│ ID │"));
    assert!(output.contains("Buy milk"));
    assert!(output.contains("Write report"));
    assert!(!output.contains("\u{1b}["));
}

#[test]
fn list_filters_by_status_as_json() {
    let db = open();
    let store = db.tasks();
    let first = store.insert("first", "").unwrap();
    store.insert("second", "").unwrap();
    store
        .update(first.id, TaskUpdate::default().with_status(Status::Done))
        .unwrap();

    let output = run(&db, &["list", "--status", "done", "--json"]).unwrap();
    let tasks: Vec<Task> = serde_json::from_str(&output).unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, first.id);
    assert_eq!(tasks[0].status, Status::Done);
}

#[test]
fn update_changes_only_given_fields() {
    let db = open();
    let task = db.tasks().insert("Draft", "writing").unwrap();

    let output = run(&db, &["update", &task.id.to_string(), "--status", "1"]).unwrap();
    assert_eq!(output, "Task ('Draft') updated.\n");

    let stored = db.tasks().get(task.id).unwrap();
    assert_eq!(stored.name, "Draft");
    assert_eq!(stored.project, "writing");
    assert_eq!(stored.status, Status::InProgress);
}

#[test]
fn update_reports_the_merged_task() {
    let db = open();
    let task = db.tasks().insert("Old name", "").unwrap();

    let output = run(&db, &["update", &task.id.to_string(), "-n", "New name"]).unwrap();
    assert_eq!(output, "Task ('New name') updated.\n");
    assert_eq!(db.tasks().get(task.id).unwrap().name, "New name");
}

#[test]
fn update_rejects_unknown_status_code() {
    let db = open();
    let task = db.tasks().insert("Draft", "").unwrap();

    let err = run(&db, &["update", &task.id.to_string(), "-s", "5"]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid status value: 5. Use 0=todo, 1=in progress, 2=done"
    );
    assert_eq!(db.tasks().get(task.id).unwrap().status, Status::Todo);
}

#[test]
fn update_missing_task_fails() {
    let db = open();

    let err = run(&db, &["update", "42", "-n", "anything"]).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("failed to update task 42"));
    assert!(message.contains("task with ID 42 not found for update"));
}

#[test]
fn delete_names_the_removed_task() {
    let db = open();
    let task = db.tasks().insert("Obsolete", "").unwrap();

    let output = run(&db, &["delete", &task.id.to_string()]).unwrap();
    assert_eq!(output, "Task ('Obsolete') deleted.\n");
    assert!(db.tasks().get(task.id).unwrap_err().is_not_found());
}

#[test]
fn delete_missing_task_fails() {
    let db = open();

    let err = run(&db, &["delete", "9"]).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("failed to delete task 9"));
    assert!(message.contains("task with ID 9 not found for deletion"));
}

#[test]
fn kanban_without_tasks_does_not_open_the_board() {
    let db = open();

    let output = run(&db, &["kanban"]).unwrap();
    assert_eq!(output, "No tasks found to display on the board.\n");
}

#[test]
fn commands_fail_on_a_closed_store() {
    let mut db = open();
    db.tasks().insert("kept", "").unwrap();
    db.close().unwrap();

    let err = run(&db, &["list"]).unwrap_err();
    assert!(format!("{err:#}").contains("database is not open"));
    assert!(db.tasks().get(TaskId(1)).is_err());
}
