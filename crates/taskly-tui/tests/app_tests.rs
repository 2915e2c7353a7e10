//! Board moves written through the store.

use taskly_core::{Status, TaskId};
use taskly_local_db::Database;
use taskly_tui::App;

#[test]
fn move_task_persists_and_rebuckets() {
    let db = Database::open_in_memory().expect("Failed to open in-memory database");
    let task = db.tasks().insert("Carry me", "").unwrap();

    let tasks = db.tasks().list().unwrap();
    let mut app = App::new(&db, tasks);
    app.move_task(task.id, Status::InProgress);

    assert!(app.board().column(Status::Todo).tasks.is_empty());
    assert_eq!(app.board().column(Status::InProgress).tasks.len(), 1);
    assert_eq!(app.board().error(), None);
    assert_eq!(db.tasks().get(task.id).unwrap().status, Status::InProgress);
}

#[test]
fn failed_move_is_reported_on_the_board() {
    let db = Database::open_in_memory().expect("Failed to open in-memory database");
    let mut app = App::new(&db, Vec::new());

    app.move_task(TaskId(99), Status::Done);

    let error = app.board().error().expect("error should be shown");
    assert!(error.contains("Failed to move task 99"));
    assert!(error.contains("not found"));
}
