//! Database schema definitions and constants.

// Current schema version
pub const SCHEMA_VERSION: u32 = 1;

/// File name of the database inside the data directory.
pub const DB_FILE_NAME: &str = "tasks.db";

// Table names
pub const TABLE_SCHEMA_MIGRATIONS: &str = "schema_migrations";
pub const TABLE_TASKS: &str = "tasks";

// Column names for tasks table
pub mod tasks {
    pub const ID: &str = "id";
    pub const NAME: &str = "name";
    pub const PROJECT: &str = "project";
    pub const STATUS: &str = "status";
    pub const CREATED: &str = "created";
}

/// DDL for the tasks table.
pub const CREATE_TASKS_TABLE: &str = r#"
CREATE TABLE tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK(length(name) > 0),
    project TEXT,
    status TEXT NOT NULL DEFAULT 'todo' CHECK(status IN ('todo', 'in progress', 'done')),
    created DATETIME NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now'))
);

CREATE INDEX IF NOT EXISTS idx_tasks_created ON tasks(created);
CREATE INDEX IF NOT EXISTS idx_tasks_status ON tasks(status);
"#;

/// Storage format of the `created` column. Matches the column default so
/// text order equals time order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";
