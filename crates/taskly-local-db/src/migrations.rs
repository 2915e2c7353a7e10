//! Database migration management.

use crate::schema::{CREATE_TASKS_TABLE, SCHEMA_VERSION, TABLE_TASKS};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

/// Database migration manager.
pub struct MigrationManager;

impl MigrationManager {
    /// Apply all pending migrations to the database.
    pub fn migrate(conn: &Connection) -> crate::Result<()> {
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| crate::Error::migration(format!("failed to begin migration: {e}")))?;

        tx.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )
        .map_err(|e| crate::Error::migration(format!("failed to create schema_migrations: {e}")))?;

        let current_version = Self::current_version(&tx)?.unwrap_or(0);
        debug!(current_version, target_version = SCHEMA_VERSION, "checking schema");

        // Apply migrations sequentially
        if current_version < 1 {
            Self::apply_migration_1(&tx)?;
        }

        tx.commit()
            .map_err(|e| crate::Error::migration(format!("failed to commit migration: {e}")))?;
        Ok(())
    }

    /// Apply migration version 1 - the tasks table.
    ///
    /// A tasks table left by an earlier install is adopted as is.
    fn apply_migration_1(conn: &Connection) -> crate::Result<()> {
        let exists = Self::table_exists(conn, TABLE_TASKS)?;
        if exists {
            debug!("tasks table already present");
        } else {
            conn.execute_batch(CREATE_TASKS_TABLE).map_err(|e| {
                crate::Error::migration(format!("failed to create '{TABLE_TASKS}' table: {e}"))
            })?;
            info!("created tasks table");
        }

        conn.execute(
            "INSERT OR REPLACE INTO schema_migrations (version) VALUES (?)",
            params![1],
        )
        .map_err(|e| crate::Error::migration(format!("failed to record version 1: {e}")))?;

        Ok(())
    }

    /// Check whether a table with the given name exists.
    pub fn table_exists(conn: &Connection, name: &str) -> crate::Result<bool> {
        let found: Option<String> = conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?",
                params![name],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| {
                crate::Error::migration(format!("failed to check if '{name}' table exists: {e}"))
            })?;

        Ok(found.as_deref() == Some(name))
    }

    /// Get the current schema version.
    pub fn current_version(conn: &Connection) -> crate::Result<Option<u32>> {
        conn.query_row("SELECT MAX(version) FROM schema_migrations", params![], |row| {
            row.get(0)
        })
        .map_err(|e| crate::Error::migration(format!("failed to read schema version: {e}")))
    }
}
