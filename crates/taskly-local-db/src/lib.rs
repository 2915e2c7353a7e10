//! SQLite task store for taskly.
//!
//! This crate owns the on-disk location of the task database, provisions its
//! schema on first use and exposes CRUD operations over task records.

pub mod connection;
pub mod migrations;
pub mod models;
pub mod schema;

use std::path::PathBuf;
use taskly_core::TaskId;

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for database operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not determine data directory: no platform data directory or home directory")]
    NoDataDir,

    #[error("could not initialize data directory '{}': {source}", path.display())]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open database '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Migration error: {message}")]
    Migration { message: String },

    #[error("database is not open")]
    NotOpen,

    #[error("task with ID {id} not found for {operation}")]
    NotFound { operation: &'static str, id: TaskId },

    #[error(transparent)]
    Validation(#[from] taskly_core::Error),

    #[error("{operation} failed: {source}")]
    Database {
        operation: String,
        #[source]
        source: rusqlite::Error,
    },
}

impl Error {
    /// Create a new migration error.
    pub fn migration<S: Into<String>>(message: S) -> Self {
        Self::Migration {
            message: message.into(),
        }
    }

    /// Create a not-found error for the given operation.
    pub fn not_found(operation: &'static str, id: TaskId) -> Self {
        Self::NotFound { operation, id }
    }

    /// Wrap a storage error with the operation it happened in.
    pub fn database<S: Into<String>>(operation: S, source: rusqlite::Error) -> Self {
        Self::Database {
            operation: operation.into(),
            source,
        }
    }

    /// Whether the error means the referenced task does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Database connection and management.
pub use connection::{ensure_data_dir, resolve_data_dir, Database, BUSY_TIMEOUT, HOME_ENV};

/// Task persistence operations.
pub use models::{TaskStore, TaskUpdate};

/// Schema definitions and constants.
pub use schema::*;
