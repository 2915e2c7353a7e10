//! Task entity model for taskly.
//!
//! This crate defines the task record and its three-state status lifecycle,
//! independent of how tasks are stored or displayed.

pub mod error;
pub mod task;

/// Result type used by model validation.
pub type Result<T> = std::result::Result<T, Error>;

/// Validation error type.
pub use error::Error;

/// Task entity and status lifecycle.
pub use task::{validate_name, Status, Task, TaskId};
