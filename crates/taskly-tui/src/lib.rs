//! Kanban board for taskly
//!
//! Shows tasks in three columns, one per status, and lets the user move
//! tasks along the status cycle. Moves are written back through the store.

pub mod app;
pub mod error;
pub mod model;
pub mod ui;

pub use app::App;
pub use error::{TuiError, TuiResult};
pub use model::{Board, BoardAction, Column};
