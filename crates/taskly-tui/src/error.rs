//! Error types for the board

use thiserror::Error;

/// Errors that end a board session. Store failures during a move are shown
/// on the board instead.
#[derive(Debug, Error)]
pub enum TuiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for board operations
pub type TuiResult<T> = Result<T, TuiError>;
