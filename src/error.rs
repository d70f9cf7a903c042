//! Centralized error types for the round controller.
//!
//! Nothing in the round core is fatal; these errors only surface from the
//! persistence port and are logged by the controller rather than propagated.

use std::io;

/// Main error type for the round controller.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("High score store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors raised by a [`HighScoreStore`](crate::store::HighScoreStore).
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Corrupt high score record: {0:?}")]
    Corrupt(String),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
