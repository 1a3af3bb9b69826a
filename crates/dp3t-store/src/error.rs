//! Error types for the sub-store layer.

use thiserror::Error;

/// Errors that can occur during sub-store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The connection mutex was poisoned by a panicking holder.
    #[error("connection mutex poisoned")]
    Poisoned,

    /// The blocking task running the operation failed to complete.
    #[error("background task failed: {0}")]
    Background(String),
}

/// Result type for sub-store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
