//! Error types for the storage coordinator.

use std::path::PathBuf;

use dp3t_store::StoreError;
use thiserror::Error;

/// Errors that can occur during coordinator operations.
///
/// Use of a destroyed coordinator is deliberately absent here: it is a
/// caller defect and aborts the process instead of surfacing as a value.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The connection could not be opened, or a sub-store failed to bind to
    /// it. The coordinator never became usable.
    #[error("storage initialization failed: {0}")]
    Initialization(#[source] StoreError),

    /// No usable documents directory to place the backing file in.
    #[error("no documents directory available for the backing file")]
    NoDocumentsDirectory,

    /// A transactional operation on the live store failed. Recoverable; a
    /// failed reset has rolled back completely.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// The backing file could not be removed during destroy. The
    /// coordinator is destroyed regardless.
    #[error("failed to remove backing file {path:?}: {source}")]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for coordinator operations.
pub type Result<T> = std::result::Result<T, DatabaseError>;
