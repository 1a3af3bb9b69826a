//! Error types for the core primitives.

use thiserror::Error;

/// Errors that can occur decoding stored core data.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A stored log-level code is not a known [`crate::LogLevel`].
    #[error("unknown log level code: {0}")]
    UnknownLogLevel(u8),
}
