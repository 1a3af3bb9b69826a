//! # DP3T Storage Core
//!
//! Pure primitives for the proximity-tracing store: record types, retention
//! arithmetic, and the millisecond clock.
//!
//! This crate contains no I/O and no SQL. It is shared between the sub-store
//! implementations and the storage coordinator.
//!
//! ## Key Types
//!
//! - [`ExposureDay`] - One matched exposure day, the unit of retained data
//! - [`LogEntry`] / [`LogLevel`] - Diagnostic log records
//! - [`RetentionPolicy`] - How long exposure days are kept

pub mod error;
pub mod retention;
pub mod time;
pub mod types;

pub use error::CoreError;
pub use retention::{RetentionPolicy, DEFAULT_RETENTION_DAYS};
pub use time::{now_millis, UnixMillis, MILLIS_PER_DAY};
pub use types::{ExposureDay, LogEntry, LogLevel};
