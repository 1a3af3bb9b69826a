//! # DP3T Storage
//!
//! The storage coordinator for the on-device proximity-tracing database.
//!
//! ## Overview
//!
//! [`TracingDatabase`] owns the single SQLite connection backing the store,
//! binds each sub-store to it in a fixed order, runs a best-effort retention
//! sweep in the background after opening, and coordinates the lifecycle
//! operations the tracing engine needs: reset everything in one transaction,
//! or destroy the database outright when the user wipes their data.
//!
//! Once destroyed, a coordinator is terminally dead: any further access to
//! its sub-stores is treated as a caller defect and aborts the process.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dp3t_storage::{StorageConfig, TracingDatabase};
//!
//! async fn example() {
//!     // Open the store at its well-known per-installation location.
//!     let db = TracingDatabase::open(StorageConfig::default()).unwrap();
//!
//!     // Record a matched exposure day.
//!     // db.exposure_days().add(exposed_at, reported_at).await.unwrap();
//!
//!     // The user asked to delete everything.
//!     db.reset_all().await.unwrap();
//!     db.destroy().unwrap();
//!     assert!(db.is_destroyed());
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `dp3t_storage::core` - Record types and retention arithmetic
//! - `dp3t_storage::store` - The sub-store implementations

pub mod config;
pub mod database;
pub mod error;
pub mod path;

// Re-export component crates
pub use dp3t_core as core;
pub use dp3t_store as store;

// Re-export main types for convenience
pub use config::StorageConfig;
pub use database::TracingDatabase;
pub use error::{DatabaseError, Result};
pub use path::{default_database_path, DATABASE_FILE_NAME};

// Re-export commonly used component types
pub use dp3t_core::{
    ExposureDay, LogEntry, LogLevel, RetentionPolicy, UnixMillis, DEFAULT_RETENTION_DAYS,
};
pub use dp3t_store::{ExposureDayStorage, LogStorage, StoreError, SubStore};
