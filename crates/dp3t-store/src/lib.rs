//! # DP3T Sub-Stores
//!
//! SQLite-backed sub-stores sharing a single connection. Each sub-store owns
//! its own tables inside the shared database file and implements the
//! [`SubStore`] contract the storage coordinator depends on: bind to the
//! connection, empty itself inside a coordinator-spanned transaction, and
//! empty itself standalone.
//!
//! ## Key Types
//!
//! - [`SubStore`] - The contract every sub-store implements
//! - [`ExposureDayStorage`] - Matched exposure days, with retention deletion
//! - [`LogStorage`] - Diagnostic log entries (only bound in diagnostic
//!   configurations)
//! - [`SharedConnection`] - The `Arc<Mutex<Connection>>` handle sub-stores
//!   are bound to
//!
//! All public operations are async: blocking rusqlite work runs on the tokio
//! blocking pool so callers never stall the async runtime.

pub mod conn;
pub mod error;
pub mod exposure_days;
pub mod logging;
pub mod traits;

pub use conn::{shared, with_transaction, SharedConnection};
pub use error::{Result, StoreError};
pub use exposure_days::ExposureDayStorage;
pub use logging::LogStorage;
pub use traits::SubStore;
