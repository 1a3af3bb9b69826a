//! The sub-store contract the coordinator depends on.
//!
//! Each sub-store owns its own tables inside the shared database and is
//! constructed, reset, and destroyed only through the coordinator. The
//! coordinator binds every sub-store in a fixed order at open, and empties
//! them in the same order inside one transaction during a full reset.

use async_trait::async_trait;
use rusqlite::Connection;

use crate::conn::SharedConnection;
use crate::error::Result;

/// Contract between the storage coordinator and each sub-store.
#[async_trait]
pub trait SubStore: Send + Sync {
    /// Bind to the shared connection, creating this store's tables if they
    /// do not exist yet. Binding is idempotent.
    fn bind(conn: SharedConnection) -> Result<Self>
    where
        Self: Sized;

    /// Delete every row owned by this store, issuing statements on an
    /// already-open transaction. The coordinator spans one transaction over
    /// all sub-stores so a failed reset leaves every store untouched.
    fn empty_within(conn: &Connection) -> Result<()>
    where
        Self: Sized;

    /// Delete every row owned by this store in its own transaction.
    async fn empty(&self) -> Result<()>;
}
