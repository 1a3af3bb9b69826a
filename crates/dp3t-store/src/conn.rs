//! The shared connection handle and blocking-execution helpers.
//!
//! There is exactly one live `rusqlite::Connection` per database, owned by
//! the coordinator and handed to each sub-store as a clone of the same
//! `Arc`. The mutex is the serialization point for every statement; rusqlite
//! calls run via `tokio::task::spawn_blocking` so the async runtime is never
//! blocked on file I/O.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::error::{Result, StoreError};

/// The single shared handle to the on-disk database.
pub type SharedConnection = Arc<Mutex<Connection>>;

/// Wrap a raw connection into the shared handle sub-stores bind to.
pub fn shared(conn: Connection) -> SharedConnection {
    Arc::new(Mutex::new(conn))
}

/// Run `f` against the connection on the blocking pool.
pub(crate) async fn with_conn<T, F>(conn: SharedConnection, f: F) -> Result<T>
where
    F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut guard = conn.lock().map_err(|_| StoreError::Poisoned)?;
        f(&mut guard)
    })
    .await
    .map_err(|err| StoreError::Background(err.to_string()))?
}

/// Run `f` inside a single transaction on the shared connection.
///
/// The transaction commits only if `f` returns `Ok`; any error rolls back
/// every statement `f` issued, so concurrent readers never observe a
/// partially-applied multi-store operation.
pub async fn with_transaction<T, F>(conn: SharedConnection, f: F) -> Result<T>
where
    F: FnOnce(&Connection) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    with_conn(conn, |conn| {
        let tx = conn.transaction()?;
        let out = f(&tx)?;
        tx.commit()?;
        Ok(out)
    })
    .await
}
