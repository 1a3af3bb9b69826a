//! The storage coordinator.
//!
//! [`TracingDatabase`] owns the single connection to the backing file, hands
//! it to each sub-store at bind time, and is the only component allowed to
//! span a transaction across them. Lifecycle is a one-way street:
//! `Active -> Destroyed`, with no way back inside one process.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rusqlite::Connection;

use dp3t_store::{
    shared, with_transaction, ExposureDayStorage, LogStorage, SharedConnection, SubStore,
};

use crate::config::StorageConfig;
use crate::error::{DatabaseError, Result};
use crate::path::{backup_marker_path, default_database_path, mark_backup_excluded};

/// Coordinator for all sub-stores sharing the tracing database file.
///
/// One instance per process, held for the process lifetime. The raw
/// connection never crosses this boundary; the engine reaches storage only
/// through the sub-store accessors, and every accessor re-checks that the
/// database has not been destroyed.
pub struct TracingDatabase {
    /// The shared connection, cloned into every sub-store.
    conn: SharedConnection,
    /// Backing file location; `None` for an injected connection.
    path: Option<PathBuf>,
    /// Terminal lifecycle flag. Monotonic: set once, never cleared.
    destroyed: AtomicBool,
    config: StorageConfig,
    exposure_days: ExposureDayStorage,
    logs: Option<LogStorage>,
}

impl TracingDatabase {
    /// Open the database at its well-known per-installation location,
    /// creating the file if it does not exist yet.
    ///
    /// Schedules a retention sweep in the background; the sweep may still be
    /// running when this returns.
    pub fn open(config: StorageConfig) -> Result<Self> {
        Self::open_at(default_database_path()?, config)
    }

    /// Open the database at an explicit path.
    pub fn open_at(path: impl AsRef<Path>, config: StorageConfig) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open(&path)
            .map_err(|err| DatabaseError::Initialization(err.into()))?;
        mark_backup_excluded(&path);
        Self::bind(conn, Some(path), config)
    }

    /// Open over an injected connection (tests and calibration harnesses).
    ///
    /// No backing path is recorded, so [`destroy`](Self::destroy) has no
    /// file to delete.
    pub fn open_with_connection(conn: Connection, config: StorageConfig) -> Result<Self> {
        Self::bind(conn, None, config)
    }

    fn bind(conn: Connection, path: Option<PathBuf>, config: StorageConfig) -> Result<Self> {
        let conn = shared(conn);

        // Fixed bind order; reset_all empties in the same order.
        let exposure_days = ExposureDayStorage::bind(Arc::clone(&conn))
            .map_err(DatabaseError::Initialization)?;
        let logs = if config.diagnostics {
            Some(LogStorage::bind(Arc::clone(&conn)).map_err(DatabaseError::Initialization)?)
        } else {
            None
        };

        let db = Self {
            conn,
            path,
            destroyed: AtomicBool::new(false),
            config,
            exposure_days,
            logs,
        };
        db.schedule_retention_sweep();
        Ok(db)
    }

    /// The exposure-day store.
    ///
    /// # Panics
    /// Aborts if the database has been destroyed: storage access after an
    /// explicit wipe is a caller defect, not a recoverable condition.
    pub fn exposure_days(&self) -> &ExposureDayStorage {
        self.assert_live();
        &self.exposure_days
    }

    /// The diagnostic log store, or `None` when diagnostics are disabled.
    ///
    /// # Panics
    /// Aborts if the database has been destroyed.
    pub fn diagnostic_logs(&self) -> Option<&LogStorage> {
        self.assert_live();
        self.logs.as_ref()
    }

    /// Delete exposure days that have fallen out of the retention window.
    ///
    /// Returns the number of rows removed. Idempotent.
    ///
    /// # Panics
    /// Aborts if the database has been destroyed.
    pub async fn prune_expired(&self) -> Result<usize> {
        self.assert_live();
        let cutoff = self.config.retention.cutoff();
        Ok(self.exposure_days.delete_expired(cutoff).await?)
    }

    /// Empty every sub-store in one transaction.
    ///
    /// Either every store is emptied or, on failure, none is: the
    /// transaction rolls back and concurrent readers never observe a
    /// partial reset. The database stays usable afterwards.
    ///
    /// # Panics
    /// Aborts if the database has been destroyed.
    pub async fn reset_all(&self) -> Result<()> {
        self.assert_live();
        let has_logs = self.logs.is_some();
        with_transaction(Arc::clone(&self.conn), move |conn| {
            // Same fixed order as bind.
            ExposureDayStorage::empty_within(conn)?;
            if has_logs {
                LogStorage::empty_within(conn)?;
            }
            Ok(())
        })
        .await?;
        Ok(())
    }

    /// Delete the backing file and mark the database destroyed.
    ///
    /// A missing file is not an error (fresh installs, repeated destroys).
    /// The destroyed flag is set even when removal fails: once the user has
    /// asked for a wipe, this instance must never become usable again, even
    /// at the cost of an orphaned file. Callers must ensure no other
    /// operation is in flight.
    pub fn destroy(&self) -> Result<()> {
        let result = match &self.path {
            Some(path) => {
                // The marker is ours too; best-effort.
                let _ = fs::remove_file(backup_marker_path(path));
                remove_backing_file(path)
            }
            None => Ok(()),
        };
        self.destroyed.store(true, Ordering::SeqCst);
        result
    }

    /// Whether [`destroy`](Self::destroy) has run on this instance.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }

    /// Human-readable description of the backing store. No side effects;
    /// safe to call in any state, including destroyed.
    pub fn describe(&self) -> String {
        match &self.path {
            Some(path) => format!("DB at path <{}>", path.display()),
            None => "DB over injected connection".to_string(),
        }
    }

    /// One-shot, fire-and-forget sweep of expired exposure days.
    ///
    /// Best-effort housekeeping: errors are logged and discarded, and with
    /// no runtime available the sweep is skipped entirely. The cutoff is
    /// computed when the sweep actually runs, not when it is scheduled.
    fn schedule_retention_sweep(&self) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::debug!("no async runtime; skipping retention sweep");
                return;
            }
        };
        let store = self.exposure_days.clone();
        let retention = self.config.retention;
        handle.spawn(async move {
            if let Err(err) = store.delete_expired(retention.cutoff()).await {
                tracing::warn!(error = %err, "retention sweep failed");
            }
        });
    }

    fn assert_live(&self) {
        assert!(
            !self.is_destroyed(),
            "tracing database used after destroy"
        );
    }
}

fn remove_backing_file(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(DatabaseError::FileSystem {
            path: path.to_path_buf(),
            source,
        }),
    }
}
