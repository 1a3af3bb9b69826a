//! Exposure-day storage: one row per matched exposure day.
//!
//! This is the store the retention sweep acts on. Rows whose exposure day is
//! strictly older than the cutoff are deleted; rows at or after the cutoff
//! are untouched.

use rusqlite::{params, Connection};

use async_trait::async_trait;

use dp3t_core::{ExposureDay, UnixMillis};

use crate::conn::{with_conn, with_transaction, SharedConnection};
use crate::error::{Result, StoreError};
use crate::traits::SubStore;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS exposure_days (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    exposed_at INTEGER NOT NULL,    -- day of exposure (Unix ms)
    reported_at INTEGER NOT NULL    -- when the match was computed (Unix ms)
);

CREATE INDEX IF NOT EXISTS idx_exposure_days_exposed ON exposure_days(exposed_at);
"#;

/// Store for matched exposure days.
///
/// Cheap to clone; clones share the underlying connection.
#[derive(Clone)]
pub struct ExposureDayStorage {
    conn: SharedConnection,
}

impl ExposureDayStorage {
    /// Record a matched exposure day.
    pub async fn add(
        &self,
        exposed_at: UnixMillis,
        reported_at: UnixMillis,
    ) -> Result<ExposureDay> {
        with_conn(self.conn.clone(), move |conn| {
            conn.execute(
                "INSERT INTO exposure_days (exposed_at, reported_at) VALUES (?1, ?2)",
                params![exposed_at, reported_at],
            )?;
            Ok(ExposureDay {
                id: conn.last_insert_rowid(),
                exposed_at,
                reported_at,
            })
        })
        .await
    }

    /// All stored exposure days, oldest exposure first.
    pub async fn exposure_days(&self) -> Result<Vec<ExposureDay>> {
        with_conn(self.conn.clone(), |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, exposed_at, reported_at FROM exposure_days
                 ORDER BY exposed_at, id",
            )?;
            let days = stmt
                .query_map([], |row| {
                    Ok(ExposureDay {
                        id: row.get(0)?,
                        exposed_at: row.get(1)?,
                        reported_at: row.get(2)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(days)
        })
        .await
    }

    /// Number of stored exposure days.
    pub async fn count(&self) -> Result<u64> {
        with_conn(self.conn.clone(), |conn| {
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM exposure_days", [], |row| row.get(0))?;
            Ok(count as u64)
        })
        .await
    }

    /// Delete every row whose exposure day is strictly older than `cutoff`.
    ///
    /// Returns the number of rows deleted. Idempotent: a second call with no
    /// intervening writes deletes nothing.
    pub async fn delete_expired(&self, cutoff: UnixMillis) -> Result<usize> {
        let deleted = with_conn(self.conn.clone(), move |conn| {
            Ok(conn.execute(
                "DELETE FROM exposure_days WHERE exposed_at < ?1",
                params![cutoff],
            )?)
        })
        .await?;
        if deleted > 0 {
            tracing::debug!(deleted, "removed expired exposure days");
        }
        Ok(deleted)
    }
}

#[async_trait]
impl SubStore for ExposureDayStorage {
    fn bind(conn: SharedConnection) -> Result<Self> {
        {
            let guard = conn.lock().map_err(|_| StoreError::Poisoned)?;
            guard.execute_batch(SCHEMA)?;
        }
        Ok(Self { conn })
    }

    fn empty_within(conn: &Connection) -> Result<()> {
        conn.execute("DELETE FROM exposure_days", [])?;
        Ok(())
    }

    async fn empty(&self) -> Result<()> {
        with_transaction(self.conn.clone(), |conn| Self::empty_within(conn)).await
    }
}
