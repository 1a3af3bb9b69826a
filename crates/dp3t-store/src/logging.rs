//! Diagnostic log storage.
//!
//! Only bound when the coordinator runs in a diagnostic configuration. The
//! tracing subsystem appends entries here so field issues can be inspected
//! on-device; entries are wiped together with everything else on reset.

use rusqlite::{params, types::Type, Connection};

use async_trait::async_trait;

use dp3t_core::{now_millis, CoreError, LogEntry, LogLevel};

use crate::conn::{with_conn, with_transaction, SharedConnection};
use crate::error::{Result, StoreError};
use crate::traits::SubStore;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS diagnostic_logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    logged_at INTEGER NOT NULL,     -- Unix ms
    level INTEGER NOT NULL,         -- LogLevel wire code
    message TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_diagnostic_logs_logged ON diagnostic_logs(logged_at);
"#;

/// Store for diagnostic log entries.
///
/// Cheap to clone; clones share the underlying connection.
#[derive(Clone)]
pub struct LogStorage {
    conn: SharedConnection,
}

impl LogStorage {
    /// Append an entry stamped with the current wall clock.
    pub async fn append(&self, level: LogLevel, message: &str) -> Result<LogEntry> {
        let message = message.to_string();
        with_conn(self.conn.clone(), move |conn| {
            let logged_at = now_millis();
            conn.execute(
                "INSERT INTO diagnostic_logs (logged_at, level, message) VALUES (?1, ?2, ?3)",
                params![logged_at, level.to_u8(), &message],
            )?;
            Ok(LogEntry {
                id: conn.last_insert_rowid(),
                logged_at,
                level,
                message,
            })
        })
        .await
    }

    /// Stored entries, newest first, optionally capped at `limit`.
    pub async fn entries(&self, limit: Option<u32>) -> Result<Vec<LogEntry>> {
        with_conn(self.conn.clone(), move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, logged_at, level, message FROM diagnostic_logs
                 ORDER BY logged_at DESC, id DESC
                 LIMIT ?1",
            )?;
            // SQLite treats a negative LIMIT as "no limit".
            let cap = limit.map_or(-1i64, i64::from);
            let entries = stmt
                .query_map(params![cap], row_to_entry)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(entries)
        })
        .await
    }

    /// Number of stored entries.
    pub async fn count(&self) -> Result<u64> {
        with_conn(self.conn.clone(), |conn| {
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM diagnostic_logs", [], |row| row.get(0))?;
            Ok(count as u64)
        })
        .await
    }
}

fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<LogEntry> {
    let code: u8 = row.get(2)?;
    let level = LogLevel::from_u8(code).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            Type::Integer,
            Box::new(CoreError::UnknownLogLevel(code)),
        )
    })?;
    Ok(LogEntry {
        id: row.get(0)?,
        logged_at: row.get(1)?,
        level,
        message: row.get(3)?,
    })
}

#[async_trait]
impl SubStore for LogStorage {
    fn bind(conn: SharedConnection) -> Result<Self> {
        {
            let guard = conn.lock().map_err(|_| StoreError::Poisoned)?;
            guard.execute_batch(SCHEMA)?;
        }
        Ok(Self { conn })
    }

    fn empty_within(conn: &Connection) -> Result<()> {
        conn.execute("DELETE FROM diagnostic_logs", [])?;
        Ok(())
    }

    async fn empty(&self) -> Result<()> {
        with_transaction(self.conn.clone(), |conn| Self::empty_within(conn)).await
    }
}
