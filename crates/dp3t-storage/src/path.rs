//! Backing-file location and backup exclusion.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DatabaseError, Result};

/// Fixed name of the backing file. Preserved across releases so existing
/// installations keep their data.
pub const DATABASE_FILE_NAME: &str = "DP3T_tracing_db.sqlite";

/// The one backing-file location for this installation.
///
/// Resolved from the per-user documents directory, falling back to the
/// local data directory on platforms without one. Not versioned and not
/// parameterized: there is exactly one store per installation.
pub fn default_database_path() -> Result<PathBuf> {
    dirs::document_dir()
        .or_else(dirs::data_local_dir)
        .map(|dir| dir.join(DATABASE_FILE_NAME))
        .ok_or(DatabaseError::NoDocumentsDirectory)
}

/// Path of the advisory marker telling backup tooling to skip the database.
pub(crate) fn backup_marker_path(db_path: &Path) -> PathBuf {
    let mut name = db_path.file_name().unwrap_or_default().to_os_string();
    name.push(".nobackup");
    db_path.with_file_name(name)
}

/// Mark the backing file as excluded from device backups.
///
/// Purely advisory. Failure is discarded; the store works the same either
/// way.
pub(crate) fn mark_backup_excluded(db_path: &Path) {
    let marker = backup_marker_path(db_path);
    if let Err(err) = fs::write(&marker, b"") {
        tracing::debug!(error = %err, "could not write backup-exclusion marker");
    }
}
