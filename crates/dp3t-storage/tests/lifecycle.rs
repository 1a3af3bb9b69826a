//! End-to-end lifecycle tests over real files and injected connections.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use rusqlite::Connection;
use tempfile::TempDir;

use dp3t_storage::core::{now_millis, LogLevel, MILLIS_PER_DAY};
use dp3t_storage::store::{shared, ExposureDayStorage, SubStore};
use dp3t_storage::{RetentionPolicy, StorageConfig, TracingDatabase, DATABASE_FILE_NAME};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn db_path(dir: &TempDir) -> PathBuf {
    dir.path().join(DATABASE_FILE_NAME)
}

fn config(retention_days: u32, diagnostics: bool) -> StorageConfig {
    StorageConfig {
        retention: RetentionPolicy::new(retention_days),
        diagnostics,
    }
}

#[tokio::test]
async fn open_then_destroy_removes_backing_file() -> Result<()> {
    init_tracing();
    let dir = TempDir::new()?;
    let path = db_path(&dir);

    let db = TracingDatabase::open_at(&path, StorageConfig::default())?;
    assert!(!db.is_destroyed());
    assert!(path.exists());

    let now = now_millis();
    db.exposure_days().add(now, now).await?;

    db.destroy()?;
    assert!(db.is_destroyed());
    assert!(!path.exists());
    Ok(())
}

#[tokio::test]
async fn destroy_without_backing_file_still_succeeds() -> Result<()> {
    init_tracing();
    let dir = TempDir::new()?;
    let path = db_path(&dir);

    let db = TracingDatabase::open_at(&path, StorageConfig::default())?;
    std::fs::remove_file(&path)?;

    db.destroy()?;
    assert!(db.is_destroyed());

    // A second destroy is a safe no-op.
    db.destroy()?;
    assert!(db.is_destroyed());
    Ok(())
}

#[tokio::test]
async fn open_marks_file_excluded_from_backups() -> Result<()> {
    init_tracing();
    let dir = TempDir::new()?;
    let path = db_path(&dir);

    let db = TracingDatabase::open_at(&path, StorageConfig::default())?;
    let marker = dir.path().join(format!("{}.nobackup", DATABASE_FILE_NAME));
    assert!(marker.exists());

    db.destroy()?;
    assert!(!marker.exists());
    Ok(())
}

#[tokio::test]
async fn prune_deletes_only_records_older_than_the_window() -> Result<()> {
    init_tracing();
    let db = TracingDatabase::open_with_connection(
        Connection::open_in_memory()?,
        config(14, false),
    )?;
    let now = now_millis();

    db.exposure_days().add(now - 20 * MILLIS_PER_DAY, now).await?;
    db.prune_expired().await?;
    assert_eq!(db.exposure_days().count().await?, 0);

    db.exposure_days().add(now - MILLIS_PER_DAY, now).await?;
    db.prune_expired().await?;
    let days = db.exposure_days().exposure_days().await?;
    assert_eq!(days.len(), 1);
    assert_eq!(days[0].exposed_at, now - MILLIS_PER_DAY);

    // Nothing new expired; pruning again changes nothing.
    assert_eq!(db.prune_expired().await?, 0);
    assert_eq!(db.exposure_days().count().await?, 1);
    Ok(())
}

#[tokio::test]
async fn reset_all_empties_every_store_and_stays_active() -> Result<()> {
    init_tracing();
    let db = TracingDatabase::open_with_connection(
        Connection::open_in_memory()?,
        config(14, true),
    )?;
    let now = now_millis();

    db.exposure_days().add(now - MILLIS_PER_DAY, now).await?;
    let logs = db.diagnostic_logs().expect("diagnostics enabled");
    logs.append(LogLevel::Info, "sync finished").await?;

    db.reset_all().await?;

    assert_eq!(db.exposure_days().count().await?, 0);
    assert_eq!(db.diagnostic_logs().unwrap().count().await?, 0);
    assert!(!db.is_destroyed());
    Ok(())
}

#[tokio::test]
async fn sweep_on_open_prunes_preexisting_expired_rows() -> Result<()> {
    init_tracing();
    let dir = TempDir::new()?;
    let path = db_path(&dir);
    let now = now_millis();
    let fresh = now - MILLIS_PER_DAY;

    // Seed the file without a coordinator so no sweep interferes.
    {
        let store = ExposureDayStorage::bind(shared(Connection::open(&path)?))?;
        store.add(now - 20 * MILLIS_PER_DAY, now).await?;
        store.add(fresh, now).await?;
    }

    let db = TracingDatabase::open_at(&path, config(14, false))?;

    // The sweep is fire-and-forget; give it a moment to land.
    let mut remaining = db.exposure_days().exposure_days().await?;
    for _ in 0..100 {
        if remaining.len() == 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
        remaining = db.exposure_days().exposure_days().await?;
    }

    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].exposed_at, fresh);
    Ok(())
}

#[tokio::test]
async fn describe_reports_the_backing_path() -> Result<()> {
    init_tracing();
    let dir = TempDir::new()?;
    let path = db_path(&dir);

    let db = TracingDatabase::open_at(&path, StorageConfig::default())?;
    let description = db.describe();
    assert!(description.contains(DATABASE_FILE_NAME));

    db.destroy()?;
    assert_eq!(db.describe(), description);
    Ok(())
}

#[tokio::test]
#[should_panic(expected = "used after destroy")]
async fn prune_after_destroy_aborts() {
    init_tracing();
    let db = TracingDatabase::open_with_connection(
        Connection::open_in_memory().unwrap(),
        StorageConfig::default(),
    )
    .unwrap();
    db.destroy().unwrap();
    let _ = db.prune_expired().await;
}

#[tokio::test]
#[should_panic(expected = "used after destroy")]
async fn log_accessor_after_destroy_aborts() {
    init_tracing();
    let db = TracingDatabase::open_with_connection(
        Connection::open_in_memory().unwrap(),
        config(14, true),
    )
    .unwrap();
    db.destroy().unwrap();
    let _ = db.diagnostic_logs();
}
