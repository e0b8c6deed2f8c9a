//! Schema revisions for the data file, applied in order inside one
//! transaction.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// `(revision, sql)`; revisions start at 1 and increase by one.
const REVISIONS: &[(u32, &str)] = &[(1, include_str!("0001_kv_store.sql"))];

/// Highest schema revision this build can read and write.
pub fn latest_version() -> u32 {
    REVISIONS.last().map_or(0, |(revision, _)| *revision)
}

/// Revision currently recorded in the data file; 0 for a fresh file.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?)
}

/// Brings the data file up to [`latest_version`].
///
/// # Errors
/// - [`DbError::DataFileTooNew`] when the file was written by a newer build.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    let supported = latest_version();
    if found > supported {
        return Err(DbError::DataFileTooNew { found, supported });
    }

    let pending: Vec<_> = REVISIONS
        .iter()
        .filter(|(revision, _)| *revision > found)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (revision, sql) in &pending {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", *revision)?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from={found} to={supported} applied={}",
        pending.len()
    );
    Ok(())
}
