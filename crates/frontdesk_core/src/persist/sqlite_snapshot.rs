//! SQLite-backed key-value slots.
//!
//! # Invariants
//! - The connection must come from `db::open_db*` so `kv_store` exists.
//! - A write replaces the whole slot value in a single statement.

use super::{PersistResult, SnapshotStore};
use rusqlite::{params, Connection, OptionalExtension};

pub struct SqliteSnapshotStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SnapshotStore for SqliteSnapshotStore<'_> {
    fn read(&self, key: &str) -> PersistResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv_store WHERE key = ?1;", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> PersistResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteSnapshotStore;
    use crate::db::open_db_in_memory;
    use crate::persist::SnapshotStore;

    #[test]
    fn missing_key_reads_none() {
        let conn = open_db_in_memory().unwrap();
        let snapshots = SqliteSnapshotStore::new(&conn);
        assert_eq!(snapshots.read("root").unwrap(), None);
    }

    #[test]
    fn write_overwrites_existing_slot() {
        let conn = open_db_in_memory().unwrap();
        let snapshots = SqliteSnapshotStore::new(&conn);

        snapshots.write("root", "{\"a\":1}").unwrap();
        snapshots.write("root", "{\"a\":2}").unwrap();

        assert_eq!(snapshots.read("root").unwrap().as_deref(), Some("{\"a\":2}"));
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM kv_store;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }
}
