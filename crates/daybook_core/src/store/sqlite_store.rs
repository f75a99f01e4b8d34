//! SQLite-backed key-value store over the `kv_entries` table.

use super::{KeyValueStore, StoreResult};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

const UPSERT_SQL: &str = "INSERT INTO kv_entries (key, value, updated_at)
     VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
     ON CONFLICT(key) DO UPDATE SET
        value = excluded.value,
        updated_at = excluded.updated_at;";

const DELETE_SQL: &str = "DELETE FROM kv_entries WHERE key = ?1;";

/// Key-value store borrowing a migrated connection.
///
/// Cheap to copy, so several services can share one connection.
#[derive(Debug, Clone, Copy)]
pub struct SqliteKeyValueStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStore<'conn> {
    /// Wraps a connection returned by `open_db` / `open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueStore for SqliteKeyValueStore<'_> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(UPSERT_SQL, params![key, value])?;
        debug!("event=kv_set module=store status=ok key={key}");
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let changed = self.conn.execute(DELETE_SQL, [key])?;
        debug!("event=kv_remove module=store status=ok key={key} removed={changed}");
        Ok(())
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> StoreResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        for (key, value) in entries {
            tx.execute(UPSERT_SQL, params![key, value])?;
        }
        tx.commit()?;
        debug!(
            "event=kv_set_many module=store status=ok count={}",
            entries.len()
        );
        Ok(())
    }

    fn remove_many(&self, keys: &[&str]) -> StoreResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        for key in keys {
            tx.execute(DELETE_SQL, [key])?;
        }
        tx.commit()?;
        debug!(
            "event=kv_remove_many module=store status=ok count={}",
            keys.len()
        );
        Ok(())
    }
}
