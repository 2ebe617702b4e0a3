// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Flat key-value store backed by SQLite — the local-storage analog every
// higher layer (cache, preferences, settings) persists through.
//
// Schema:
//   kv(
//     key    TEXT PRIMARY KEY,
//     value  TEXT NOT NULL    -- JSON-encoded envelope or preference
//   )

use std::path::Path;

use rusqlite::{Connection, params};
use tracing::{debug, info, instrument};

use vaultview_core::error::{Result, VaultviewError};

/// SQLite schema for the key-value table.
const CREATE_TABLE_SQL: &str = "
    CREATE TABLE IF NOT EXISTS kv (
        key   TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );
";

/// Convert a `rusqlite::Error` into a `VaultviewError::Database`.
fn db_err(e: rusqlite::Error) -> VaultviewError {
    VaultviewError::Database(e.to_string())
}

/// Flat string→string store backed by a SQLite database.
///
/// All methods are synchronous because `rusqlite` does not support async
/// natively. In an async context, calls are fast enough (sub-millisecond
/// single-row queries) to run inline.
pub struct KvStore {
    conn: Connection,
}

impl KvStore {
    /// Open (or create) the store database at `path`.
    ///
    /// The `kv` table is created automatically if it does not already
    /// exist. WAL mode is enabled for better concurrent-read performance.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path).map_err(db_err)?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(db_err)?;

        conn.execute_batch(CREATE_TABLE_SQL).map_err(db_err)?;

        info!("key-value store opened");
        Ok(Self { conn })
    }

    /// Open an in-memory store (useful for tests and the no-persistence
    /// fallback).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(db_err)?;

        conn.execute_batch(CREATE_TABLE_SQL).map_err(db_err)?;

        debug!("in-memory key-value store opened");
        Ok(Self { conn })
    }

    /// Insert or replace the value stored under `key`.
    #[instrument(skip(self, value), fields(%key, value_len = value.len()))]
    pub fn put(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .map_err(db_err)?;
        Ok(())
    }

    /// Retrieve the value stored under `key`, or `None` if absent.
    pub fn fetch(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM kv WHERE key = ?1")
            .map_err(db_err)?;

        let mut rows = stmt
            .query_map(params![key], |row| row.get::<_, String>(0))
            .map_err(db_err)?;

        match rows.next() {
            Some(Ok(value)) => Ok(Some(value)),
            Some(Err(e)) => Err(db_err(e)),
            None => Ok(None),
        }
    }

    /// Delete the entry under `key`. Idempotent.
    pub fn delete(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])
            .map_err(db_err)?;
        Ok(())
    }

    /// All keys starting with `prefix`.
    ///
    /// The namespace prefix contains `_`, which is a LIKE wildcard, so the
    /// match is done in Rust over a full key scan. The table holds a
    /// handful of dataset and preference entries; a scan is fine.
    pub fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM kv ORDER BY key")
            .map_err(db_err)?;

        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(db_err)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(db_err)?;

        Ok(keys
            .into_iter()
            .filter(|k| k.starts_with(prefix))
            .collect())
    }

    /// Delete every entry whose key starts with `prefix`. Returns the
    /// number of entries removed.
    #[instrument(skip(self), fields(%prefix))]
    pub fn delete_with_prefix(&self, prefix: &str) -> Result<usize> {
        let keys = self.keys_with_prefix(prefix)?;
        for key in &keys {
            self.delete(key)?;
        }
        debug!(count = keys.len(), "prefix-scoped delete");
        Ok(keys.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_store() -> KvStore {
        KvStore::open_in_memory().expect("open in-memory store")
    }

    #[test]
    fn put_and_fetch_round_trip() {
        let store = make_store();
        store.put("alpha", "one").expect("put");

        assert_eq!(store.fetch("alpha").expect("fetch").as_deref(), Some("one"));
        assert!(store.fetch("missing").expect("fetch").is_none());
    }

    #[test]
    fn put_overwrites_existing_value() {
        let store = make_store();
        store.put("alpha", "one").expect("put");
        store.put("alpha", "two").expect("put again");

        assert_eq!(store.fetch("alpha").expect("fetch").as_deref(), Some("two"));
    }

    #[test]
    fn delete_is_idempotent() {
        let store = make_store();
        store.put("alpha", "one").expect("put");

        store.delete("alpha").expect("delete first time");
        store.delete("alpha").expect("delete second time");
        assert!(store.fetch("alpha").expect("fetch").is_none());
    }

    #[test]
    fn prefix_scan_does_not_treat_underscore_as_wildcard() {
        let store = make_store();
        store.put("identity_asset_certificates", "[]").expect("put");
        store.put("identityXassetXother", "[]").expect("put");
        store.put("unrelated", "x").expect("put");

        let keys = store
            .keys_with_prefix("identity_asset_")
            .expect("keys_with_prefix");
        assert_eq!(keys, vec!["identity_asset_certificates".to_owned()]);
    }

    #[test]
    fn delete_with_prefix_leaves_other_namespaces() {
        let store = make_store();
        store.put("ns_a", "1").expect("put");
        store.put("ns_b", "2").expect("put");
        store.put("other", "3").expect("put");

        let removed = store.delete_with_prefix("ns_").expect("delete prefix");
        assert_eq!(removed, 2);
        assert!(store.fetch("ns_a").expect("fetch").is_none());
        assert_eq!(store.fetch("other").expect("fetch").as_deref(), Some("3"));
    }

    #[test]
    fn reopen_from_file_preserves_entries() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("kv.db");

        {
            let store = KvStore::open(&path).expect("open");
            store.put("persisted", "yes").expect("put");
        }

        let reopened = KvStore::open(&path).expect("reopen");
        assert_eq!(
            reopened.fetch("persisted").expect("fetch").as_deref(),
            Some("yes")
        );
    }
}
