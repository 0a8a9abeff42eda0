//! Key-value backend contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist one opaque string value per key.
//! - Offer an exclusive scope so a read-modify-write cycle is atomic.
//!
//! # Invariants
//! - `set` replaces the whole value; there are no partial writes.
//! - Missing keys read as `None`, never as an error.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage failure below the collection layer.
///
/// Malformed stored values are not represented here: the collection layer
/// reads them as empty.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Connection was not migrated before use.
    SchemaNotReady(&'static str),
    /// A record could not be encoded for storage.
    Serialize(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::SchemaNotReady(table) => {
                write!(f, "storage table `{table}` is missing; run migrations first")
            }
            Self::Serialize(err) => write!(f, "failed to encode collection: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::SchemaNotReady(_) => None,
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// String-valued key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> RepoResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> RepoResult<()>;
    /// Returns whether a value existed.
    fn remove(&self, key: &str) -> RepoResult<bool>;
    /// All stored keys in ascending order.
    fn keys(&self) -> RepoResult<Vec<String>>;
    /// Runs `op` with exclusive write access; changes are kept only when it
    /// returns `Ok`.
    fn exclusive<R>(&self, op: impl FnOnce(&Self) -> RepoResult<R>) -> RepoResult<R>;
}

/// SQLite-backed key-value store over the `kv_entries` table.
#[derive(Debug, Clone, Copy)]
pub struct SqliteKeyValueStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStore<'conn> {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `RepoError::SchemaNotReady` when `kv_entries` does not exist.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let exists: bool = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'kv_entries'
            );",
            [],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(RepoError::SchemaNotReady("kv_entries"));
        }
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteKeyValueStore<'_> {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
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

    fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(changed > 0)
    }

    fn keys(&self) -> RepoResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM kv_entries ORDER BY key ASC;")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }

    fn exclusive<R>(&self, op: impl FnOnce(&Self) -> RepoResult<R>) -> RepoResult<R> {
        // IMMEDIATE takes the write lock up front so two writers cannot both
        // read the old value and then race on the upgrade.
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let result = op(self)?;
        tx.commit()?;
        Ok(result)
    }
}
