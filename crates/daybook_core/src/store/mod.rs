//! Durable string-keyed persistence.
//!
//! # Responsibility
//! - Define the key-value contract every service persists through.
//! - Keep the persisted key layout in one place.
//!
//! # Invariants
//! - `set` overwrites; the last write wins.
//! - `remove` of an absent key is a no-op.
//! - `set_many` / `remove_many` are applied as one unit: callers never observe
//!   a subset of the entries.

use crate::db::DbError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod keys;
mod sqlite_store;

pub use sqlite_store::SqliteKeyValueStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure raised by a key-value store backend.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// A stored value could not be decoded or a value could not be encoded.
    InvalidData { key: String, message: String },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData { key, message } => {
                write!(f, "invalid data under key `{key}`: {message}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData { .. } => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key-value persistence contract.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&self, key: &str) -> StoreResult<()>;

    /// Writes several entries as one unit.
    fn set_many(&self, entries: &[(&str, &str)]) -> StoreResult<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Removes several entries as one unit.
    fn remove_many(&self, keys: &[&str]) -> StoreResult<()> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> StoreResult<()> {
        (**self).set_many(entries)
    }

    fn remove_many(&self, keys: &[&str]) -> StoreResult<()> {
        (**self).remove_many(keys)
    }
}

/// Reads and decodes a JSON value. Absent keys yield `None`.
pub fn get_json<T, S>(store: &S, key: &str) -> StoreResult<Option<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| StoreError::InvalidData {
                key: key.to_string(),
                message: err.to_string(),
            }),
        None => Ok(None),
    }
}

/// Encodes a value as JSON and writes it under `key`.
pub fn set_json<T, S>(store: &S, key: &str, value: &T) -> StoreResult<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|err| StoreError::InvalidData {
        key: key.to_string(),
        message: err.to_string(),
    })?;
    store.set(key, &raw)
}
