//! Contact list storage contract and SQLite key-value implementation.
//!
//! # Invariants
//! - `save` replaces the stored value in a single statement.
//! - `load` returns `None` for a missing key, a failed read or a value that
//!   is not a JSON array of contact-shaped objects.
//! - Entries with numeric, blank or missing ids still load. Missing and
//!   duplicate ids are issued once and written back so they stay stable.

use crate::db::DbError;
use crate::model::contact::{normalize_records, Contact, ContactRecord};
use log::{info, warn};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed key under which the full contact list is stored.
pub const CONTACTS_STORAGE_KEY: &str = "phonebook_contacts_v1";

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure while writing the contact list.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    Encode(serde_json::Error),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode contacts: {err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Storage contract for the persisted contact list.
pub trait ContactStorage {
    /// Serializes and writes the full list.
    fn save(&self, contacts: &[Contact]) -> StorageResult<()>;
    /// Reads the stored list, or `None` when nothing usable is stored.
    ///
    /// A returned list has unique, non-empty ids.
    fn load(&self) -> Option<Vec<Contact>>;
}

impl<T: ContactStorage + ?Sized> ContactStorage for &T {
    fn save(&self, contacts: &[Contact]) -> StorageResult<()> {
        (**self).save(contacts)
    }

    fn load(&self) -> Option<Vec<Contact>> {
        (**self).load()
    }
}

/// SQLite-backed storage over the `kv_entries` table.
pub struct SqliteContactStorage<'conn> {
    conn: &'conn Connection,
    key: String,
}

impl<'conn> SqliteContactStorage<'conn> {
    /// Uses [`CONTACTS_STORAGE_KEY`].
    ///
    /// The connection must come from `open_db`/`open_db_in_memory` so the
    /// schema exists.
    pub fn new(conn: &'conn Connection) -> Self {
        Self::with_key(conn, CONTACTS_STORAGE_KEY)
    }

    pub fn with_key(conn: &'conn Connection, key: impl Into<String>) -> Self {
        Self {
            conn,
            key: key.into(),
        }
    }

    /// Raw stored value, if any.
    pub fn raw_value(&self) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [self.key.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_value(&self, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![self.key.as_str(), value],
        )?;
        Ok(())
    }

    /// Persists ids issued during `load`. Failure leaves the stored value as
    /// it was; the ids are then reissued on the next load.
    fn write_back(&self, contacts: &[Contact], issued: usize) {
        let result = serde_json::to_string(contacts)
            .map_err(StorageError::from)
            .and_then(|encoded| self.write_value(&encoded));
        match result {
            Ok(()) => info!(
                "event=storage_repair module=storage status=ok issued_ids={issued}"
            ),
            Err(err) => warn!(
                "event=storage_repair module=storage status=error issued_ids={issued} error={err}"
            ),
        }
    }
}

impl ContactStorage for SqliteContactStorage<'_> {
    fn save(&self, contacts: &[Contact]) -> StorageResult<()> {
        let encoded = serde_json::to_string(contacts)?;
        match self.write_value(&encoded) {
            Ok(()) => {
                info!(
                    "event=storage_save module=storage status=ok count={} bytes={}",
                    contacts.len(),
                    encoded.len()
                );
                Ok(())
            }
            Err(err) => {
                warn!("event=storage_save module=storage status=error error={err}");
                Err(err)
            }
        }
    }

    fn load(&self) -> Option<Vec<Contact>> {
        let raw = match self.raw_value() {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!("event=storage_load module=storage status=absent");
                return None;
            }
            Err(err) => {
                warn!(
                    "event=storage_load module=storage status=error error_code=read_failed error={err}"
                );
                return None;
            }
        };

        let records = match serde_json::from_str::<Vec<ContactRecord>>(&raw) {
            Ok(records) => records,
            Err(err) => {
                warn!(
                    "event=storage_load module=storage status=error error_code=decode_failed error={err}"
                );
                return None;
            }
        };

        let normalized = normalize_records(records);
        if normalized.issued_ids > 0 {
            self.write_back(&normalized.contacts, normalized.issued_ids);
        }
        info!(
            "event=storage_load module=storage status=ok count={}",
            normalized.contacts.len()
        );
        Some(normalized.contacts)
    }
}
