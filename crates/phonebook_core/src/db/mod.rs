//! Local SQLite file that backs contact storage.
//!
//! # Responsibility
//! - Open file or in-memory connections with the key-value schema in place.
//! - Refuse files written by a newer schema or missing the contacts table.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - No key-value entry is read or written before `ensure_schema` succeeds.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure opening or preparing the phonebook database.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// File was written by a newer build; opening it could corrupt contacts.
    NewerSchema { found: u32, supported: u32 },
    /// Version stamp says the schema exists but the table is gone.
    MissingTable(&'static str),
}

impl DbError {
    /// True when the file's layout, not SQLite itself, is the problem.
    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self, Self::NewerSchema { .. } | Self::MissingTable(_))
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite error: {err}"),
            Self::NewerSchema { found, supported } => write!(
                f,
                "phonebook database uses schema {found}; this build supports up to {supported}"
            ),
            Self::MissingTable(table) => {
                write!(f, "phonebook database is missing the `{table}` table")
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::NewerSchema { .. } | Self::MissingTable(_) => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
