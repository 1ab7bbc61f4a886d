//! Key-value schema for the persisted contact list.
//!
//! # Invariants
//! - Version 0 means "fresh file"; the table is created and stamped in one
//!   transaction.
//! - A stamped file must still contain `kv_entries`.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// Schema version written by this build.
pub const SCHEMA_VERSION: u32 = 1;

/// Table holding one row per storage key.
pub const KV_TABLE: &str = "kv_entries";

const CREATE_KV_ENTRIES: &str = "CREATE TABLE IF NOT EXISTS kv_entries (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now') * 1000)
);";

/// Creates the key-value table on a fresh file and checks it otherwise.
///
/// # Errors
/// - `DbError::NewerSchema` when the file is stamped above `SCHEMA_VERSION`.
/// - `DbError::MissingTable` when the file is stamped but has no table.
pub fn ensure_schema(conn: &mut Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    if found > SCHEMA_VERSION {
        return Err(DbError::NewerSchema {
            found,
            supported: SCHEMA_VERSION,
        });
    }

    if found == 0 {
        let tx = conn.transaction()?;
        tx.execute_batch(CREATE_KV_ENTRIES)?;
        tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
        tx.commit()?;
        info!("event=db_schema module=db status=created version={SCHEMA_VERSION}");
        return Ok(());
    }

    if !table_exists(conn, KV_TABLE)? {
        return Err(DbError::MissingTable(KV_TABLE));
    }
    Ok(())
}

/// Current `PRAGMA user_version` of `conn`.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

fn table_exists(conn: &Connection, table: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

#[cfg(test)]
mod tests {
    use super::{ensure_schema, schema_version, SCHEMA_VERSION};
    use crate::db::DbError;
    use rusqlite::Connection;

    #[test]
    fn fresh_connection_is_created_and_stamped() {
        let mut conn = Connection::open_in_memory().unwrap();
        ensure_schema(&mut conn).unwrap();
        assert_eq!(schema_version(&conn).unwrap(), SCHEMA_VERSION);
        ensure_schema(&mut conn).unwrap();
    }

    #[test]
    fn stamped_file_without_table_is_rejected() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))
            .unwrap();

        let err = ensure_schema(&mut conn).unwrap_err();
        assert!(matches!(err, DbError::MissingTable("kv_entries")));
        assert!(err.is_schema_mismatch());
    }
}
