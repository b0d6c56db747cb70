//! SQL schema migrations and connection setup for the SQLite backend.
//!
//! Uses `rusqlite_migration` to manage schema migrations via SQLite's
//! `user_version` pragma. Migrations are embedded at compile time via
//! `include_str!`.

use rusqlite::Connection;
use rusqlite_migration::{Migrations, M};

use crate::error::StorageError;

/// All schema migrations, applied in order via `user_version` tracking.
fn migrations() -> Migrations<'static> {
    Migrations::new(vec![M::up(include_str!(
        "migrations/001_initial_schema.sql"
    ))])
}

/// Opens (or creates) the database at `path` and applies pending migrations.
pub fn open_database(path: &str) -> Result<Connection, StorageError> {
    let mut conn = connect(path)?;
    migrations()
        .to_latest(&mut conn)
        .map_err(|e| StorageError::unknown(format!("migration failed: {}", e)))?;
    Ok(conn)
}

/// Opens a connection to an already-migrated database.
pub fn connect(path: &str) -> Result<Connection, StorageError> {
    let conn = Connection::open(path).map_err(StorageError::unknown)?;
    configure(&conn)?;
    Ok(conn)
}

fn configure(conn: &Connection) -> Result<(), StorageError> {
    // WAL lets per-request connections read while another writes.
    conn.pragma_update(None, "journal_mode", "WAL")
        .map_err(StorageError::unknown)?;
    conn.pragma_update(None, "synchronous", "NORMAL")
        .map_err(StorageError::unknown)?;
    conn.busy_timeout(std::time::Duration::from_secs(5))
        .map_err(StorageError::unknown)?;
    Ok(())
}
