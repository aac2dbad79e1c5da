//! SQLite connection ownership, schema provisioning and migrations.

use crate::Result;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Where the hike database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageTarget {
    /// A database file on the local filesystem.
    File(PathBuf),
    /// A private, process-local database that disappears on close.
    InMemory,
}

impl StorageTarget {
    /// Returns the target to use on the current platform.
    ///
    /// Targets without a native filesystem (`wasm32`) get an in-memory
    /// database; everything else gets a file at `path`.
    pub fn platform_default<P: AsRef<Path>>(path: P) -> Self {
        if cfg!(target_family = "wasm") {
            Self::InMemory
        } else {
            Self::File(path.as_ref().to_path_buf())
        }
    }
}

pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Opens `target`, enables foreign keys, and creates any missing tables
    /// and indexes. Running this against an already provisioned database
    /// changes nothing.
    pub fn open(target: &StorageTarget) -> Result<Self> {
        let conn = match target {
            StorageTarget::File(path) => Connection::open(path)?,
            StorageTarget::InMemory => Connection::open_in_memory()?,
        };

        // Cascading deletes depend on this; SQLite defaults it to off.
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(include_str!("schema.sql"))?;
        migrate(&conn)?;

        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Closes the underlying connection, surfacing any SQLite error.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| e.into())
    }
}

/// Brings databases written before the `duration` column existed up to date.
fn migrate(conn: &Connection) -> Result<()> {
    let column_exists: bool = conn.query_row(
        "SELECT COUNT(*) FROM pragma_table_info('hikes') WHERE name='duration'",
        [],
        |row| row.get::<_, i64>(0).map(|count| count > 0),
    )?;

    if !column_exists {
        conn.execute(
            "ALTER TABLE hikes ADD COLUMN duration TEXT NOT NULL DEFAULT ''",
            [],
        )?;
        log::info!("Migrated hikes table: added duration column");
    }

    Ok(())
}
