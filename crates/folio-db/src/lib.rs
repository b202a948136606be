pub mod error;
pub mod migrations;
pub mod models;
pub mod queries;

pub use error::PersistenceError;

use anyhow::Result;
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use tracing::info;

/// Handle to the contact store.
///
/// Holds only the location. Every operation opens its own connection and
/// drops it before returning, so nothing is shared between requests.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    /// Create the database file if needed and bring the schema up to date.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL mode for concurrent readers while a request is inserting
        conn.pragma_update(None, "journal_mode", "WAL")?;

        migrations::run(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self::at(path))
    }

    /// Point at an existing store without touching it.
    pub fn at(path: &Path) -> Self {
        Self { path: path.to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a fresh read-write connection. Never creates the file: a missing
    /// store is a connection failure, not an empty one.
    pub fn connect(&self) -> Result<Connection, PersistenceError> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(PersistenceError::ConnectionFailure)?;

        conn.busy_timeout(std::time::Duration::from_secs(5))
            .map_err(PersistenceError::ConnectionFailure)?;

        Ok(conn)
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.connect()?;
        f(&conn)
    }
}
