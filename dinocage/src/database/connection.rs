//! Database connection management.
//!
//! This module provides the main database connection type with the PRAGMA
//! settings the allocator relies on: WAL for concurrent readers, a busy
//! timeout so writers queue instead of failing immediately, and enforced
//! foreign keys between occupants and cages.

use rusqlite::{Connection, OpenFlags};

use crate::error::Result;

use super::config::DatabaseConfig;

/// A database connection wrapper with configuration.
///
/// Each `Database` owns one SQLite connection. Concurrent callers (threads or
/// processes) each open their own `Database` on the same file.
///
/// # Examples
///
/// ```no_run
/// use dinocage::database::{Database, DatabaseConfig};
///
/// let config = DatabaseConfig::new("/tmp/dinocage.db");
/// let db = Database::open(config).unwrap();
/// ```
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
    config: DatabaseConfig,
}

impl Database {
    /// Opens a database connection with the given configuration.
    ///
    /// This function will:
    /// - Create the parent directory if it is missing
    /// - Open (or create) the database file
    /// - Set WAL mode, busy timeout and foreign key enforcement
    /// - Initialize or verify the database schema
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its parent directory cannot be
    /// created or opened, if a PRAGMA fails, or if the schema is
    /// incompatible.
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        if !config.path.exists() {
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(&config.path, flags)?;

        // The busy timeout must be in place before anything else can contend
        // for the lock, including the WAL switch on a fresh file.
        conn.busy_timeout(config.busy_timeout)?;
        let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        conn.execute_batch("PRAGMA synchronous = NORMAL; PRAGMA foreign_keys = ON")?;

        super::migrations::check_schema_compatibility(&conn)?;

        log::debug!("opened database {}", config.path.display());
        Ok(Self { conn, config })
    }

    /// Returns a reference to the underlying `SQLite` connection.
    ///
    /// Read-only queries (`list_cages`, `get_cage`, ...) take this.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Returns the configuration this database was opened with.
    #[must_use]
    pub const fn config(&self) -> &DatabaseConfig {
        &self.config
    }
}
