//! Database connection management.

use log::debug;
use rusqlite::{Connection, OpenFlags};

use crate::error::{Error, Result};

use super::config::DatabaseConfig;

/// A `SQLite` connection opened with the pragmas the engine relies on.
///
/// Each `Database` owns one connection. Concurrent workers open their own
/// `Database` on the same file; WAL mode plus `BEGIN IMMEDIATE` units of
/// work serialize writers.
///
/// # Examples
///
/// ```no_run
/// use petcare::database::{Database, DatabaseConfig};
///
/// let db = Database::open(DatabaseConfig::new("/tmp/petcare.db")).unwrap();
/// ```
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
    config: DatabaseConfig,
}

impl Database {
    /// Opens a database connection with the given configuration.
    ///
    /// Creates the parent directory when `auto_create` is set, enables WAL,
    /// foreign keys and the busy timeout, then initializes or verifies the
    /// schema.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The database does not exist and `auto_create` is off
    /// - The file or its parent directory cannot be created
    /// - PRAGMA settings cannot be applied
    /// - The schema version is unsupported
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        if !config.path.exists() {
            if !config.auto_create {
                return Err(Error::DataDirectoryNotFound {
                    path: config
                        .path
                        .parent()
                        .map_or_else(|| config.path.clone(), std::path::Path::to_path_buf),
                });
            }
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let flags = if config.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        };

        let conn = Connection::open_with_flags(&config.path, flags)?;

        // journal_mode returns a row, so it cannot go through execute_batch
        let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        conn.execute_batch("PRAGMA synchronous = NORMAL; PRAGMA foreign_keys = ON;")?;
        conn.busy_timeout(config.busy_timeout)?;

        if !config.read_only {
            super::migrations::check_schema_compatibility(&conn)?;
        }

        debug!("opened database at {}", config.path.display());
        Ok(Self { conn, config })
    }

    /// Returns a reference to the underlying `SQLite` connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Returns a mutable reference to the underlying `SQLite` connection.
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// The configuration this database was opened with.
    #[must_use]
    pub const fn config(&self) -> &DatabaseConfig {
        &self.config
    }
}
