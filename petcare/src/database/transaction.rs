//! Units of work.
//!
//! Every create and transition runs as one `BEGIN IMMEDIATE` transaction:
//! the write lock is taken before the first read, so a status read, the pool
//! adjustment and the record write all see and produce one consistent
//! snapshot. If the closure fails, the transaction is dropped and SQLite
//! rolls everything back, which is how a consumed slot or stock line is
//! compensated when a later step fails.

use std::time::Duration;

use log::debug;
use rusqlite::{ErrorCode, Transaction, TransactionBehavior};

use crate::error::{Error, Result};

use super::connection::Database;

impl Database {
    /// Runs `work` inside one immediate transaction.
    ///
    /// Commits only if `work` returns `Ok`; any error rolls back every write
    /// `work` made.
    ///
    /// # Errors
    ///
    /// Returns `Error::LockTimeout` if another writer holds the lock past
    /// the busy timeout, the error returned by `work`, or a database error
    /// from begin/commit.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use petcare::database::{Database, DatabaseConfig};
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/petcare.db")).unwrap();
    /// let users: i64 = db
    ///     .unit_of_work(|tx| Ok(tx.query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))?))
    ///     .unwrap();
    /// ```
    pub fn unit_of_work<T, F>(&mut self, work: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T>,
    {
        let timeout = self.config().busy_timeout;
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| lock_timeout_or(e.into(), timeout))?;

        match work(&tx) {
            Ok(value) => {
                tx.commit().map_err(|e| lock_timeout_or(e.into(), timeout))?;
                Ok(value)
            }
            Err(err) => {
                debug!("rolling back unit of work: {err}");
                // Dropping the transaction rolls it back
                drop(tx);
                Err(lock_timeout_or(err, timeout))
            }
        }
    }
}

fn lock_timeout_or(err: Error, timeout: Duration) -> Error {
    match err {
        Error::Database(rusqlite::Error::SqliteFailure(ref failure, _))
            if matches!(
                failure.code,
                ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked
            ) =>
        {
            Error::LockTimeout {
                seconds: timeout.as_secs(),
            }
        }
        other => other,
    }
}
