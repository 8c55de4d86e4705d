//! Atomic unit-of-work boundary for services that issue several writes.

use crate::db::SavepointGuard;
use crate::repo::RepoError;
use rusqlite::Connection;

const UNIT_SAVEPOINT: &str = "bookshelf_unit";

/// Runs a group of repository calls as one atomic unit.
pub trait TransactionScope {
    /// Runs `work`; its writes persist only when it returns `Ok`.
    fn in_transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<RepoError>;
}

/// SQLite scope backed by a named savepoint, so it nests inside an outer
/// transaction opened by the caller.
#[derive(Clone, Copy)]
pub struct SqliteTransactionScope<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTransactionScope<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TransactionScope for SqliteTransactionScope<'_> {
    fn in_transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<RepoError>,
    {
        let guard = SavepointGuard::begin(self.conn, UNIT_SAVEPOINT).map_err(RepoError::from)?;
        let value = work()?;
        guard.release().map_err(RepoError::from)?;
        Ok(value)
    }
}
