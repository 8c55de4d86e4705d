//! Named savepoint guard over a shared connection borrow.
//!
//! `rusqlite::Savepoint` needs `&mut Connection`, while repositories only
//! hold `&Connection`. This guard issues the SQL directly so grouped writes
//! can nest inside an outer transaction.

use super::DbResult;
use log::error;
use rusqlite::Connection;

/// Open savepoint that rolls back when dropped without `release`.
pub struct SavepointGuard<'conn> {
    conn: &'conn Connection,
    name: &'static str,
    finished: bool,
}

impl<'conn> SavepointGuard<'conn> {
    /// Starts a savepoint named `name`.
    ///
    /// `name` must be a plain SQL identifier.
    pub fn begin(conn: &'conn Connection, name: &'static str) -> DbResult<Self> {
        conn.execute_batch(&format!("SAVEPOINT {name};"))?;
        Ok(Self {
            conn,
            name,
            finished: false,
        })
    }

    /// Makes all writes since `begin` part of the enclosing scope.
    ///
    /// A failed release leaves the guard armed, so drop still rolls back.
    pub fn release(mut self) -> DbResult<()> {
        self.conn
            .execute_batch(&format!("RELEASE {};", self.name))?;
        self.finished = true;
        Ok(())
    }

    /// Discards all writes since `begin`.
    pub fn rollback(mut self) -> DbResult<()> {
        self.finished = true;
        self.rollback_inner()
    }

    fn rollback_inner(&self) -> DbResult<()> {
        self.conn.execute_batch(&format!(
            "ROLLBACK TO {name}; RELEASE {name};",
            name = self.name
        ))?;
        Ok(())
    }
}

impl Drop for SavepointGuard<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Err(err) = self.rollback_inner() {
            error!(
                "event=savepoint_rollback module=db status=error savepoint={} error={}",
                self.name, err
            );
        }
    }
}
