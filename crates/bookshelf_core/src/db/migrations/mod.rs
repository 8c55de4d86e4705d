//! Schema steps for the `persons` / `books` store.
//!
//! Each step owns one SQL script and a `user_version` number. Versions start
//! at 1 and grow by one per step; the database records the last step it ran
//! in `PRAGMA user_version`.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::{Connection, Transaction};

#[derive(Debug, Clone, Copy)]
struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[
    SchemaStep {
        version: 1,
        name: "init",
        sql: include_str!("0001_init.sql"),
    },
    SchemaStep {
        version: 2,
        name: "books_owner_index",
        sql: include_str!("0002_books_owner_index.sql"),
    },
];

/// Schema version this build writes and expects.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Reads `PRAGMA user_version` from the connection.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

/// Brings the schema up to [`latest_version`].
///
/// All outstanding steps share one transaction: a failing step leaves the
/// database at the version it had before the call.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from = current_user_version(conn)?;
    let latest = latest_version();
    if from > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from,
            latest_supported: latest,
        });
    }

    let steps = outstanding(SCHEMA_STEPS, from);
    if steps.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    run_steps(&tx, steps)?;
    tx.commit()?;
    Ok(())
}

fn outstanding(steps: &[SchemaStep], from: u32) -> &[SchemaStep] {
    let start = steps.partition_point(|step| step.version <= from);
    &steps[start..]
}

fn run_steps(tx: &Transaction<'_>, steps: &[SchemaStep]) -> DbResult<()> {
    for step in steps {
        let script = format!("{}\nPRAGMA user_version = {};", step.sql, step.version);
        tx.execute_batch(&script)
            .map_err(|source| DbError::Migration {
                version: step.version,
                name: step.name,
                source,
            })?;
        info!(
            "event=db_migrate module=db status=ok version={} name={}",
            step.version, step.name
        );
    }
    Ok(())
}
