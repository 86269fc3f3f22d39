//! Catalog schema steps and the runner that brings a connection up to date.
//!
//! Steps are plain SQL files compiled into the binary. A run applies every
//! step above the stored `user_version` inside one transaction, so a file is
//! either fully upgraded or left at its previous version.

use crate::db::{DbError, DbResult};
use log::{error, info};
use rusqlite::{Connection, Transaction};

#[derive(Debug, Clone, Copy)]
struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

// Versions start at 1 and increase by one per step.
const SCHEMA_STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    name: "authors_and_books",
    sql: include_str!("0001_init.sql"),
}];

/// Schema version this build writes.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Schema version recorded in the database file.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

/// Upgrades `conn` to [`latest_version`].
///
/// # Errors
/// - `DbError::SchemaTooNew` when the file is ahead of this build.
/// - `DbError::Migration` naming the first step that failed.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    let supported = latest_version();

    if found > supported {
        error!(
            "event=db_migrate module=db status=error error_code=schema_too_new found={found} supported={supported}"
        );
        return Err(DbError::SchemaTooNew { found, supported });
    }

    let pending: Vec<&SchemaStep> = SCHEMA_STEPS
        .iter()
        .filter(|step| step.version > found)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    info!(
        "event=db_migrate module=db status=start from_version={found} to_version={supported} steps={}",
        pending.len()
    );

    let tx = conn.transaction()?;
    for step in pending {
        run_step(&tx, step).map_err(|source| {
            error!(
                "event=db_migrate module=db status=error version={} name={} error={}",
                step.version, step.name, source
            );
            DbError::Migration {
                version: step.version,
                source,
            }
        })?;
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok version={supported}");
    Ok(())
}

fn run_step(tx: &Transaction<'_>, step: &SchemaStep) -> rusqlite::Result<()> {
    tx.execute_batch(step.sql)?;
    tx.pragma_update(None, "user_version", step.version)
}
