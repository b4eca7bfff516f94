//! SQLite migration registry and executor.
//!
//! # Responsibility
//! - Register schema migrations in strictly increasing order.
//! - Apply pending migrations atomically.
//! - Drop and rebuild the whole schema for administrative resets.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Applied migration version is mirrored to `PRAGMA user_version`.
//! - `APP_TABLES` lists every application table, dependents first.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::{Connection, Transaction, TransactionBehavior};

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        sql: include_str!("0001_init.sql"),
    },
    Migration {
        version: 2,
        sql: include_str!("0002_activity_log.sql"),
    },
];

/// Application tables in drop order (rows referencing others come first).
pub const APP_TABLES: &[&str] = &["notifications", "activities", "follows", "users"];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies all pending migrations on the provided connection.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    apply_from(&tx, current_version)?;
    tx.commit()?;

    Ok(())
}

/// Drops every application table and re-applies all migrations.
///
/// Runs in one immediate transaction: either the schema is fully rebuilt
/// and empty, or nothing changes.
pub fn reset_schema(conn: &mut Connection) -> DbResult<()> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    reset_schema_in_tx(&tx)?;
    tx.commit()?;
    Ok(())
}

/// Same as [`reset_schema`], inside a caller-owned transaction.
pub fn reset_schema_in_tx(tx: &Transaction<'_>) -> DbResult<()> {
    for table in APP_TABLES {
        tx.execute_batch(&format!("DROP TABLE IF EXISTS {table};"))?;
    }
    tx.execute_batch("PRAGMA user_version = 0;")?;
    apply_from(tx, 0)?;
    info!(
        "event=schema_reset module=db status=ok version={}",
        latest_version()
    );
    Ok(())
}

fn apply_from(tx: &Transaction<'_>, current_version: u32) -> DbResult<()> {
    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }

        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    Ok(())
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
