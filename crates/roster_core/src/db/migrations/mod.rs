//! Versioned schema for the employee store.
//!
//! Each migration is an embedded SQL script keyed by the `PRAGMA user_version`
//! value it leaves behind. Pending scripts run inside a single transaction, so
//! a failing script leaves the database at its previous version.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "employees",
        sql: include_str!("0001_employees.sql"),
    },
    Migration {
        version: 2,
        name: "employee_name_index",
        sql: include_str!("0002_employee_name_index.sql"),
    },
];

/// Schema versions before and after `apply_migrations`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationReport {
    pub from_version: u32,
    pub to_version: u32,
}

impl MigrationReport {
    /// Number of scripts that ran.
    pub fn applied(&self) -> usize {
        pending(self.from_version)
            .take_while(|migration| migration.version <= self.to_version)
            .count()
    }
}

/// Highest schema version this binary can produce.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

fn pending(current_version: u32) -> impl Iterator<Item = &'static Migration> {
    MIGRATIONS
        .iter()
        .filter(move |migration| migration.version > current_version)
}

/// Brings the `employees` schema up to `latest_version()`.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file was written by a newer binary.
/// - `Migration` naming the script that failed; nothing is committed then.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<MigrationReport> {
    let from_version = current_user_version(conn)?;
    let latest = latest_version();
    if from_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: latest,
        });
    }

    let report = MigrationReport {
        from_version,
        to_version: latest,
    };
    if from_version == latest {
        return Ok(report);
    }

    let tx = conn.transaction()?;
    for migration in pending(from_version) {
        let run = |sql: &str| {
            tx.execute_batch(sql).map_err(|source| DbError::Migration {
                version: migration.version,
                name: migration.name,
                source,
            })
        };
        run(migration.sql)?;
        run(&format!("PRAGMA user_version = {};", migration.version))?;
        debug!(
            "event=db_migrate_step module=db status=ok version={} name={}",
            migration.version, migration.name
        );
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={} to_version={} applied={}",
        report.from_version,
        report.to_version,
        report.applied()
    );
    Ok(report)
}

/// Reads the schema version recorded in `PRAGMA user_version`.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?)
}
