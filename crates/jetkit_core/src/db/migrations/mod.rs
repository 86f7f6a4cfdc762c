//! Versioned schema scripts, one per app table group.
//!
//! # Invariants
//! - Versions start at 1 and increase by one per script.
//! - Each script commits together with its `user_version` bump, so a failed
//!   script leaves the database at the last good version.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::Connection;

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "weather",
        sql: include_str!("0001_weather.sql"),
    },
    Migration {
        version: 2,
        name: "notes",
        sql: include_str!("0002_notes.sql"),
    },
    Migration {
        version: 3,
        name: "books",
        sql: include_str!("0003_books.sql"),
    },
];

/// Schema version this build writes.
pub fn latest_version() -> u32 {
    MIGRATIONS.len() as u32
}

/// Reads the schema version stamped on `conn`.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

/// Runs every script newer than the stamped version.
///
/// Returns the number of scripts applied.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<usize> {
    let found = schema_version(conn)?;
    let supported = latest_version();
    if found > supported {
        return Err(DbError::SchemaTooNew { found, supported });
    }

    let pending = MIGRATIONS.iter().filter(|migration| migration.version > found);
    let mut applied = 0;
    for migration in pending {
        let failed = |source: rusqlite::Error| DbError::Migration {
            version: migration.version,
            name: migration.name,
            source,
        };
        let tx = conn.transaction()?;
        tx.execute_batch(migration.sql).map_err(failed)?;
        tx.pragma_update(None, "user_version", migration.version)
            .map_err(failed)?;
        tx.commit()?;
        applied += 1;
        debug!(
            "event=db_migrate module=db status=applied version={} name={}",
            migration.version, migration.name
        );
    }

    if applied > 0 {
        info!(
            "event=db_migrate module=db status=ok from_version={} to_version={}",
            found, supported
        );
    }
    Ok(applied)
}
