//! Schema migrations for the fittrack database.
//!
//! The schema ships inside the binary as numbered SQL scripts. Opening a
//! database applies the scripts it has not seen yet, each in its own
//! transaction, and records them in `schema_migrations`. A database last
//! written by a newer fittrack is refused instead of being modified.

use rusqlite::{params, Connection};
use thiserror::Error;

/// Migration error types
#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Migration {version} ({name}) failed: {reason}")]
    Failed {
        version: usize,
        name: &'static str,
        reason: String,
    },

    #[error("Database schema v{found} is newer than this build supports (v{supported})")]
    Unsupported { found: usize, supported: usize },
}

struct Migration {
    version: usize,
    name: &'static str,
    sql: &'static str,
}

impl Migration {
    /// Run the script and record it, all or nothing.
    fn apply(&self, conn: &Connection) -> Result<(), MigrationError> {
        let failed = |e: rusqlite::Error| MigrationError::Failed {
            version: self.version,
            name: self.name,
            reason: e.to_string(),
        };

        let tx = conn.unchecked_transaction().map_err(failed)?;
        tx.execute_batch(self.sql).map_err(failed)?;
        tx.execute(
            "INSERT INTO schema_migrations (version, name) VALUES (?1, ?2)",
            params![self.version, self.name],
        )
        .map_err(failed)?;
        tx.commit().map_err(failed)
    }
}

/// Ordered by version; versions start at 1 and have no gaps.
const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial",
    sql: include_str!("001_initial.sql"),
}];

const CREATE_TRACKING_TABLE: &str = "CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
)";

/// Where a database's schema stands relative to this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaStatus {
    /// Highest version recorded in the database, 0 for a blank file.
    pub current: usize,
    /// Highest version this build knows how to apply.
    pub latest: usize,
}

impl SchemaStatus {
    /// Number of migrations that opening the database would apply.
    pub fn pending(&self) -> usize {
        MIGRATIONS
            .iter()
            .filter(|m| m.version > self.current)
            .count()
    }

    pub fn is_newer_than_build(&self) -> bool {
        self.current > self.latest
    }
}

/// Read the applied version without writing, so read-only handles work.
fn applied_version(conn: &Connection) -> rusqlite::Result<usize> {
    let tracked: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_migrations')",
        [],
        |row| row.get(0),
    )?;
    if !tracked {
        return Ok(0);
    }

    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )
}

/// Bring the schema up to date.
///
/// Foreign keys are switched on for `conn` first, since the connection that
/// runs migrations is returned to the pool and reused for queries.
///
/// # Returns
///
/// * `Ok(usize)` - Number of migrations applied, 0 when already current
/// * `Err(MigrationError)` - A script failed (its changes are rolled back),
///   or the database is newer than this build
pub fn run_migrations(conn: &Connection) -> Result<usize, MigrationError> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.execute_batch(CREATE_TRACKING_TABLE)?;

    let status = schema_status(conn)?;
    if status.is_newer_than_build() {
        return Err(MigrationError::Unsupported {
            found: status.current,
            supported: status.latest,
        });
    }

    let pending: Vec<&Migration> = MIGRATIONS
        .iter()
        .filter(|m| m.version > status.current)
        .collect();

    if pending.is_empty() {
        tracing::debug!("Schema is up to date at version {}", status.current);
        return Ok(0);
    }

    for migration in &pending {
        migration.apply(conn)?;
        tracing::info!(
            "Applied migration {}: {}",
            migration.version,
            migration.name
        );
    }

    Ok(pending.len())
}

/// Report the schema version of `conn` against this build without migrating.
pub fn schema_status(conn: &Connection) -> Result<SchemaStatus, MigrationError> {
    Ok(SchemaStatus {
        current: applied_version(conn)?,
        latest: latest_version(),
    })
}

/// Get the latest available migration version
pub fn latest_version() -> usize {
    MIGRATIONS.last().map(|m| m.version).unwrap_or(0)
}
