//! Database connection pool management.
//!
//! This module provides connection pooling for SQLite using r2d2.
//! It handles pool initialization, connection customization, and running migrations.
//!
//! Callers take one connection per unit of work with [`get_conn`]. The
//! connection goes back to the pool when the guard is dropped, including on
//! early returns through `?`.

use fittrack_common::{Error, Result};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::migrations;

/// Type alias for the database connection pool.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled database connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Default number of pooled connections.
pub const DEFAULT_POOL_SIZE: u32 = 4;

/// Initialize a new database pool with the given file path.
///
/// This function will:
/// - Create the SQLite database file if it doesn't exist
/// - Set up connection pooling with r2d2
/// - Enable foreign key constraints on all connections
/// - Run pending database migrations
///
/// # Arguments
///
/// * `db_path` - Path to the SQLite database file
/// * `max_size` - Maximum number of pooled connections
///
/// # Example
///
/// ```no_run
/// use fittrack_db::pool::init_pool;
///
/// let pool = init_pool("fittrack.db", 4).unwrap();
/// let conn = pool.get().unwrap();
/// ```
pub fn init_pool(db_path: &str, max_size: u32) -> Result<DbPool> {
    let manager = SqliteConnectionManager::file(db_path)
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));

    tracing::debug!("Opening database at {} (pool size {})", db_path, max_size);
    build_pool(manager, max_size)
}

/// Initialize an in-memory database pool for testing.
///
/// The pool holds a single connection: every in-memory SQLite connection is
/// a separate database, so a larger pool would hand out empty schemas.
///
/// # Example
///
/// ```
/// use fittrack_db::pool::init_memory_pool;
///
/// let pool = init_memory_pool().unwrap();
/// let conn = pool.get().unwrap();
/// ```
pub fn init_memory_pool() -> Result<DbPool> {
    let manager = SqliteConnectionManager::memory()
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));

    build_pool(manager, 1)
}

fn build_pool(manager: SqliteConnectionManager, max_size: u32) -> Result<DbPool> {
    let pool = Pool::builder()
        .max_size(max_size)
        .build(manager)
        .map_err(|e| Error::database(format!("Failed to create connection pool: {}", e)))?;

    // Run migrations on a connection from the pool
    let conn = pool
        .get()
        .map_err(|e| Error::database(format!("Failed to get connection for migrations: {}", e)))?;

    migrations::run_migrations(&conn)
        .map_err(|e| Error::database(format!("Failed to run migrations: {}", e)))?;

    Ok(pool)
}

/// Get a connection from the pool.
///
/// This is a convenience wrapper around `pool.get()` that converts the
/// r2d2 error into our common Error type.
///
/// # Example
///
/// ```
/// use fittrack_db::pool::{init_memory_pool, get_conn};
///
/// let pool = init_memory_pool().unwrap();
/// let conn = get_conn(&pool).unwrap();
/// ```
pub fn get_conn(pool: &DbPool) -> Result<PooledConnection> {
    pool.get()
        .map_err(|e| Error::database(format!("Failed to get connection from pool: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_memory_pool() {
        let pool = init_memory_pool().unwrap();
        assert_eq!(pool.max_size(), 1);
    }

    #[test]
    fn test_get_conn() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();

        let enabled: i32 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[test]
    fn test_migrations_run_on_init() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='workout_exercises'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_connection_released_on_drop() {
        let pool = init_memory_pool().unwrap();

        {
            let conn = get_conn(&pool).unwrap();
            conn.execute(
                "INSERT INTO users (name, email) VALUES (?, ?)",
                rusqlite::params!["Jo", "jo@x.com"],
            )
            .unwrap();
        }

        // The single connection is available again and sees the same data
        let conn = get_conn(&pool).unwrap();
        let name: String = conn
            .query_row("SELECT name FROM users WHERE id = 1", [], |row| row.get(0))
            .unwrap();
        assert_eq!(name, "Jo");
    }

    #[test]
    fn test_file_pool_shares_data_between_connections() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fittrack.db");
        let pool = init_pool(path.to_str().unwrap(), DEFAULT_POOL_SIZE).unwrap();
        assert_eq!(pool.max_size(), DEFAULT_POOL_SIZE);

        let conn1 = get_conn(&pool).unwrap();
        conn1
            .execute("INSERT INTO exercises (name) VALUES ('Squats')", [])
            .unwrap();

        let conn2 = get_conn(&pool).unwrap();
        let count: i64 = conn2
            .query_row("SELECT COUNT(*) FROM exercises", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_reopen_existing_file_keeps_data() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fittrack.db");
        let path = path.to_str().unwrap();

        {
            let pool = init_pool(path, 2).unwrap();
            let conn = get_conn(&pool).unwrap();
            conn.execute("INSERT INTO exercises (name) VALUES ('Plank')", [])
                .unwrap();
        }

        let pool = init_pool(path, 2).unwrap();
        let conn = get_conn(&pool).unwrap();
        let name: String = conn
            .query_row("SELECT name FROM exercises", [], |row| row.get(0))
            .unwrap();
        assert_eq!(name, "Plank");
    }
}
