//! Database query modules.
//!
//! This module organizes all database operations into logical groups:
//! - users: User CRUD; deleting a user removes its workouts and their entries
//! - exercises: Exercise CRUD; deleting an exercise removes its entries
//! - workouts: Workout CRUD, per-user listing and owner lookup
//! - workout_exercises: Entry CRUD and the joined detail views
//!
//! Every function takes the storage handle as a `&Connection`. Deletes that
//! cascade run in a single transaction, removing dependents before the parent.

pub mod exercises;
pub mod users;
pub mod workout_exercises;
pub mod workouts;

use fittrack_common::{EntityKind, Error, Result};
use rusqlite::Connection;

/// Check whether a row with the given id exists in the entity's table.
pub(crate) fn row_exists(conn: &Connection, kind: EntityKind, id: i64) -> Result<bool> {
    conn.query_row(
        &format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1)", kind.table()),
        [id],
        |row| row.get::<_, bool>(0),
    )
    .map_err(|e| Error::database(e.to_string()))
}

/// Fail with a referential error unless the parent row exists.
pub(crate) fn require_parent(conn: &Connection, kind: EntityKind, id: i64) -> Result<()> {
    if row_exists(conn, kind, id)? {
        Ok(())
    } else {
        Err(Error::referential(kind, id))
    }
}

/// Run `f` so that either all of its writes land or none do.
///
/// Opens a transaction on the connection. When the caller already has one
/// open, `f` runs inside a savepoint instead: a failure undoes only the writes
/// made by `f`, and the caller's commit or rollback decides the rest.
pub fn atomically<T>(conn: &Connection, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
    if !conn.is_autocommit() {
        return within_savepoint(conn, f);
    }

    let tx = conn
        .unchecked_transaction()
        .map_err(|e| Error::database(e.to_string()))?;

    // Dropping `tx` on the error path rolls back
    let value = f(&tx)?;

    tx.commit().map_err(|e| Error::database(e.to_string()))?;
    Ok(value)
}

fn within_savepoint<T>(conn: &Connection, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
    conn.execute_batch("SAVEPOINT fittrack_atomic")
        .map_err(|e| Error::database(e.to_string()))?;

    match f(conn) {
        Ok(value) => {
            conn.execute_batch("RELEASE fittrack_atomic")
                .map_err(|e| Error::database(e.to_string()))?;
            Ok(value)
        }
        Err(err) => {
            if let Err(e) =
                conn.execute_batch("ROLLBACK TO fittrack_atomic; RELEASE fittrack_atomic")
            {
                tracing::warn!("Failed to roll back savepoint: {}", e);
            }
            Err(err)
        }
    }
}

/// Delete every row from every table, dependents first, in one transaction.
///
/// Id sequences are reset so the next rows start again from 1.
///
/// # Returns
///
/// * `Ok(usize)` - Total number of rows removed
/// * `Err(Error)` - If a database error occurs; nothing is removed
pub fn clear_all(conn: &Connection) -> Result<usize> {
    let removed = atomically(conn, |conn| {
        let mut removed = 0;
        for kind in [
            EntityKind::WorkoutExercise,
            EntityKind::Workout,
            EntityKind::Exercise,
            EntityKind::User,
        ] {
            removed += conn
                .execute(&format!("DELETE FROM {}", kind.table()), [])
                .map_err(|e| Error::database(e.to_string()))?;
        }

        conn.execute(
            "DELETE FROM sqlite_sequence WHERE name IN ('users', 'exercises', 'workouts', 'workout_exercises')",
            [],
        )
        .map_err(|e| Error::database(e.to_string()))?;

        Ok(removed)
    })?;

    tracing::debug!("Cleared {} rows from all tables", removed);
    Ok(removed)
}
