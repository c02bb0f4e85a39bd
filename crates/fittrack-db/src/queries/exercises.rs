//! Exercise database queries.
//!
//! Deleting an exercise removes every workout entry that uses it but leaves
//! the workouts themselves in place.

use fittrack_common::{Error, ExerciseId, Result};
use rusqlite::Connection;

use super::atomically;
use crate::models::{Exercise, NewExercise};

/// Create a new exercise.
///
/// # Arguments
///
/// * `conn` - Database connection
/// * `name` - Exercise name, at least 2 characters
/// * `description` - Optional free-text description
///
/// # Returns
///
/// * `Ok(Exercise)` - The created exercise
/// * `Err(Error)` - If the name is invalid or a database error occurs
pub fn create_exercise(
    conn: &Connection,
    name: &str,
    description: Option<&str>,
) -> Result<Exercise> {
    insert_exercise(
        conn,
        NewExercise::new(name, description.map(str::to_string))?,
    )
}

/// Insert an already validated exercise.
pub fn insert_exercise(conn: &Connection, draft: NewExercise) -> Result<Exercise> {
    conn.execute(
        "INSERT INTO exercises (name, description) VALUES (:name, :description)",
        rusqlite::named_params! {
            ":name": draft.name(),
            ":description": draft.description(),
        },
    )
    .map_err(|e| Error::database(e.to_string()))?;

    let id = ExerciseId::from(conn.last_insert_rowid());
    tracing::debug!("Created exercise {}", id);

    Ok(Exercise::from_draft(id, draft))
}

/// Get an exercise by ID.
///
/// # Returns
///
/// * `Ok(Some(Exercise))` - The exercise if found
/// * `Ok(None)` - If the exercise does not exist
/// * `Err(Error)` - If a database error occurs
pub fn get_exercise(conn: &Connection, id: ExerciseId) -> Result<Option<Exercise>> {
    let result = conn.query_row(
        "SELECT id, name, description FROM exercises WHERE id = :id",
        rusqlite::named_params! { ":id": id.as_i64() },
        Exercise::from_row,
    );

    match result {
        Ok(exercise) => Ok(Some(exercise)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// List all exercises in insertion order.
pub fn list_exercises(conn: &Connection) -> Result<Vec<Exercise>> {
    let mut stmt = conn
        .prepare("SELECT id, name, description FROM exercises ORDER BY id")
        .map_err(|e| Error::database(e.to_string()))?;

    let exercises = stmt
        .query_map([], Exercise::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(exercises)
}

pub fn count_exercises(conn: &Connection) -> Result<usize> {
    conn.query_row("SELECT COUNT(*) FROM exercises", [], |row| row.get(0))
        .map_err(|e| Error::database(e.to_string()))
}

/// Persist the name and description of an exercise.
///
/// # Returns
///
/// * `Ok(())` - If the update succeeded
/// * `Err(Error)` - If the exercise no longer exists or a database error occurs
pub fn update_exercise(conn: &Connection, exercise: &Exercise) -> Result<()> {
    let rows_affected = conn
        .execute(
            "UPDATE exercises SET name = :name, description = :description WHERE id = :id",
            rusqlite::named_params! {
                ":id": exercise.id().as_i64(),
                ":name": exercise.name(),
                ":description": exercise.description(),
            },
        )
        .map_err(|e| Error::database(e.to_string()))?;

    if rows_affected == 0 {
        return Err(Error::not_found(format!("exercise {}", exercise.id())));
    }

    Ok(())
}

/// Delete an exercise and every workout entry that references it.
///
/// # Returns
///
/// * `Ok(true)` - If the exercise was deleted
/// * `Ok(false)` - If the exercise did not exist
/// * `Err(Error)` - If a database error occurs; nothing is removed
pub fn delete_exercise(conn: &Connection, id: ExerciseId) -> Result<bool> {
    let (entries, rows_affected) = atomically(conn, |conn| {
        let entries = conn
            .execute(
                "DELETE FROM workout_exercises WHERE exercise_id = :id",
                rusqlite::named_params! { ":id": id.as_i64() },
            )
            .map_err(|e| Error::database(e.to_string()))?;

        let rows_affected = conn
            .execute(
                "DELETE FROM exercises WHERE id = :id",
                rusqlite::named_params! { ":id": id.as_i64() },
            )
            .map_err(|e| Error::database(e.to_string()))?;

        Ok((entries, rows_affected))
    })?;

    if rows_affected > 0 {
        tracing::debug!("Deleted exercise {} with {} workout exercises", id, entries);
    }

    Ok(rows_affected > 0)
}
