//! Workout database queries.
//!
//! Workouts belong to a user. Creating one checks the user exists; deleting
//! one removes its entries first.

use chrono::Utc;
use fittrack_common::{EntityKind, Error, Result, UserId, WorkoutId};
use rusqlite::Connection;

use super::{atomically, require_parent};
use crate::models::{NewWorkout, User, Workout};

/// Create a new workout dated now.
///
/// # Arguments
///
/// * `conn` - Database connection
/// * `name` - Workout name, at least 2 characters
/// * `user_id` - Owning user, which must exist
///
/// # Returns
///
/// * `Ok(Workout)` - The created workout
/// * `Err(Error)` - Validation error for a bad name, referential error for an
///   unknown user, or a database error
pub fn create_workout(conn: &Connection, name: &str, user_id: UserId) -> Result<Workout> {
    insert_workout(conn, NewWorkout::new(name, user_id)?)
}

/// Insert an already validated workout.
pub fn insert_workout(conn: &Connection, draft: NewWorkout) -> Result<Workout> {
    require_parent(conn, EntityKind::User, draft.user_id().as_i64())?;

    let date = draft.date().unwrap_or_else(Utc::now);

    conn.execute(
        "INSERT INTO workouts (name, date, user_id) VALUES (:name, :date, :user_id)",
        rusqlite::named_params! {
            ":name": draft.name(),
            ":date": date,
            ":user_id": draft.user_id().as_i64(),
        },
    )
    .map_err(|e| Error::database(e.to_string()))?;

    let id = WorkoutId::from(conn.last_insert_rowid());
    tracing::debug!("Created workout {} for user {}", id, draft.user_id());

    Ok(Workout::from_draft(id, date, draft))
}

/// Get a workout by ID.
///
/// # Returns
///
/// * `Ok(Some(Workout))` - The workout if found
/// * `Ok(None)` - If the workout does not exist
/// * `Err(Error)` - If a database error occurs
pub fn get_workout(conn: &Connection, id: WorkoutId) -> Result<Option<Workout>> {
    let result = conn.query_row(
        "SELECT id, name, date, user_id FROM workouts WHERE id = :id",
        rusqlite::named_params! { ":id": id.as_i64() },
        Workout::from_row,
    );

    match result {
        Ok(workout) => Ok(Some(workout)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// List all workouts in insertion order.
pub fn list_workouts(conn: &Connection) -> Result<Vec<Workout>> {
    let mut stmt = conn
        .prepare("SELECT id, name, date, user_id FROM workouts ORDER BY id")
        .map_err(|e| Error::database(e.to_string()))?;

    let workouts = stmt
        .query_map([], Workout::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(workouts)
}

/// List the workouts owned by a user, in insertion order.
///
/// An unknown user simply has no workouts.
pub fn list_workouts_for_user(conn: &Connection, user_id: UserId) -> Result<Vec<Workout>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, name, date, user_id FROM workouts
             WHERE user_id = :user_id ORDER BY id",
        )
        .map_err(|e| Error::database(e.to_string()))?;

    let workouts = stmt
        .query_map(
            rusqlite::named_params! { ":user_id": user_id.as_i64() },
            Workout::from_row,
        )
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(workouts)
}

/// Resolve the user that owns a workout.
///
/// # Returns
///
/// * `Ok(Some(User))` - The owner
/// * `Ok(None)` - If the workout does not exist
/// * `Err(Error)` - If a database error occurs
pub fn get_workout_owner(conn: &Connection, workout_id: WorkoutId) -> Result<Option<User>> {
    let result = conn.query_row(
        "SELECT u.id, u.name, u.email FROM users u
         JOIN workouts w ON w.user_id = u.id
         WHERE w.id = :id",
        rusqlite::named_params! { ":id": workout_id.as_i64() },
        User::from_row,
    );

    match result {
        Ok(user) => Ok(Some(user)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

pub fn count_workouts(conn: &Connection) -> Result<usize> {
    conn.query_row("SELECT COUNT(*) FROM workouts", [], |row| row.get(0))
        .map_err(|e| Error::database(e.to_string()))
}

/// Persist the name and date of a workout. The owner never changes.
///
/// # Returns
///
/// * `Ok(())` - If the update succeeded
/// * `Err(Error)` - If the workout no longer exists or a database error occurs
pub fn update_workout(conn: &Connection, workout: &Workout) -> Result<()> {
    let rows_affected = conn
        .execute(
            "UPDATE workouts SET name = :name, date = :date WHERE id = :id",
            rusqlite::named_params! {
                ":id": workout.id().as_i64(),
                ":name": workout.name(),
                ":date": workout.date(),
            },
        )
        .map_err(|e| Error::database(e.to_string()))?;

    if rows_affected == 0 {
        return Err(Error::not_found(format!("workout {}", workout.id())));
    }

    Ok(())
}

/// Delete a workout and its entries.
///
/// # Returns
///
/// * `Ok(true)` - If the workout was deleted
/// * `Ok(false)` - If the workout did not exist
/// * `Err(Error)` - If a database error occurs; nothing is removed
pub fn delete_workout(conn: &Connection, id: WorkoutId) -> Result<bool> {
    let (entries, rows_affected) = atomically(conn, |conn| {
        let entries = conn
            .execute(
                "DELETE FROM workout_exercises WHERE workout_id = :id",
                rusqlite::named_params! { ":id": id.as_i64() },
            )
            .map_err(|e| Error::database(e.to_string()))?;

        let rows_affected = conn
            .execute(
                "DELETE FROM workouts WHERE id = :id",
                rusqlite::named_params! { ":id": id.as_i64() },
            )
            .map_err(|e| Error::database(e.to_string()))?;

        Ok((entries, rows_affected))
    })?;

    if rows_affected > 0 {
        tracing::debug!("Deleted workout {} with {} workout exercises", id, entries);
    }

    Ok(rows_affected > 0)
}
