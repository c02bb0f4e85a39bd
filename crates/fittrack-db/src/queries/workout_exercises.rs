//! Workout exercise database queries.
//!
//! A workout exercise is one exercise performed in one workout, carrying its
//! sets, reps and weight. Both parents must exist when the entry is created.
//! The `*_details` queries join each entry with its workout, the workout's
//! owner and the exercise, so callers never walk object references.

use fittrack_common::{EntityKind, Error, ExerciseId, Result, WorkoutExerciseId, WorkoutId};
use rusqlite::{Connection, Params};

use super::require_parent;
use crate::models::{NewWorkoutExercise, WorkoutExercise, WorkoutExerciseDetail};

const ENTRY_COLUMNS: &str = "id, workout_id, exercise_id, sets, reps, weight";

const DETAIL_SELECT: &str = "SELECT we.id, we.workout_id, we.exercise_id, we.sets, we.reps, we.weight,
            w.name, u.id, u.name, e.name
     FROM workout_exercises we
     JOIN workouts w ON w.id = we.workout_id
     JOIN users u ON u.id = w.user_id
     JOIN exercises e ON e.id = we.exercise_id";

/// Add an exercise to a workout.
///
/// # Arguments
///
/// * `conn` - Database connection
/// * `workout_id` - Workout the exercise was performed in
/// * `exercise_id` - Exercise performed
/// * `sets`, `reps`, `weight` - Non-negative metrics
///
/// # Returns
///
/// * `Ok(WorkoutExercise)` - The created entry
/// * `Err(Error)` - Validation error for negative metrics, referential error
///   for an unknown workout or exercise, or a database error
pub fn create_workout_exercise(
    conn: &Connection,
    workout_id: WorkoutId,
    exercise_id: ExerciseId,
    sets: i64,
    reps: i64,
    weight: f64,
) -> Result<WorkoutExercise> {
    let draft = NewWorkoutExercise::with_metrics(workout_id, exercise_id, sets, reps, weight)?;
    insert_workout_exercise(conn, draft)
}

/// Insert an already validated entry.
pub fn insert_workout_exercise(
    conn: &Connection,
    draft: NewWorkoutExercise,
) -> Result<WorkoutExercise> {
    require_parent(conn, EntityKind::Workout, draft.workout_id().as_i64())?;
    require_parent(conn, EntityKind::Exercise, draft.exercise_id().as_i64())?;

    conn.execute(
        "INSERT INTO workout_exercises (workout_id, exercise_id, sets, reps, weight)
         VALUES (:workout_id, :exercise_id, :sets, :reps, :weight)",
        rusqlite::named_params! {
            ":workout_id": draft.workout_id().as_i64(),
            ":exercise_id": draft.exercise_id().as_i64(),
            ":sets": draft.sets(),
            ":reps": draft.reps(),
            ":weight": draft.weight(),
        },
    )
    .map_err(|e| Error::database(e.to_string()))?;

    let id = WorkoutExerciseId::from(conn.last_insert_rowid());
    tracing::debug!(
        "Added exercise {} to workout {} as entry {}",
        draft.exercise_id(),
        draft.workout_id(),
        id
    );

    Ok(WorkoutExercise::from_draft(id, draft))
}

/// Get a workout exercise by ID.
///
/// # Returns
///
/// * `Ok(Some(WorkoutExercise))` - The entry if found
/// * `Ok(None)` - If the entry does not exist
/// * `Err(Error)` - If a database error occurs
pub fn get_workout_exercise(
    conn: &Connection,
    id: WorkoutExerciseId,
) -> Result<Option<WorkoutExercise>> {
    let result = conn.query_row(
        &format!("SELECT {ENTRY_COLUMNS} FROM workout_exercises WHERE id = :id"),
        rusqlite::named_params! { ":id": id.as_i64() },
        WorkoutExercise::from_row,
    );

    match result {
        Ok(entry) => Ok(Some(entry)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

fn query_entries<P: Params>(conn: &Connection, sql: &str, params: P) -> Result<Vec<WorkoutExercise>> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| Error::database(e.to_string()))?;

    let entries = stmt
        .query_map(params, WorkoutExercise::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(entries)
}

/// List all workout exercises in insertion order.
pub fn list_workout_exercises(conn: &Connection) -> Result<Vec<WorkoutExercise>> {
    query_entries(
        conn,
        &format!("SELECT {ENTRY_COLUMNS} FROM workout_exercises ORDER BY id"),
        [],
    )
}

/// List the entries of one workout.
pub fn list_for_workout(conn: &Connection, workout_id: WorkoutId) -> Result<Vec<WorkoutExercise>> {
    query_entries(
        conn,
        &format!(
            "SELECT {ENTRY_COLUMNS} FROM workout_exercises WHERE workout_id = :id ORDER BY id"
        ),
        rusqlite::named_params! { ":id": workout_id.as_i64() },
    )
}

/// List every entry that uses an exercise, across all workouts.
pub fn list_for_exercise(
    conn: &Connection,
    exercise_id: ExerciseId,
) -> Result<Vec<WorkoutExercise>> {
    query_entries(
        conn,
        &format!(
            "SELECT {ENTRY_COLUMNS} FROM workout_exercises WHERE exercise_id = :id ORDER BY id"
        ),
        rusqlite::named_params! { ":id": exercise_id.as_i64() },
    )
}

pub fn count_workout_exercises(conn: &Connection) -> Result<usize> {
    conn.query_row("SELECT COUNT(*) FROM workout_exercises", [], |row| row.get(0))
        .map_err(|e| Error::database(e.to_string()))
}

/// Get one entry joined with its workout, owner and exercise names.
pub fn get_detail(
    conn: &Connection,
    id: WorkoutExerciseId,
) -> Result<Option<WorkoutExerciseDetail>> {
    let result = conn.query_row(
        &format!("{DETAIL_SELECT} WHERE we.id = :id"),
        rusqlite::named_params! { ":id": id.as_i64() },
        WorkoutExerciseDetail::from_row,
    );

    match result {
        Ok(detail) => Ok(Some(detail)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

fn query_details<P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> Result<Vec<WorkoutExerciseDetail>> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| Error::database(e.to_string()))?;

    let details = stmt
        .query_map(params, WorkoutExerciseDetail::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(details)
}

/// List every entry with its names, in insertion order.
pub fn list_details(conn: &Connection) -> Result<Vec<WorkoutExerciseDetail>> {
    query_details(conn, &format!("{DETAIL_SELECT} ORDER BY we.id"), [])
}

/// List the entries of one workout with their exercise names.
pub fn list_details_for_workout(
    conn: &Connection,
    workout_id: WorkoutId,
) -> Result<Vec<WorkoutExerciseDetail>> {
    query_details(
        conn,
        &format!("{DETAIL_SELECT} WHERE we.workout_id = :id ORDER BY we.id"),
        rusqlite::named_params! { ":id": workout_id.as_i64() },
    )
}

/// List every use of an exercise with the workout and user it belongs to.
pub fn list_details_for_exercise(
    conn: &Connection,
    exercise_id: ExerciseId,
) -> Result<Vec<WorkoutExerciseDetail>> {
    query_details(
        conn,
        &format!("{DETAIL_SELECT} WHERE we.exercise_id = :id ORDER BY we.id"),
        rusqlite::named_params! { ":id": exercise_id.as_i64() },
    )
}

/// Persist the sets, reps and weight of an entry. Its parents never change.
///
/// # Returns
///
/// * `Ok(())` - If the update succeeded
/// * `Err(Error)` - If the entry no longer exists or a database error occurs
pub fn update_workout_exercise(conn: &Connection, entry: &WorkoutExercise) -> Result<()> {
    let rows_affected = conn
        .execute(
            "UPDATE workout_exercises SET sets = :sets, reps = :reps, weight = :weight
             WHERE id = :id",
            rusqlite::named_params! {
                ":id": entry.id().as_i64(),
                ":sets": entry.sets(),
                ":reps": entry.reps(),
                ":weight": entry.weight(),
            },
        )
        .map_err(|e| Error::database(e.to_string()))?;

    if rows_affected == 0 {
        return Err(Error::not_found(format!("workout exercise {}", entry.id())));
    }

    Ok(())
}

/// Remove an exercise from a workout. Nothing depends on an entry.
///
/// # Returns
///
/// * `Ok(true)` - If the entry was deleted
/// * `Ok(false)` - If the entry did not exist
/// * `Err(Error)` - If a database error occurs
pub fn delete_workout_exercise(conn: &Connection, id: WorkoutExerciseId) -> Result<bool> {
    let rows_affected = conn
        .execute(
            "DELETE FROM workout_exercises WHERE id = :id",
            rusqlite::named_params! { ":id": id.as_i64() },
        )
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(rows_affected > 0)
}
