//! Whole-database snapshot for the `export` command.

use fittrack_common::Result;
use fittrack_db::models::{Exercise, User, Workout, WorkoutExercise};
use fittrack_db::queries::{exercises, users, workout_exercises, workouts};
use rusqlite::Connection;
use serde::Serialize;

/// Every row of every table, each list in id order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub exercises: Vec<Exercise>,
    pub workouts: Vec<Workout>,
    pub workout_exercises: Vec<WorkoutExercise>,
}

/// Read all four tables.
///
/// The reads share one transaction so the snapshot is consistent even if
/// another connection writes in between.
pub fn export_all(conn: &Connection) -> Result<Snapshot> {
    let snapshot = fittrack_db::queries::atomically(conn, |conn| {
        Ok(Snapshot {
            users: users::list_users(conn)?,
            exercises: exercises::list_exercises(conn)?,
            workouts: workouts::list_workouts(conn)?,
            workout_exercises: workout_exercises::list_workout_exercises(conn)?,
        })
    })?;

    tracing::debug!(
        "Exported {} users, {} exercises, {} workouts, {} workout exercises",
        snapshot.users.len(),
        snapshot.exercises.len(),
        snapshot.workouts.len(),
        snapshot.workout_exercises.len()
    );

    Ok(snapshot)
}
