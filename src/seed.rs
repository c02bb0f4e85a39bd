//! Demo data for trying out the menu.

use fittrack_common::Result;
use fittrack_db::queries::{self, exercises, users, workout_exercises, workouts};
use rusqlite::Connection;
use serde::Serialize;

const USERS: &[(&str, &str)] = &[
    ("John Doe", "john.doe@example.com"),
    ("Jane Smith", "jane.smith@example.com"),
    ("Mike Johnson", "mike.johnson@example.com"),
    ("Sarah Wilson", "sarah.wilson@example.com"),
];

const EXERCISES: &[(&str, &str)] = &[
    ("Push-ups", "Bodyweight press from a plank; chest, shoulders and triceps."),
    ("Pull-ups", "Hang from a bar and pull until the chin clears it."),
    ("Squats", "Feet shoulder-width apart, sit back and down, then stand."),
    ("Plank", "Hold a straight line from head to heels on forearms or hands."),
    ("Deadlift", "Lift a barbell from the floor to the hips with a flat back."),
    ("Bench Press", "Press a barbell from the chest to straight arms while lying on a bench."),
    ("Lunges", "Step forward and lower until both knees are bent to ninety degrees."),
    ("Shoulder Press", "Press weights from shoulder height to straight arms overhead."),
];

/// (workout name, index into USERS)
const WORKOUTS: &[(&str, usize)] = &[
    ("Morning Strength Training", 0),
    ("Evening Cardio", 0),
    ("Full Body Workout", 1),
    ("Upper Body Focus", 2),
    ("Lower Body Day", 3),
];

/// (index into WORKOUTS, index into EXERCISES, sets, reps)
const ENTRIES: &[(usize, usize, i64, i64)] = &[
    (0, 0, 3, 15),
    (0, 1, 3, 10),
    (1, 2, 4, 12),
    (2, 3, 3, 60),
    (3, 4, 5, 5),
    (4, 5, 4, 8),
];

/// Number of rows written by [`seed_demo_data`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub users: usize,
    pub exercises: usize,
    pub workouts: usize,
    pub workout_exercises: usize,
}

/// Replace everything in the database with the demo data set.
///
/// Runs in one transaction: on error the previous contents are kept.
pub fn seed_demo_data(conn: &Connection) -> Result<SeedSummary> {
    queries::atomically(conn, |conn| {
        tracing::info!("Clearing existing data");
        queries::clear_all(conn)?;

        let mut user_ids = Vec::with_capacity(USERS.len());
        for (name, email) in USERS {
            user_ids.push(users::create_user(conn, name, email)?.id());
        }

        let mut exercise_ids = Vec::with_capacity(EXERCISES.len());
        for (name, description) in EXERCISES {
            exercise_ids.push(exercises::create_exercise(conn, name, Some(description))?.id());
        }

        let mut workout_ids = Vec::with_capacity(WORKOUTS.len());
        for (name, user) in WORKOUTS {
            workout_ids.push(workouts::create_workout(conn, name, user_ids[*user])?.id());
        }

        for (workout, exercise, sets, reps) in ENTRIES {
            workout_exercises::create_workout_exercise(
                conn,
                workout_ids[*workout],
                exercise_ids[*exercise],
                *sets,
                *reps,
                0.0,
            )?;
        }

        Ok(())
    })?;

    let summary = SeedSummary {
        users: USERS.len(),
        exercises: EXERCISES.len(),
        workouts: WORKOUTS.len(),
        workout_exercises: ENTRIES.len(),
    };
    tracing::info!(
        "Seeded {} users, {} exercises, {} workouts, {} workout exercises",
        summary.users,
        summary.exercises,
        summary.workouts,
        summary.workout_exercises
    );

    Ok(summary)
}
