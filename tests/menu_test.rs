//! Integration tests for the interactive menu.

mod common;

use common::TestHarness;
use fittrack_common::{ExerciseId, UserId, WorkoutId};
use fittrack_db::queries::{exercises, users, workout_exercises, workouts};

// ---------------------------------------------------------------------------
// Full session
// ---------------------------------------------------------------------------

#[test]
fn build_and_tear_down_a_workout() {
    let h = TestHarness::new();

    let script = concat!(
        // Users > create Jo
        "1\n1\nJo\njo@x.com\n0\n",
        // Exercises > create Squats with no description
        "2\n1\nSquats\n\n0\n",
        // Workouts > create Leg Day for user 1
        "3\n1\nLeg Day\n1\n0\n",
        // Workout exercises > add exercise 1 to workout 1
        "4\n1\n1\n1\n4\n12\n40\n0\n",
        // Workouts > view exercises of workout 1
        "3\n5\n1\n0\n",
        // Users > delete user 1
        "1\n4\n1\n0\n",
        // Exit
        "5\n",
    );
    let out = h.run_menu(script);

    assert!(out.contains("User created with ID 1"));
    assert!(out.contains("Exercise created with ID 1"));
    assert!(out.contains("Workout created with ID 1"));
    assert!(out.contains("Exercise added to workout with ID 1"));
    assert!(out.contains("Exercises in 'Leg Day':"));
    assert!(out.contains("Exercise: Squats, Sets: 4, Reps: 12, Weight: 40"));
    assert!(out.contains("User deleted successfully."));
    assert!(out.ends_with("Goodbye!\n"));

    let conn = h.conn();
    assert!(users::get_user(&conn, UserId::from(1)).unwrap().is_none());
    assert!(workouts::get_workout(&conn, WorkoutId::from(1)).unwrap().is_none());
    assert_eq!(workout_exercises::count_workout_exercises(&conn).unwrap(), 0);
    assert!(exercises::get_exercise(&conn, ExerciseId::from(1)).unwrap().is_some());
}

// ---------------------------------------------------------------------------
// Relationship views
// ---------------------------------------------------------------------------

#[test]
fn user_workouts_view() {
    let h = TestHarness::seeded();
    let out = h.run_menu("1\n5\n1\n5\n4\n0\n0\n");

    assert!(out.contains("Workouts for John Doe:"));
    assert!(out.contains("Name: Morning Strength Training"));
    assert!(out.contains("Name: Evening Cardio"));
    assert!(out.contains("Workouts for Sarah Wilson:"));
}

#[test]
fn user_without_workouts() {
    let h = TestHarness::new();
    {
        let conn = h.conn();
        users::create_user(&conn, "Sam", "sam@x.com").unwrap();
    }

    let out = h.run_menu("1\n5\n1\n0\n0\n");
    assert!(out.contains("Sam has no workouts."));
}

#[test]
fn exercise_usage_view() {
    let h = TestHarness::seeded();
    // Squats (3) is used once, in Evening Cardio
    let out = h.run_menu("2\n5\n3\n0\n0\n");

    assert!(out.contains("Workouts containing Squats:"));
    assert!(out.contains("Name: Evening Cardio, User: John Doe, Sets: 4, Reps: 12"));
}

#[test]
fn unused_exercise_view() {
    let h = TestHarness::seeded();
    // Lunges (7) has no entries in the demo data
    let out = h.run_menu("2\n5\n7\n0\n0\n");
    assert!(out.contains("Lunges is not used in any workouts."));
}

#[test]
fn empty_listings() {
    let h = TestHarness::new();
    let out = h.run_menu("1\n2\n0\n2\n2\n0\n3\n2\n0\n4\n2\n0\n0\n");

    assert!(out.contains("No users found."));
    assert!(out.contains("No exercises found."));
    assert!(out.contains("No workouts found."));
    assert!(out.contains("No workout exercises found."));
}

// ---------------------------------------------------------------------------
// Guards and errors
// ---------------------------------------------------------------------------

#[test]
fn workout_needs_a_user_first() {
    let h = TestHarness::new();
    let out = h.run_menu("3\n1\nLeg Day\n0\n0\n");

    assert!(out.contains("No users found. Please create a user first."));
    assert_eq!(workouts::count_workouts(&h.conn()).unwrap(), 0);
}

#[test]
fn entry_needs_workout_and_exercise() {
    let h = TestHarness::new();
    let out = h.run_menu("4\n1\n0\n0\n");
    assert!(out.contains("No workouts found. Please create a workout first."));
}

#[test]
fn entry_for_missing_exercise_is_rejected() {
    let h = TestHarness::seeded();
    let out = h.run_menu("4\n1\n1\n99\n3\n10\n0\n0\n0\n");

    assert!(out.contains("Error: Referenced exercise 99 does not exist"));
    assert_eq!(
        workout_exercises::count_workout_exercises(&h.conn()).unwrap(),
        6
    );
}

#[test]
fn delete_missing_rows_reports_not_found() {
    let h = TestHarness::new();
    let out = h.run_menu("2\n4\n9\n0\n3\n4\n9\n0\n4\n5\n9\n0\n0\n");

    assert!(out.contains("Exercise not found."));
    assert!(out.contains("Workout not found."));
    assert!(out.contains("Workout exercise not found."));
}

#[test]
fn input_ends_mid_prompt() {
    let h = TestHarness::new();
    let out = h.run_menu("4\n");
    assert!(out.ends_with("Goodbye!\n"));
}
