//! Cascade and referential integrity across all four tables.

use assert_matches::assert_matches;
use fittrack_common::{Error, UserId, WorkoutId};
use fittrack_db::pool::{get_conn, init_memory_pool, init_pool};
use fittrack_db::queries::{self, exercises, users, workout_exercises, workouts};
use rusqlite::Connection;

fn total_rows(conn: &Connection) -> usize {
    users::count_users(conn).unwrap()
        + exercises::count_exercises(conn).unwrap()
        + workouts::count_workouts(conn).unwrap()
        + workout_exercises::count_workout_exercises(conn).unwrap()
}

#[test]
fn jo_leg_day_squats() {
    let pool = init_memory_pool().unwrap();
    let conn = get_conn(&pool).unwrap();

    let jo = users::create_user(&conn, "Jo", "jo@x.com").unwrap();
    let leg_day = workouts::create_workout(&conn, "Leg Day", jo.id()).unwrap();
    let squats = exercises::create_exercise(&conn, "Squats", None).unwrap();
    let entry =
        workout_exercises::create_workout_exercise(&conn, leg_day.id(), squats.id(), 4, 12, 40.0)
            .unwrap();

    let owner = workouts::get_workout_owner(&conn, leg_day.id()).unwrap();
    assert_eq!(owner.as_ref(), Some(&jo));

    let detail = workout_exercises::get_detail(&conn, entry.id())
        .unwrap()
        .unwrap();
    assert_eq!(detail.workout_name, "Leg Day");
    assert_eq!(detail.exercise_name, "Squats");
    assert_eq!(detail.user_name, "Jo");

    assert!(users::delete_user(&conn, jo.id()).unwrap());
    assert!(workouts::get_workout(&conn, leg_day.id()).unwrap().is_none());
    assert!(workout_exercises::get_workout_exercise(&conn, entry.id())
        .unwrap()
        .is_none());
    assert_eq!(exercises::list_exercises(&conn).unwrap(), vec![squats]);
}

#[test]
fn deleting_a_user_removes_exactly_its_subtree() {
    let pool = init_memory_pool().unwrap();
    let conn = get_conn(&pool).unwrap();

    let bench = exercises::create_exercise(&conn, "Bench Press", None).unwrap();
    let rows = exercises::create_exercise(&conn, "Rows", None).unwrap();
    let target = users::create_user(&conn, "Target", "target@x.com").unwrap();
    let bystander = users::create_user(&conn, "Bystander", "by@x.com").unwrap();

    // Target: 3 workouts with 2 entries each. Bystander: 1 workout, 1 entry.
    for n in 0..3 {
        let workout = workouts::create_workout(&conn, &format!("Day {n}"), target.id()).unwrap();
        for exercise in [&bench, &rows] {
            workout_exercises::create_workout_exercise(
                &conn,
                workout.id(),
                exercise.id(),
                3,
                10,
                20.0,
            )
            .unwrap();
        }
    }
    let kept = workouts::create_workout(&conn, "Mine", bystander.id()).unwrap();
    workout_exercises::create_workout_exercise(&conn, kept.id(), bench.id(), 5, 5, 80.0).unwrap();

    let before = total_rows(&conn);
    assert!(users::delete_user(&conn, target.id()).unwrap());

    // 1 user + 3 workouts + 3 * 2 entries
    assert_eq!(before - total_rows(&conn), 1 + 3 + 6);
    assert_eq!(
        workouts::list_workouts_for_user(&conn, bystander.id()).unwrap(),
        vec![kept.clone()]
    );
    assert_eq!(
        workout_exercises::list_for_workout(&conn, kept.id())
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn no_entry_outlives_its_parents() {
    let pool = init_memory_pool().unwrap();
    let conn = get_conn(&pool).unwrap();

    let user = users::create_user(&conn, "Jo", "jo@x.com").unwrap();
    let workout = workouts::create_workout(&conn, "Leg Day", user.id()).unwrap();
    let squats = exercises::create_exercise(&conn, "Squats", None).unwrap();
    let lunges = exercises::create_exercise(&conn, "Lunges", None).unwrap();
    workout_exercises::create_workout_exercise(&conn, workout.id(), squats.id(), 3, 10, 0.0)
        .unwrap();
    workout_exercises::create_workout_exercise(&conn, workout.id(), lunges.id(), 3, 10, 0.0)
        .unwrap();

    exercises::delete_exercise(&conn, squats.id()).unwrap();
    workouts::delete_workout(&conn, workout.id()).unwrap();

    for entry in workout_exercises::list_workout_exercises(&conn).unwrap() {
        assert!(workouts::get_workout(&conn, entry.workout_id())
            .unwrap()
            .is_some());
        assert!(exercises::get_exercise(&conn, entry.exercise_id())
            .unwrap()
            .is_some());
    }
    assert_eq!(workout_exercises::count_workout_exercises(&conn).unwrap(), 0);
    assert!(users::get_user(&conn, user.id()).unwrap().is_some());
}

#[test]
fn creates_with_dangling_references_leave_no_trace() {
    let pool = init_memory_pool().unwrap();
    let conn = get_conn(&pool).unwrap();

    assert_matches!(
        workouts::create_workout(&conn, "Leg Day", UserId::from(1)),
        Err(Error::Referential { .. })
    );

    let squats = exercises::create_exercise(&conn, "Squats", None).unwrap();
    assert_matches!(
        workout_exercises::create_workout_exercise(
            &conn,
            WorkoutId::from(1),
            squats.id(),
            3,
            10,
            0.0
        ),
        Err(Error::Referential { .. })
    );

    assert_eq!(total_rows(&conn), 1);
}

#[test]
fn file_database_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gym.db");
    let path = path.to_str().unwrap();

    {
        let pool = init_pool(path, 2).unwrap();
        let conn = get_conn(&pool).unwrap();
        let user = users::create_user(&conn, "Jo", "jo@x.com").unwrap();
        workouts::create_workout(&conn, "Leg Day", user.id()).unwrap();
    }

    let pool = init_pool(path, 2).unwrap();
    let conn = get_conn(&pool).unwrap();
    assert_eq!(users::count_users(&conn).unwrap(), 1);
    assert_eq!(workouts::count_workouts(&conn).unwrap(), 1);

    // Foreign keys are enforced on every pooled connection
    let other = get_conn(&pool).unwrap();
    let enforced: bool = other
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert!(enforced);

    queries::clear_all(&conn).unwrap();
    assert_eq!(total_rows(&other), 0);
}
