//! Fittrack-DB: Database schema, migrations, and query operations
//!
//! This crate provides the fittrack data layer using SQLite with rusqlite and
//! r2d2 connection pooling.
//!
//! # Modules
//!
//! - `migrations` - Database schema migrations
//! - `pool` - Connection pool management
//! - `models` - Validated models matching the database schema
//! - `queries` - CRUD and relationship queries per entity
//!
//! # Example
//!
//! ```
//! use fittrack_db::pool::{init_memory_pool, get_conn};
//! use fittrack_db::queries::{users, workouts};
//!
//! let pool = init_memory_pool().unwrap();
//! let conn = get_conn(&pool).unwrap();
//!
//! let user = users::create_user(&conn, "Jo", "jo@x.com").unwrap();
//! let workout = workouts::create_workout(&conn, "Leg Day", user.id()).unwrap();
//! assert_eq!(workouts::list_workouts_for_user(&conn, user.id()).unwrap(), vec![workout]);
//! ```

pub mod migrations;
pub mod models;
pub mod pool;
pub mod queries;

pub use models::{
    Exercise, NewExercise, NewUser, NewWorkout, NewWorkoutExercise, User, Workout,
    WorkoutExercise, WorkoutExerciseDetail,
};
