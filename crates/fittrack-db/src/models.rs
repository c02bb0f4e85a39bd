//! Rust models matching the database schema.
//!
//! Each persisted record has two types: a `New*` draft that validates every
//! field on construction, and the stored model returned by the queries. Fields
//! are private so the only way to change a value is through a setter that
//! applies the same rule as the constructor. Setters never write to the
//! database; pass the mutated model to the matching `update_*` query.

use chrono::{DateTime, Utc};
use fittrack_common::validation::{
    validate_email, validate_name, validate_reps, validate_sets, validate_weight, DEFAULT_REPS,
    DEFAULT_SETS, DEFAULT_WEIGHT,
};
use fittrack_common::{EntityKind, ExerciseId, Result, UserId, WorkoutExerciseId, WorkoutId};
use rusqlite::Row;
use serde::Serialize;

/// Validated input for a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    name: String,
    email: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let email = email.into();
        validate_name(EntityKind::User, &name)?;
        validate_email(&email)?;
        Ok(Self { name, email })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

/// User account model.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
}

impl User {
    pub(crate) fn from_draft(id: UserId, draft: NewUser) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
        }
    }

    /// Columns: id, name, email.
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: UserId::from(row.get::<_, i64>(0)?),
            name: row.get(1)?,
            email: row.get(2)?,
        })
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        validate_name(EntityKind::User, &name)?;
        self.name = name;
        Ok(())
    }

    pub fn set_email(&mut self, email: impl Into<String>) -> Result<()> {
        let email = email.into();
        validate_email(&email)?;
        self.email = email;
        Ok(())
    }
}

/// Validated input for a new exercise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExercise {
    name: String,
    description: Option<String>,
}

impl NewExercise {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Result<Self> {
        let name = name.into();
        validate_name(EntityKind::Exercise, &name)?;
        Ok(Self { name, description })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Exercise catalogue entry.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Exercise {
    id: ExerciseId,
    name: String,
    description: Option<String>,
}

impl Exercise {
    pub(crate) fn from_draft(id: ExerciseId, draft: NewExercise) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
        }
    }

    /// Columns: id, name, description.
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: ExerciseId::from(row.get::<_, i64>(0)?),
            name: row.get(1)?,
            description: row.get(2)?,
        })
    }

    pub fn id(&self) -> ExerciseId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        validate_name(EntityKind::Exercise, &name)?;
        self.name = name;
        Ok(())
    }

    /// Description is free text with no constraint.
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }
}

/// Validated input for a new workout.
///
/// The date defaults to the moment the row is inserted unless set with
/// [`NewWorkout::on`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorkout {
    name: String,
    user_id: UserId,
    date: Option<DateTime<Utc>>,
}

impl NewWorkout {
    pub fn new(name: impl Into<String>, user_id: UserId) -> Result<Self> {
        let name = name.into();
        validate_name(EntityKind::Workout, &name)?;
        Ok(Self {
            name,
            user_id,
            date: None,
        })
    }

    /// Record the workout at an explicit date instead of now.
    #[must_use]
    pub fn on(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn date(&self) -> Option<DateTime<Utc>> {
        self.date
    }
}

/// Workout session model. Belongs to exactly one user.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Workout {
    id: WorkoutId,
    name: String,
    date: DateTime<Utc>,
    user_id: UserId,
}

impl Workout {
    pub(crate) fn from_draft(id: WorkoutId, date: DateTime<Utc>, draft: NewWorkout) -> Self {
        Self {
            id,
            name: draft.name,
            date,
            user_id: draft.user_id,
        }
    }

    /// Columns: id, name, date, user_id.
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: WorkoutId::from(row.get::<_, i64>(0)?),
            name: row.get(1)?,
            date: row.get(2)?,
            user_id: UserId::from(row.get::<_, i64>(3)?),
        })
    }

    pub fn id(&self) -> WorkoutId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        validate_name(EntityKind::Workout, &name)?;
        self.name = name;
        Ok(())
    }

    pub fn set_date(&mut self, date: DateTime<Utc>) {
        self.date = date;
    }
}

/// Validated input for adding an exercise to a workout.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkoutExercise {
    workout_id: WorkoutId,
    exercise_id: ExerciseId,
    sets: i64,
    reps: i64,
    weight: f64,
}

impl NewWorkoutExercise {
    /// An entry with the default 3 sets of 10 reps at zero weight.
    pub fn new(workout_id: WorkoutId, exercise_id: ExerciseId) -> Self {
        Self {
            workout_id,
            exercise_id,
            sets: DEFAULT_SETS,
            reps: DEFAULT_REPS,
            weight: DEFAULT_WEIGHT,
        }
    }

    pub fn with_metrics(
        workout_id: WorkoutId,
        exercise_id: ExerciseId,
        sets: i64,
        reps: i64,
        weight: f64,
    ) -> Result<Self> {
        validate_sets(sets)?;
        validate_reps(reps)?;
        let weight = validate_weight(weight)?;
        Ok(Self {
            workout_id,
            exercise_id,
            sets,
            reps,
            weight,
        })
    }

    pub fn workout_id(&self) -> WorkoutId {
        self.workout_id
    }

    pub fn exercise_id(&self) -> ExerciseId {
        self.exercise_id
    }

    pub fn sets(&self) -> i64 {
        self.sets
    }

    pub fn reps(&self) -> i64 {
        self.reps
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// One exercise performed within a workout.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WorkoutExercise {
    id: WorkoutExerciseId,
    workout_id: WorkoutId,
    exercise_id: ExerciseId,
    sets: i64,
    reps: i64,
    weight: f64,
}

impl WorkoutExercise {
    pub(crate) fn from_draft(id: WorkoutExerciseId, draft: NewWorkoutExercise) -> Self {
        Self {
            id,
            workout_id: draft.workout_id,
            exercise_id: draft.exercise_id,
            sets: draft.sets,
            reps: draft.reps,
            weight: draft.weight,
        }
    }

    /// Columns: id, workout_id, exercise_id, sets, reps, weight.
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: WorkoutExerciseId::from(row.get::<_, i64>(0)?),
            workout_id: WorkoutId::from(row.get::<_, i64>(1)?),
            exercise_id: ExerciseId::from(row.get::<_, i64>(2)?),
            sets: row.get(3)?,
            reps: row.get(4)?,
            weight: row.get(5)?,
        })
    }

    pub fn id(&self) -> WorkoutExerciseId {
        self.id
    }

    pub fn workout_id(&self) -> WorkoutId {
        self.workout_id
    }

    pub fn exercise_id(&self) -> ExerciseId {
        self.exercise_id
    }

    pub fn sets(&self) -> i64 {
        self.sets
    }

    pub fn reps(&self) -> i64 {
        self.reps
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn set_sets(&mut self, sets: i64) -> Result<()> {
        validate_sets(sets)?;
        self.sets = sets;
        Ok(())
    }

    pub fn set_reps(&mut self, reps: i64) -> Result<()> {
        validate_reps(reps)?;
        self.reps = reps;
        Ok(())
    }

    pub fn set_weight(&mut self, weight: f64) -> Result<()> {
        self.weight = validate_weight(weight)?;
        Ok(())
    }
}

/// A workout entry joined with the names of everything it points at.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WorkoutExerciseDetail {
    pub entry: WorkoutExercise,
    pub workout_name: String,
    pub user_id: UserId,
    pub user_name: String,
    pub exercise_name: String,
}

impl WorkoutExerciseDetail {
    /// Columns: the six entry columns, then workout name, user id, user
    /// name, exercise name.
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            entry: WorkoutExercise::from_row(row)?,
            workout_name: row.get(6)?,
            user_id: UserId::from(row.get::<_, i64>(7)?),
            user_name: row.get(8)?,
            exercise_name: row.get(9)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use fittrack_common::Error;

    #[test]
    fn test_new_user_validates() {
        let user = NewUser::new("Jo", "jo@x.com").unwrap();
        assert_eq!(user.name(), "Jo");
        assert_eq!(user.email(), "jo@x.com");

        assert_matches!(NewUser::new("J", "jo@x.com"), Err(Error::Validation(_)));
        assert_matches!(NewUser::new("Jo", "jo.x.com"), Err(Error::Validation(_)));
        assert_matches!(NewUser::new("  ", "jo@x.com"), Err(Error::Validation(_)));
    }

    #[test]
    fn test_user_setters_keep_old_value_on_error() {
        let mut user = User::from_draft(UserId::from(1), NewUser::new("Jo", "jo@x.com").unwrap());

        assert_matches!(user.set_name("J"), Err(Error::Validation(_)));
        assert_eq!(user.name(), "Jo");
        assert_matches!(user.set_email(""), Err(Error::Validation(_)));
        assert_eq!(user.email(), "jo@x.com");

        user.set_name("Joanna").unwrap();
        user.set_email("joanna@x.com").unwrap();
        assert_eq!(user.name(), "Joanna");
        assert_eq!(user.email(), "joanna@x.com");
    }

    #[test]
    fn test_exercise_description_optional() {
        let draft = NewExercise::new("Squats", None).unwrap();
        assert_eq!(draft.description(), None);

        let mut exercise = Exercise::from_draft(ExerciseId::from(1), draft);
        exercise.set_description(Some("Bend the knees".to_string()));
        assert_eq!(exercise.description(), Some("Bend the knees"));

        assert_matches!(exercise.set_name("S"), Err(Error::Validation(_)));
        assert_eq!(exercise.name(), "Squats");
    }

    #[test]
    fn test_new_workout_date_defaults_to_none() {
        let draft = NewWorkout::new("Leg Day", UserId::from(1)).unwrap();
        assert_eq!(draft.date(), None);

        let date = DateTime::parse_from_rfc3339("2024-03-01T07:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let draft = draft.on(date);
        assert_eq!(draft.date(), Some(date));

        assert_matches!(
            NewWorkout::new("L", UserId::from(1)),
            Err(Error::Validation(_))
        );
    }

    #[test]
    fn test_new_workout_exercise_defaults() {
        let draft = NewWorkoutExercise::new(WorkoutId::from(1), ExerciseId::from(2));
        assert_eq!(draft.sets(), 3);
        assert_eq!(draft.reps(), 10);
        assert_eq!(draft.weight(), 0.0);
    }

    #[test]
    fn test_new_workout_exercise_rejects_negative_metrics() {
        let w = WorkoutId::from(1);
        let e = ExerciseId::from(1);
        assert_matches!(
            NewWorkoutExercise::with_metrics(w, e, -1, 10, 0.0),
            Err(Error::Validation(_))
        );
        assert_matches!(
            NewWorkoutExercise::with_metrics(w, e, 3, -1, 0.0),
            Err(Error::Validation(_))
        );
        assert_matches!(
            NewWorkoutExercise::with_metrics(w, e, 3, 10, -2.5),
            Err(Error::Validation(_))
        );
        assert!(NewWorkoutExercise::with_metrics(w, e, 0, 0, 0.0).is_ok());
    }

    #[test]
    fn test_workout_exercise_setters() {
        let draft = NewWorkoutExercise::with_metrics(
            WorkoutId::from(1),
            ExerciseId::from(1),
            4,
            12,
            40.0,
        )
        .unwrap();
        let mut entry = WorkoutExercise::from_draft(WorkoutExerciseId::from(1), draft);

        assert_matches!(entry.set_sets(-1), Err(Error::Validation(_)));
        assert_matches!(entry.set_reps(-1), Err(Error::Validation(_)));
        assert_matches!(entry.set_weight(-0.1), Err(Error::Validation(_)));
        assert_eq!((entry.sets(), entry.reps(), entry.weight()), (4, 12, 40.0));

        entry.set_sets(5).unwrap();
        entry.set_reps(8).unwrap();
        entry.set_weight(42.5).unwrap();
        assert_eq!((entry.sets(), entry.reps(), entry.weight()), (5, 8, 42.5));
    }

    #[test]
    fn test_negative_zero_weight_normalized() {
        let draft =
            NewWorkoutExercise::with_metrics(WorkoutId::from(1), ExerciseId::from(1), 3, 10, -0.0)
                .unwrap();
        assert!(draft.weight().is_sign_positive());

        let mut entry = WorkoutExercise::from_draft(WorkoutExerciseId::from(1), draft);
        entry.set_weight(20.0).unwrap();
        entry.set_weight(-0.0).unwrap();
        assert!(entry.weight().is_sign_positive());
        assert_eq!(format!("{}", entry.weight()), "0");
    }
}
