//! Core type definitions shared between the data layer and its callers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of persisted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A person whose workouts are tracked.
    User,
    /// A named movement such as "Squats".
    Exercise,
    /// A dated training session owned by a user.
    Workout,
    /// One exercise performed within a workout, with its sets/reps/weight.
    WorkoutExercise,
}

impl EntityKind {
    /// Name of the backing table.
    pub fn table(&self) -> &'static str {
        match self {
            Self::User => "users",
            Self::Exercise => "exercises",
            Self::Workout => "workouts",
            Self::WorkoutExercise => "workout_exercises",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Exercise => write!(f, "exercise"),
            Self::Workout => write!(f, "workout"),
            Self::WorkoutExercise => write!(f, "workout exercise"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_display() {
        assert_eq!(EntityKind::User.to_string(), "user");
        assert_eq!(EntityKind::WorkoutExercise.to_string(), "workout exercise");
    }

    #[test]
    fn test_entity_kind_table() {
        assert_eq!(EntityKind::Exercise.table(), "exercises");
        assert_eq!(EntityKind::WorkoutExercise.table(), "workout_exercises");
    }

    #[test]
    fn test_entity_kind_serialization() {
        let json = serde_json::to_string(&EntityKind::WorkoutExercise).unwrap();
        assert_eq!(json, "\"workout_exercise\"");
    }
}
