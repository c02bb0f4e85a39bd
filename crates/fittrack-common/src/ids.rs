//! Typed ID wrappers for type safety across fittrack.
//!
//! Every table uses an SQLite-assigned `INTEGER PRIMARY KEY`. These newtypes
//! keep a [`WorkoutId`] from being passed where an [`ExerciseId`] is expected.

use serde::{Deserialize, Serialize};
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// The raw row id.
            #[must_use]
            pub fn as_i64(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

integer_id!(
    /// Unique identifier for a user.
    UserId
);

integer_id!(
    /// Unique identifier for an exercise.
    ExerciseId
);

integer_id!(
    /// Unique identifier for a workout.
    WorkoutId
);

integer_id!(
    /// Unique identifier for a workout/exercise association.
    WorkoutExerciseId
);
