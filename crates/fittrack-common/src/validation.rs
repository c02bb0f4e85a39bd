//! Field rules shared by entity constructors and setters.
//!
//! Every check returns [`Error::Validation`] and never touches storage.

use crate::error::{Error, Result};
use crate::types::EntityKind;

/// Minimum number of characters in a user, exercise or workout name.
pub const MIN_NAME_LEN: usize = 2;

/// Default number of sets for a new workout entry.
pub const DEFAULT_SETS: i64 = 3;

/// Default number of reps for a new workout entry.
pub const DEFAULT_REPS: i64 = 10;

/// Default weight for a new workout entry.
pub const DEFAULT_WEIGHT: f64 = 0.0;

/// Names need at least [`MIN_NAME_LEN`] characters and must not be blank.
pub fn validate_name(kind: EntityKind, name: &str) -> Result<()> {
    if name.trim().is_empty() || name.chars().count() < MIN_NAME_LEN {
        let label = match kind {
            EntityKind::User => "Name",
            EntityKind::Exercise => "Exercise name",
            EntityKind::Workout => "Workout name",
            EntityKind::WorkoutExercise => "Entry name",
        };
        return Err(Error::validation(format!(
            "{label} must be at least {MIN_NAME_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<()> {
    if email.is_empty() || !email.contains('@') {
        return Err(Error::validation("Invalid email format"));
    }
    Ok(())
}

pub fn validate_sets(sets: i64) -> Result<()> {
    if sets < 0 {
        return Err(Error::validation("Sets cannot be negative"));
    }
    Ok(())
}

pub fn validate_reps(reps: i64) -> Result<()> {
    if reps < 0 {
        return Err(Error::validation("Reps cannot be negative"));
    }
    Ok(())
}

/// Weight must be a finite, non-negative number. NaN is rejected.
///
/// Returns the value to store, with `-0.0` folded into `0.0`.
pub fn validate_weight(weight: f64) -> Result<f64> {
    if !weight.is_finite() {
        return Err(Error::validation("Weight must be a finite number"));
    }
    if weight < 0.0 {
        return Err(Error::validation("Weight cannot be negative"));
    }
    Ok(weight + 0.0)
}
