//! Common error types used throughout fittrack.
//!
//! This module provides a unified error type that covers the failure cases of
//! the data layer: rejected field values, dangling foreign keys, missing rows
//! on update, and storage failures.

use crate::types::EntityKind;

/// Common error type for fittrack.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A field value failed its constraint. Nothing was written.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A create referenced a parent row that does not exist.
    #[error("Referenced {entity} {id} does not exist")]
    Referential { entity: EntityKind, id: i64 },

    /// The row to update was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A database operation failed.
    #[error("Database error: {0}")]
    Database(String),
}

impl Error {
    /// Create a new Validation error.
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new Referential error for a missing parent row.
    pub fn referential(entity: EntityKind, id: impl Into<i64>) -> Self {
        Self::Referential {
            entity,
            id: id.into(),
        }
    }

    /// Create a new NotFound error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new Database error.
    pub fn database<S: Into<String>>(msg: S) -> Self {
        Self::Database(msg.into())
    }

    /// Whether the caller can recover by correcting its input and retrying.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Referential { .. } | Self::NotFound(_)
        )
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::validation("name too short");
        assert_eq!(err.to_string(), "Validation error: name too short");

        let err = Error::referential(EntityKind::User, 7);
        assert_eq!(err.to_string(), "Referenced user 7 does not exist");

        let err = Error::not_found("workout 3");
        assert_eq!(err.to_string(), "Not found: workout 3");

        let err = Error::database("disk I/O error");
        assert_eq!(err.to_string(), "Database error: disk I/O error");
    }

    #[test]
    fn test_recoverable() {
        assert!(Error::validation("x").is_recoverable());
        assert!(Error::referential(EntityKind::Exercise, 1).is_recoverable());
        assert!(Error::not_found("x").is_recoverable());
        assert!(!Error::database("x").is_recoverable());
    }

    #[test]
    fn test_referential_fields() {
        match Error::referential(EntityKind::Workout, 12) {
            Error::Referential { entity, id } => {
                assert_eq!(entity, EntityKind::Workout);
                assert_eq!(id, 12);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
