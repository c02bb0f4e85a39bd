//! Fittrack-Common: Shared types, IDs, and validation rules.
//!
//! This crate provides common functionality used across fittrack:
//!
//! - **Typed IDs**: Integer newtypes for users, exercises, workouts and entries
//! - **Core Types**: The [`EntityKind`] enum naming each persisted record type
//! - **Validation**: Field rules shared by every entity constructor and setter
//! - **Error Handling**: Common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use fittrack_common::{EntityKind, Error, Result, UserId};
//! use fittrack_common::validation::validate_email;
//!
//! let user_id = UserId::from(1);
//! assert_eq!(user_id.as_i64(), 1);
//!
//! assert!(validate_email("jo@x.com").is_ok());
//!
//! fn example() -> Result<()> {
//!     Err(Error::referential(EntityKind::User, 42))
//! }
//! assert!(example().is_err());
//! ```

pub mod error;
pub mod ids;
pub mod types;
pub mod validation;

pub use error::{Error, Result};
pub use ids::*;
pub use types::*;
