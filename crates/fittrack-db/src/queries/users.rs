//! User database queries.
//!
//! This module provides CRUD operations for users. Deleting a user also
//! deletes the user's workouts and every entry in those workouts.

use fittrack_common::{Error, Result, UserId};
use rusqlite::Connection;

use super::atomically;
use crate::models::{NewUser, User};

fn map_write_error(e: rusqlite::Error, email: &str) -> Error {
    if e.to_string().contains("UNIQUE constraint failed") {
        Error::validation(format!("Email '{}' is already registered", email))
    } else {
        Error::database(e.to_string())
    }
}

/// Create a new user.
///
/// # Arguments
///
/// * `conn` - Database connection
/// * `name` - Display name, at least 2 characters
/// * `email` - Unique email address containing `@`
///
/// # Returns
///
/// * `Ok(User)` - The created user with its assigned id
/// * `Err(Error)` - If a field is invalid, the email is taken, or a database error occurs
pub fn create_user(conn: &Connection, name: &str, email: &str) -> Result<User> {
    insert_user(conn, NewUser::new(name, email)?)
}

/// Insert an already validated user.
pub fn insert_user(conn: &Connection, draft: NewUser) -> Result<User> {
    conn.execute(
        "INSERT INTO users (name, email) VALUES (:name, :email)",
        rusqlite::named_params! {
            ":name": draft.name(),
            ":email": draft.email(),
        },
    )
    .map_err(|e| map_write_error(e, draft.email()))?;

    let id = UserId::from(conn.last_insert_rowid());
    tracing::debug!("Created user {}", id);

    Ok(User::from_draft(id, draft))
}

/// Get a user by ID.
///
/// # Returns
///
/// * `Ok(Some(User))` - The user if found
/// * `Ok(None)` - If the user does not exist
/// * `Err(Error)` - If a database error occurs
pub fn get_user(conn: &Connection, id: UserId) -> Result<Option<User>> {
    let result = conn.query_row(
        "SELECT id, name, email FROM users WHERE id = :id",
        rusqlite::named_params! { ":id": id.as_i64() },
        User::from_row,
    );

    match result {
        Ok(user) => Ok(Some(user)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// Get a user by email address.
pub fn get_user_by_email(conn: &Connection, email: &str) -> Result<Option<User>> {
    let result = conn.query_row(
        "SELECT id, name, email FROM users WHERE email = :email",
        rusqlite::named_params! { ":email": email },
        User::from_row,
    );

    match result {
        Ok(user) => Ok(Some(user)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// List all users in insertion order.
pub fn list_users(conn: &Connection) -> Result<Vec<User>> {
    let mut stmt = conn
        .prepare("SELECT id, name, email FROM users ORDER BY id")
        .map_err(|e| Error::database(e.to_string()))?;

    let users = stmt
        .query_map([], User::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(users)
}

/// Count all users.
pub fn count_users(conn: &Connection) -> Result<usize> {
    conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
        .map_err(|e| Error::database(e.to_string()))
}

/// Persist the name and email of a user changed through its setters.
///
/// # Returns
///
/// * `Ok(())` - If the update succeeded
/// * `Err(Error)` - If the user no longer exists, the email is taken, or a database error occurs
pub fn update_user(conn: &Connection, user: &User) -> Result<()> {
    let rows_affected = conn
        .execute(
            "UPDATE users SET name = :name, email = :email WHERE id = :id",
            rusqlite::named_params! {
                ":id": user.id().as_i64(),
                ":name": user.name(),
                ":email": user.email(),
            },
        )
        .map_err(|e| map_write_error(e, user.email()))?;

    if rows_affected == 0 {
        return Err(Error::not_found(format!("user {}", user.id())));
    }

    Ok(())
}

/// Delete a user together with its workouts and their entries.
///
/// All three deletes run in one transaction; if any fails, nothing is removed.
///
/// # Returns
///
/// * `Ok(true)` - If the user was deleted
/// * `Ok(false)` - If the user did not exist
/// * `Err(Error)` - If a database error occurs
pub fn delete_user(conn: &Connection, id: UserId) -> Result<bool> {
    let (entries, workouts, rows_affected) = atomically(conn, |conn| {
        let entries = conn
            .execute(
                "DELETE FROM workout_exercises
                 WHERE workout_id IN (SELECT id FROM workouts WHERE user_id = :id)",
                rusqlite::named_params! { ":id": id.as_i64() },
            )
            .map_err(|e| Error::database(e.to_string()))?;

        let workouts = conn
            .execute(
                "DELETE FROM workouts WHERE user_id = :id",
                rusqlite::named_params! { ":id": id.as_i64() },
            )
            .map_err(|e| Error::database(e.to_string()))?;

        let rows_affected = conn
            .execute(
                "DELETE FROM users WHERE id = :id",
                rusqlite::named_params! { ":id": id.as_i64() },
            )
            .map_err(|e| Error::database(e.to_string()))?;

        Ok((entries, workouts, rows_affected))
    })?;

    if rows_affected > 0 {
        tracing::debug!(
            "Deleted user {} with {} workouts and {} workout exercises",
            id,
            workouts,
            entries
        );
    }

    Ok(rows_affected > 0)
}
