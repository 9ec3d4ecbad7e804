use rusqlite::{params, Connection, OptionalExtension, Row};

use psyexam_core::models::user::{NewUser, Role, User};

use crate::error::StorageError;
use crate::rows;

const COLUMNS: &str = "id, username, email, full_name, role, is_approved, created_at";

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    let role: String = row.get(4)?;
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        full_name: row.get(3)?,
        // Unknown roles degrade to the least privileged one.
        role: role.parse().unwrap_or(Role::Doctor),
        is_approved: row.get(5)?,
        created_at: rows::timestamp(row, 6)?,
    })
}

/// Insert a user. A taken username or email is reported as a conflict on
/// that field.
pub fn create_user(conn: &Connection, new: &NewUser) -> Result<User, StorageError> {
    if find_by_username(conn, &new.username)?.is_some() {
        return Err(StorageError::conflict("username", "username is already in use"));
    }
    if let Some(email) = &new.email {
        let taken: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = ?1)",
            params![email],
            |row| row.get(0),
        )?;
        if taken {
            return Err(StorageError::conflict("email", "email is already in use"));
        }
    }

    conn.execute(
        "INSERT INTO users (username, email, password_hash, full_name, role, is_approved, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            new.username,
            new.email,
            new.password_hash,
            new.full_name,
            new.role.as_str(),
            new.is_approved,
            rows::now(),
        ],
    )
    .map_err(|e| {
        if rows::is_constraint_violation(&e) {
            StorageError::conflict("username", "username or email is already in use")
        } else {
            e.into()
        }
    })?;

    let id = conn.last_insert_rowid();
    tracing::info!(user_id = id, role = %new.role, approved = new.is_approved, "user created");
    get_user(conn, id)?.ok_or(StorageError::not_found("user", id))
}

pub fn get_user(conn: &Connection, id: i64) -> Result<Option<User>, StorageError> {
    let user = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM users WHERE id = ?1"),
            params![id],
            user_from_row,
        )
        .optional()?;
    Ok(user)
}

pub fn find_by_username(conn: &Connection, username: &str) -> Result<Option<User>, StorageError> {
    let user = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM users WHERE username = ?1"),
            params![username],
            user_from_row,
        )
        .optional()?;
    Ok(user)
}

/// Look up a user together with the stored password hash, for login.
pub fn find_credentials(
    conn: &Connection,
    username: &str,
) -> Result<Option<(User, String)>, StorageError> {
    let found = conn
        .query_row(
            &format!("SELECT {COLUMNS}, password_hash FROM users WHERE username = ?1"),
            params![username],
            |row| Ok((user_from_row(row)?, row.get::<_, String>(7)?)),
        )
        .optional()?;
    Ok(found)
}

/// All users, newest first.
pub fn list_users(conn: &Connection) -> Result<Vec<User>, StorageError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM users ORDER BY created_at DESC, id DESC"
    ))?;
    let users = stmt
        .query_map([], user_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(users)
}

/// Set the approval flag. Returns `false` when the user does not exist.
pub fn set_approval(conn: &Connection, id: i64, approved: bool) -> Result<bool, StorageError> {
    let changed = conn.execute(
        "UPDATE users SET is_approved = ?1 WHERE id = ?2",
        params![approved, id],
    )?;
    if changed > 0 {
        tracing::info!(user_id = id, approved, "user approval changed");
    }
    Ok(changed > 0)
}

/// Delete a user. Returns `false` when the user does not exist.
pub fn delete_user(conn: &Connection, id: i64) -> Result<bool, StorageError> {
    let changed = conn.execute("DELETE FROM users WHERE id = ?1", params![id])?;
    if changed > 0 {
        tracing::info!(user_id = id, "user deleted");
    }
    Ok(changed > 0)
}
