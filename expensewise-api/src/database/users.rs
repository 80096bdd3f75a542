use crate::database::AsyncDbConnection;
use crate::helpers::password::{hash_password, verify_password};
use anyhow::Result;
use rusqlite::OptionalExtension;
use shared_types::User;

const USER_COLUMNS: &str = "id, username, email, full_name, role, is_active, created_at";

pub(crate) fn user_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        full_name: row.get(3)?,
        role: row.get(4)?,
        is_active: row.get(5)?,
        created_at: row.get(6)?,
    })
}

pub(crate) fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

/// Returns `None` when the username or email is already taken
pub async fn create_user(
    conn: AsyncDbConnection,
    username: &str,
    email: &str,
    password: &str,
    full_name: Option<&str>,
) -> Result<Option<i64>> {
    let conn = conn.lock().await?;
    let now = chrono::Utc::now().timestamp();

    let result = conn.query_row(
        "INSERT INTO users (username, email, password_hash, full_name, created_at)
         VALUES (?, ?, ?, ?, ?)
         RETURNING id",
        rusqlite::params![username, email, hash_password(password), full_name, now],
        |row| row.get::<_, i64>(0),
    );

    match result {
        Ok(id) => Ok(Some(id)),
        Err(e) if is_constraint_violation(&e) => {
            tracing::info!(username, "Rejected registration for existing user");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Checks the password of an active user
pub async fn authenticate_user(
    conn: AsyncDbConnection,
    username: &str,
    password: &str,
) -> Result<Option<User>> {
    let conn = conn.lock().await?;

    let row = conn
        .query_row(
            &format!(
                "SELECT {}, password_hash FROM users WHERE username = ? AND is_active = 1",
                USER_COLUMNS
            ),
            [username],
            |row| Ok((user_from_row(row)?, row.get::<_, String>(7)?)),
        )
        .optional()?;

    Ok(row.and_then(|(user, password_hash)| {
        verify_password(password, &password_hash).then_some(user)
    }))
}

pub async fn get_user(conn: AsyncDbConnection, id: i64) -> Result<Option<User>> {
    let conn = conn.lock().await?;

    let user = conn
        .query_row(
            &format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS),
            [id],
            user_from_row,
        )
        .optional()?;

    Ok(user)
}
