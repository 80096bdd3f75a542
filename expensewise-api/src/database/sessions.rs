use crate::database::users::user_from_row;
use crate::database::AsyncDbConnection;
use crate::helpers::password::generate_session_token;
use anyhow::Result;
use rusqlite::OptionalExtension;
use shared_types::{Session, User};

pub async fn create_session(
    conn: AsyncDbConnection,
    user_id: i64,
    ttl: chrono::Duration,
) -> Result<Session> {
    let conn = conn.lock().await?;
    let now = chrono::Utc::now().timestamp();

    let session = Session {
        token: generate_session_token(),
        user_id,
        created_at: now,
        expires_at: now + ttl.num_seconds(),
    };

    conn.execute(
        "INSERT INTO sessions (token, user_id, created_at, expires_at) VALUES (?, ?, ?, ?)",
        rusqlite::params![&session.token, session.user_id, session.created_at, session.expires_at],
    )?;

    Ok(session)
}

/// Resolves a token to its user; expired sessions and inactive users resolve to `None`.
pub async fn get_session_user(
    conn: AsyncDbConnection,
    token: &str,
    now: i64,
) -> Result<Option<(User, Session)>> {
    let conn = conn.lock().await?;

    let row = conn
        .query_row(
            "SELECT u.id, u.username, u.email, u.full_name, u.role, u.is_active, u.created_at,
                    s.token, s.user_id, s.created_at, s.expires_at
             FROM sessions s
             JOIN users u ON u.id = s.user_id
             WHERE s.token = ? AND u.is_active = 1",
            [token],
            |row| {
                let user = user_from_row(row)?;
                let session = Session {
                    token: row.get(7)?,
                    user_id: row.get(8)?,
                    created_at: row.get(9)?,
                    expires_at: row.get(10)?,
                };
                Ok((user, session))
            },
        )
        .optional()?;

    Ok(row.filter(|(_, session)| !session.is_expired(now)))
}

pub async fn delete_session(conn: AsyncDbConnection, token: &str) -> Result<bool> {
    let conn = conn.lock().await?;
    let deleted = conn.execute("DELETE FROM sessions WHERE token = ?", [token])?;
    Ok(deleted > 0)
}
