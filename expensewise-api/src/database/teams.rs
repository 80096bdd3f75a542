use crate::database::users::is_constraint_violation;
use crate::database::{parse_column, AsyncDbConnection};
use anyhow::Result;
use rusqlite::OptionalExtension;
use shared_types::{Team, TeamRole};

/// Creates the team and enrols its creator as admin in one transaction
pub async fn create_team(
    conn: AsyncDbConnection,
    name: &str,
    description: Option<&str>,
    created_by: i64,
) -> Result<i64> {
    let mut conn = conn.lock().await?;
    let now = chrono::Utc::now().timestamp();
    let tx = conn.transaction()?;

    let team_id: i64 = tx.query_row(
        "INSERT INTO teams (name, description, created_by, created_at)
         VALUES (?, ?, ?, ?)
         RETURNING id",
        rusqlite::params![name, description, created_by, now],
        |row| row.get(0),
    )?;

    tx.execute(
        "INSERT INTO team_members (team_id, user_id, role, joined_at) VALUES (?, ?, ?, ?)",
        rusqlite::params![team_id, created_by, TeamRole::Admin.as_str(), now],
    )?;

    tx.commit()?;

    Ok(team_id)
}

/// Returns false when the user already belongs to the team
pub async fn add_team_member(
    conn: AsyncDbConnection,
    team_id: i64,
    user_id: i64,
    role: TeamRole,
) -> Result<bool> {
    let conn = conn.lock().await?;
    let now = chrono::Utc::now().timestamp();

    let result = conn.execute(
        "INSERT INTO team_members (team_id, user_id, role, joined_at) VALUES (?, ?, ?, ?)",
        rusqlite::params![team_id, user_id, role.as_str(), now],
    );

    match result {
        Ok(_) => Ok(true),
        Err(e) if is_constraint_violation(&e) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

pub async fn get_user_teams(conn: AsyncDbConnection, user_id: i64) -> Result<Vec<Team>> {
    let conn = conn.lock().await?;

    let mut stmt = conn.prepare(
        "SELECT t.id, t.name, t.description, tm.role, t.created_at
         FROM teams t
         JOIN team_members tm ON tm.team_id = t.id
         WHERE tm.user_id = ?
         ORDER BY t.name",
    )?;

    let teams = stmt
        .query_map([user_id], |row| {
            Ok(Team {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
                role: parse_column(row, 3)?,
                created_at: row.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(teams)
}

/// Role of the user in the team, if a member
pub async fn get_member_role(
    conn: AsyncDbConnection,
    team_id: i64,
    user_id: i64,
) -> Result<Option<TeamRole>> {
    let conn = conn.lock().await?;
    let role = conn
        .query_row(
            "SELECT role FROM team_members WHERE team_id = ? AND user_id = ?",
            rusqlite::params![team_id, user_id],
            |row| parse_column(row, 0),
        )
        .optional()?;

    Ok(role)
}
