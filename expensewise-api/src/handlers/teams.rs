use actix_web::{web, HttpResponse};
use shared_types::{AddTeamMemberRequest, CreateTeamRequest, TeamRole, TeamsResponse};
use std::sync::Arc;

use crate::database::{teams as db, users, Database};
use crate::error::{ApiError, ApiResult};
use crate::helpers::session::SessionContext;

pub async fn list_teams(
    database: web::Data<Arc<Database>>,
    ctx: SessionContext,
) -> ApiResult<HttpResponse> {
    let teams = db::get_user_teams(database.async_connection.clone(), ctx.user.id).await?;
    Ok(HttpResponse::Ok().json(TeamsResponse { teams }))
}

pub async fn create_team(
    database: web::Data<Arc<Database>>,
    ctx: SessionContext,
    request: web::Json<CreateTeamRequest>,
) -> ApiResult<HttpResponse> {
    let req = request.into_inner();

    let name = req.name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("Team name cannot be empty".to_string()));
    }
    let description = req
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty());

    let team_id =
        db::create_team(database.async_connection.clone(), name, description, ctx.user.id).await?;

    tracing::info!(team_id, user_id = ctx.user.id, "Team created");

    Ok(HttpResponse::Created().json(serde_json::json!({ "team_id": team_id })))
}

/// Only admins of the team may add members
pub async fn add_member(
    database: web::Data<Arc<Database>>,
    ctx: SessionContext,
    path: web::Path<i64>,
    request: web::Json<AddTeamMemberRequest>,
) -> ApiResult<HttpResponse> {
    let team_id = path.into_inner();
    let req = request.into_inner();
    let conn = database.async_connection.clone();

    match db::get_member_role(conn.clone(), team_id, ctx.user.id).await? {
        Some(TeamRole::Admin) => {}
        Some(TeamRole::Member) => {
            return Err(ApiError::Forbidden(
                "Only team admins can add members".to_string(),
            ))
        }
        None => return Err(ApiError::NotFound("Team not found".to_string())),
    }

    if users::get_user(conn.clone(), req.user_id).await?.is_none() {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    let role = req.role.unwrap_or_default();
    if !db::add_team_member(conn, team_id, req.user_id, role).await? {
        return Err(ApiError::Conflict(
            "User is already a member of this team".to_string(),
        ));
    }

    tracing::info!(team_id, member_id = req.user_id, role = role.as_str(), "Team member added");

    Ok(HttpResponse::Created().json(serde_json::json!({
        "team_id": team_id,
        "user_id": req.user_id,
        "role": role,
    })))
}
