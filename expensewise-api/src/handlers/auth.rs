use actix_web::{web, HttpResponse};
use shared_types::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use std::sync::Arc;

use crate::config::ApiConfig;
use crate::database::{sessions, users, Database};
use crate::error::{ApiError, ApiResult};
use crate::helpers::session::SessionContext;

pub async fn register(
    database: web::Data<Arc<Database>>,
    request: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let req = request.into_inner();

    let username = req.username.trim();
    let email = req.email.trim();
    if username.is_empty() || email.is_empty() || req.password.is_empty() {
        return Err(ApiError::Validation(
            "Username, email and password are required".to_string(),
        ));
    }

    let full_name = req
        .full_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty());

    let user_id = users::create_user(
        database.async_connection.clone(),
        username,
        email,
        &req.password,
        full_name,
    )
    .await?
    .ok_or_else(|| ApiError::Conflict("Username or email already exists".to_string()))?;

    tracing::info!(user_id, username, "User registered");

    Ok(HttpResponse::Created().json(RegisterResponse { user_id }))
}

pub async fn login(
    database: web::Data<Arc<Database>>,
    config: web::Data<ApiConfig>,
    request: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let req = request.into_inner();
    let conn = database.async_connection.clone();

    let user = users::authenticate_user(conn.clone(), req.username.trim(), &req.password)
        .await?
        .ok_or_else(|| {
            tracing::info!(username = %req.username, "Rejected login");
            ApiError::Unauthorized("Invalid username or password".to_string())
        })?;

    let session = sessions::create_session(conn, user.id, config.session_ttl()).await?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(HttpResponse::Ok().json(LoginResponse {
        token: session.token,
        user,
        expires_at: session.expires_at,
    }))
}

pub async fn logout(
    database: web::Data<Arc<Database>>,
    ctx: SessionContext,
) -> ApiResult<HttpResponse> {
    sessions::delete_session(database.async_connection.clone(), &ctx.session.token).await?;

    tracing::info!(user_id = ctx.user.id, "User logged out");

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Logged out" })))
}

pub async fn me(ctx: SessionContext) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ctx.user))
}
