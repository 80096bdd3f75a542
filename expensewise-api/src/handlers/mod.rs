pub mod auth;
pub mod expenses;
pub mod extraction;
pub mod files;
pub mod teams;

use actix_web::{get, web, HttpResponse, Responder};
use std::sync::Arc;

use crate::database::Database;

#[get("/")]
async fn hello() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "ExpenseWise API"
    }))
}

#[get("/health")]
async fn health(db: web::Data<Arc<Database>>) -> impl Responder {
    match db.ping().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "healthy",
            "database": "connected"
        })),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "status": "unhealthy",
                "database": "disconnected"
            }))
        }
    }
}

/// Registers every route; expects `Arc<Database>`, `ApiConfig` and `UploadStore` as app data
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(hello)
        .service(health)
        .route("/api/auth/register", web::post().to(auth::register))
        .route("/api/auth/login", web::post().to(auth::login))
        .route("/api/auth/logout", web::post().to(auth::logout))
        .route("/api/auth/me", web::get().to(auth::me))
        .route("/api/expenses", web::get().to(expenses::list_expenses))
        .route("/api/expenses", web::post().to(expenses::create_expense))
        .route("/api/expenses/summary", web::get().to(expenses::expense_summary))
        .route("/api/expenses/stats", web::get().to(expenses::expense_stats))
        .route("/api/expenses/export", web::get().to(expenses::export_expenses))
        .route("/api/expenses/categorize", web::post().to(expenses::categorize))
        .route("/api/expenses/suggest-title", web::post().to(expenses::suggest_title))
        .route("/api/expenses/{id}", web::put().to(expenses::update_expense))
        .route("/api/expenses/{id}", web::delete().to(expenses::delete_expense))
        .route("/api/extract", web::post().to(extraction::extract_text))
        .service(
            web::resource("/api/files")
                .app_data(web::PayloadConfig::new(files::MAX_UPLOAD_BYTES))
                .route(web::post().to(files::upload_file))
                .route(web::get().to(files::list_files)),
        )
        .service(
            web::resource("/api/files/{id}/transcript")
                .app_data(web::PayloadConfig::new(files::MAX_UPLOAD_BYTES))
                .route(web::put().to(files::upload_transcript)),
        )
        .route("/api/files/{id}/process", web::post().to(files::process_file))
        .route("/api/teams", web::get().to(teams::list_teams))
        .route("/api/teams", web::post().to(teams::create_team))
        .route("/api/teams/{id}/members", web::post().to(teams::add_member));
}
