use actix_web::http::header::CONTENT_TYPE;
use actix_web::{web, HttpRequest, HttpResponse};
use extractors::{DocumentProcessor, SidecarTextSource};
use serde::Deserialize;
use shared_types::{CreateExpenseRequest, ExtractedRecord, FilesResponse, ProcessFileResponse};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::database::files as db;
use crate::database::Database;
use crate::error::{ApiError, ApiResult};
use crate::helpers::session::SessionContext;
use crate::helpers::storage::{sanitize_filename, UploadStore};

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub filename: String,
}

fn mime_type(req: &HttpRequest) -> String {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().to_lowercase())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "application/octet-stream".to_string())
}

pub async fn upload_file(
    database: web::Data<Arc<Database>>,
    store: web::Data<UploadStore>,
    ctx: SessionContext,
    req: HttpRequest,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let filename = sanitize_filename(&query.filename)
        .ok_or_else(|| ApiError::Validation("A file name is required".to_string()))?;
    if body.is_empty() {
        return Err(ApiError::Validation("Uploaded file is empty".to_string()));
    }

    let file_type = mime_type(&req);
    let stored_path = store.save(&filename, &body).await?;

    let conn = database.async_connection.clone();
    let file_id = db::add_file(
        conn.clone(),
        ctx.user.id,
        &filename,
        &stored_path.to_string_lossy(),
        &file_type,
        body.len() as i64,
        None,
    )
    .await?;

    tracing::info!(
        user_id = ctx.user.id,
        file_id,
        file_type = %file_type,
        size = body.len(),
        "File uploaded"
    );

    let file = db::get_file(conn, ctx.user.id, file_id)
        .await?
        .ok_or_else(|| ApiError::Internal("File vanished after insert".to_string()))?;

    Ok(HttpResponse::Created().json(file))
}

pub async fn list_files(
    database: web::Data<Arc<Database>>,
    ctx: SessionContext,
) -> ApiResult<HttpResponse> {
    let files = db::get_files(database.async_connection.clone(), ctx.user.id).await?;
    Ok(HttpResponse::Ok().json(FilesResponse { files }))
}

/// Stores the text of an uploaded document, as produced by an OCR or PDF
/// tool, so that it can be processed
pub async fn upload_transcript(
    database: web::Data<Arc<Database>>,
    store: web::Data<UploadStore>,
    ctx: SessionContext,
    path: web::Path<i64>,
    body: String,
) -> ApiResult<HttpResponse> {
    let file_id = path.into_inner();
    let file = db::get_file(database.async_connection.clone(), ctx.user.id, file_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("File not found".to_string()))?;

    if body.trim().is_empty() {
        return Err(ApiError::Validation("Transcript is empty".to_string()));
    }

    store
        .save_transcript(Path::new(&file.file_path), &body)
        .await?;

    tracing::info!(user_id = ctx.user.id, file_id, size = body.len(), "Transcript saved");

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Transcript saved"
    })))
}

/// Expense pre-filled from an extraction, ready to be reviewed and posted
fn draft_expense(record: &ExtractedRecord, title: &str, receipt_path: &str) -> CreateExpenseRequest {
    let date = record
        .date
        .as_deref()
        .and_then(extractors::normalize_date)
        .unwrap_or_else(|| chrono::Utc::now().date_naive());

    CreateExpenseRequest {
        title: title.to_string(),
        amount: record.amount.unwrap_or(0.0),
        category: Some(record.category),
        description: record.description.clone(),
        date: Some(extractors::to_iso(date)),
        receipt_path: Some(receipt_path.to_string()),
    }
}

pub async fn process_file(
    database: web::Data<Arc<Database>>,
    ctx: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let file_id = path.into_inner();
    let conn = database.async_connection.clone();

    let file = db::get_file(conn.clone(), ctx.user.id, file_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("File not found".to_string()))?;

    let document_path = PathBuf::from(&file.file_path);
    let file_type = file.file_type.clone();
    let result = web::block(move || {
        DocumentProcessor::new(SidecarTextSource::new()).process_document(&document_path, &file_type)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Document processing failed: {}", e)))?;

    let Some(record) = result.extracted_data.clone().filter(|_| result.success) else {
        tracing::info!(
            file_id,
            error = result.error.as_deref().unwrap_or("unknown"),
            "Document could not be processed"
        );
        return Ok(HttpResponse::Ok().json(ProcessFileResponse {
            result,
            validation: None,
            suggested_title: None,
            draft: None,
        }));
    };

    db::mark_file_processed(conn, file.id, Some(&record)).await?;

    let validation = extractors::validate(&record);
    let suggested_title = extractors::suggest_title(
        record.vendor.as_deref(),
        record.amount.unwrap_or(0.0),
        record.category,
    );
    let draft = draft_expense(&record, &suggested_title, &file.file_path);

    tracing::info!(
        file_id,
        confidence = record.confidence,
        valid = validation.ok,
        "Document processed"
    );

    Ok(HttpResponse::Ok().json(ProcessFileResponse {
        result,
        validation: Some(validation),
        suggested_title: Some(suggested_title),
        draft: Some(draft),
    }))
}
