use actix_web::{web, HttpResponse};
use shared_types::{ExtractTextRequest, ExtractTextResponse};

use crate::error::{ApiError, ApiResult};

/// Runs the extraction pipeline over pasted receipt text
pub async fn extract_text(request: web::Json<ExtractTextRequest>) -> ApiResult<HttpResponse> {
    let req = request.into_inner();
    if req.text.trim().is_empty() {
        return Err(ApiError::Validation("Text cannot be empty".to_string()));
    }

    let record = extractors::extract(&req.text);
    let validation = extractors::validate(&record);
    let suggested_title = extractors::suggest_title(
        record.vendor.as_deref(),
        record.amount.unwrap_or(0.0),
        record.category,
    );

    Ok(HttpResponse::Ok().json(ExtractTextResponse {
        record,
        validation,
        suggested_title,
    }))
}
