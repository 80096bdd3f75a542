use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse};
use shared_types::{
    CategorizeRequest, CategorizeResponse, CreateExpenseRequest, ExpensesResponse,
    SuggestTitleRequest, SuggestTitleResponse, SummaryResponse, UpdateExpenseRequest,
};
use std::sync::Arc;

use crate::database::expenses::{self as db, NewExpense};
use crate::database::Database;
use crate::error::{ApiError, ApiResult};
use crate::helpers::expense_filter::{ExpenseFilter, ExpenseQuery};
use crate::helpers::session::SessionContext;

/// Normalizes a client-supplied date to `YYYY-MM-DD`
fn normalize_request_date(raw: &str) -> ApiResult<String> {
    extractors::normalize_date(raw)
        .map(extractors::to_iso)
        .ok_or_else(|| ApiError::Validation(format!("Invalid date: {}", raw)))
}

fn validate_amount(amount: f64) -> ApiResult<()> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(ApiError::Validation("Amount must be greater than zero".to_string()))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub async fn list_expenses(
    database: web::Data<Arc<Database>>,
    ctx: SessionContext,
    query: web::Query<ExpenseQuery>,
) -> ApiResult<HttpResponse> {
    let filter = ExpenseFilter::try_from(query.into_inner()).map_err(ApiError::Validation)?;

    let expenses = db::get_all_expenses(database.async_connection.clone(), ctx.user.id).await?;

    Ok(HttpResponse::Ok().json(ExpensesResponse {
        expenses: filter.apply(expenses),
    }))
}

pub async fn create_expense(
    database: web::Data<Arc<Database>>,
    ctx: SessionContext,
    request: web::Json<CreateExpenseRequest>,
) -> ApiResult<HttpResponse> {
    let req = request.into_inner();

    let title = req.title.trim().to_string();
    if title.is_empty() {
        return Err(ApiError::Validation("Title cannot be empty".to_string()));
    }
    validate_amount(req.amount)?;

    let description = non_blank(req.description);
    let category = req
        .category
        .unwrap_or_else(|| extractors::categorize(&title, description.as_deref()));
    let date = match non_blank(req.date) {
        Some(raw) => Some(normalize_request_date(&raw)?),
        None => None,
    };

    let new_expense = NewExpense {
        title,
        amount: req.amount,
        category,
        description,
        date,
        receipt_path: non_blank(req.receipt_path),
    };

    let conn = database.async_connection.clone();
    let id = db::add_expense(conn.clone(), ctx.user.id, &new_expense).await?;
    let expense = db::get_expense(conn, ctx.user.id, id)
        .await?
        .ok_or_else(|| ApiError::Internal("Expense vanished after insert".to_string()))?;

    tracing::info!(user_id = ctx.user.id, expense_id = id, category = %category, "Expense created");

    Ok(HttpResponse::Created().json(expense))
}

pub async fn update_expense(
    database: web::Data<Arc<Database>>,
    ctx: SessionContext,
    path: web::Path<i64>,
    request: web::Json<UpdateExpenseRequest>,
) -> ApiResult<HttpResponse> {
    let expense_id = path.into_inner();
    let mut update = request.into_inner();

    if update.is_empty() {
        return Err(ApiError::Validation("No fields to update".to_string()));
    }
    if let Some(title) = &update.title {
        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(ApiError::Validation("Title cannot be empty".to_string()));
        }
        update.title = Some(title);
    }
    if let Some(amount) = update.amount {
        validate_amount(amount)?;
    }
    if let Some(raw) = &update.date {
        update.date = Some(normalize_request_date(raw)?);
    }

    let conn = database.async_connection.clone();
    if !db::update_expense(conn.clone(), ctx.user.id, expense_id, &update).await? {
        return Err(ApiError::NotFound("Expense not found".to_string()));
    }

    let expense = db::get_expense(conn, ctx.user.id, expense_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Expense not found".to_string()))?;

    Ok(HttpResponse::Ok().json(expense))
}

pub async fn delete_expense(
    database: web::Data<Arc<Database>>,
    ctx: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let expense_id = path.into_inner();

    if !db::delete_expense(database.async_connection.clone(), ctx.user.id, expense_id).await? {
        return Err(ApiError::NotFound("Expense not found".to_string()));
    }

    tracing::info!(user_id = ctx.user.id, expense_id, "Expense deleted");

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Expense deleted" })))
}

pub async fn expense_summary(
    database: web::Data<Arc<Database>>,
    ctx: SessionContext,
) -> ApiResult<HttpResponse> {
    let expenses = db::get_all_expenses(database.async_connection.clone(), ctx.user.id).await?;

    Ok(HttpResponse::Ok().json(SummaryResponse {
        summary: extractors::summarize(&expenses),
        monthly_trend: extractors::monthly_trend(&expenses),
    }))
}

pub async fn expense_stats(
    database: web::Data<Arc<Database>>,
    ctx: SessionContext,
) -> ApiResult<HttpResponse> {
    let stats = db::get_expense_stats(database.async_connection.clone(), ctx.user.id).await?;
    Ok(HttpResponse::Ok().json(stats))
}

pub async fn export_expenses(
    database: web::Data<Arc<Database>>,
    ctx: SessionContext,
) -> ApiResult<HttpResponse> {
    let expenses = db::get_all_expenses(database.async_connection.clone(), ctx.user.id).await?;

    let csv = extractors::write_expenses_csv(&expenses)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let filename = format!(
        "expenses_{}.csv",
        chrono::Utc::now().date_naive().format("%Y-%m-%d")
    );

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(filename)],
        })
        .body(csv))
}

pub async fn categorize(request: web::Json<CategorizeRequest>) -> ApiResult<HttpResponse> {
    let req = request.into_inner();
    let category = extractors::categorize(&req.title, req.description.as_deref());
    Ok(HttpResponse::Ok().json(CategorizeResponse { category }))
}

pub async fn suggest_title(request: web::Json<SuggestTitleRequest>) -> ApiResult<HttpResponse> {
    let req = request.into_inner();
    let title = extractors::suggest_title(req.vendor.as_deref(), req.amount, req.category);
    Ok(HttpResponse::Ok().json(SuggestTitleResponse { title }))
}
