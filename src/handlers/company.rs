//! Company CRUD handlers.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::models::{CompanyDetail, CompanyUpdate, NewCompany};
use crate::response::{created, ok, CompaniesBody, CompanyBody, MessageBody, DELETED};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

fn not_found(code: &str) -> AppError {
    AppError::NotFound(format!("company not found: {}", code))
}

/// GET /companies: `{companies: [{code, name, description}, ...]}` ordered by code.
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let companies = state.store.list_companies().await?;
    Ok(ok(CompaniesBody { companies }))
}

/// GET /companies/:code: the company plus the ids of its invoices.
pub async fn read(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let company = state
        .store
        .get_company(&code)
        .await?
        .ok_or_else(|| not_found(&code))?;
    let invoices = state.store.invoice_ids_for_company(&code).await?;
    Ok(ok(CompanyBody {
        company: CompanyDetail { company, invoices },
    }))
}

/// POST /companies: 201 with the inserted row.
pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewCompany>,
) -> Result<impl IntoResponse, AppError> {
    let company = state.store.insert_company(&body).await?;
    tracing::info!(code = %company.code, "company created");
    Ok(created(CompanyBody { company }))
}

/// PUT /companies/:code: replaces name and description.
pub async fn update(
    State(state): State<AppState>,
    Path(code): Path<String>,
    JsonBody(body): JsonBody<CompanyUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let company = state
        .store
        .update_company(&code, &body)
        .await?
        .ok_or_else(|| not_found(&code))?;
    tracing::info!(code = %company.code, "company updated");
    Ok(ok(CompanyBody { company }))
}

/// DELETE /companies/:code
pub async fn delete(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !state.store.delete_company(&code).await? {
        return Err(not_found(&code));
    }
    tracing::info!(code = %code, "company deleted");
    Ok(ok(MessageBody { message: DELETED }))
}
