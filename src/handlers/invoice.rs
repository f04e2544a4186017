//! Invoice CRUD handlers.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::models::{InvoiceDetail, InvoiceUpdate, NewInvoice};
use crate::response::{created, ok, InvoiceBody, InvoicesBody, StatusBody, DELETED};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

fn parse_id(id_str: &str) -> Result<i32, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid invoice id: {}", id_str)))
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("invoice not found: {}", id))
}

/// GET /invoices: all invoices ordered by id.
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let invoices = state.store.list_invoices().await?;
    Ok(ok(InvoicesBody { invoices }))
}

/// GET /invoices/:id: the invoice with its company nested under `company`.
pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let invoice = state
        .store
        .get_invoice(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let company = state.store.get_company(&invoice.comp_code).await?;
    if company.is_none() {
        tracing::warn!(id, comp_code = %invoice.comp_code, "invoice references a missing company");
    }
    Ok(ok(InvoiceBody {
        invoice: InvoiceDetail { invoice, company },
    }))
}

/// POST /invoices: 201 with the inserted row; paid, add_date and paid_date take defaults.
pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewInvoice>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = state.store.insert_invoice(&body).await?;
    tracing::info!(id = invoice.id, comp_code = %invoice.comp_code, "invoice created");
    Ok(created(InvoiceBody { invoice }))
}

/// PUT /invoices/:id: changes amt only.
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonBody(body): JsonBody<InvoiceUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let invoice = state
        .store
        .update_invoice_amount(id, body.amt)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(id, "invoice updated");
    Ok(ok(InvoiceBody { invoice }))
}

/// DELETE /invoices/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    if !state.store.delete_invoice(id).await? {
        return Err(not_found(id));
    }
    tracing::info!(id, "invoice deleted");
    Ok(ok(StatusBody { status: DELETED }))
}
