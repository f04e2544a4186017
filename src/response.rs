//! Response envelopes: each payload sits under a top-level key.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct CompaniesBody<T> {
    pub companies: Vec<T>,
}

#[derive(Serialize)]
pub struct CompanyBody<T> {
    pub company: T,
}

#[derive(Serialize)]
pub struct InvoicesBody<T> {
    pub invoices: Vec<T>,
}

#[derive(Serialize)]
pub struct InvoiceBody<T> {
    pub invoice: T,
}

/// Company deletion acknowledgement: `{"message": "deleted"}`.
#[derive(Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

/// Invoice deletion acknowledgement: `{"status": "deleted"}`.
#[derive(Serialize)]
pub struct StatusBody {
    pub status: &'static str,
}

pub const DELETED: &str = "deleted";

pub fn ok<T: Serialize>(body: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(body))
}

pub fn created<T: Serialize>(body: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(body))
}
