//! Row types for companies and invoices, plus the typed request bodies.

use crate::error::AppError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Company {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct InvoiceRef {
    pub id: i32,
}

/// Single-company view: the company row plus the ids of its invoices.
#[derive(Clone, Debug, Serialize)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    pub invoices: Vec<InvoiceRef>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Invoice {
    pub id: i32,
    pub comp_code: String,
    pub amt: f64,
    pub paid: bool,
    pub add_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
}

/// Single-invoice view with the owning company nested.
#[derive(Clone, Debug, Serialize)]
pub struct InvoiceDetail {
    #[serde(flatten)]
    pub invoice: Invoice,
    /// None only if the invoice row outlived its company.
    pub company: Option<Company>,
}

/// Body of `POST /companies`.
#[derive(Clone, Debug, Deserialize)]
pub struct NewCompany {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `PUT /companies/:code`.
#[derive(Clone, Debug, Deserialize)]
pub struct CompanyUpdate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `POST /invoices`.
#[derive(Clone, Debug, Deserialize)]
pub struct NewInvoice {
    pub comp_code: String,
    pub amt: f64,
}

/// Body of `PUT /invoices/:id`.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct InvoiceUpdate {
    pub amt: f64,
}

/// Presence checks run before any query.
pub trait Validate {
    fn validate(&self) -> Result<(), AppError>;
}

fn require(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{} is required", field)));
    }
    Ok(())
}

impl Validate for NewCompany {
    fn validate(&self) -> Result<(), AppError> {
        require("code", &self.code)?;
        require("name", &self.name)
    }
}

impl Validate for CompanyUpdate {
    fn validate(&self) -> Result<(), AppError> {
        require("name", &self.name)
    }
}

impl Validate for NewInvoice {
    fn validate(&self) -> Result<(), AppError> {
        require("comp_code", &self.comp_code)
    }
}

impl Validate for InvoiceUpdate {
    fn validate(&self) -> Result<(), AppError> {
        Ok(())
    }
}
