//! Query executor: one method per statement the handlers issue.
//!
//! [`PgStore`] runs parameterized SQL against PostgreSQL. [`MemoryStore`] keeps
//! the same semantics in process and backs the HTTP tests.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::error::AppError;
use crate::models::{Company, CompanyUpdate, Invoice, InvoiceRef, NewCompany, NewInvoice};
use async_trait::async_trait;

#[async_trait]
pub trait Store: Send + Sync {
    /// All companies ordered by code.
    async fn list_companies(&self) -> Result<Vec<Company>, AppError>;

    async fn get_company(&self, code: &str) -> Result<Option<Company>, AppError>;

    /// Ids of the invoices whose `comp_code` is `code`, ordered by id.
    async fn invoice_ids_for_company(&self, code: &str) -> Result<Vec<InvoiceRef>, AppError>;

    /// Fails on a duplicate code or name.
    async fn insert_company(&self, company: &NewCompany) -> Result<Company, AppError>;

    /// Returns None when no company has `code`.
    async fn update_company(
        &self,
        code: &str,
        update: &CompanyUpdate,
    ) -> Result<Option<Company>, AppError>;

    /// Returns whether a row was removed. Invoices of the company go with it.
    async fn delete_company(&self, code: &str) -> Result<bool, AppError>;

    /// All invoices ordered by id.
    async fn list_invoices(&self) -> Result<Vec<Invoice>, AppError>;

    async fn get_invoice(&self, id: i32) -> Result<Option<Invoice>, AppError>;

    /// `paid`, `add_date` and `paid_date` take their defaults.
    async fn insert_invoice(&self, invoice: &NewInvoice) -> Result<Invoice, AppError>;

    /// Changes `amt` only. Returns None when no invoice has `id`.
    async fn update_invoice_amount(&self, id: i32, amt: f64) -> Result<Option<Invoice>, AppError>;

    async fn delete_invoice(&self, id: i32) -> Result<bool, AppError>;

    /// Readiness check: succeeds when the backing store answers.
    async fn ping(&self) -> Result<(), AppError>;
}
