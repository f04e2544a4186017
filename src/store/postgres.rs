//! PostgreSQL query executor. Values are always bound as parameters.

use super::Store;
use crate::error::AppError;
use crate::models::{Company, CompanyUpdate, Invoice, InvoiceRef, NewCompany, NewInvoice};
use async_trait::async_trait;
use sqlx::PgPool;

const INVOICE_COLUMNS: &str = "id, comp_code, amt, paid, add_date, paid_date";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn list_companies(&self) -> Result<Vec<Company>, AppError> {
        let sql = "SELECT code, name, description FROM companies ORDER BY code";
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Company>(sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_company(&self, code: &str) -> Result<Option<Company>, AppError> {
        let sql = "SELECT code, name, description FROM companies WHERE code = $1";
        tracing::debug!(sql = %sql, code = %code, "query");
        let row = sqlx::query_as::<_, Company>(sql)
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn invoice_ids_for_company(&self, code: &str) -> Result<Vec<InvoiceRef>, AppError> {
        let sql = "SELECT id FROM invoices WHERE comp_code = $1 ORDER BY id";
        tracing::debug!(sql = %sql, code = %code, "query");
        let rows = sqlx::query_as::<_, InvoiceRef>(sql)
            .bind(code)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn insert_company(&self, company: &NewCompany) -> Result<Company, AppError> {
        let sql = r#"
            INSERT INTO companies (code, name, description)
            VALUES ($1, $2, $3)
            RETURNING code, name, description
        "#;
        tracing::debug!(sql = %sql, code = %company.code, "query");
        let row = sqlx::query_as::<_, Company>(sql)
            .bind(&company.code)
            .bind(&company.name)
            .bind(&company.description)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_company(
        &self,
        code: &str,
        update: &CompanyUpdate,
    ) -> Result<Option<Company>, AppError> {
        let sql = r#"
            UPDATE companies
            SET name = $1, description = $2
            WHERE code = $3
            RETURNING code, name, description
        "#;
        tracing::debug!(sql = %sql, code = %code, "query");
        let row = sqlx::query_as::<_, Company>(sql)
            .bind(&update.name)
            .bind(&update.description)
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_company(&self, code: &str) -> Result<bool, AppError> {
        let sql = "DELETE FROM companies WHERE code = $1";
        tracing::debug!(sql = %sql, code = %code, "query");
        let result = sqlx::query(sql).bind(code).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_invoices(&self) -> Result<Vec<Invoice>, AppError> {
        let sql = format!("SELECT {} FROM invoices ORDER BY id", INVOICE_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Invoice>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_invoice(&self, id: i32) -> Result<Option<Invoice>, AppError> {
        let sql = format!("SELECT {} FROM invoices WHERE id = $1", INVOICE_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Invoice>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_invoice(&self, invoice: &NewInvoice) -> Result<Invoice, AppError> {
        let sql = format!(
            "INSERT INTO invoices (comp_code, amt) VALUES ($1, $2) RETURNING {}",
            INVOICE_COLUMNS
        );
        tracing::debug!(sql = %sql, comp_code = %invoice.comp_code, "query");
        let row = sqlx::query_as::<_, Invoice>(&sql)
            .bind(&invoice.comp_code)
            .bind(invoice.amt)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_invoice_amount(&self, id: i32, amt: f64) -> Result<Option<Invoice>, AppError> {
        let sql = format!(
            "UPDATE invoices SET amt = $1 WHERE id = $2 RETURNING {}",
            INVOICE_COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Invoice>(&sql)
            .bind(amt)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_invoice(&self, id: i32) -> Result<bool, AppError> {
        let sql = "DELETE FROM invoices WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
