//! In-process store mirroring the PostgreSQL schema's constraints.

use super::Store;
use crate::error::AppError;
use crate::models::{Company, CompanyUpdate, Invoice, InvoiceRef, NewCompany, NewInvoice};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tables {
    companies: BTreeMap<String, Company>,
    invoices: BTreeMap<i32, Invoice>,
    last_invoice_id: i32,
}

/// Useful for tests and for running without a database.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, AppError> {
        self.tables
            .read()
            .map_err(|e| AppError::Internal(format!("failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, AppError> {
        self.tables
            .write()
            .map_err(|e| AppError::Internal(format!("failed to acquire write lock: {}", e)))
    }
}

fn check_amount(amt: f64) -> Result<(), AppError> {
    if amt > 0.0 {
        Ok(())
    } else {
        Err(AppError::Internal(
            "new row for relation \"invoices\" violates check constraint \"invoices_amt_check\"".into(),
        ))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_companies(&self) -> Result<Vec<Company>, AppError> {
        Ok(self.read()?.companies.values().cloned().collect())
    }

    async fn get_company(&self, code: &str) -> Result<Option<Company>, AppError> {
        Ok(self.read()?.companies.get(code).cloned())
    }

    async fn invoice_ids_for_company(&self, code: &str) -> Result<Vec<InvoiceRef>, AppError> {
        Ok(self
            .read()?
            .invoices
            .values()
            .filter(|inv| inv.comp_code == code)
            .map(|inv| InvoiceRef { id: inv.id })
            .collect())
    }

    async fn insert_company(&self, company: &NewCompany) -> Result<Company, AppError> {
        let mut tables = self.write()?;
        if tables.companies.contains_key(&company.code) {
            return Err(AppError::Internal(format!(
                "duplicate key value violates unique constraint \"companies_pkey\": {}",
                company.code
            )));
        }
        if tables.companies.values().any(|c| c.name == company.name) {
            return Err(AppError::Internal(format!(
                "duplicate key value violates unique constraint \"companies_name_key\": {}",
                company.name
            )));
        }
        let row = Company {
            code: company.code.clone(),
            name: company.name.clone(),
            description: company.description.clone(),
        };
        tables.companies.insert(row.code.clone(), row.clone());
        Ok(row)
    }

    async fn update_company(
        &self,
        code: &str,
        update: &CompanyUpdate,
    ) -> Result<Option<Company>, AppError> {
        let mut tables = self.write()?;
        if !tables.companies.contains_key(code) {
            return Ok(None);
        }
        if tables
            .companies
            .values()
            .any(|c| c.code != code && c.name == update.name)
        {
            return Err(AppError::Internal(format!(
                "duplicate key value violates unique constraint \"companies_name_key\": {}",
                update.name
            )));
        }
        Ok(tables.companies.get_mut(code).map(|row| {
            row.name = update.name.clone();
            row.description = update.description.clone();
            row.clone()
        }))
    }

    async fn delete_company(&self, code: &str) -> Result<bool, AppError> {
        let mut tables = self.write()?;
        if tables.companies.remove(code).is_none() {
            return Ok(false);
        }
        // ON DELETE CASCADE
        tables.invoices.retain(|_, inv| inv.comp_code != code);
        Ok(true)
    }

    async fn list_invoices(&self) -> Result<Vec<Invoice>, AppError> {
        Ok(self.read()?.invoices.values().cloned().collect())
    }

    async fn get_invoice(&self, id: i32) -> Result<Option<Invoice>, AppError> {
        Ok(self.read()?.invoices.get(&id).cloned())
    }

    async fn insert_invoice(&self, invoice: &NewInvoice) -> Result<Invoice, AppError> {
        let mut tables = self.write()?;
        if !tables.companies.contains_key(&invoice.comp_code) {
            return Err(AppError::Internal(format!(
                "insert on table \"invoices\" violates foreign key constraint \"invoices_comp_code_fkey\": {}",
                invoice.comp_code
            )));
        }
        check_amount(invoice.amt)?;
        tables.last_invoice_id += 1;
        let row = Invoice {
            id: tables.last_invoice_id,
            comp_code: invoice.comp_code.clone(),
            amt: invoice.amt,
            paid: false,
            add_date: chrono::Utc::now().date_naive(),
            paid_date: None,
        };
        tables.invoices.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_invoice_amount(&self, id: i32, amt: f64) -> Result<Option<Invoice>, AppError> {
        let mut tables = self.write()?;
        let Some(row) = tables.invoices.get_mut(&id) else {
            return Ok(None);
        };
        check_amount(amt)?;
        row.amt = amt;
        Ok(Some(row.clone()))
    }

    async fn delete_invoice(&self, id: i32) -> Result<bool, AppError> {
        Ok(self.write()?.invoices.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }
}
