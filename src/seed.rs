//! Sample data for a fresh store.

use crate::error::AppError;
use crate::models::{NewCompany, NewInvoice};
use crate::store::Store;

/// Insert the sample companies and invoices unless the store already has companies.
/// Returns whether anything was inserted.
pub async fn load_sample_data(store: &dyn Store) -> Result<bool, AppError> {
    if !store.list_companies().await?.is_empty() {
        tracing::info!("store not empty; skipping sample data");
        return Ok(false);
    }
    let companies = [
        ("apple", "Apple Computer", "Maker of OSX."),
        ("ibm", "IBM", "Big blue."),
    ];
    for (code, name, description) in companies {
        store
            .insert_company(&NewCompany {
                code: code.into(),
                name: name.into(),
                description: Some(description.into()),
            })
            .await?;
    }
    for (comp_code, amt) in [("apple", 100.0), ("apple", 200.0), ("apple", 300.0), ("ibm", 400.0)] {
        store
            .insert_invoice(&NewInvoice {
                comp_code: comp_code.into(),
                amt,
            })
            .await?;
    }
    tracing::info!("loaded sample data");
    Ok(true)
}
