//! Database bootstrap: create the target database if missing, then the
//! `companies` and `invoices` tables.

use crate::error::{AppError, ConfigError};
use sqlx::postgres::PgConnectOptions;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

const DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS companies (
        code TEXT PRIMARY KEY,
        name TEXT NOT NULL UNIQUE,
        description TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS invoices (
        id SERIAL PRIMARY KEY,
        comp_code TEXT NOT NULL REFERENCES companies ON DELETE CASCADE,
        amt DOUBLE PRECISION NOT NULL CHECK (amt > 0),
        paid BOOLEAN NOT NULL DEFAULT false,
        add_date DATE NOT NULL DEFAULT CURRENT_DATE,
        paid_date DATE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS invoices_comp_code_idx ON invoices (comp_code)",
];

/// Create `companies` and `invoices` if they do not exist. Idempotent.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    for sql in DDL {
        sqlx::query(sql).execute(pool).await?;
    }
    tracing::info!("schema ready");
    Ok(())
}

/// Connect to the `postgres` maintenance database and create the database named in `database_url` if it is missing.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin, db_name) = maintenance_options(database_url)?;
    let Some(db_name) = db_name.filter(|n| n != "postgres") else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "created database");
    }
    Ok(())
}

/// Options for the `postgres` maintenance database (same host, socket, credentials and TLS as `url`),
/// plus the database `url` names, if any.
fn maintenance_options(url: &str) -> Result<(PgConnectOptions, Option<String>), ConfigError> {
    let target = PgConnectOptions::from_str(url).map_err(|e| ConfigError::Invalid {
        var: "DATABASE_URL",
        message: e.to_string(),
    })?;
    let db_name = target
        .get_database()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);
    Ok((target.database("postgres"), db_name))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
