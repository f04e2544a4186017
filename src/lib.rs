//! biztime: REST API over companies and the invoices they own.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod models;
pub mod response;
pub mod routes;
pub mod seed;
pub mod state;
pub mod store;
pub mod telemetry;

pub use config::{ServerConfig, StoreKind};
pub use error::{AppError, ConfigError};
pub use migration::{apply_migrations, ensure_database_exists};
pub use routes::app;
pub use seed::load_sample_data;
pub use state::AppState;
pub use store::{MemoryStore, PgStore, Store};
