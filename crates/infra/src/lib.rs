//! Infrastructure layer: record storage, query execution, configuration.
//!
//! The in-memory database stands in for the host ORM in tests and dev; the
//! Postgres searcher runs translated searches against a real database.

pub mod config;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod search;

mod integration_tests;

pub use config::OriginConfig;
pub use error::InfraError;
pub use memory::InMemoryDatabase;
pub use postgres::PgInvoiceLineSearch;
pub use search::{InvoiceLineSearch, find_lines};
