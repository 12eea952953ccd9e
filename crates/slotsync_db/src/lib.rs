// --- File: crates/slotsync_db/src/lib.rs ---
//! Database integration for Slotsync
//!
//! This crate provides a database-agnostic client built on SQLx, plus the
//! SQL implementations of the group repository and slot store consumed by
//! the availability coordinator. It supports SQLite, PostgreSQL, and MySQL
//! through feature flags; instants are stored as RFC3339 TEXT so the `any`
//! driver can round-trip them at millisecond precision on every backend.
//!
//! # Example
//!
//! ```rust,no_run
//! use slotsync_db::{init_schema, DbClient, SqlSlotStore};
//!
//! async fn setup_db() -> Result<SqlSlotStore, Box<dyn std::error::Error>> {
//!     let db_client = DbClient::from_url("sqlite::memory:").await?;
//!     init_schema(&db_client).await?;
//!     Ok(SqlSlotStore::new(db_client))
//! }
//! ```

pub mod client;
pub mod error;
pub mod repositories;
pub mod schema;

// Register the SQLite driver when the crate is loaded
#[cfg(feature = "sqlite")]
mod sqlite_driver {
    // This import ensures the SQLite driver is linked and registered
    #[allow(unused_imports)]
    use sqlx::sqlite::SqlitePoolOptions as _;
}

pub use client::{DbClient, DbTransaction};
pub use error::DbError;
pub use repositories::{SqlGroupRepository, SqlSlotStore};
pub use schema::init_schema;
