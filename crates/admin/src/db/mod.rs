//! Database operations for the admin CMS.
//!
//! # Tables
//!
//! - `banners` - Homepage banners
//! - `cms_pages` - Content pages (read by the storefront when published)
//! - `flash_sales` - Time-boxed sales
//! - `vouchers` - Discount codes
//! - `activity_logs` - Append-only audit log (written via `ansania_core`)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p ansania-cli -- migrate
//! ```

pub mod banners;
pub mod cms_pages;
pub mod flash_sales;
pub mod vouchers;

use std::future::Future;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use crate::models::AdminEntity;

pub use banners::BannerRepository;
pub use cms_pages::CmsPageRepository;
pub use flash_sales::FlashSaleRepository;
pub use vouchers::VoucherRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., duplicate slug).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Persistence for one admin entity type.
///
/// `get` and `update` return `Ok(None)` when no row has the given ID.
pub trait AdminStore<E: AdminEntity>: Send + Sync {
    fn get(&self, id: E::Id) -> impl Future<Output = Result<Option<E>, RepositoryError>> + Send;

    fn create(&self, input: &E::Input) -> impl Future<Output = Result<E, RepositoryError>> + Send;

    fn update(
        &self,
        id: E::Id,
        input: &E::Input,
    ) -> impl Future<Output = Result<Option<E>, RepositoryError>> + Send;

    /// All records, in display order.
    fn list(&self) -> impl Future<Output = Result<Vec<E>, RepositoryError>> + Send;
}

/// Map a unique-constraint violation to `Conflict`, anything else to `Database`.
fn map_unique_violation(e: sqlx::Error, constraint: &str, message: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.constraint() == Some(constraint)
    {
        return RepositoryError::Conflict(message.to_string());
    }
    RepositoryError::Database(e)
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
