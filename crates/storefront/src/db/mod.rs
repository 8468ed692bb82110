//! Database access for the storefront.
//!
//! The storefront shares the admin database and only reads from it:
//! published rows of `cms_pages` (see [`crate::content::PgContentRepository`]).
//! Migrations live in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p ansania-cli -- migrate
//! ```

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

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
