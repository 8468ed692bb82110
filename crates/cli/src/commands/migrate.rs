//! Database migration command.
//!
//! Migrations live in `crates/admin/migrations/` and are embedded at
//! compile time. The storefront reads the same database (`cms_pages`), so
//! there is a single migration set.

use secrecy::ExposeSecret;
use sqlx::PgPool;

use super::{CommandError, database_url};

/// Apply any pending migrations.
pub async fn run() -> Result<(), CommandError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(database_url.expose_secret()).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../admin/migrations").run(&pool).await?;

    tracing::info!("Migrations complete");
    pool.close().await;
    Ok(())
}
