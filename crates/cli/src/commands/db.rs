//! Database connectivity check.

use secrecy::ExposeSecret;
use sqlx::PgPool;

use super::{CommandError, database_url};

/// Connect, run `SELECT 1`, and log the server version.
pub async fn ping() -> Result<(), CommandError> {
    let database_url = database_url()?;

    let pool = PgPool::connect(database_url.expose_secret()).await?;

    let one: i32 = sqlx::query_scalar("SELECT 1").fetch_one(&pool).await?;
    let version: String = sqlx::query_scalar("SELECT version()")
        .fetch_one(&pool)
        .await?;

    tracing::info!(result = one, %version, "Database reachable");
    pool.close().await;
    Ok(())
}
