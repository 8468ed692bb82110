//! `PostgreSQL` activity sink.

use sqlx::PgPool;

use super::{ActivityLogEntry, ActivityLogError, ActivitySink};

/// Writes activity entries to the `activity_logs` table.
#[derive(Debug, Clone)]
pub struct PgActivitySink {
    pool: PgPool,
}

impl PgActivitySink {
    /// Create a sink backed by the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ActivitySink for PgActivitySink {
    async fn record(&self, entry: &ActivityLogEntry) -> Result<(), ActivityLogError> {
        sqlx::query(
            r"
            INSERT INTO activity_logs (
                user_id, action, entity_type, entity_id,
                ip_address, user_agent, metadata
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(entry.user_id)
        .bind(&entry.action)
        .bind(entry.entity_type.as_deref())
        .bind(entry.entity_id)
        .bind(entry.ip_address.as_deref())
        .bind(entry.user_agent.as_deref())
        .bind(entry.metadata.clone())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
