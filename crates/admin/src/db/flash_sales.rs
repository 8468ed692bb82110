//! Flash sale repository.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;

use ansania_core::FlashSaleId;

use super::{AdminStore, RepositoryError};
use crate::models::{FlashSale, FlashSaleInput};

const FLASH_SALE_COLUMNS: &str = "id, name, description, discount_percent, starts_at, ends_at, \
                                  is_active, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct FlashSaleRow {
    id: i32,
    name: String,
    description: Option<String>,
    discount_percent: Decimal,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<FlashSaleRow> for FlashSale {
    fn from(row: FlashSaleRow) -> Self {
        Self {
            id: FlashSaleId::new(row.id),
            name: row.name,
            description: row.description,
            discount_percent: row.discount_percent,
            starts_at: row.starts_at,
            ends_at: row.ends_at,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for flash sale database operations.
#[derive(Debug, Clone)]
pub struct FlashSaleRepository {
    pool: PgPool,
}

impl FlashSaleRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl AdminStore<FlashSale> for FlashSaleRepository {
    #[instrument(skip(self), fields(flash_sale_id = %id))]
    async fn get(&self, id: FlashSaleId) -> Result<Option<FlashSale>, RepositoryError> {
        let row = sqlx::query_as::<_, FlashSaleRow>(&format!(
            "SELECT {FLASH_SALE_COLUMNS} FROM flash_sales WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    async fn create(&self, input: &FlashSaleInput) -> Result<FlashSale, RepositoryError> {
        let row = sqlx::query_as::<_, FlashSaleRow>(&format!(
            r"
            INSERT INTO flash_sales (name, description, discount_percent, starts_at, ends_at, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {FLASH_SALE_COLUMNS}
            "
        ))
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.discount_percent)
        .bind(input.starts_at)
        .bind(input.ends_at)
        .bind(input.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    #[instrument(skip(self, input), fields(flash_sale_id = %id))]
    async fn update(
        &self,
        id: FlashSaleId,
        input: &FlashSaleInput,
    ) -> Result<Option<FlashSale>, RepositoryError> {
        let row = sqlx::query_as::<_, FlashSaleRow>(&format!(
            r"
            UPDATE flash_sales
            SET name = $2, description = $3, discount_percent = $4,
                starts_at = $5, ends_at = $6, is_active = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING {FLASH_SALE_COLUMNS}
            "
        ))
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.discount_percent)
        .bind(input.starts_at)
        .bind(input.ends_at)
        .bind(input.is_active)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<FlashSale>, RepositoryError> {
        let rows = sqlx::query_as::<_, FlashSaleRow>(&format!(
            "SELECT {FLASH_SALE_COLUMNS} FROM flash_sales ORDER BY starts_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
