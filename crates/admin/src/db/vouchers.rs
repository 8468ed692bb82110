//! Voucher repository.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;

use ansania_core::VoucherId;

use super::{AdminStore, RepositoryError, map_unique_violation};
use crate::models::{DiscountType, Voucher, VoucherInput};

const VOUCHER_COLUMNS: &str = "id, code, description, discount_type, discount_value, \
                               min_order_amount, usage_limit, used_count, starts_at, expires_at, \
                               is_active, created_at, updated_at";

const CODE_CONSTRAINT: &str = "vouchers_code_key";
const CODE_CONFLICT: &str = "A voucher with this code already exists";

#[derive(Debug, sqlx::FromRow)]
struct VoucherRow {
    id: i32,
    code: String,
    description: Option<String>,
    discount_type: String,
    discount_value: Decimal,
    min_order_amount: Option<Decimal>,
    usage_limit: Option<i32>,
    used_count: i32,
    starts_at: Option<DateTime<Utc>>,
    expires_at: Option<DateTime<Utc>>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<VoucherRow> for Voucher {
    type Error = RepositoryError;

    fn try_from(row: VoucherRow) -> Result<Self, Self::Error> {
        let discount_type = row.discount_type.parse::<DiscountType>().map_err(|_| {
            RepositoryError::DataCorruption(format!(
                "invalid discount_type in database: {}",
                row.discount_type
            ))
        })?;

        Ok(Self {
            id: VoucherId::new(row.id),
            code: row.code,
            description: row.description,
            discount_type,
            discount_value: row.discount_value,
            min_order_amount: row.min_order_amount,
            usage_limit: row.usage_limit,
            used_count: row.used_count,
            starts_at: row.starts_at,
            expires_at: row.expires_at,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for voucher database operations.
///
/// `used_count` is maintained by checkout and never written here.
#[derive(Debug, Clone)]
pub struct VoucherRepository {
    pool: PgPool,
}

impl VoucherRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl AdminStore<Voucher> for VoucherRepository {
    #[instrument(skip(self), fields(voucher_id = %id))]
    async fn get(&self, id: VoucherId) -> Result<Option<Voucher>, RepositoryError> {
        let row = sqlx::query_as::<_, VoucherRow>(&format!(
            "SELECT {VOUCHER_COLUMNS} FROM vouchers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    #[instrument(skip(self, input), fields(code = %input.code))]
    async fn create(&self, input: &VoucherInput) -> Result<Voucher, RepositoryError> {
        let row = sqlx::query_as::<_, VoucherRow>(&format!(
            r"
            INSERT INTO vouchers (code, description, discount_type, discount_value,
                                  min_order_amount, usage_limit, starts_at, expires_at, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {VOUCHER_COLUMNS}
            "
        ))
        .bind(&input.code)
        .bind(&input.description)
        .bind(input.discount_type.as_str())
        .bind(input.discount_value)
        .bind(input.min_order_amount)
        .bind(input.usage_limit)
        .bind(input.starts_at)
        .bind(input.expires_at)
        .bind(input.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, CODE_CONSTRAINT, CODE_CONFLICT))?;

        row.try_into()
    }

    #[instrument(skip(self, input), fields(voucher_id = %id, code = %input.code))]
    async fn update(
        &self,
        id: VoucherId,
        input: &VoucherInput,
    ) -> Result<Option<Voucher>, RepositoryError> {
        let row = sqlx::query_as::<_, VoucherRow>(&format!(
            r"
            UPDATE vouchers
            SET code = $2, description = $3, discount_type = $4, discount_value = $5,
                min_order_amount = $6, usage_limit = $7, starts_at = $8, expires_at = $9,
                is_active = $10, updated_at = NOW()
            WHERE id = $1
            RETURNING {VOUCHER_COLUMNS}
            "
        ))
        .bind(id)
        .bind(&input.code)
        .bind(&input.description)
        .bind(input.discount_type.as_str())
        .bind(input.discount_value)
        .bind(input.min_order_amount)
        .bind(input.usage_limit)
        .bind(input.starts_at)
        .bind(input.expires_at)
        .bind(input.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, CODE_CONSTRAINT, CODE_CONFLICT))?;

        row.map(TryInto::try_into).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Voucher>, RepositoryError> {
        let rows = sqlx::query_as::<_, VoucherRow>(&format!(
            "SELECT {VOUCHER_COLUMNS} FROM vouchers ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}
