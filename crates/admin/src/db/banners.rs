//! Banner repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use ansania_core::BannerId;

use super::{AdminStore, RepositoryError};
use crate::models::{Banner, BannerInput};

const BANNER_COLUMNS: &str = "id, title, image_url, link_url, position, is_active, \
                              starts_at, ends_at, created_at, updated_at";

/// Internal row type for banner queries.
#[derive(Debug, sqlx::FromRow)]
struct BannerRow {
    id: i32,
    title: String,
    image_url: String,
    link_url: Option<String>,
    position: i32,
    is_active: bool,
    starts_at: Option<DateTime<Utc>>,
    ends_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BannerRow> for Banner {
    fn from(row: BannerRow) -> Self {
        Self {
            id: BannerId::new(row.id),
            title: row.title,
            image_url: row.image_url,
            link_url: row.link_url,
            position: row.position,
            is_active: row.is_active,
            starts_at: row.starts_at,
            ends_at: row.ends_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for banner database operations.
#[derive(Debug, Clone)]
pub struct BannerRepository {
    pool: PgPool,
}

impl BannerRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl AdminStore<Banner> for BannerRepository {
    #[instrument(skip(self), fields(banner_id = %id))]
    async fn get(&self, id: BannerId) -> Result<Option<Banner>, RepositoryError> {
        let row = sqlx::query_as::<_, BannerRow>(&format!(
            "SELECT {BANNER_COLUMNS} FROM banners WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    #[instrument(skip(self, input), fields(title = %input.title))]
    async fn create(&self, input: &BannerInput) -> Result<Banner, RepositoryError> {
        let row = sqlx::query_as::<_, BannerRow>(&format!(
            r"
            INSERT INTO banners (title, image_url, link_url, position, is_active, starts_at, ends_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {BANNER_COLUMNS}
            "
        ))
        .bind(&input.title)
        .bind(&input.image_url)
        .bind(&input.link_url)
        .bind(input.position)
        .bind(input.is_active)
        .bind(input.starts_at)
        .bind(input.ends_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    #[instrument(skip(self, input), fields(banner_id = %id))]
    async fn update(
        &self,
        id: BannerId,
        input: &BannerInput,
    ) -> Result<Option<Banner>, RepositoryError> {
        let row = sqlx::query_as::<_, BannerRow>(&format!(
            r"
            UPDATE banners
            SET title = $2, image_url = $3, link_url = $4, position = $5,
                is_active = $6, starts_at = $7, ends_at = $8, updated_at = NOW()
            WHERE id = $1
            RETURNING {BANNER_COLUMNS}
            "
        ))
        .bind(id)
        .bind(&input.title)
        .bind(&input.image_url)
        .bind(&input.link_url)
        .bind(input.position)
        .bind(input.is_active)
        .bind(input.starts_at)
        .bind(input.ends_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Banner>, RepositoryError> {
        let rows = sqlx::query_as::<_, BannerRow>(&format!(
            "SELECT {BANNER_COLUMNS} FROM banners ORDER BY position, id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
