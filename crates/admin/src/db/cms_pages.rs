//! CMS page repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use ansania_core::{CmsPageId, Slug};

use super::{AdminStore, RepositoryError, map_unique_violation};
use crate::models::{CmsPage, CmsPageInput};

const CMS_PAGE_COLUMNS: &str =
    "id, slug, title, content, meta_description, is_published, created_at, updated_at";

const SLUG_CONSTRAINT: &str = "cms_pages_slug_key";
const SLUG_CONFLICT: &str = "A page with this slug already exists";

/// Internal row type for CMS page queries.
#[derive(Debug, sqlx::FromRow)]
struct CmsPageRow {
    id: i32,
    slug: String,
    title: String,
    content: String,
    meta_description: Option<String>,
    is_published: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CmsPageRow> for CmsPage {
    type Error = RepositoryError;

    fn try_from(row: CmsPageRow) -> Result<Self, Self::Error> {
        let slug = Slug::parse(&row.slug).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid slug in database: {e}"))
        })?;

        Ok(Self {
            id: CmsPageId::new(row.id),
            slug,
            title: row.title,
            content: row.content,
            meta_description: row.meta_description,
            is_published: row.is_published,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for CMS page database operations.
#[derive(Debug, Clone)]
pub struct CmsPageRepository {
    pool: PgPool,
}

impl CmsPageRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl AdminStore<CmsPage> for CmsPageRepository {
    #[instrument(skip(self), fields(page_id = %id))]
    async fn get(&self, id: CmsPageId) -> Result<Option<CmsPage>, RepositoryError> {
        let row = sqlx::query_as::<_, CmsPageRow>(&format!(
            "SELECT {CMS_PAGE_COLUMNS} FROM cms_pages WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    #[instrument(skip(self, input), fields(slug = %input.slug))]
    async fn create(&self, input: &CmsPageInput) -> Result<CmsPage, RepositoryError> {
        let row = sqlx::query_as::<_, CmsPageRow>(&format!(
            r"
            INSERT INTO cms_pages (slug, title, content, meta_description, is_published)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {CMS_PAGE_COLUMNS}
            "
        ))
        .bind(input.slug.as_str())
        .bind(&input.title)
        .bind(&input.content)
        .bind(&input.meta_description)
        .bind(input.is_published)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, SLUG_CONSTRAINT, SLUG_CONFLICT))?;

        row.try_into()
    }

    #[instrument(skip(self, input), fields(page_id = %id, slug = %input.slug))]
    async fn update(
        &self,
        id: CmsPageId,
        input: &CmsPageInput,
    ) -> Result<Option<CmsPage>, RepositoryError> {
        let row = sqlx::query_as::<_, CmsPageRow>(&format!(
            r"
            UPDATE cms_pages
            SET slug = $2, title = $3, content = $4, meta_description = $5,
                is_published = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING {CMS_PAGE_COLUMNS}
            "
        ))
        .bind(id)
        .bind(input.slug.as_str())
        .bind(&input.title)
        .bind(&input.content)
        .bind(&input.meta_description)
        .bind(input.is_published)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, SLUG_CONSTRAINT, SLUG_CONFLICT))?;

        row.map(TryInto::try_into).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<CmsPage>, RepositoryError> {
        let rows = sqlx::query_as::<_, CmsPageRow>(&format!(
            "SELECT {CMS_PAGE_COLUMNS} FROM cms_pages ORDER BY slug"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}
