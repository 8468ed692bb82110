//! Content pages read from the `cms_pages` table.
//!
//! The admin console owns this table; the storefront only reads published rows.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use ansania_core::{ContentDocument, Slug};

use super::{ContentError, ContentRepository};

/// Internal row type for content page queries.
#[derive(Debug, sqlx::FromRow)]
struct ContentPageRow {
    slug: String,
    title: String,
    content: String,
    meta_description: Option<String>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ContentPageRow> for ContentDocument {
    type Error = ContentError;

    fn try_from(row: ContentPageRow) -> Result<Self, Self::Error> {
        let slug = Slug::parse(&row.slug).map_err(|e| {
            ContentError::DataCorruption(format!("invalid slug '{}': {e}", row.slug))
        })?;

        Ok(Self {
            slug,
            title: row.title,
            content: row.content,
            metadata: row
                .meta_description
                .map(|description| serde_json::json!({ "description": description })),
            updated_at: Some(row.updated_at),
        })
    }
}

/// Repository for published CMS pages.
#[derive(Debug, Clone)]
pub struct PgContentRepository {
    pool: PgPool,
}

impl PgContentRepository {
    /// Create a new content repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ContentRepository for PgContentRepository {
    #[instrument(skip(self), fields(slug = %slug))]
    async fn get_page(&self, slug: &Slug) -> Result<Option<ContentDocument>, ContentError> {
        let row = sqlx::query_as::<_, ContentPageRow>(
            r"
            SELECT slug, title, content, meta_description, updated_at
            FROM cms_pages
            WHERE slug = $1 AND is_published
            ",
        )
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ContentDocument::try_from).transpose()
    }
}
