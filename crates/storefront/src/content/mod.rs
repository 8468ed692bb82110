//! Content pages: repository seam, backends, markdown rendering, and page
//! resolution.
//!
//! # Backends
//!
//! - [`PgContentRepository`] - published rows of the `cms_pages` table (default)
//! - [`HttpContentClient`] - external content service, cached with `moka`
//! - [`InMemoryContentRepository`] - fixed documents for previews and tests
//!
//! Every backend distinguishes "document does not exist" (`Ok(None)`) from a
//! backend failure (`Err(ContentError)`). Only the former becomes a 404.

mod database;
mod http;
mod memory;
pub mod resolver;

use std::future::Future;

use comrak::{Options, markdown_to_html};
use sqlx::PgPool;
use thiserror::Error;

use ansania_core::{ContentDocument, Slug};

use crate::config::ContentConfig;

pub use database::PgContentRepository;
pub use http::HttpContentClient;
pub use memory::InMemoryContentRepository;
pub use resolver::{
    BRAND_NAME, NOT_FOUND_TITLE, PageError, PageLookup, PageMetadata, generate_metadata, render,
};

/// Content backend failures.
///
/// Absence is never an error; see [`ContentRepository::get_page`].
#[derive(Debug, Error)]
pub enum ContentError {
    /// Database query failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request to the content service failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Content service answered with an unexpected status.
    #[error("content service returned HTTP {0}")]
    Status(u16),

    /// Response body was not a valid document.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Stored data does not form a valid document.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Read access to content documents.
pub trait ContentRepository: Send + Sync {
    /// Fetch the document with the given slug.
    ///
    /// Returns `Ok(None)` when no such document exists.
    fn get_page(
        &self,
        slug: &Slug,
    ) -> impl Future<Output = Result<Option<ContentDocument>, ContentError>> + Send;
}

/// The content backend selected by configuration.
#[derive(Debug, Clone)]
pub enum ContentSource {
    Database(PgContentRepository),
    Http(HttpContentClient),
    Memory(InMemoryContentRepository),
}

impl ContentSource {
    /// Pick a backend: the content service when `CONTENT_API_URL` is set,
    /// otherwise the `cms_pages` table.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Http` if the HTTP client cannot be built.
    pub fn from_config(config: &ContentConfig, pool: PgPool) -> Result<Self, ContentError> {
        match &config.api_url {
            Some(url) => {
                tracing::info!(url = %url, "Using external content service");
                Ok(Self::Http(HttpContentClient::new(
                    url.clone(),
                    config.api_token.clone(),
                    config.cache_ttl,
                )?))
            }
            None => {
                tracing::info!("Using database content pages");
                Ok(Self::Database(PgContentRepository::new(pool)))
            }
        }
    }
}

impl ContentRepository for ContentSource {
    async fn get_page(&self, slug: &Slug) -> Result<Option<ContentDocument>, ContentError> {
        match self {
            Self::Database(repo) => repo.get_page(slug).await,
            Self::Http(client) => client.get_page(slug).await,
            Self::Memory(repo) => repo.get_page(slug).await,
        }
    }
}

/// Render markdown to HTML with GitHub Flavored Markdown support.
///
/// Raw HTML in the source is escaped.
#[must_use]
pub fn render_markdown(content: &str) -> String {
    let mut options = Options::default();

    // Enable GFM extensions
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.superscript = true;
    options.extension.header_ids = Some(String::new());
    options.extension.footnotes = true;

    markdown_to_html(content, &options)
}
