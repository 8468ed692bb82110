//! Page resolution: one document per request, "not found" vs "render", and
//! page metadata.
//!
//! Metadata generation and rendering each re-check absence on their own. A
//! [`PageLookup`] memoises the backend call within one request so the two
//! phases share a single fetch; nothing is shared across requests beyond the
//! repository itself.

use thiserror::Error;
use tokio::sync::OnceCell;

use ansania_core::{ContentDocument, Slug};

use super::{ContentError, ContentRepository};

/// Brand suffix appended to every content page title.
pub const BRAND_NAME: &str = "Ansania";

/// Title used when the requested document does not exist.
pub const NOT_FOUND_TITLE: &str = "Page Not Found";

/// Failure to render a content page.
#[derive(Debug, Error)]
pub enum PageError {
    /// No document exists for the slug.
    #[error("page not found: {0}")]
    NotFound(Slug),

    /// The content backend failed.
    #[error(transparent)]
    Content(#[from] ContentError),
}

/// A single request's view of one content document.
pub struct PageLookup<'a, R> {
    repo: &'a R,
    slug: Slug,
    document: OnceCell<Option<ContentDocument>>,
}

impl<'a, R: ContentRepository> PageLookup<'a, R> {
    #[must_use]
    pub fn new(repo: &'a R, slug: Slug) -> Self {
        Self {
            repo,
            slug,
            document: OnceCell::new(),
        }
    }

    #[must_use]
    pub const fn slug(&self) -> &Slug {
        &self.slug
    }

    /// Fetch the document, at most once per successful lookup.
    ///
    /// # Errors
    ///
    /// Returns the backend error; a failed fetch is retried on the next call.
    pub async fn document(&self) -> Result<Option<&ContentDocument>, ContentError> {
        let document = self
            .document
            .get_or_try_init(|| self.repo.get_page(&self.slug))
            .await?;
        Ok(document.as_ref())
    }
}

/// Head metadata for a content page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: String,
    pub description: Option<String>,
}

impl PageMetadata {
    #[must_use]
    pub fn not_found() -> Self {
        Self {
            title: NOT_FOUND_TITLE.to_string(),
            description: None,
        }
    }

    #[must_use]
    pub fn for_document(document: &ContentDocument) -> Self {
        Self {
            title: format!("{} - {BRAND_NAME}", document.title),
            description: document.description().map(str::to_string),
        }
    }
}

/// Derive page metadata; an absent document yields the "Page Not Found" title.
///
/// # Errors
///
/// Returns `ContentError` if the backend fails.
pub async fn generate_metadata<R: ContentRepository>(
    lookup: &PageLookup<'_, R>,
) -> Result<PageMetadata, ContentError> {
    Ok(lookup
        .document()
        .await?
        .map_or_else(PageMetadata::not_found, PageMetadata::for_document))
}

/// Resolve the document to render.
///
/// # Errors
///
/// Returns `PageError::NotFound` if the document is absent, or
/// `PageError::Content` if the backend fails.
pub async fn render<'l, R: ContentRepository>(
    lookup: &'l PageLookup<'_, R>,
) -> Result<&'l ContentDocument, PageError> {
    lookup
        .document()
        .await?
        .ok_or_else(|| PageError::NotFound(lookup.slug().clone()))
}
