//! Fixed in-memory content documents.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use ansania_core::{ContentDocument, Slug};

use super::{ContentError, ContentRepository};

/// Content backend holding documents in memory.
///
/// Counts lookups so callers can check how often a backend was hit.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContentRepository {
    pages: Arc<RwLock<HashMap<Slug, ContentDocument>>>,
    fetches: Arc<AtomicUsize>,
}

impl InMemoryContentRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with `pages`.
    #[must_use]
    pub fn with_pages(pages: impl IntoIterator<Item = ContentDocument>) -> Self {
        let repo = Self::new();
        for page in pages {
            repo.insert(page);
        }
        repo
    }

    /// Add or replace a document, keyed by its slug.
    pub fn insert(&self, page: ContentDocument) {
        self.pages
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(page.slug.clone(), page);
    }

    /// Number of `get_page` calls served so far.
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl ContentRepository for InMemoryContentRepository {
    async fn get_page(&self, slug: &Slug) -> Result<Option<ContentDocument>, ContentError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .pages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(slug)
            .cloned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn page(slug: &'static str, title: &str) -> ContentDocument {
        ContentDocument {
            slug: Slug::from_static(slug),
            title: title.to_string(),
            content: String::new(),
            metadata: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_lookup_and_count() {
        let repo = InMemoryContentRepository::with_pages([page("faq", "FAQ")]);

        let found = repo.get_page(&Slug::from_static("faq")).await.unwrap();
        let missing = repo.get_page(&Slug::from_static("about-us")).await.unwrap();

        assert_eq!(found.unwrap().title, "FAQ");
        assert!(missing.is_none());
        assert_eq!(repo.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_insert_replaces_by_slug() {
        let repo = InMemoryContentRepository::new();
        repo.insert(page("faq", "Old"));
        repo.insert(page("faq", "New"));

        let found = repo.get_page(&Slug::from_static("faq")).await.unwrap();
        assert_eq!(found.unwrap().title, "New");
    }
}
