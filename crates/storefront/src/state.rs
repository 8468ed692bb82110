//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ContentConfig;
use crate::content::{ContentError, ContentSource};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the database pool and the content backend.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: PgPool,
    content: ContentSource,
}

impl AppState {
    /// Create a new application state, selecting the content backend from
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` if the content backend cannot be built.
    pub fn new(config: &ContentConfig, pool: PgPool) -> Result<Self, ContentError> {
        let content = ContentSource::from_config(config, pool.clone())?;
        Ok(Self::with_content(pool, content))
    }

    /// Create application state with an explicit content backend.
    #[must_use]
    pub fn with_content(pool: PgPool, content: ContentSource) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                pool,
                content,
            }),
        }
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the content backend.
    #[must_use]
    pub fn content(&self) -> &ContentSource {
        &self.inner.content
    }
}
