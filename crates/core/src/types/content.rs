//! Content documents served by the storefront.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Slug;

/// A named content document (privacy policy, FAQ, about page, ...).
///
/// Documents are authored through the admin CMS and are read-only from the
/// storefront's perspective. `content` holds the markdown body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentDocument {
    /// Unique lookup key.
    pub slug: Slug,
    /// Display title (without the brand suffix).
    pub title: String,
    /// Markdown body.
    pub content: String,
    /// Optional structured metadata (e.g. `{"description": "..."}`).
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
    /// When the document was last edited, if known.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ContentDocument {
    /// Returns the `description` metadata key, if present and a string.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.metadata
            .as_ref()?
            .get("description")?
            .as_str()
            .filter(|d| !d.trim().is_empty())
    }
}
