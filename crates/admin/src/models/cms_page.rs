//! CMS pages served by the storefront's content routes.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use ansania_core::{CmsPageId, Slug};

use super::fields::{self, checkbox};
use super::{AdminEntity, ValidationError};

/// A markdown content page, addressed on the storefront by its slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmsPage {
    pub id: CmsPageId,
    pub slug: Slug,
    pub title: String,
    /// Markdown body.
    pub content: String,
    pub meta_description: Option<String>,
    /// Unpublished pages are invisible to the storefront.
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmsPageInput {
    pub slug: Slug,
    pub title: String,
    pub content: String,
    pub meta_description: Option<String>,
    pub is_published: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CmsPageForm {
    pub slug: String,
    pub title: String,
    pub content: String,
    pub meta_description: String,
    #[serde(default, deserialize_with = "checkbox")]
    pub is_published: bool,
}

impl AdminEntity for CmsPage {
    type Id = CmsPageId;
    type Input = CmsPageInput;
    type Form = CmsPageForm;

    const ENTITY_TYPE: &'static str = "cms_page";
    const LABEL: &'static str = "Page";
    const BASE_PATH: &'static str = "/pages";

    fn id(&self) -> CmsPageId {
        self.id
    }

    fn to_form(&self) -> CmsPageForm {
        CmsPageForm {
            slug: self.slug.to_string(),
            title: self.title.clone(),
            content: self.content.clone(),
            meta_description: self.meta_description.clone().unwrap_or_default(),
            is_published: self.is_published,
        }
    }

    fn validate(form: &CmsPageForm) -> Result<CmsPageInput, ValidationError> {
        let slug = Slug::parse(form.slug.trim())
            .map_err(|e| ValidationError::new("slug", e.to_string()))?;
        let title = fields::required("title", &form.title)?;

        Ok(CmsPageInput {
            slug,
            title,
            // Markdown is whitespace-sensitive; keep the body as written
            content: form.content.clone(),
            meta_description: fields::optional(&form.meta_description),
            is_published: form.is_published,
        })
    }
}
