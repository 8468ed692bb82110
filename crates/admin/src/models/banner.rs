//! Homepage banners.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use ansania_core::BannerId;

use super::fields::{self, checkbox};
use super::{AdminEntity, ValidationError};

/// A promotional banner shown on the storefront.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub id: BannerId,
    pub title: String,
    pub image_url: String,
    pub link_url: Option<String>,
    /// Sort order, lowest first.
    pub position: i32,
    pub is_active: bool,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated banner fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerInput {
    pub title: String,
    pub image_url: String,
    pub link_url: Option<String>,
    pub position: i32,
    pub is_active: bool,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

/// Banner form as submitted by the browser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BannerForm {
    pub title: String,
    pub image_url: String,
    pub link_url: String,
    pub position: String,
    #[serde(default, deserialize_with = "checkbox")]
    pub is_active: bool,
    pub starts_at: String,
    pub ends_at: String,
}

impl AdminEntity for Banner {
    type Id = BannerId;
    type Input = BannerInput;
    type Form = BannerForm;

    const ENTITY_TYPE: &'static str = "banner";
    const LABEL: &'static str = "Banner";
    const BASE_PATH: &'static str = "/banners";

    fn id(&self) -> BannerId {
        self.id
    }

    fn to_form(&self) -> BannerForm {
        BannerForm {
            title: self.title.clone(),
            image_url: self.image_url.clone(),
            link_url: self.link_url.clone().unwrap_or_default(),
            position: self.position.to_string(),
            is_active: self.is_active,
            starts_at: fields::format_optional_datetime(self.starts_at.as_ref()),
            ends_at: fields::format_optional_datetime(self.ends_at.as_ref()),
        }
    }

    fn validate(form: &BannerForm) -> Result<BannerInput, ValidationError> {
        let title = fields::required("title", &form.title)?;
        let image_url = fields::required("image_url", &form.image_url)?;
        let position = fields::optional_integer("position", &form.position)?.unwrap_or(0);
        let starts_at = fields::optional_datetime("starts_at", &form.starts_at)?;
        let ends_at = fields::optional_datetime("ends_at", &form.ends_at)?;
        fields::ordered("ends_at", starts_at.as_ref(), ends_at.as_ref())?;

        Ok(BannerInput {
            title,
            image_url,
            link_url: fields::optional(&form.link_url),
            position,
            is_active: form.is_active,
            starts_at,
            ends_at,
        })
    }
}
