//! Domain models for the admin CMS.
//!
//! Each entity comes in three shapes:
//! - the stored record (`Banner`), read back from the database;
//! - a typed input (`BannerInput`) accepted by create and update;
//! - a string-valued HTML form (`BannerForm`), validated into the input.

pub mod banner;
pub mod cms_page;
pub mod flash_sale;
pub(crate) mod fields;
pub mod voucher;

use std::fmt;

use serde::de::DeserializeOwned;
use thiserror::Error;

pub use banner::{Banner, BannerForm, BannerInput};
pub use cms_page::{CmsPage, CmsPageForm, CmsPageInput};
pub use flash_sale::{FlashSale, FlashSaleForm, FlashSaleInput};
pub use voucher::{DiscountType, Voucher, VoucherForm, VoucherInput};

/// A rejected form field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} {message}")]
pub struct ValidationError {
    /// Form field name.
    pub field: &'static str,
    /// Human-readable problem.
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// An entity managed through the admin CMS.
pub trait AdminEntity: Clone + Send + Sync + 'static {
    /// Typed ID.
    type Id: Copy + fmt::Debug + fmt::Display + From<i32> + Into<i32> + Send + Sync + 'static;
    /// Validated fields for create and update.
    type Input: Send + Sync;
    /// Raw HTML form values.
    type Form: Clone + Default + fmt::Debug + DeserializeOwned + Send + Sync + 'static;

    /// Activity log entity type, e.g. `banner`.
    const ENTITY_TYPE: &'static str;
    /// Display name, e.g. `Banner`.
    const LABEL: &'static str;
    /// List page path, e.g. `/banners`.
    const BASE_PATH: &'static str;

    fn id(&self) -> Self::Id;

    /// Form values pre-populated from this record.
    fn to_form(&self) -> Self::Form;

    /// Parse and check submitted form values.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` naming the first invalid field.
    fn validate(form: &Self::Form) -> Result<Self::Input, ValidationError>;
}
