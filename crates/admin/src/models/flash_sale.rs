//! Time-boxed flash sales.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use ansania_core::FlashSaleId;

use super::fields::{self, checkbox};
use super::{AdminEntity, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashSale {
    pub id: FlashSaleId,
    pub name: String,
    pub description: Option<String>,
    /// Percentage off, in `(0, 100]`.
    pub discount_percent: Decimal,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashSaleInput {
    pub name: String,
    pub description: Option<String>,
    pub discount_percent: Decimal,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FlashSaleForm {
    pub name: String,
    pub description: String,
    pub discount_percent: String,
    pub starts_at: String,
    pub ends_at: String,
    #[serde(default, deserialize_with = "checkbox")]
    pub is_active: bool,
}

impl AdminEntity for FlashSale {
    type Id = FlashSaleId;
    type Input = FlashSaleInput;
    type Form = FlashSaleForm;

    const ENTITY_TYPE: &'static str = "flash_sale";
    const LABEL: &'static str = "Flash Sale";
    const BASE_PATH: &'static str = "/flash-sales";

    fn id(&self) -> FlashSaleId {
        self.id
    }

    fn to_form(&self) -> FlashSaleForm {
        FlashSaleForm {
            name: self.name.clone(),
            description: self.description.clone().unwrap_or_default(),
            discount_percent: self.discount_percent.to_string(),
            starts_at: fields::format_datetime(&self.starts_at),
            ends_at: fields::format_datetime(&self.ends_at),
            is_active: self.is_active,
        }
    }

    fn validate(form: &FlashSaleForm) -> Result<FlashSaleInput, ValidationError> {
        let name = fields::required("name", &form.name)?;
        let discount_percent = fields::required_decimal("discount_percent", &form.discount_percent)?;
        if discount_percent <= Decimal::ZERO || discount_percent > Decimal::ONE_HUNDRED {
            return Err(ValidationError::new(
                "discount_percent",
                "must be between 0 and 100",
            ));
        }
        let starts_at = fields::required_datetime("starts_at", &form.starts_at)?;
        let ends_at = fields::required_datetime("ends_at", &form.ends_at)?;
        fields::ordered("ends_at", Some(&starts_at), Some(&ends_at))?;

        Ok(FlashSaleInput {
            name,
            description: fields::optional(&form.description),
            discount_percent,
            starts_at,
            ends_at,
            is_active: form.is_active,
        })
    }
}
