//! Discount vouchers redeemed at checkout.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use ansania_core::VoucherId;

use super::fields::{self, checkbox};
use super::{AdminEntity, ValidationError};

/// How a voucher's `discount_value` is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DiscountType {
    /// Percentage off the order total.
    #[default]
    Percentage,
    /// Fixed amount off the order total.
    FixedAmount,
}

impl DiscountType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::FixedAmount => "fixed_amount",
        }
    }
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscountType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "percentage" => Ok(Self::Percentage),
            "fixed_amount" => Ok(Self::FixedAmount),
            _ => Err(ValidationError::new(
                "discount_type",
                "must be percentage or fixed_amount",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voucher {
    pub id: VoucherId,
    /// Upper-case redemption code, unique.
    pub code: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub min_order_amount: Option<Decimal>,
    /// `None` means unlimited.
    pub usage_limit: Option<i32>,
    pub used_count: i32,
    pub starts_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoucherInput {
    pub code: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub min_order_amount: Option<Decimal>,
    pub usage_limit: Option<i32>,
    pub starts_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VoucherForm {
    pub code: String,
    pub description: String,
    pub discount_type: String,
    pub discount_value: String,
    pub min_order_amount: String,
    pub usage_limit: String,
    pub starts_at: String,
    pub expires_at: String,
    #[serde(default, deserialize_with = "checkbox")]
    pub is_active: bool,
}

impl Default for VoucherForm {
    fn default() -> Self {
        Self {
            code: String::new(),
            description: String::new(),
            discount_type: DiscountType::default().to_string(),
            discount_value: String::new(),
            min_order_amount: String::new(),
            usage_limit: String::new(),
            starts_at: String::new(),
            expires_at: String::new(),
            is_active: true,
        }
    }
}

impl AdminEntity for Voucher {
    type Id = VoucherId;
    type Input = VoucherInput;
    type Form = VoucherForm;

    const ENTITY_TYPE: &'static str = "voucher";
    const LABEL: &'static str = "Voucher";
    const BASE_PATH: &'static str = "/vouchers";

    fn id(&self) -> VoucherId {
        self.id
    }

    fn to_form(&self) -> VoucherForm {
        VoucherForm {
            code: self.code.clone(),
            description: self.description.clone().unwrap_or_default(),
            discount_type: self.discount_type.to_string(),
            discount_value: self.discount_value.to_string(),
            min_order_amount: self
                .min_order_amount
                .map(|amount| amount.to_string())
                .unwrap_or_default(),
            usage_limit: self
                .usage_limit
                .map(|limit| limit.to_string())
                .unwrap_or_default(),
            starts_at: fields::format_optional_datetime(self.starts_at.as_ref()),
            expires_at: fields::format_optional_datetime(self.expires_at.as_ref()),
            is_active: self.is_active,
        }
    }

    fn validate(form: &VoucherForm) -> Result<VoucherInput, ValidationError> {
        let code = fields::required("code", &form.code)?.to_uppercase();
        if code.chars().any(char::is_whitespace) {
            return Err(ValidationError::new("code", "must not contain spaces"));
        }

        let discount_type = form.discount_type.parse::<DiscountType>()?;
        let discount_value = fields::required_decimal("discount_value", &form.discount_value)?;
        if discount_value <= Decimal::ZERO {
            return Err(ValidationError::new(
                "discount_value",
                "must be greater than 0",
            ));
        }
        if discount_type == DiscountType::Percentage && discount_value > Decimal::ONE_HUNDRED {
            return Err(ValidationError::new(
                "discount_value",
                "must be at most 100 for percentage vouchers",
            ));
        }
        fields::within_max_amount("discount_value", discount_value)?;

        let min_order_amount = fields::optional_decimal("min_order_amount", &form.min_order_amount)?;
        if min_order_amount.is_some_and(|amount| amount < Decimal::ZERO) {
            return Err(ValidationError::new(
                "min_order_amount",
                "must not be negative",
            ));
        }
        if let Some(amount) = min_order_amount {
            fields::within_max_amount("min_order_amount", amount)?;
        }

        let usage_limit = fields::optional_integer("usage_limit", &form.usage_limit)?;
        if usage_limit.is_some_and(|limit| limit < 1) {
            return Err(ValidationError::new("usage_limit", "must be at least 1"));
        }

        let starts_at = fields::optional_datetime("starts_at", &form.starts_at)?;
        let expires_at = fields::optional_datetime("expires_at", &form.expires_at)?;
        fields::ordered("expires_at", starts_at.as_ref(), expires_at.as_ref())?;

        Ok(VoucherInput {
            code,
            description: fields::optional(&form.description),
            discount_type,
            discount_value,
            min_order_amount,
            usage_limit,
            starts_at,
            expires_at,
            is_active: form.is_active,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_form() -> VoucherForm {
        VoucherForm {
            code: "welcome10".to_string(),
            discount_value: "10".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_uppercases_code() {
        let input = Voucher::validate(&valid_form()).unwrap();
        assert_eq!(input.code, "WELCOME10");
        assert_eq!(input.discount_type, DiscountType::Percentage);
        assert!(input.is_active);
        assert_eq!(input.usage_limit, None);
    }

    #[test]
    fn test_validate_percentage_cap() {
        let err = Voucher::validate(&VoucherForm {
            discount_value: "150".to_string(),
            ..valid_form()
        })
        .unwrap_err();
        assert_eq!(err.field, "discount_value");

        let input = Voucher::validate(&VoucherForm {
            discount_type: "fixed_amount".to_string(),
            discount_value: "150".to_string(),
            ..valid_form()
        })
        .unwrap();
        assert_eq!(input.discount_type, DiscountType::FixedAmount);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let cases = [
            (
                VoucherForm {
                    code: " ".to_string(),
                    ..valid_form()
                },
                "code",
            ),
            (
                VoucherForm {
                    discount_value: "0".to_string(),
                    ..valid_form()
                },
                "discount_value",
            ),
            (
                VoucherForm {
                    discount_type: "bogo".to_string(),
                    ..valid_form()
                },
                "discount_type",
            ),
            (
                VoucherForm {
                    usage_limit: "0".to_string(),
                    ..valid_form()
                },
                "usage_limit",
            ),
            (
                VoucherForm {
                    starts_at: "2026-12-02T00:00".to_string(),
                    expires_at: "2026-12-01T00:00".to_string(),
                    ..valid_form()
                },
                "expires_at",
            ),
        ];

        for (form, field) in cases {
            assert_eq!(Voucher::validate(&form).unwrap_err().field, field);
        }
    }

    #[test]
    fn test_validate_amounts_fit_column() {
        let fixed = |value: &str| VoucherForm {
            discount_type: "fixed_amount".to_string(),
            discount_value: value.to_string(),
            ..valid_form()
        };

        let err = Voucher::validate(&fixed("1000000000")).unwrap_err();
        assert_eq!(err.field, "discount_value");
        assert!(Voucher::validate(&fixed("99999999.99")).is_ok());

        let err = Voucher::validate(&fixed("5.005")).unwrap_err();
        assert_eq!(err.to_string(), "discount_value must have at most 2 decimal places");

        let err = Voucher::validate(&VoucherForm {
            min_order_amount: "123456789".to_string(),
            ..valid_form()
        })
        .unwrap_err();
        assert_eq!(err.field, "min_order_amount");
    }

    #[test]
    fn test_unchecked_active_box_means_inactive() {
        // New forms start checked, but an omitted checkbox is an explicit "off"
        assert!(VoucherForm::default().is_active);
        let form: VoucherForm = serde_json::from_str(r#"{"code":"SPRING"}"#).unwrap();
        assert!(!form.is_active);
        assert_eq!(form.discount_type, "percentage");
    }

    #[test]
    fn test_discount_type_roundtrip() {
        for ty in [DiscountType::Percentage, DiscountType::FixedAmount] {
            assert_eq!(ty.as_str().parse::<DiscountType>().unwrap(), ty);
        }
    }
}
