//! Field parsing shared by the HTML form types.
//!
//! Browser forms submit every field as a string, so each entity has a
//! string-valued form type that is parsed into its typed input by
//! `validate()`. These helpers do the per-field parsing.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use super::ValidationError;

/// Format used by `<input type="datetime-local" step="1">`.
pub const DATETIME_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Browsers leave out `:00` seconds even when `step="1"`.
const DATETIME_LOCAL_MINUTES_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Fractional digits kept by the `NUMERIC(_, 2)` columns.
const DECIMAL_PLACES: u32 = 2;

/// Largest value a `NUMERIC(10, 2)` column holds.
#[must_use]
pub fn max_amount() -> Decimal {
    Decimal::new(9_999_999_999, DECIMAL_PLACES)
}

/// Deserialize an HTML checkbox.
///
/// Unchecked boxes are omitted from the submission, so pair this with
/// `#[serde(default)]`.
///
/// # Errors
///
/// Never fails for string input; any value other than `off`/`false`/`0`
/// counts as checked.
pub fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(!matches!(value.as_str(), "" | "off" | "false" | "0"))
}

/// Trim a required text field.
pub fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::new(field, "is required"));
    }
    Ok(value.to_string())
}

/// Trim an optional text field; blank means `None`.
#[must_use]
pub fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Parse an optional `datetime-local` value as UTC.
pub fn optional_datetime(
    field: &'static str,
    value: &str,
) -> Result<Option<DateTime<Utc>>, ValidationError> {
    optional(value)
        .map(|v| {
            NaiveDateTime::parse_from_str(&v, DATETIME_LOCAL_FORMAT)
                .or_else(|_| NaiveDateTime::parse_from_str(&v, DATETIME_LOCAL_MINUTES_FORMAT))
                .map(|naive| naive.and_utc())
                .map_err(|_| ValidationError::new(field, "must be a date and time"))
        })
        .transpose()
}

/// Parse a required `datetime-local` value as UTC.
pub fn required_datetime(
    field: &'static str,
    value: &str,
) -> Result<DateTime<Utc>, ValidationError> {
    optional_datetime(field, value)?.ok_or_else(|| ValidationError::new(field, "is required"))
}

/// Format a timestamp for a `datetime-local` input.
#[must_use]
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.format(DATETIME_LOCAL_FORMAT).to_string()
}

/// Format an optional timestamp for a `datetime-local` input.
#[must_use]
pub fn format_optional_datetime(value: Option<&DateTime<Utc>>) -> String {
    value.map(format_datetime).unwrap_or_default()
}

/// Parse an optional decimal with at most two decimal places; blank means
/// `None`.
pub fn optional_decimal(
    field: &'static str,
    value: &str,
) -> Result<Option<Decimal>, ValidationError> {
    optional(value)
        .map(|v| {
            let number = v
                .parse::<Decimal>()
                .map_err(|_| ValidationError::new(field, "must be a number"))?;
            if number.normalize().scale() > DECIMAL_PLACES {
                return Err(ValidationError::new(
                    field,
                    "must have at most 2 decimal places",
                ));
            }
            Ok(number)
        })
        .transpose()
}

/// Check that an amount fits a `NUMERIC(10, 2)` column.
pub fn within_max_amount(field: &'static str, amount: Decimal) -> Result<(), ValidationError> {
    if amount > max_amount() {
        return Err(ValidationError::new(
            field,
            format!("must be at most {}", max_amount()),
        ));
    }
    Ok(())
}

/// Parse a required decimal.
pub fn required_decimal(field: &'static str, value: &str) -> Result<Decimal, ValidationError> {
    optional_decimal(field, value)?.ok_or_else(|| ValidationError::new(field, "is required"))
}

/// Parse an optional whole number; blank means `None`.
pub fn optional_integer(field: &'static str, value: &str) -> Result<Option<i32>, ValidationError> {
    optional(value)
        .map(|v| {
            v.parse::<i32>()
                .map_err(|_| ValidationError::new(field, "must be a whole number"))
        })
        .transpose()
}

/// Check that `start` is strictly before `end` when both are set.
pub fn ordered(
    field: &'static str,
    start: Option<&DateTime<Utc>>,
    end: Option<&DateTime<Utc>>,
) -> Result<(), ValidationError> {
    match (start, end) {
        (Some(start), Some(end)) if start >= end => {
            Err(ValidationError::new(field, "must be after the start"))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_datetime_roundtrip_through_form_format() {
        let at = Utc.with_ymd_and_hms(2026, 11, 27, 9, 30, 0).unwrap();
        let formatted = format_datetime(&at);
        assert_eq!(formatted, "2026-11-27T09:30:00");
        assert_eq!(optional_datetime("starts_at", &formatted).unwrap(), Some(at));
    }

    #[test]
    fn test_datetime_keeps_seconds() {
        let at = Utc.with_ymd_and_hms(2026, 11, 27, 9, 30, 45).unwrap();
        let formatted = format_datetime(&at);
        assert_eq!(formatted, "2026-11-27T09:30:45");
        assert_eq!(required_datetime("ends_at", &formatted).unwrap(), at);
    }

    #[test]
    fn test_datetime_without_seconds() {
        assert_eq!(
            required_datetime("starts_at", "2026-11-27T09:30").unwrap(),
            Utc.with_ymd_and_hms(2026, 11, 27, 9, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_decimal_precision() {
        assert_eq!(
            required_decimal("discount_percent", "12.5").unwrap(),
            Decimal::new(125, 1)
        );
        assert_eq!(
            required_decimal("discount_percent", "1.000").unwrap(),
            Decimal::new(1000, 3)
        );

        let err = required_decimal("discount_percent", "0.001").unwrap_err();
        assert_eq!(
            err.to_string(),
            "discount_percent must have at most 2 decimal places"
        );
        assert!(optional_decimal("min_order_amount", "10.999").is_err());
    }

    #[test]
    fn test_within_max_amount() {
        assert!(within_max_amount("discount_value", Decimal::new(9_999_999_999, 2)).is_ok());

        let err = within_max_amount("discount_value", Decimal::new(1_000_000_000, 0)).unwrap_err();
        assert_eq!(err.to_string(), "discount_value must be at most 99999999.99");
    }

    #[test]
    fn test_blank_values_are_none() {
        assert_eq!(optional("   "), None);
        assert_eq!(optional_datetime("starts_at", "").unwrap(), None);
        assert_eq!(optional_decimal("min_order_amount", " ").unwrap(), None);
        assert_eq!(optional_integer("usage_limit", "").unwrap(), None);
    }

    #[test]
    fn test_required_rejects_blank() {
        let err = required("title", "  ").unwrap_err();
        assert_eq!(err.field, "title");
        assert_eq!(err.to_string(), "title is required");
    }

    #[test]
    fn test_invalid_numbers() {
        assert!(required_decimal("discount_value", "ten").is_err());
        assert!(optional_integer("usage_limit", "1.5").is_err());
        assert_eq!(
            required_decimal("discount_value", "12.50").unwrap(),
            Decimal::new(1250, 2)
        );
    }

    #[test]
    fn test_ordered() {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap();
        assert!(ordered("ends_at", Some(&start), Some(&end)).is_ok());
        assert!(ordered("ends_at", Some(&end), Some(&start)).is_err());
        assert!(ordered("ends_at", Some(&start), Some(&start)).is_err());
        assert!(ordered("ends_at", None, Some(&start)).is_ok());
    }

    #[test]
    fn test_checkbox_values() {
        #[derive(Deserialize)]
        struct Form {
            #[serde(default, deserialize_with = "checkbox")]
            is_active: bool,
        }

        let checked: Form = serde_json::from_str(r#"{"is_active":"on"}"#).unwrap();
        let unchecked: Form = serde_json::from_str("{}").unwrap();
        assert!(checked.is_active);
        assert!(!unchecked.is_active);
    }
}
