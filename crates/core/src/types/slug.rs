//! URL slug type for content lookups.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Slug`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    /// The input string is empty.
    #[error("slug cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("slug must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside `a-z`, `0-9` and `-`.
    #[error("slug contains invalid character {0:?}")]
    InvalidCharacter(char),
    /// The input starts or ends with `-`, or contains `--`.
    #[error("slug has a misplaced hyphen")]
    MisplacedHyphen,
}

/// A unique, human-readable identifier for a content document.
///
/// ## Constraints
///
/// - Length: 1-128 characters
/// - Lowercase ASCII letters, digits, and single `-` separators
/// - No leading or trailing `-`
///
/// ## Examples
///
/// ```
/// use ansania_core::Slug;
///
/// assert!(Slug::parse("privacy-policy").is_ok());
/// assert!(Slug::parse("faq").is_ok());
///
/// assert!(Slug::parse("").is_err());
/// assert!(Slug::parse("Privacy Policy").is_err());
/// assert!(Slug::parse("-terms").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Maximum length of a slug.
    pub const MAX_LENGTH: usize = 128;

    /// Parse a `Slug` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 128 characters,
    /// contains characters other than `a-z`, `0-9` and `-`, or has a
    /// leading, trailing, or doubled hyphen.
    pub fn parse(s: &str) -> Result<Self, SlugError> {
        validate(s)?;
        Ok(Self(s.to_owned()))
    }

    /// Create a `Slug` from a compile-time constant.
    ///
    /// # Panics
    ///
    /// Panics if `s` is not a valid slug. Only use with string literals.
    #[must_use]
    pub fn from_static(s: &'static str) -> Self {
        if let Err(e) = validate(s) {
            panic!("invalid static slug {s:?}: {e}");
        }
        Self(s.to_owned())
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Slug` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

fn validate(s: &str) -> Result<(), SlugError> {
    if s.is_empty() {
        return Err(SlugError::Empty);
    }

    if s.len() > Slug::MAX_LENGTH {
        return Err(SlugError::TooLong {
            max: Slug::MAX_LENGTH,
        });
    }

    if let Some(c) = s
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
    {
        return Err(SlugError::InvalidCharacter(c));
    }

    if s.starts_with('-') || s.ends_with('-') || s.contains("--") {
        return Err(SlugError::MisplacedHyphen);
    }

    Ok(())
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Slug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate(&value)?;
        Ok(Self(value))
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
