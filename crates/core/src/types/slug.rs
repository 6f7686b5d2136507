//! Store slug type.
//!
//! A store's slug doubles as its storefront subdomain, so it has to be a
//! valid DNS label.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`StoreSlug`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    /// Shorter than [`StoreSlug::MIN_LENGTH`].
    #[error("store slug must be at least {min} characters")]
    TooShort {
        /// Minimum allowed length.
        min: usize,
    },
    /// Longer than [`StoreSlug::MAX_LENGTH`].
    #[error("store slug must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// Contains something other than `a-z`, `0-9` or `-`.
    #[error("store slug may only contain lowercase letters, digits and '-' (found {0:?})")]
    InvalidCharacter(char),
    /// Starts or ends with `-`.
    #[error("store slug cannot start or end with '-'")]
    EdgeHyphen,
}

/// URL-safe identifier of a store, e.g. `acme-tees`.
///
/// Input is trimmed and lower-cased before validation, so `"  Acme-Tees "`
/// parses to `acme-tees`.
///
/// ```
/// use shelfmerch_core::StoreSlug;
///
/// assert_eq!(StoreSlug::parse("Acme-Tees").unwrap().as_str(), "acme-tees");
/// assert!(StoreSlug::parse("-acme").is_err());
/// assert!(StoreSlug::parse("acme tees").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct StoreSlug(String);

impl StoreSlug {
    /// Minimum slug length.
    pub const MIN_LENGTH: usize = 3;
    /// Maximum slug length (DNS label limit).
    pub const MAX_LENGTH: usize = 63;

    /// Parse a `StoreSlug` from user input.
    ///
    /// # Errors
    ///
    /// Returns [`SlugError`] if the normalized input is too short, too long,
    /// contains characters outside `[a-z0-9-]`, or starts/ends with `-`.
    pub fn parse(s: &str) -> Result<Self, SlugError> {
        let normalized = s.trim().to_ascii_lowercase();

        if normalized.len() < Self::MIN_LENGTH {
            return Err(SlugError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }

        if normalized.len() > Self::MAX_LENGTH {
            return Err(SlugError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(c) = normalized
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
        {
            return Err(SlugError::InvalidCharacter(c));
        }

        if normalized.starts_with('-') || normalized.ends_with('-') {
            return Err(SlugError::EdgeHyphen);
        }

        Ok(Self(normalized))
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for StoreSlug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for StoreSlug {
    type Error = SlugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StoreSlug> for String {
    fn from(slug: StoreSlug) -> Self {
        slug.0
    }
}

impl AsRef<str> for StoreSlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for StoreSlug {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for StoreSlug {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self::parse(&s)?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for StoreSlug {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes() {
        let slug = StoreSlug::parse("  Acme-Tees-2 ").unwrap();
        assert_eq!(slug.as_str(), "acme-tees-2");
    }

    #[test]
    fn test_length_bounds() {
        assert_eq!(
            StoreSlug::parse("ab"),
            Err(SlugError::TooShort { min: 3 })
        );
        assert!(StoreSlug::parse("abc").is_ok());
        assert!(StoreSlug::parse(&"a".repeat(63)).is_ok());
        assert_eq!(
            StoreSlug::parse(&"a".repeat(64)),
            Err(SlugError::TooLong { max: 63 })
        );
    }

    #[test]
    fn test_rejects_invalid_characters() {
        assert_eq!(
            StoreSlug::parse("acme_tees"),
            Err(SlugError::InvalidCharacter('_'))
        );
        assert_eq!(
            StoreSlug::parse("acme.tees"),
            Err(SlugError::InvalidCharacter('.'))
        );
        assert!(matches!(
            StoreSlug::parse("café-shop"),
            Err(SlugError::InvalidCharacter(_))
        ));
    }

    #[test]
    fn test_rejects_edge_hyphens() {
        assert_eq!(StoreSlug::parse("-acme"), Err(SlugError::EdgeHyphen));
        assert_eq!(StoreSlug::parse("acme-"), Err(SlugError::EdgeHyphen));
    }

    #[test]
    fn test_serde_validates() {
        let slug: StoreSlug = serde_json::from_str("\"My-Shop\"").unwrap();
        assert_eq!(slug.as_str(), "my-shop");
        assert_eq!(serde_json::to_string(&slug).unwrap(), "\"my-shop\"");
        assert!(serde_json::from_str::<StoreSlug>("\"my shop\"").is_err());
    }
}
