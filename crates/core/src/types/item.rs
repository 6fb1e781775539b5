//! Item number type.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when normalizing an [`ItemNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ItemNumberError {
    /// The input string is empty (or only whitespace).
    #[error("item number cannot be empty")]
    Empty,
    /// The input is not a number at all.
    #[error("item number `{0}` is not numeric")]
    NotNumeric(String),
    /// The input has a fractional part.
    #[error("item number `{0}` is not a whole number")]
    NotWhole(String),
    /// The input is negative.
    #[error("item number `{0}` is negative")]
    Negative(String),
}

/// A canonical item number.
///
/// Source data stores item numbers as integer-like numeric values, which
/// spreadsheet exports frequently render as `1001.0` or pad with whitespace.
/// `ItemNumber` keeps the canonical decimal-string form, so lookups compare
/// against exactly what a user would type.
///
/// ## Examples
///
/// ```
/// use soh_allocations_core::ItemNumber;
///
/// assert_eq!(ItemNumber::parse("1001").unwrap().as_str(), "1001");
/// assert_eq!(ItemNumber::parse(" 1001.0 ").unwrap().as_str(), "1001");
/// assert_eq!(ItemNumber::parse("01001").unwrap().as_str(), "1001");
///
/// assert!(ItemNumber::parse("").is_err());
/// assert!(ItemNumber::parse("ABC").is_err());
/// assert!(ItemNumber::parse("1001.5").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ItemNumber(String);

impl ItemNumber {
    /// Normalize a raw source value into an `ItemNumber`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty after trimming
    /// - Is not a decimal number
    /// - Has a non-zero fractional part
    /// - Is negative
    pub fn parse(raw: &str) -> Result<Self, ItemNumberError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ItemNumberError::Empty);
        }

        let value = Decimal::from_str(trimmed)
            .map_err(|_| ItemNumberError::NotNumeric(trimmed.to_string()))?;

        if value.is_sign_negative() && !value.is_zero() {
            return Err(ItemNumberError::Negative(trimmed.to_string()));
        }
        if !value.fract().is_zero() {
            return Err(ItemNumberError::NotWhole(trimmed.to_string()));
        }

        Ok(Self(value.trunc().normalize().to_string()))
    }

    /// Returns the canonical string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ItemNumber {
    type Err = ItemNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ItemNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ItemNumber {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}
