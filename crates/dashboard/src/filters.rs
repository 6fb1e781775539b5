//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use rust_decimal::Decimal;

/// Format a quantity for display.
///
/// Integral values print without a fractional part; anything else prints
/// with trailing zeros removed. Non-decimal input is passed through.
///
/// Usage in templates: `{{ batch.system_qty|quantity }}`
#[askama::filter_fn]
pub fn quantity(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format_quantity(&value.to_string()))
}

pub(crate) fn format_quantity(raw: &str) -> String {
    raw.parse::<Decimal>().map_or_else(
        |_| raw.to_string(),
        |qty| {
            if qty.fract().is_zero() {
                qty.trunc().normalize().to_string()
            } else {
                qty.normalize().to_string()
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity("15"), "15");
        assert_eq!(format_quantity("15.000"), "15");
        assert_eq!(format_quantity("2.50"), "2.5");
        assert_eq!(format_quantity("0"), "0");
        assert_eq!(format_quantity("n/a"), "n/a");
    }
}
