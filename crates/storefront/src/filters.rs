//! Custom Askama template filters and display formatting helpers.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use rust_decimal::Decimal;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Format an amount as a display price string (e.g. `$189.00`).
///
/// View structs pre-format prices with this before handing them to templates.
#[must_use]
pub fn format_price(amount: Decimal) -> String {
    format!("${amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price_keeps_two_decimal_places() {
        assert_eq!(format_price(Decimal::new(18900, 2)), "$189.00");
        assert_eq!(format_price(Decimal::new(189, 0)), "$189.00");
        assert_eq!(format_price(Decimal::new(1995, 2)), "$19.95");
    }
}
