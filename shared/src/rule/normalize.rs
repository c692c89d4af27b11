//! Blur-time normalization of rule values
//!
//! Rates are stored as decimal fractions with four places, amounts with two.
//! An operator typing "8.25" into a percent rate means 8.25%, so values above
//! 1 are read as whole percentages.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

const RATE_DP: u32 = 4;
const AMOUNT_DP: u32 = 2;

/// Parse operator input as a decimal number (plain or scientific notation)
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// "8.25" -> "0.0825", "0.0825" -> "0.0825"
///
/// Unparsable input is returned unchanged so validation can report it.
pub fn normalize_rate(raw: &str) -> String {
    let Some(mut value) = parse_decimal(raw) else {
        return raw.to_string();
    };
    if value > Decimal::ONE {
        value /= Decimal::ONE_HUNDRED;
    }
    fixed(value, RATE_DP)
}

/// "5" -> "5.00", "4.999" -> "5.00"
pub fn normalize_amount(raw: &str) -> String {
    match parse_decimal(raw) {
        Some(value) => fixed(value, AMOUNT_DP),
        None => raw.to_string(),
    }
}

pub(crate) fn fixed(value: Decimal, dp: u32) -> String {
    let mut value = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    value.rescale(dp);
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_whole_percentage() {
        assert_eq!(normalize_rate("8.25"), "0.0825");
        assert_eq!(normalize_rate(" 21 "), "0.2100");
        assert_eq!(normalize_rate("100"), "1.0000");
    }

    #[test]
    fn test_rate_is_idempotent() {
        assert_eq!(normalize_rate("0.0825"), "0.0825");
        let once = normalize_rate("8.25");
        assert_eq!(normalize_rate(&once), once);
        // exactly 1 is already a fraction (100%)
        assert_eq!(normalize_rate("1"), "1.0000");
    }

    #[test]
    fn test_rate_rounds_to_four_places() {
        assert_eq!(normalize_rate("0.08255"), "0.0826");
        assert_eq!(normalize_rate("7.125"), "0.0713");
    }

    #[test]
    fn test_amount_two_places() {
        assert_eq!(normalize_amount("5"), "5.00");
        assert_eq!(normalize_amount("4.999"), "5.00");
        assert_eq!(normalize_amount("12.345"), "12.35");
    }

    #[test]
    fn test_unparsable_left_untouched() {
        assert_eq!(normalize_rate("abc"), "abc");
        assert_eq!(normalize_rate(""), "");
        assert_eq!(normalize_amount("1,50"), "1,50");
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("1e-2"), Some(Decimal::new(1, 2)));
        assert_eq!(parse_decimal("  "), None);
        assert_eq!(parse_decimal("-3.5"), Some(Decimal::new(-35, 1)));
    }
}
