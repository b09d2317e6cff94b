//! Price and percentage formatting with magnitude-tiered precision.

use crate::error::{Result, ViewError};
use crate::i18n::{Locale, NumberConventions};
use crate::utils::group_digits;

/// Shown in place of a metric that could not be formatted.
pub const PLACEHOLDER: &str = "—";

/// Prices at or above this (after rounding to 4 places) get 2 fractional
/// digits, grouped when large.
const UNIT_PRICE: f64 = 1.0;
/// Prices in `[CENT_PRICE, UNIT_PRICE)` get 4 fractional digits.
const CENT_PRICE: f64 = 0.01;
const UNIT_DECIMALS: usize = 2;
const CENT_DECIMALS: usize = 4;
const PERCENT_DECIMALS: usize = 2;
/// Sub-cent prices keep between these many significant digits.
const MIN_SIGNIFICANT: i32 = 3;
const MAX_SIGNIFICANT: i32 = 4;

#[derive(Debug, Clone, Copy)]
pub struct MetricFormatter {
    numbers: NumberConventions,
}

impl MetricFormatter {
    pub fn new(locale: Locale) -> Self {
        Self {
            numbers: locale.numbers(),
        }
    }

    /// Price with precision chosen by magnitude.
    ///
    /// `1234.5` → `1,234.50`, `0.3` → `0.3000`, `0.00042` → `0.000420`.
    pub fn price(&self, value: f64) -> Result<String> {
        if !value.is_finite() || value < 0.0 {
            return Err(ViewError::InvalidMetric {
                field: "price",
                value,
            });
        }

        // -0.0 passes the sign check but would print as "-0.00".
        let value = value.abs();
        let text = if value == 0.0 || rounds_to_at_least(value, CENT_DECIMALS, UNIT_PRICE) {
            self.fixed(value, UNIT_DECIMALS)
        } else if value >= CENT_PRICE {
            self.fixed(value, CENT_DECIMALS)
        } else {
            self.significant(value)
        };
        Ok(text)
    }

    /// Signed change: `+8.46%`, `-8.46%`, `0.00%`.
    ///
    /// The sign follows the value, not the rounded digits: `0.004` → `+0.00%`.
    pub fn percent(&self, value: f64) -> Result<String> {
        let digits = self.percent_digits(value)?;
        let sign = if value > 0.0 {
            "+"
        } else if value < 0.0 {
            "-"
        } else {
            ""
        };
        Ok(format!("{}{}%", sign, digits))
    }

    /// Percent without an explicit `+`, for non-directional metrics such as ATR.
    pub fn unsigned_percent(&self, value: f64) -> Result<String> {
        let digits = self.percent_digits(value)?;
        let sign = if value < 0.0 { "-" } else { "" };
        Ok(format!("{}{}%", sign, digits))
    }

    fn percent_digits(&self, value: f64) -> Result<String> {
        if !value.is_finite() {
            return Err(ViewError::InvalidMetric {
                field: "percent",
                value,
            });
        }
        let text = format!("{:.*}", PERCENT_DECIMALS, value.abs());
        Ok(text.replacen('.', &self.numbers.decimal_separator.to_string(), 1))
    }

    fn fixed(&self, value: f64, decimals: usize) -> String {
        let text = format!("{:.*}", decimals, value);
        self.localize(&text)
    }

    fn significant(&self, value: f64) -> String {
        let magnitude = value.log10().floor() as i32;
        let max_decimals = (MAX_SIGNIFICANT - 1 - magnitude).max(0) as usize;
        let min_decimals = (MIN_SIGNIFICANT - 1 - magnitude).max(0) as usize;

        let mut text = format!("{:.*}", max_decimals, value);
        let mut decimals = max_decimals;
        while decimals > min_decimals && text.ends_with('0') {
            text.pop();
            decimals -= 1;
        }
        self.localize(&text)
    }

    /// Swap in the locale's separators for a plain `123456.78` rendering.
    fn localize(&self, plain: &str) -> String {
        let (int_part, frac_part) = match plain.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (plain, None),
        };

        let mut out = group_digits(
            int_part,
            self.numbers.group_separator,
            self.numbers.min_grouping_digits,
        );
        if let Some(frac) = frac_part {
            out.push(self.numbers.decimal_separator);
            out.push_str(frac);
        }
        out
    }
}

/// True when `value` shows as at least `bound` once rounded to `decimals`.
fn rounds_to_at_least(value: f64, decimals: usize, bound: f64) -> bool {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale >= bound
}

/// [`MetricFormatter::price`] under `en` conventions.
pub fn format_price(value: f64) -> Result<String> {
    MetricFormatter::new(Locale::En).price(value)
}

/// [`MetricFormatter::percent`] under `en` conventions.
pub fn format_percent(value: f64) -> Result<String> {
    MetricFormatter::new(Locale::En).percent(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_tiers() {
        assert_eq!(format_price(1234.5).unwrap(), "1,234.50");
        assert_eq!(format_price(98_765_432.1).unwrap(), "98,765,432.10");
        assert_eq!(format_price(999.994).unwrap(), "999.99");
        assert_eq!(format_price(12.0).unwrap(), "12.00");
        assert_eq!(format_price(1.0).unwrap(), "1.00");
        assert_eq!(format_price(0.3).unwrap(), "0.3000");
        assert_eq!(format_price(0.01).unwrap(), "0.0100");
        assert_eq!(format_price(0.0).unwrap(), "0.00");
    }

    #[test]
    fn test_price_tier_follows_rounded_value() {
        assert_eq!(format_price(0.99999).unwrap(), "1.00");
        assert_eq!(format_price(0.9999).unwrap(), "0.9999");
    }

    #[test]
    fn test_sub_cent_price_keeps_significant_digits() {
        assert_eq!(format_price(0.00042).unwrap(), "0.000420");
        assert_eq!(format_price(0.000123456).unwrap(), "0.0001235");
        assert_eq!(format_price(0.005).unwrap(), "0.00500");
        assert_ne!(format_price(0.00042).unwrap(), "0.00");
    }

    #[test]
    fn test_price_rejects_non_finite_and_negative() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -1.0] {
            assert!(matches!(format_price(bad), Err(ViewError::InvalidMetric { .. })));
        }
    }

    #[test]
    fn test_percent_sign() {
        assert_eq!(format_percent(8.456).unwrap(), "+8.46%");
        assert_eq!(format_percent(-8.456).unwrap(), "-8.46%");
        assert_eq!(format_percent(0.0).unwrap(), "0.00%");
        assert_eq!(format_percent(-0.0).unwrap(), "0.00%");
        assert_eq!(format_percent(-0.001).unwrap(), "-0.00%");
        assert_eq!(format_percent(0.004).unwrap(), "+0.00%");
        assert!(format_percent(f64::NAN).is_err());
    }

    #[test]
    fn test_unsigned_percent() {
        let fmt = MetricFormatter::new(Locale::En);
        assert_eq!(fmt.unsigned_percent(3.14159).unwrap(), "3.14%");
        assert_eq!(fmt.unsigned_percent(0.0).unwrap(), "0.00%");
        assert!(fmt.unsigned_percent(f64::INFINITY).is_err());
    }

    #[test]
    fn test_polish_conventions() {
        let fmt = MetricFormatter::new(Locale::Pl);
        assert_eq!(fmt.price(1234.5).unwrap(), "1234,50");
        assert_eq!(fmt.price(91234.5).unwrap(), "91\u{a0}234,50");
        assert_eq!(fmt.price(0.3).unwrap(), "0,3000");
        assert_eq!(fmt.percent(-8.456).unwrap(), "-8,46%");
    }
}
