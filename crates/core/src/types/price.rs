//! Display-formatted price type.
//!
//! Catalog prices are stored and transported as display strings
//! (e.g. `"12 990 ₽"`), not numeric types - the catalog is owned by an
//! external process and the storefront never does money arithmetic beyond
//! cart totals. [`DisplayPrice`] keeps the string as-is and exposes the
//! numeric value by stripping every non-digit character.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A display-formatted price string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayPrice(String);

impl DisplayPrice {
    /// Wrap a display-formatted price string.
    #[must_use]
    pub fn new(price: impl Into<String>) -> Self {
        Self(price.into())
    }

    /// Returns the price exactly as displayed.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the price: every non-digit character is stripped
    /// and the remaining digits are read as an integer amount.
    ///
    /// A string without any digits yields 0.
    #[must_use]
    pub fn numeric_value(&self) -> u64 {
        let digits: String = self.0.chars().filter(char::is_ascii_digit).collect();
        digits.parse().unwrap_or(0)
    }

    /// Format an integer amount the way catalog prices are displayed:
    /// thousands groups separated by non-breaking spaces, with a ruble sign.
    ///
    /// ```
    /// # use loftwood_core::DisplayPrice;
    /// assert_eq!(DisplayPrice::format_amount(12990), "12\u{a0}990 ₽");
    /// ```
    #[must_use]
    pub fn format_amount(amount: u64) -> String {
        let digits = amount.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i).is_multiple_of(3) {
                grouped.push('\u{a0}');
            }
            grouped.push(c);
        }
        grouped.push_str(" ₽");
        grouped
    }
}

impl fmt::Display for DisplayPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DisplayPrice {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for DisplayPrice {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_value_strips_formatting() {
        assert_eq!(DisplayPrice::new("12 990 ₽").numeric_value(), 12_990);
        assert_eq!(DisplayPrice::new("1\u{a0}234\u{a0}567 ₽").numeric_value(), 1_234_567);
        assert_eq!(DisplayPrice::new("990").numeric_value(), 990);
    }

    #[test]
    fn test_numeric_value_no_digits() {
        assert_eq!(DisplayPrice::new("бесплатно").numeric_value(), 0);
        assert_eq!(DisplayPrice::new("").numeric_value(), 0);
    }

    #[test]
    fn test_format_amount_groups_thousands() {
        assert_eq!(DisplayPrice::format_amount(0), "0 ₽");
        assert_eq!(DisplayPrice::format_amount(990), "990 ₽");
        assert_eq!(DisplayPrice::format_amount(12_990), "12\u{a0}990 ₽");
        assert_eq!(DisplayPrice::format_amount(1_234_567), "1\u{a0}234\u{a0}567 ₽");
    }

    #[test]
    fn test_serde_transparent() {
        let price = DisplayPrice::new("5 490 ₽");
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "\"5 490 ₽\"");
        let parsed: DisplayPrice = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, price);
    }
}
