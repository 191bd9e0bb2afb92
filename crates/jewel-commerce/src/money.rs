//! Money type for representing catalog prices.
//!
//! Uses cents-based integer representation so that sorting and range
//! filters never compare floating-point prices.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Currencies for the storefront's markets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    INR,
    USD,
    AED,
    GBP,
    EUR,
    SGD,
    CAD,
    AUD,
}

impl Currency {
    /// Get the currency code (e.g., "INR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
            Currency::USD => "USD",
            Currency::AED => "AED",
            Currency::GBP => "GBP",
            Currency::EUR => "EUR",
            Currency::SGD => "SGD",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
        }
    }

    /// Get the currency symbol (e.g., "₹").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::INR => "\u{20b9}",
            Currency::USD => "$",
            Currency::AED => "AED ",
            Currency::GBP => "\u{00a3}",
            Currency::EUR => "\u{20ac}",
            Currency::SGD => "S$",
            Currency::CAD => "CA$",
            Currency::AUD => "A$",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "INR" => Some(Currency::INR),
            "USD" => Some(Currency::USD),
            "AED" => Some(Currency::AED),
            "GBP" => Some(Currency::GBP),
            "EUR" => Some(Currency::EUR),
            "SGD" => Some(Currency::SGD),
            "CAD" => Some(Currency::CAD),
            "AUD" => Some(Currency::AUD),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (e.g., paise for INR).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., cents).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use jewel_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(45999.5, Currency::INR);
    /// assert_eq!(price.amount_cents, 4_599_950);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount_cents = (amount * multiplier as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_cents as f64 / divisor as f64
    }

    /// Format as a display string (e.g., "₹45,999.00", "-£1,500.00").
    pub fn display(&self) -> String {
        let amount = self.display_amount();
        match amount.strip_prefix('-') {
            Some(abs) => format!("-{}{}", self.currency.symbol(), abs),
            None => format!("{}{}", self.currency.symbol(), amount),
        }
    }

    /// Format as a display string without symbol, with thousands grouping.
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        let raw = format!("{:.places$}", self.to_decimal().abs());
        let (whole, frac) = raw.split_once('.').unwrap_or((raw.as_str(), ""));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, c) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }

        let sign = if self.is_negative() { "-" } else { "" };
        if frac.is_empty() {
            format!("{}{}", sign, grouped)
        } else {
            format!("{}{}.{}", sign, grouped, frac)
        }
    }

    /// Compare two amounts of the same currency.
    ///
    /// Returns `None` when currencies differ.
    pub fn try_cmp(&self, other: &Money) -> Option<Ordering> {
        if self.currency != other.currency {
            return None;
        }
        Some(self.amount_cents.cmp(&other.amount_cents))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_cents() {
        let m = Money::new(4999, Currency::USD);
        assert_eq!(m.amount_cents, 4999);
        assert_eq!(m.currency, Currency::USD);
    }

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::USD);
        assert_eq!(m.amount_cents, 4999);

        let m = Money::from_decimal(125000.0, Currency::INR);
        assert_eq!(m.amount_cents, 12_500_000);
    }

    #[test]
    fn test_money_to_decimal() {
        let m = Money::new(4999, Currency::USD);
        assert!((m.to_decimal() - 49.99).abs() < 0.001);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(4999, Currency::USD).display(), "$49.99");
        assert_eq!(
            Money::from_decimal(125000.0, Currency::INR).display(),
            "\u{20b9}125,000.00"
        );
        assert_eq!(Money::new(-150_000, Currency::GBP).display(), "-\u{00a3}1,500.00");
    }

    #[test]
    fn test_money_compare() {
        let a = Money::new(1000, Currency::INR);
        let b = Money::new(500, Currency::INR);
        assert_eq!(a.try_cmp(&b), Some(Ordering::Greater));
        assert_eq!(a.try_cmp(&Money::new(1000, Currency::USD)), None);
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("INR"), Some(Currency::INR));
        assert_eq!(Currency::from_code("aed"), Some(Currency::AED));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
