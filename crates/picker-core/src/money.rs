//! Money type for catalog prices.
//!
//! Amounts are stored in the smallest unit of the currency (cents for USD) so
//! discount previews do not accumulate floating-point error.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currencies the catalog can price in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    JPY,
    CAD,
}

impl Currency {
    const ALL: [Currency; 5] = [Self::USD, Self::EUR, Self::GBP, Self::JPY, Self::CAD];

    /// (ISO code, symbol, minor-unit digits)
    const fn table(self) -> (&'static str, &'static str, u32) {
        match self {
            Self::USD => ("USD", "$", 2),
            Self::EUR => ("EUR", "\u{20ac}", 2),
            Self::GBP => ("GBP", "\u{00a3}", 2),
            Self::JPY => ("JPY", "\u{00a5}", 0),
            Self::CAD => ("CAD", "CA$", 2),
        }
    }

    pub fn code(self) -> &'static str {
        self.table().0
    }

    pub fn symbol(self) -> &'static str {
        self.table().1
    }

    /// Digits after the decimal point in display and input.
    pub fn minor_digits(self) -> u32 {
        self.table().2
    }

    fn minor_per_major(self) -> i64 {
        10_i64.pow(self.minor_digits())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unsupported currency: {s}"))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// An amount in minor units of a currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    pub amount_cents: i64,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Round a decimal amount to the nearest minor unit.
    ///
    /// ```
    /// use picker_core::money::{Money, Currency};
    /// let price = Money::from_decimal(49.99, Currency::USD);
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let cents = (amount * currency.minor_per_major() as f64).round() as i64;
        Self::new(cents, currency)
    }

    /// Parse a decimal string such as `"20.00"`.
    ///
    /// Returns `None` for anything that is not a finite, non-negative number.
    pub fn parse_decimal(text: &str, currency: Currency) -> Option<Self> {
        let amount: f64 = text.trim().parse().ok()?;
        (amount.is_finite() && amount >= 0.0).then(|| Self::from_decimal(amount, currency))
    }

    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Subtract, flooring the result at zero.
    pub fn saturating_sub(&self, other: &Money) -> Money {
        let cents = self.amount_cents.saturating_sub(other.amount_cents).max(0);
        Money::new(cents, self.currency)
    }

    /// `percent` of this amount, rounded to the nearest minor unit.
    pub fn percentage(&self, percent: f64) -> Money {
        let cents = (self.amount_cents as f64 * percent / 100.0).round() as i64;
        Money::new(cents, self.currency)
    }

    /// Symbol-prefixed string, e.g. `$49.99`.
    pub fn display(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let abs = self.amount_cents.unsigned_abs();
        let symbol = self.currency.symbol();
        match self.currency.minor_digits() {
            0 => write!(f, "{sign}{symbol}{abs}"),
            digits => {
                let unit = 10_u64.pow(digits);
                let width = digits as usize;
                write!(f, "{sign}{symbol}{}.{:0width$}", abs / unit, abs % unit)
            }
        }
    }
}
