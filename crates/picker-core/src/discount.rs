//! Discount overlay attached to a selection.

use crate::error::SelectionError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    /// Fixed amount off.
    #[default]
    Flat,
    /// Percentage off. Conventionally 0-100, not clamped.
    Percentage,
}

impl DiscountKind {
    /// Wire spelling, identical to the serde form.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountKind::Flat => "flat",
            DiscountKind::Percentage => "percentage",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DiscountKind::Flat => "Flat Off",
            DiscountKind::Percentage => "% Off",
        }
    }
}

impl FromStr for DiscountKind {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flat" => Ok(DiscountKind::Flat),
            "%" | "percent" | "percentage" => Ok(DiscountKind::Percentage),
            _ => Err(SelectionError::UnknownDiscountKind(s.to_string())),
        }
    }
}

impl fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A discount value and its kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountOverlay {
    pub kind: DiscountKind,
    /// Non-negative amount: currency units for `Flat`, percent for `Percentage`.
    pub amount: f64,
}

impl DiscountOverlay {
    /// Create an overlay, rejecting negative or non-finite amounts.
    pub fn new(kind: DiscountKind, amount: f64) -> Result<Self, SelectionError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(SelectionError::InvalidDiscountAmount(amount.to_string()));
        }
        Ok(Self { kind, amount })
    }

    /// Create an overlay from user-entered text.
    pub fn parse(kind: DiscountKind, amount: &str) -> Result<Self, SelectionError> {
        let value = parse_amount(amount)?;
        Self::new(kind, value)
    }

    pub fn flat(amount: f64) -> Result<Self, SelectionError> {
        Self::new(DiscountKind::Flat, amount)
    }

    pub fn percentage(percent: f64) -> Result<Self, SelectionError> {
        Self::new(DiscountKind::Percentage, percent)
    }

    /// Amount taken off the given price.
    pub fn reduction(&self, price: &Money) -> Money {
        match self.kind {
            DiscountKind::Flat => Money::from_decimal(self.amount, price.currency),
            DiscountKind::Percentage => price.percentage(self.amount),
        }
    }

    /// Price after the discount, never below zero.
    pub fn apply(&self, price: &Money) -> Money {
        price.saturating_sub(&self.reduction(price))
    }

    /// Short label for display, e.g. "10% off".
    pub fn label(&self, currency: Currency) -> String {
        match self.kind {
            DiscountKind::Flat => {
                format!("{} off", Money::from_decimal(self.amount, currency).display())
            }
            DiscountKind::Percentage => format!("{}% off", self.amount),
        }
    }
}

/// Parse a discount amount as typed into an input field.
pub(crate) fn parse_amount(text: &str) -> Result<f64, SelectionError> {
    let invalid = || SelectionError::InvalidDiscountAmount(text.to_string());
    let value: f64 = text.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    Ok(value)
}
