//! Selection error types.

use thiserror::Error;

/// Validation failures reported by the selection store.
///
/// Out-of-range indices are not errors: they come from stale UI snapshots and
/// are absorbed as no-ops at the store boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectionError {
    /// Discount amount is not a finite, non-negative number.
    #[error("Invalid discount amount: {0:?}")]
    InvalidDiscountAmount(String),

    /// Discount kind is not one of the known kinds.
    #[error("Unknown discount kind: {0:?}")]
    UnknownDiscountKind(String),
}
