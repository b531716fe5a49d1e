//! Picker error types.

use picker_core::ids::VariantId;
use thiserror::Error;

/// Errors the picker reports back to the rendering layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PickerError {
    /// The picker is not open.
    #[error("Picker is not open")]
    NotOpen,

    /// A variant was toggled before any product was picked.
    #[error("Please select a product first")]
    NoProductPicked,

    /// Commit attempted without a product and at least one variant.
    #[error("Please select a product and at least one variant")]
    NoVariantsPicked,

    /// The variant does not belong to the picked product.
    #[error("Variant {0} does not belong to the selected product")]
    VariantNotInProduct(VariantId),
}
