//! Read-only row views for the rendering layer.

use crate::discount::DiscountOverlay;
use crate::ids::{SelectionId, VariantId};
use crate::money::Money;
use crate::selection::Selection;
use serde::Serialize;

/// One rendered selection row.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RowView {
    /// Zero-based position in the list.
    pub position: usize,
    /// One-based row number shown to the user.
    pub number: usize,
    pub selection_id: SelectionId,
    /// Product title; empty for a placeholder.
    pub title: String,
    pub is_placeholder: bool,
    pub variants_visible: bool,
    pub discount_visible: bool,
    pub discount: Option<DiscountOverlay>,
    pub variants: Vec<VariantRowView>,
}

/// One variant line under a selection row.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VariantRowView {
    pub variant_id: VariantId,
    pub title: String,
    pub price: Money,
    /// Price after the row's discount, if one is set.
    pub discounted_price: Option<Money>,
}

impl RowView {
    pub(crate) fn new(position: usize, selection: &Selection) -> Self {
        let variants = selection
            .variants
            .iter()
            .map(|v| VariantRowView {
                variant_id: v.id.clone(),
                title: v.title.clone(),
                price: v.price,
                discounted_price: selection.discount.map(|d| d.apply(&v.price)),
            })
            .collect();

        Self {
            position,
            number: position + 1,
            selection_id: selection.id,
            title: selection.title().to_string(),
            is_placeholder: selection.is_placeholder(),
            variants_visible: selection.variants_visible,
            discount_visible: selection.discount_visible,
            discount: selection.discount,
            variants,
        }
    }
}
