//! A single row of the selection list.
//!
//! Everything that belongs to a row (discount overlay, visibility flags) lives
//! on the row itself, so it travels with the row when the list is reordered.

use crate::catalog::{Product, Variant};
use crate::discount::DiscountOverlay;
use crate::ids::{SelectionId, VariantId};
use crate::moves::move_item;
use serde::{Deserialize, Serialize};

/// Result of toggling a variant in or out of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariantToggle {
    /// The variant was appended at the end.
    Added,
    /// A variant with the same id was removed.
    Removed,
}

/// Toggle `variant` in `variants` by id membership.
///
/// Removal drops the entry with the matching id; re-adding appends at the end.
pub fn toggle_by_id(variants: &mut Vec<Variant>, variant: &Variant) -> VariantToggle {
    match variants.iter().position(|v| v.id == variant.id) {
        Some(pos) => {
            variants.remove(pos);
            VariantToggle::Removed
        }
        None => {
            variants.push(variant.clone());
            VariantToggle::Added
        }
    }
}

/// One product selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Selection {
    /// Stable identity, independent of position.
    pub id: SelectionId,
    /// Chosen product; `None` marks a placeholder.
    pub product: Option<Product>,
    /// Chosen variants in display order, unique by id.
    pub variants: Vec<Variant>,
    /// Discount overlay for the whole row.
    pub discount: Option<DiscountOverlay>,
    /// Whether the variant rows are expanded.
    #[serde(default)]
    pub variants_visible: bool,
    /// Whether the discount editor is shown.
    #[serde(default)]
    pub discount_visible: bool,
}

impl Selection {
    /// Create a placeholder row awaiting a pick.
    pub fn placeholder() -> Self {
        Self {
            id: SelectionId::next(),
            product: None,
            variants: Vec::new(),
            discount: None,
            variants_visible: false,
            discount_visible: false,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.product.is_none()
    }

    /// Check whether a variant with this id is selected.
    pub fn has_variant(&self, id: &VariantId) -> bool {
        self.variants.iter().any(|v| &v.id == id)
    }

    /// Add or remove a variant by id.
    pub fn toggle_variant(&mut self, variant: &Variant) -> VariantToggle {
        toggle_by_id(&mut self.variants, variant)
    }

    /// Remove a variant by id. Returns whether anything was removed.
    pub fn remove_variant(&mut self, id: &VariantId) -> bool {
        let before = self.variants.len();
        self.variants.retain(|v| &v.id != id);
        self.variants.len() < before
    }

    /// Replace product and variants wholesale, keeping the discount and flags.
    ///
    /// Duplicate variant ids keep their first occurrence.
    pub fn assign(&mut self, product: Product, variants: Vec<Variant>) {
        let mut unique: Vec<Variant> = Vec::with_capacity(variants.len());
        for variant in variants {
            if !unique.iter().any(|v| v.id == variant.id) {
                unique.push(variant);
            }
        }
        self.product = Some(product);
        self.variants = unique;
    }

    /// Move a variant within this row.
    pub fn move_variant(&mut self, from: usize, to: usize) -> bool {
        move_item(&mut self.variants, from, to)
    }

    /// Product title, or an empty string for a placeholder.
    pub fn title(&self) -> &str {
        self.product.as_ref().map(|p| p.title.as_str()).unwrap_or("")
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::placeholder()
    }
}
