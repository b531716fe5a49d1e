//! Snapshot of an open picker.

use picker_core::catalog::{Product, Variant};
use picker_core::ids::VariantId;
use picker_core::store::SlotTarget;
use serde::{Deserialize, Serialize};

/// State of one open picker, from open until commit or cancel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PickerSession {
    /// Row the pick will be written to.
    pub target: SlotTarget,
    pub query: String,
    /// Page of the results currently shown, 1-indexed.
    pub page: u32,
    pub page_size: u32,
    /// Known page count, never below `page`.
    pub total_pages: u32,
    /// Last applied page of results. May be stale while `searching`.
    pub results: Vec<Product>,
    pub pending_product: Option<Product>,
    /// Picked variants of `pending_product`, unique by id, in pick order.
    pub pending_variants: Vec<Variant>,
    /// A search for the current query/page is in flight.
    pub searching: bool,
    /// Message from the last failed search; cleared by the next success.
    pub last_error: Option<String>,
}

impl PickerSession {
    pub(crate) fn new(target: SlotTarget, page_size: u32) -> Self {
        Self {
            target,
            query: String::new(),
            page: 1,
            page_size: page_size.max(1),
            total_pages: 1,
            results: Vec::new(),
            pending_product: None,
            pending_variants: Vec::new(),
            searching: false,
            last_error: None,
        }
    }

    /// Whether `product` is the one currently picked.
    pub fn is_selected(&self, product: &Product) -> bool {
        self.pending_product
            .as_ref()
            .is_some_and(|p| p.id == product.id)
    }

    pub fn is_variant_selected(&self, id: &VariantId) -> bool {
        self.pending_variants.iter().any(|v| &v.id == id)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// A commit would pass validation.
    pub fn can_commit(&self) -> bool {
        self.pending_product.is_some() && !self.pending_variants.is_empty()
    }
}
