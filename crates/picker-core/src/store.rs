//! The ordered selection list.
//!
//! Positions are the vector indices, so they are always the contiguous range
//! `0..len`. Index-based operations that receive an out-of-range index come
//! from a stale UI snapshot; they are logged and treated as no-ops.

use crate::catalog::{Product, Variant};
use crate::discount::{parse_amount, DiscountKind, DiscountOverlay};
use crate::error::SelectionError;
use crate::ids::{SelectionId, VariantId};
use crate::moves::{move_item, MoveEvent, MoveScope};
use crate::selection::{Selection, VariantToggle};
use crate::view::RowView;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Where a committed pick should land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotTarget {
    /// An existing row.
    Index(usize),
    /// A row appended at commit time.
    NewRow,
}

/// Owner of the ordered list of selections.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SelectionListStore {
    selections: Vec<Selection>,
}

impl SelectionListStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All rows in display order.
    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    pub fn get(&self, index: usize) -> Option<&Selection> {
        self.selections.get(index)
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Current position of the row with the given id.
    pub fn position_of(&self, id: SelectionId) -> Option<usize> {
        self.selections.iter().position(|s| s.id == id)
    }

    /// Append an empty row and return its position.
    pub fn append_placeholder(&mut self) -> usize {
        self.selections.push(Selection::placeholder());
        self.selections.len() - 1
    }

    /// Remove the row at `index`; later rows shift down by one.
    ///
    /// The removed row's discount goes with it.
    pub fn remove_at(&mut self, index: usize) -> Option<Selection> {
        if index >= self.selections.len() {
            debug!(index, len = self.selections.len(), "remove_at out of range");
            return None;
        }
        Some(self.selections.remove(index))
    }

    /// Move the row at `from` to `to`, shifting the rows in between.
    pub fn reorder_selections(&mut self, from: usize, to: usize) -> bool {
        let moved = move_item(&mut self.selections, from, to);
        if !moved {
            debug!(from, to, len = self.selections.len(), "reorder_selections out of range");
        }
        moved
    }

    /// Move a variant within the row at `selection_index`.
    pub fn reorder_variants(&mut self, selection_index: usize, from: usize, to: usize) -> bool {
        let moved = self
            .selections
            .get_mut(selection_index)
            .map(|s| s.move_variant(from, to))
            .unwrap_or(false);
        if !moved {
            debug!(selection_index, from, to, "reorder_variants out of range");
        }
        moved
    }

    /// Apply a drag-and-drop result.
    pub fn apply_move(&mut self, event: MoveEvent) -> bool {
        let Some(to) = event.destination_index else {
            debug!(source = event.source_index, "drop without destination");
            return false;
        };
        match event.scope {
            MoveScope::Selections => self.reorder_selections(event.source_index, to),
            MoveScope::Variants { selection_index } => {
                self.reorder_variants(selection_index, event.source_index, to)
            }
        }
    }

    /// Create or replace the discount at `index`.
    ///
    /// An unparseable or negative amount is rejected and the previous overlay kept.
    /// Returns `Ok(false)` if `index` is out of range.
    pub fn set_discount(
        &mut self,
        index: usize,
        kind: DiscountKind,
        amount: &str,
    ) -> Result<bool, SelectionError> {
        let overlay = DiscountOverlay::parse(kind, amount)?;
        Ok(self.with_row(index, "set_discount", |s| s.discount = Some(overlay)))
    }

    /// Change only the amount, keeping the current kind (flat if none yet).
    pub fn set_discount_amount(&mut self, index: usize, amount: &str) -> Result<bool, SelectionError> {
        let value = parse_amount(amount)?;
        Ok(self.with_row(index, "set_discount_amount", |s| {
            let kind = s.discount.map(|d| d.kind).unwrap_or_default();
            s.discount = Some(DiscountOverlay { kind, amount: value });
        }))
    }

    /// Change only the kind, keeping the current amount (zero if none yet).
    pub fn set_discount_kind(&mut self, index: usize, kind: DiscountKind) -> bool {
        self.with_row(index, "set_discount_kind", |s| {
            let amount = s.discount.map(|d| d.amount).unwrap_or(0.0);
            s.discount = Some(DiscountOverlay { kind, amount });
        })
    }

    pub fn clear_discount(&mut self, index: usize) -> bool {
        self.with_row(index, "clear_discount", |s| s.discount = None)
    }

    /// Flip the variant rows open or closed. Returns the new state.
    pub fn toggle_variants_visible(&mut self, index: usize) -> Option<bool> {
        let s = self.row_mut(index, "toggle_variants_visible")?;
        s.variants_visible = !s.variants_visible;
        Some(s.variants_visible)
    }

    /// Flip the discount editor open or closed. The overlay value is kept.
    pub fn toggle_discount_visible(&mut self, index: usize) -> Option<bool> {
        let s = self.row_mut(index, "toggle_discount_visible")?;
        s.discount_visible = !s.discount_visible;
        Some(s.discount_visible)
    }

    /// Add or remove a variant in the row at `index`, matched by id.
    pub fn toggle_variant(&mut self, index: usize, variant: &Variant) -> Option<VariantToggle> {
        Some(self.row_mut(index, "toggle_variant")?.toggle_variant(variant))
    }

    /// Remove one variant from the row at `index`.
    pub fn remove_variant(&mut self, index: usize, variant_id: &VariantId) -> bool {
        self.row_mut(index, "remove_variant")
            .map(|s| s.remove_variant(variant_id))
            .unwrap_or(false)
    }

    /// Replace product and variants at `index`, keeping its discount.
    pub fn commit_selection(&mut self, index: usize, product: Product, variants: Vec<Variant>) -> bool {
        self.with_row(index, "commit_selection", |s| s.assign(product, variants))
    }

    /// Commit into an existing row or a freshly appended one.
    ///
    /// Returns the position written to.
    pub fn commit_into(
        &mut self,
        target: SlotTarget,
        product: Product,
        variants: Vec<Variant>,
    ) -> Option<usize> {
        let index = match target {
            SlotTarget::Index(index) => index,
            SlotTarget::NewRow => self.append_placeholder(),
        };
        self.commit_selection(index, product, variants).then_some(index)
    }

    /// Read-only row views for rendering.
    pub fn rows(&self) -> Vec<RowView> {
        self.selections
            .iter()
            .enumerate()
            .map(|(position, s)| RowView::new(position, s))
            .collect()
    }

    fn row_mut(&mut self, index: usize, op: &'static str) -> Option<&mut Selection> {
        let len = self.selections.len();
        let row = self.selections.get_mut(index);
        if row.is_none() {
            debug!(op, index, len, "index out of range");
        }
        row
    }

    fn with_row(&mut self, index: usize, op: &'static str, f: impl FnOnce(&mut Selection)) -> bool {
        match self.row_mut(index, op) {
            Some(s) => {
                f(s);
                true
            }
            None => false,
        }
    }
}
