//! Selection-list state engine for the product picker.
//!
//! This crate owns the user-built list of product selections:
//!
//! - **Catalog**: immutable copies of products and variants
//! - **Selection**: one row with its product, ordered variants, discount and view flags
//! - **Store**: append, remove, reorder, discount edits and commits
//! - **Moves**: the semantic drag-and-drop event the store consumes
//!
//! # Example
//!
//! ```rust
//! use picker_core::prelude::*;
//!
//! let v1 = Variant::new("v1", "Small", Money::new(2000, Currency::USD));
//! let towel = Product::new("p1", "Towel").with_variant(v1.clone());
//!
//! let mut store = SelectionListStore::new();
//! let row = store.append_placeholder();
//! store.commit_selection(row, towel, vec![v1]);
//! store.set_discount(row, DiscountKind::Percentage, "10").unwrap();
//!
//! store.append_placeholder();
//! store.reorder_selections(0, 1);
//! assert!(store.get(1).unwrap().discount.is_some());
//! ```

pub mod catalog;
pub mod discount;
pub mod error;
pub mod ids;
pub mod money;
pub mod moves;
pub mod selection;
pub mod store;
pub mod view;

pub use error::SelectionError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::catalog::{Product, ProductImage, Variant};
    pub use crate::discount::{DiscountKind, DiscountOverlay};
    pub use crate::error::SelectionError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};
    pub use crate::moves::{MoveEvent, MoveScope};
    pub use crate::selection::{toggle_by_id, Selection, VariantToggle};
    pub use crate::store::{SelectionListStore, SlotTarget};
    pub use crate::view::{RowView, VariantRowView};
}
