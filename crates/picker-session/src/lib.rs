//! The catalog browser session behind the product picker.
//!
//! A [`CatalogBrowserSession`] owns at most one open picker. It issues
//! [`SearchTicket`]s as the query or page changes, applies only the newest
//! response, and on commit hands back a [`CommittedPick`] for the
//! selection list.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use picker_catalog::InMemoryCatalog;
//! use picker_core::prelude::*;
//! use picker_session::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), PickerError> {
//! let towel = Product::new("p1", "Towel")
//!     .with_variant(Variant::new("v1", "Small", Money::new(1200, Currency::USD)));
//! let mut store = SelectionListStore::new();
//! store.append_placeholder();
//!
//! let catalog = InMemoryCatalog::new(vec![towel]);
//! let mut browser = CatalogBrowserSession::new(Arc::new(catalog), 10);
//! let ticket = browser.open(SlotTarget::Index(0));
//! assert_eq!(browser.run(ticket).await, ApplyOutcome::Applied);
//!
//! let product = browser.state().ok_or(PickerError::NotOpen)?.results[0].clone();
//! browser.pick_product(product.clone())?;
//! browser.toggle_variant(&product.variants[0])?;
//! assert_eq!(browser.commit_into(&mut store)?, Some(0));
//! assert_eq!(store.get(0).map(|row| row.title()), Some("Towel"));
//! # Ok(())
//! # }
//! ```

mod error;
mod search;
mod session;
mod state;

pub use error::PickerError;
pub use search::{ApplyOutcome, PendingSearch, SearchResponse, SearchTicket};
pub use session::{CatalogBrowserSession, CommittedPick};
pub use state::PickerSession;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        ApplyOutcome, CatalogBrowserSession, CommittedPick, PickerError, PickerSession,
        SearchTicket,
    };
}
