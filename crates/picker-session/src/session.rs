//! The catalog browser session.
//!
//! ```text
//! Closed --open--> Open(query="", page=1) --commit/cancel--> Closed
//!                    |  ^
//!      set_query /   |  | response for the newest ticket
//!      goto_page     v  |
//!                  Open + searching
//! ```
//!
//! Mutations are serialized through `&mut self`. Searches run detached
//! ([`PendingSearch`]) and come back through [`CatalogBrowserSession::apply`],
//! which drops anything that is not the newest request of the open picker.

use std::sync::Arc;

use picker_catalog::{CatalogClient, CatalogConfig, SearchRequest};
use picker_core::catalog::{Product, Variant};
use picker_core::selection::{toggle_by_id, VariantToggle};
use picker_core::store::{SelectionListStore, SlotTarget};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::PickerError;
use crate::search::{ApplyOutcome, PendingSearch, SearchResponse, SearchTicket};
use crate::state::PickerSession;

/// A validated pick, ready to be written into the selection list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommittedPick {
    pub target: SlotTarget,
    pub product: Product,
    pub variants: Vec<Variant>,
}

impl CommittedPick {
    /// Write the pick into `store`. Returns the position written to.
    pub fn apply_to(self, store: &mut SelectionListStore) -> Option<usize> {
        store.commit_into(self.target, self.product, self.variants)
    }
}

/// Request numbering. Only the newest issued request may be applied.
#[derive(Debug, Default)]
struct RequestLedger {
    issued: u64,
    latest: Option<u64>,
}

impl RequestLedger {
    fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.latest = Some(self.issued);
        self.issued
    }

    fn is_latest(&self, request_id: u64) -> bool {
        self.latest == Some(request_id)
    }

    fn invalidate(&mut self) {
        self.latest = None;
    }
}

/// Drives one picker at a time against a catalog.
pub struct CatalogBrowserSession {
    client: Arc<dyn CatalogClient>,
    page_size: u32,
    requests: RequestLedger,
    state: Option<PickerSession>,
}

impl CatalogBrowserSession {
    pub fn new(client: Arc<dyn CatalogClient>, page_size: u32) -> Self {
        Self {
            client,
            page_size: page_size.max(1),
            requests: RequestLedger::default(),
            state: None,
        }
    }

    /// Use the page size from the catalog configuration.
    pub fn from_config(client: Arc<dyn CatalogClient>, config: &CatalogConfig) -> Self {
        Self::new(client, config.page_size)
    }

    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    /// Snapshot of the open picker, if any.
    pub fn state(&self) -> Option<&PickerSession> {
        self.state.as_ref()
    }

    pub fn is_searching(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.searching)
    }

    /// Open (or reopen) the picker for `target` and issue the first search.
    ///
    /// Anything from a previous opening, including in-flight searches, is discarded.
    pub fn open(&mut self, target: SlotTarget) -> SearchTicket {
        debug!(slot = ?target, "picker opened");
        let state = self.state.insert(PickerSession::new(target, self.page_size));
        issue(&mut self.requests, state, 1)
    }

    /// Change the query and search again from page 1.
    ///
    /// `page` moves to 1 once the results arrive.
    pub fn set_query(&mut self, text: impl Into<String>) -> Result<SearchTicket, PickerError> {
        let state = self.state.as_mut().ok_or(PickerError::NotOpen)?;
        state.query = text.into();
        Ok(issue(&mut self.requests, state, 1))
    }

    /// Fetch page `n`. `page` follows once the results arrive.
    ///
    /// Returns `Ok(None)` when `n` is outside `1..=total_pages` or already shown.
    pub fn goto_page(&mut self, n: u32) -> Result<Option<SearchTicket>, PickerError> {
        let state = self.state.as_mut().ok_or(PickerError::NotOpen)?;
        if n < 1 || n > state.total_pages || n == state.page {
            debug!(requested = n, page = state.page, total = state.total_pages, "page change ignored");
            return Ok(None);
        }
        Ok(Some(issue(&mut self.requests, state, n)))
    }

    pub fn next_page(&mut self) -> Result<Option<SearchTicket>, PickerError> {
        let page = self.state.as_ref().ok_or(PickerError::NotOpen)?.page;
        self.goto_page(page.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> Result<Option<SearchTicket>, PickerError> {
        let page = self.state.as_ref().ok_or(PickerError::NotOpen)?.page;
        self.goto_page(page.saturating_sub(1))
    }

    /// Make `product` the pending pick and clear any picked variants.
    pub fn pick_product(&mut self, product: Product) -> Result<(), PickerError> {
        let state = self.state.as_mut().ok_or(PickerError::NotOpen)?;
        state.pending_product = Some(product);
        state.pending_variants.clear();
        Ok(())
    }

    /// Add or remove a variant of the pending product, matched by id.
    pub fn toggle_variant(&mut self, variant: &Variant) -> Result<VariantToggle, PickerError> {
        let state = self.state.as_mut().ok_or(PickerError::NotOpen)?;
        let product = state
            .pending_product
            .as_ref()
            .ok_or(PickerError::NoProductPicked)?;
        if !product.has_variant(&variant.id) {
            return Err(PickerError::VariantNotInProduct(variant.id.clone()));
        }
        Ok(toggle_by_id(&mut state.pending_variants, variant))
    }

    /// Validate and close the picker, handing back the pick.
    ///
    /// On failure the picker stays open and unchanged.
    pub fn commit(&mut self) -> Result<CommittedPick, PickerError> {
        let state = self.state.as_ref().ok_or(PickerError::NotOpen)?;
        if !state.can_commit() {
            return Err(PickerError::NoVariantsPicked);
        }
        let state = self.close().ok_or(PickerError::NotOpen)?;
        let product = state.pending_product.ok_or(PickerError::NoVariantsPicked)?;

        info!(
            slot = ?state.target,
            product = %product.id,
            variants = state.pending_variants.len(),
            "picker committed"
        );
        Ok(CommittedPick {
            target: state.target,
            product,
            variants: state.pending_variants,
        })
    }

    /// Commit and write the pick into `store` in one step.
    pub fn commit_into(&mut self, store: &mut SelectionListStore) -> Result<Option<usize>, PickerError> {
        Ok(self.commit()?.apply_to(store))
    }

    /// Close the picker without committing.
    pub fn cancel(&mut self) {
        if self.close().is_some() {
            debug!("picker cancelled");
        }
    }

    /// Start the search for a ticket without borrowing the session.
    pub fn dispatch(&self, ticket: SearchTicket) -> PendingSearch {
        PendingSearch::new(Arc::clone(&self.client), ticket)
    }

    /// Apply a finished search if it is still the newest one.
    pub fn apply(&mut self, response: SearchResponse) -> ApplyOutcome {
        let request_id = response.ticket.request_id;
        let Some(state) = self.state.as_mut() else {
            debug!(request_id, "response after picker closed, dropped");
            return ApplyOutcome::Closed;
        };
        if !self.requests.is_latest(request_id) {
            debug!(request_id, latest = ?self.requests.latest, "stale response dropped");
            return ApplyOutcome::Stale;
        }

        state.searching = false;
        match response.result {
            Ok(page) => {
                state.page = response.ticket.request.page;
                if let Some(total) = page.total_pages {
                    state.total_pages = total;
                }
                state.total_pages = state.total_pages.max(state.page);
                state.results = page.items;
                state.last_error = None;
                ApplyOutcome::Applied
            }
            Err(e) => {
                warn!(request_id, error = %e, "catalog search failed");
                state.last_error = Some(e.user_message().to_string());
                ApplyOutcome::Failed
            }
        }
    }

    /// Dispatch, await and apply a ticket.
    pub async fn run(&mut self, ticket: SearchTicket) -> ApplyOutcome {
        let response = self.dispatch(ticket).resolve().await;
        self.apply(response)
    }

    fn close(&mut self) -> Option<PickerSession> {
        self.requests.invalidate();
        self.state.take()
    }
}

/// Number a search for `page` of the current query and mark the picker busy.
fn issue(requests: &mut RequestLedger, state: &mut PickerSession, page: u32) -> SearchTicket {
    state.searching = true;
    SearchTicket {
        request_id: requests.issue(),
        request: SearchRequest::new(state.query.clone(), page, state.page_size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use picker_catalog::{CatalogError, InMemoryCatalog, SearchPage};
    use picker_core::money::{Currency, Money};

    fn variant(id: &str) -> Variant {
        Variant::new(id, id.to_uppercase(), Money::new(1000, Currency::USD))
    }

    fn product(id: &str) -> Product {
        Product::new(id, format!("Product {id}"))
            .with_variant(variant("v1"))
            .with_variant(variant("v2"))
    }

    fn session() -> CatalogBrowserSession {
        let catalog = InMemoryCatalog::new((1..=25).map(|i| product(&i.to_string())).collect());
        CatalogBrowserSession::new(Arc::new(catalog), 10)
    }

    fn respond(ticket: SearchTicket, items: Vec<Product>, total_pages: Option<u32>) -> SearchResponse {
        SearchResponse {
            ticket,
            result: Ok(SearchPage { items, total_pages }),
        }
    }

    #[test]
    fn test_open_resets_state() {
        let mut s = session();
        let first = s.open(SlotTarget::Index(0));
        s.set_query("towel").unwrap();
        s.pick_product(product("p1")).unwrap();

        let ticket = s.open(SlotTarget::Index(1));
        let state = s.state().unwrap();
        assert_eq!(state.target, SlotTarget::Index(1));
        assert_eq!(state.query, "");
        assert_eq!(state.page, 1);
        assert!(state.pending_product.is_none());
        assert!(state.searching);
        assert!(ticket.request_id > first.request_id);
    }

    #[test]
    fn test_operations_require_open_picker() {
        let mut s = session();
        assert_eq!(s.set_query("x"), Err(PickerError::NotOpen));
        assert_eq!(s.goto_page(2), Err(PickerError::NotOpen));
        assert_eq!(s.pick_product(product("p1")), Err(PickerError::NotOpen));
        assert_eq!(s.commit().unwrap_err(), PickerError::NotOpen);
    }

    #[test]
    fn test_goto_page_bounds() {
        let mut s = session();
        let t = s.open(SlotTarget::NewRow);
        s.apply(respond(t, vec![], Some(3)));

        assert_eq!(s.goto_page(0), Ok(None));
        assert_eq!(s.goto_page(1), Ok(None));
        assert_eq!(s.goto_page(4), Ok(None));
        assert!(!s.is_searching());

        let t = s.goto_page(3).unwrap().unwrap();
        assert_eq!(t.request.page, 3);
        assert!(s.is_searching());
        assert_eq!(s.state().unwrap().page, 1);

        s.apply(respond(t, vec![], Some(3)));
        assert_eq!(s.state().unwrap().page, 3);
        assert_eq!(s.next_page(), Ok(None));
        assert_eq!(s.previous_page().unwrap().unwrap().request.page, 2);
    }

    #[test]
    fn test_set_query_resets_page() {
        let mut s = session();
        let t = s.open(SlotTarget::Index(0));
        s.apply(respond(t, vec![], Some(5)));
        let t = s.goto_page(4).unwrap().unwrap();
        s.apply(respond(t, vec![], Some(5)));
        assert_eq!(s.state().unwrap().page, 4);

        let t = s.set_query("linen").unwrap();
        assert_eq!(t.request.page, 1);
        assert_eq!(t.request.query, "linen");
        assert_eq!(s.state().unwrap().query, "linen");

        s.apply(respond(t, vec![], Some(1)));
        assert_eq!(s.state().unwrap().page, 1);
    }

    #[test]
    fn test_missing_total_pages_keeps_previous() {
        let mut s = session();
        let t = s.open(SlotTarget::Index(0));
        s.apply(respond(t, vec![product("a")], Some(4)));

        let t = s.goto_page(2).unwrap().unwrap();
        assert_eq!(s.apply(respond(t, vec![], None)), ApplyOutcome::Applied);

        let state = s.state().unwrap();
        assert_eq!(state.page, 2);
        assert_eq!(state.total_pages, 4);
        assert!(state.results.is_empty());
    }

    #[test]
    fn test_failed_page_change_keeps_shown_page() {
        let mut s = session();
        let t = s.open(SlotTarget::Index(0));
        s.apply(respond(t, vec![product("first")], Some(3)));

        let t = s.goto_page(2).unwrap().unwrap();
        let outcome = s.apply(SearchResponse {
            ticket: t,
            result: Err(CatalogError::Timeout),
        });

        assert_eq!(outcome, ApplyOutcome::Failed);
        let state = s.state().unwrap();
        assert_eq!(state.page, 1);
        assert_eq!(state.results[0].id.as_str(), "first");
        assert!(state.has_next());

        let retry = s.next_page().unwrap().unwrap();
        assert_eq!(retry.request.page, 2);
    }

    #[test]
    fn test_failure_keeps_results_and_sets_flag() {
        let mut s = session();
        let t = s.open(SlotTarget::Index(0));
        s.apply(respond(t, vec![product("a")], Some(2)));

        let t = s.set_query("b").unwrap();
        let outcome = s.apply(SearchResponse {
            ticket: t,
            result: Err(CatalogError::Timeout),
        });

        assert_eq!(outcome, ApplyOutcome::Failed);
        let state = s.state().unwrap();
        assert_eq!(state.results.len(), 1);
        assert!(!state.searching);
        assert!(state.last_error.is_some());

        let t = s.set_query("c").unwrap();
        s.apply(respond(t, vec![], Some(1)));
        assert!(s.state().unwrap().last_error.is_none());
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut s = session();
        s.open(SlotTarget::Index(0));
        let old = s.set_query("a").unwrap();
        let new = s.set_query("ab").unwrap();

        assert_eq!(s.apply(respond(new, vec![product("ab")], Some(1))), ApplyOutcome::Applied);
        assert_eq!(s.apply(respond(old, vec![product("a")], Some(9))), ApplyOutcome::Stale);

        let state = s.state().unwrap();
        assert_eq!(state.results[0].id.as_str(), "ab");
        assert_eq!(state.total_pages, 1);
    }

    #[test]
    fn test_response_after_close_is_dropped() {
        let mut s = session();
        let t = s.open(SlotTarget::Index(0));
        s.cancel();
        assert_eq!(s.apply(respond(t.clone(), vec![product("a")], None)), ApplyOutcome::Closed);

        // Reopening does not revive the old ticket.
        s.open(SlotTarget::Index(0));
        assert_eq!(s.apply(respond(t, vec![product("a")], None)), ApplyOutcome::Stale);
        assert!(s.state().unwrap().results.is_empty());
    }

    #[test]
    fn test_pick_product_clears_variants() {
        let mut s = session();
        s.open(SlotTarget::Index(0));
        s.pick_product(product("p1")).unwrap();
        s.toggle_variant(&variant("v1")).unwrap();

        s.pick_product(product("p2")).unwrap();

        let state = s.state().unwrap();
        assert!(state.is_selected(&product("p2")));
        assert!(state.pending_variants.is_empty());
    }

    #[test]
    fn test_toggle_variant_requires_product() {
        let mut s = session();
        s.open(SlotTarget::Index(0));
        assert_eq!(s.toggle_variant(&variant("v1")), Err(PickerError::NoProductPicked));
    }

    #[test]
    fn test_toggle_variant_rejects_foreign_variant() {
        let mut s = session();
        s.open(SlotTarget::Index(0));
        s.pick_product(product("p1")).unwrap();
        assert_eq!(
            s.toggle_variant(&variant("v9")),
            Err(PickerError::VariantNotInProduct("v9".into()))
        );
        assert!(s.state().unwrap().pending_variants.is_empty());
    }

    #[test]
    fn test_commit_validation_leaves_session_open() {
        let mut s = session();
        s.open(SlotTarget::Index(0));
        assert_eq!(s.commit().unwrap_err(), PickerError::NoVariantsPicked);

        s.pick_product(product("p1")).unwrap();
        assert_eq!(s.commit().unwrap_err(), PickerError::NoVariantsPicked);
        assert!(s.is_open());
        assert!(s.state().unwrap().is_selected(&product("p1")));
    }

    #[test]
    fn test_commit_returns_pick_and_closes() {
        let mut s = session();
        let pending = s.open(SlotTarget::Index(1));
        s.pick_product(product("p1")).unwrap();
        s.toggle_variant(&variant("v2")).unwrap();

        let pick = s.commit().unwrap();

        assert_eq!(pick.target, SlotTarget::Index(1));
        assert_eq!(pick.product.id.as_str(), "p1");
        assert_eq!(pick.variants, vec![variant("v2")]);
        assert!(!s.is_open());
        assert_eq!(s.apply(respond(pending, vec![], None)), ApplyOutcome::Closed);
    }

    #[tokio::test]
    async fn test_run_applies_in_memory_results() {
        let mut s = session();
        let t = s.open(SlotTarget::Index(0));
        assert_eq!(s.run(t).await, ApplyOutcome::Applied);

        let state = s.state().unwrap();
        assert_eq!(state.results.len(), 10);
        assert_eq!(state.total_pages, 3);
        assert!(!state.searching);

        let t = s.goto_page(3).unwrap().unwrap();
        s.run(t).await;
        assert_eq!(s.state().unwrap().results.len(), 5);
    }
}
