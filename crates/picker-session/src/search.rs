//! Search tickets and in-flight requests.
//!
//! Every search the picker issues gets a ticket carrying a request number from
//! a counter that only grows. Only the response to the newest ticket is
//! applied; anything older is a stale response and is dropped.

use std::sync::Arc;

use picker_catalog::{CatalogClient, CatalogError, SearchPage, SearchRequest};
use serde::Serialize;

/// A search the picker has issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchTicket {
    pub request_id: u64,
    pub request: SearchRequest,
}

/// The outcome of a ticket's search, waiting to be applied.
#[derive(Debug, Clone)]
pub struct SearchResponse {
    pub ticket: SearchTicket,
    pub result: Result<SearchPage, CatalogError>,
}

/// What happened when a response was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ApplyOutcome {
    /// Results replaced the session's result page.
    Applied,
    /// The search failed; the error flag is set and previous results kept.
    Failed,
    /// A newer search was issued after this one.
    Stale,
    /// The picker was closed after this search was issued.
    Closed,
}

/// A search running against the catalog, detached from the session.
///
/// Holding one does not borrow the session, so several can be in flight
/// while the session keeps accepting input.
pub struct PendingSearch {
    client: Arc<dyn CatalogClient>,
    ticket: SearchTicket,
}

impl PendingSearch {
    pub(crate) fn new(client: Arc<dyn CatalogClient>, ticket: SearchTicket) -> Self {
        Self { client, ticket }
    }

    pub fn ticket(&self) -> &SearchTicket {
        &self.ticket
    }

    /// Run the search.
    pub async fn resolve(self) -> SearchResponse {
        let req = &self.ticket.request;
        let result = self.client.search(&req.query, req.page, req.limit).await;
        SearchResponse {
            ticket: self.ticket,
            result,
        }
    }
}
