//! Search request parameters.

use serde::{Deserialize, Serialize};

/// One page of a catalog search.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text query; empty means all products.
    pub query: String,
    /// 1-indexed page.
    pub page: u32,
    /// Items per page.
    pub limit: u32,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, page: u32, limit: u32) -> Self {
        Self {
            query: query.into(),
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Query parameters in the order the endpoint expects them.
    ///
    /// Values are raw; the HTTP client percent-encodes them.
    pub fn query_pairs(&self) -> [(&'static str, String); 3] {
        [
            ("search", self.query.clone()),
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ]
    }
}
