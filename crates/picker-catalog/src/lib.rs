//! Catalog search for the product picker.
//!
//! The picker only depends on the [`CatalogClient`] trait. Two implementations
//! ship here:
//!
//! - [`HttpCatalogClient`]: the remote search endpoint, configured through
//!   [`CatalogConfig`] (endpoint and API key come from a file or the environment)
//! - [`InMemoryCatalog`]: a fixed product list, for development and tests
//!
//! # Example
//!
//! ```rust,ignore
//! use picker_catalog::{CatalogClient, CatalogConfig, HttpCatalogClient};
//!
//! let config = CatalogConfig::load("catalog.toml")?.with_env_overrides()?;
//! let client = HttpCatalogClient::new(config)?;
//!
//! let page = client.search("towel", 1, 10).await?;
//! for product in &page.items {
//!     println!("{} ({} variants)", product.title, product.variants.len());
//! }
//! ```

mod config;
mod error;
mod http;
mod memory;
mod pagination;
mod request;
mod response;

use async_trait::async_trait;
use picker_core::catalog::Product;
use serde::{Deserialize, Serialize};

pub use config::{generate_default_config, CatalogConfig, ENV_API_KEY, ENV_ENDPOINT, ENV_PAGE_SIZE};
pub use error::CatalogError;
pub use http::HttpCatalogClient;
pub use memory::InMemoryCatalog;
pub use pagination::Pagination;
pub use request::SearchRequest;
pub use response::{parse_search_body, parse_search_value};

/// One page of search results.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchPage {
    /// Products on this page, in catalog order.
    pub items: Vec<Product>,
    /// Total page count, when the service reported a usable one.
    pub total_pages: Option<u32>,
}

impl SearchPage {
    /// No items and no page count.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(items: Vec<Product>, total_pages: u32) -> Self {
        Self {
            items,
            total_pages: Some(total_pages.max(1)),
        }
    }
}

/// Source of catalog search results.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch one page of products matching `query` (empty means all).
    async fn search(&self, query: &str, page: u32, limit: u32) -> Result<SearchPage, CatalogError>;
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CatalogClient, CatalogConfig, CatalogError, HttpCatalogClient, InMemoryCatalog,
        SearchPage,
    };
}
