//! In-memory catalog for development and tests.

use async_trait::async_trait;
use picker_core::catalog::Product;

use crate::error::CatalogError;
use crate::pagination::Pagination;
use crate::{CatalogClient, SearchPage};

/// A fixed product list searched by case-insensitive title match.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Run a search synchronously.
    pub fn search_now(&self, query: &str, page: u32, limit: u32) -> SearchPage {
        let needle = query.trim().to_lowercase();
        let matches: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| needle.is_empty() || p.title.to_lowercase().contains(&needle))
            .collect();

        let pagination = Pagination::new(page, limit, matches.len());
        let items = matches[pagination.range()].iter().map(|p| (*p).clone()).collect();

        SearchPage {
            items,
            total_pages: Some(pagination.total_pages),
        }
    }
}

#[async_trait]
impl CatalogClient for InMemoryCatalog {
    async fn search(&self, query: &str, page: u32, limit: u32) -> Result<SearchPage, CatalogError> {
        Ok(self.search_now(query, page, limit))
    }
}
