//! Page arithmetic.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Pagination info for one page of results.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of items.
    pub total: usize,
    /// Total number of pages, at least 1.
    pub total_pages: u32,
}

impl Pagination {
    pub fn new(page: u32, per_page: u32, total: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = if total == 0 {
            1
        } else {
            total.div_ceil(per_page as usize) as u32
        };

        Self {
            page: page.max(1),
            per_page,
            total,
            total_pages,
        }
    }

    /// Offset of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page as usize - 1) * self.per_page as usize
    }

    /// Index range of this page's items, clipped to `total`.
    pub fn range(&self) -> Range<usize> {
        let start = self.offset().min(self.total);
        let end = (start + self.per_page as usize).min(self.total);
        start..end
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, 10, 0)
    }
}
