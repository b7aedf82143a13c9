//! Pagination request/response types.

use serde::{Deserialize, Serialize};

const DEFAULT_PAGE_SIZE: u64 = 25;

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

/// A pagination request (1-based page numbering).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number, starting at 1.
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl PageRequest {
    /// SQL LIMIT value.
    pub fn limit(&self) -> u64 {
        self.page_size.clamp(1, 500)
    }

    /// SQL OFFSET value.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1) * self.limit()
    }
}

/// A page of results plus totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// Items in this page.
    pub items: Vec<T>,
    /// Current page (1-based).
    pub page: u64,
    /// Items per page.
    pub page_size: u64,
    /// Total item count across all pages.
    pub total: u64,
    /// Total page count.
    pub total_pages: u64,
}

impl<T> PageResponse<T> {
    /// Assemble a page response, deriving the page count.
    pub fn new(items: Vec<T>, page: u64, page_size: u64, total: u64) -> Self {
        let size = page_size.max(1);
        Self {
            items,
            page,
            page_size: size,
            total,
            total_pages: total.div_ceil(size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_zero_based_from_one_based_pages() {
        let page = PageRequest {
            page: 3,
            page_size: 25,
        };
        assert_eq!(page.limit(), 25);
        assert_eq!(page.offset(), 50);
    }

    #[test]
    fn page_count_rounds_up() {
        let resp: PageResponse<u8> = PageResponse::new(vec![], 1, 10, 101);
        assert_eq!(resp.total_pages, 11);
    }
}
