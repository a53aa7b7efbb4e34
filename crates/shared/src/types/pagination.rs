//! Pagination types and page slicing for list endpoints.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Smallest allowed page number.
pub const MIN_PAGE: u32 = 1;
/// Smallest allowed page size.
pub const MIN_PAGE_SIZE: u32 = 1;
/// Largest allowed page size.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-indexed).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Number of items per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    10
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
    /// Creates a page request without validating it.
    #[must_use]
    pub const fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    /// Checks the request against the public bounds.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` naming the first offending field.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.page < MIN_PAGE {
            return Err(AppError::validation(
                "page",
                format!("page must be greater than or equal to {MIN_PAGE}"),
            ));
        }
        if self.page_size < MIN_PAGE_SIZE {
            return Err(AppError::validation(
                "page_size",
                format!("page_size must be greater than or equal to {MIN_PAGE_SIZE}"),
            ));
        }
        if self.page_size > MAX_PAGE_SIZE {
            return Err(AppError::validation(
                "page_size",
                format!("page_size must be less than or equal to {MAX_PAGE_SIZE}"),
            ));
        }
        Ok(())
    }

    /// Index of the first item on this page.
    #[must_use]
    pub fn offset(&self) -> usize {
        let page_index = self.page.saturating_sub(1) as usize;
        page_index.saturating_mul(self.page_size as usize)
    }
}

/// Pagination metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Current page number, echoed from the request.
    pub page: u32,
    /// Items per page.
    pub page_size: u32,
    /// Total number of items across all pages.
    pub total_rows: u64,
    /// Total number of pages.
    pub total_pages: u64,
}

/// One page of items plus its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// The items in the current page.
    pub items: Vec<T>,
    /// Pagination metadata.
    pub meta: PageMeta,
}

/// Number of pages needed for `total` items, `ceil(total / page_size)`.
#[must_use]
pub fn total_pages(total: u64, page_size: u32) -> u64 {
    // Callers validate page_size; zero still must not divide.
    total.div_ceil(u64::from(page_size.max(MIN_PAGE_SIZE)))
}

/// Slices `items` down to the window selected by `request`.
///
/// Pages past the end yield an empty slice; order is preserved.
#[must_use]
pub fn paginate<T>(items: Vec<T>, request: &PageRequest) -> Page<T> {
    let total = items.len();
    let start = request.offset();
    let page_items = if start >= total {
        Vec::new()
    } else {
        let end = start
            .saturating_add(request.page_size as usize)
            .min(total);
        let mut items = items;
        items.truncate(end);
        items.drain(..start);
        items
    };

    let total_rows = total as u64;
    Page {
        items: page_items,
        meta: PageMeta {
            page: request.page,
            page_size: request.page_size,
            total_rows,
            total_pages: total_pages(total_rows, request.page_size),
        },
    }
}

#[cfg(test)]
#[path = "pagination_tests.rs"]
mod tests;
