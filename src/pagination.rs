//! Review list paging.
//!
//! Pages are 0-based. `offset = page * page_size` and the slice is
//! `[offset, offset + page_size)` clamped to the item count.

use std::ops::Range;

use serde::Serialize;

use crate::errors::DashboardError;

/// Number of pages needed for `total` items; `0` when `page_size` is zero.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Borrow the items on `page`, clamped to the slice bounds.
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Range of page links to display plus whether pages are hidden on either side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    /// 0-based page indices to show as links.
    pub pages: Range<usize>,
    /// Pages exist before `pages.start`.
    pub leading_ellipsis: bool,
    /// Pages exist after `pages.end`.
    pub trailing_ellipsis: bool,
}

/// Paging state for a list of `total_items`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Pager {
    total_items: usize,
    page_size: usize,
    max_visible_pages: usize,
    current_page: usize,
}

impl Pager {
    /// Create a pager positioned on the first page.
    pub fn new(
        total_items: usize,
        page_size: usize,
        max_visible_pages: usize,
    ) -> Result<Self, DashboardError> {
        if page_size == 0 {
            return Err(DashboardError::Configuration(
                "page_size must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            total_items,
            page_size,
            max_visible_pages: max_visible_pages.max(1),
            current_page: 0,
        })
    }

    /// 0-based index of the page being shown.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Items per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages; `0` for an empty list.
    pub fn page_count(&self) -> usize {
        page_count(self.total_items, self.page_size)
    }

    /// Index of the first item on the current page.
    pub fn offset(&self) -> usize {
        self.current_page * self.page_size
    }

    /// Move to `page`. Out-of-range requests leave the pager unchanged and return `false`.
    pub fn go_to(&mut self, page: usize) -> bool {
        if page >= self.page_count() {
            return false;
        }
        self.current_page = page;
        true
    }

    /// Advance one page; `false` on the last page.
    pub fn next_page(&mut self) -> bool {
        self.go_to(self.current_page + 1)
    }

    /// Go back one page; `false` on the first page.
    pub fn previous_page(&mut self) -> bool {
        match self.current_page.checked_sub(1) {
            Some(page) => self.go_to(page),
            None => false,
        }
    }

    /// Page links centered on the current page where possible.
    pub fn visible_window(&self) -> PageWindow {
        let total_pages = self.page_count();
        let start = self
            .current_page
            .saturating_sub(self.max_visible_pages / 2);
        let end = total_pages.min(start + self.max_visible_pages);
        let start = start.min(end);
        PageWindow {
            pages: start..end,
            leading_ellipsis: start > 0,
            trailing_ellipsis: end < total_pages,
        }
    }

    /// Items on the current page.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        page_slice(items, self.current_page, self.page_size)
    }
}
