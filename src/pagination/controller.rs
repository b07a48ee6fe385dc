//! Pagination state for a list or table component.

use super::range::{PageItem, RangeOptions, compute_range_with};
use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_event, emit_log_with};
use std::fmt;
use std::ops::RangeInclusive;

/// Pagination component options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaginationOptions {
    /// Pages shown on each side of the current page.
    pub sibling_count: usize,
    /// Pages always shown at each end of the range.
    pub boundary_count: usize,
    /// Items per page.
    pub page_size: usize,
    /// Emit previous/next controls around the page items.
    pub show_prev_next: bool,
}

impl PaginationOptions {
    /// Set the sibling count.
    #[must_use]
    pub fn with_sibling_count(mut self, sibling_count: usize) -> Self {
        self.sibling_count = sibling_count;
        self
    }

    /// Set the boundary count.
    #[must_use]
    pub fn with_boundary_count(mut self, boundary_count: usize) -> Self {
        self.boundary_count = boundary_count;
        self
    }

    /// Set the page size.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Enable or disable previous/next controls.
    #[must_use]
    pub fn with_prev_next(mut self, show: bool) -> Self {
        self.show_prev_next = show;
        self
    }

    fn range_options(&self) -> RangeOptions {
        RangeOptions::new(self.sibling_count, self.boundary_count)
    }
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            sibling_count: 1,
            boundary_count: 1,
            page_size: 10,
            show_prev_next: true,
        }
    }
}

/// A rendered pagination control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    /// Go to the previous page.
    Prev { enabled: bool },
    /// A page number or ellipsis.
    Item(PageItem),
    /// Go to the next page.
    Next { enabled: bool },
}

type ChangeCallback = Box<dyn FnMut(usize)>;

/// Pagination state: item count, page size and the clamped current page.
///
/// The range itself is never stored; [`Pagination::range`] recomputes it
/// from the current values.
pub struct Pagination {
    total_items: usize,
    current_page: usize,
    options: PaginationOptions,
    total_pages_override: Option<usize>,
    on_change: Option<ChangeCallback>,
}

impl Pagination {
    /// Create pagination over `total_items` items, starting on page 1.
    pub fn new(total_items: usize, options: PaginationOptions) -> Result<Self> {
        if options.page_size == 0 {
            return Err(Error::InvalidPageSize(options.page_size));
        }
        Ok(Self {
            total_items,
            current_page: 1,
            options,
            total_pages_override: None,
            on_change: None,
        })
    }

    /// Create pagination with a known page count; `page_size` is ignored.
    #[must_use]
    pub fn with_total_pages(total_pages: usize, options: PaginationOptions) -> Self {
        Self {
            total_items: 0,
            current_page: 1,
            options,
            total_pages_override: Some(total_pages.max(1)),
            on_change: None,
        }
    }

    /// Register a callback invoked with the new page whenever it changes.
    pub fn on_change<F>(&mut self, callback: F)
    where
        F: FnMut(usize) + 'static,
    {
        self.on_change = Some(Box::new(callback));
    }

    /// Number of pages, never less than 1.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.total_pages_override
            .unwrap_or_else(|| self.total_items.div_ceil(self.options.page_size.max(1)).max(1))
    }

    /// The 1-based current page.
    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// The options in effect.
    #[must_use]
    pub fn options(&self) -> &PaginationOptions {
        &self.options
    }

    /// Move to `page`, clamped into `[1, total_pages]`.
    ///
    /// Returns the page actually selected.
    pub fn set_page(&mut self, page: usize) -> usize {
        let clamped = page.clamp(1, self.total_pages());
        if clamped != self.current_page {
            self.current_page = clamped;
            emit_log_with(LogLevel::Debug, || {
                format!("pagination: page {clamped} of {}", self.total_pages())
            });
            emit_event("pagination.change", &format!("page={clamped}"));
            if let Some(callback) = self.on_change.as_mut() {
                callback(clamped);
            }
        }
        self.current_page
    }

    /// Go to the next page if there is one.
    pub fn next(&mut self) -> usize {
        self.set_page(self.current_page.saturating_add(1))
    }

    /// Go to the previous page if there is one.
    pub fn prev(&mut self) -> usize {
        self.set_page(self.current_page.saturating_sub(1))
    }

    /// Go to page 1.
    pub fn first(&mut self) -> usize {
        self.set_page(1)
    }

    /// Go to the last page.
    pub fn last(&mut self) -> usize {
        self.set_page(self.total_pages())
    }

    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Update the item count, re-clamping the current page.
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.total_pages_override = None;
        self.set_page(self.current_page);
    }

    /// Page indicators for the current state.
    #[must_use]
    pub fn range(&self) -> Vec<PageItem> {
        compute_range_with(
            self.total_pages(),
            self.current_page,
            self.options.range_options(),
        )
    }

    /// Page indicators wrapped with previous/next controls when enabled.
    #[must_use]
    pub fn items(&self) -> Vec<Control> {
        let range = self.range();
        let mut controls = Vec::with_capacity(range.len() + 2);
        if self.options.show_prev_next {
            controls.push(Control::Prev {
                enabled: self.has_prev(),
            });
        }
        controls.extend(range.into_iter().map(Control::Item));
        if self.options.show_prev_next {
            controls.push(Control::Next {
                enabled: self.has_next(),
            });
        }
        controls
    }

    /// 1-based inclusive indices of the items on the current page.
    ///
    /// `None` when there are no items or the page count was given directly.
    #[must_use]
    pub fn item_range(&self) -> Option<RangeInclusive<usize>> {
        if self.total_pages_override.is_some() || self.total_items == 0 {
            return None;
        }
        let page_size = self.options.page_size.max(1);
        let start = self
            .current_page
            .saturating_sub(1)
            .saturating_mul(page_size)
            .saturating_add(1);
        let end = start.saturating_add(page_size - 1).min(self.total_items);
        Some(start..=end)
    }
}

impl fmt::Debug for Pagination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pagination")
            .field("total_items", &self.total_items)
            .field("total_pages", &self.total_pages())
            .field("current_page", &self.current_page)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
