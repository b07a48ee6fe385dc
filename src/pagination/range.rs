//! Ellipsis-aware page range computation.
//!
//! Given a page count and the current page, [`compute_range`] decides which
//! page indicators to show: `boundary_count` pages pinned at each end,
//! `sibling_count` pages on either side of the current page, and at most two
//! [`PageItem::Ellipsis`] markers standing in for the collapsed runs.
//!
//! The function is pure and cheap, so callers recompute it on every render
//! rather than caching the result.

use std::fmt;

/// One indicator in a pagination range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageItem {
    /// A 1-based page number.
    Page(usize),
    /// A collapsed run of at least two pages.
    Ellipsis,
}

impl PageItem {
    /// The page number, if this is a page.
    #[must_use]
    pub fn page(self) -> Option<usize> {
        match self {
            Self::Page(page) => Some(page),
            Self::Ellipsis => None,
        }
    }

    /// Check if this is an ellipsis marker.
    #[must_use]
    pub fn is_ellipsis(self) -> bool {
        matches!(self, Self::Ellipsis)
    }
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(page) => write!(f, "{page}"),
            Self::Ellipsis => f.write_str("…"),
        }
    }
}

/// Sibling and boundary configuration for [`compute_range_with`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RangeOptions {
    /// Pages shown on each side of the current page.
    pub sibling_count: usize,
    /// Pages always shown at each end of the range.
    pub boundary_count: usize,
}

impl RangeOptions {
    /// Create options with explicit counts.
    #[must_use]
    pub const fn new(sibling_count: usize, boundary_count: usize) -> Self {
        Self {
            sibling_count,
            boundary_count,
        }
    }

    /// Set the sibling count.
    #[must_use]
    pub const fn with_sibling_count(mut self, sibling_count: usize) -> Self {
        self.sibling_count = sibling_count;
        self
    }

    /// Set the boundary count.
    #[must_use]
    pub const fn with_boundary_count(mut self, boundary_count: usize) -> Self {
        self.boundary_count = boundary_count;
        self
    }

    /// Number of slots a fully collapsed range occupies.
    ///
    /// Current page, both sibling runs, both boundary runs and one ellipsis
    /// slot per side. Page counts at or below this render densely.
    /// Saturates at `usize::MAX`, so huge counts always render densely.
    #[must_use]
    pub const fn window_size(&self) -> usize {
        self.sibling_count
            .saturating_mul(2)
            .saturating_add(3)
            .saturating_add(self.boundary_count.saturating_mul(2))
    }
}

impl Default for RangeOptions {
    fn default() -> Self {
        Self::new(3, 1)
    }
}

/// Compute the page indicators for `current_page` out of `total_pages`.
///
/// `current_page` is expected in `[1, total_pages]` but is not validated:
/// out-of-range values pin the sibling window to the nearest edge.
///
/// # Examples
///
/// ```
/// use clampkit::pagination::{PageItem, compute_range};
///
/// let range = compute_range(20, 10, 1, 1);
/// assert_eq!(
///     range,
///     vec![
///         PageItem::Page(1),
///         PageItem::Ellipsis,
///         PageItem::Page(9),
///         PageItem::Page(10),
///         PageItem::Page(11),
///         PageItem::Ellipsis,
///         PageItem::Page(20),
///     ]
/// );
/// ```
#[must_use]
pub fn compute_range(
    total_pages: usize,
    current_page: usize,
    sibling_count: usize,
    boundary_count: usize,
) -> Vec<PageItem> {
    compute_range_with(
        total_pages,
        current_page,
        RangeOptions::new(sibling_count, boundary_count),
    )
}

/// Compute the page indicators using an options value.
#[must_use]
pub fn compute_range_with(
    total_pages: usize,
    current_page: usize,
    options: RangeOptions,
) -> Vec<PageItem> {
    let RangeOptions {
        sibling_count: siblings,
        boundary_count: boundaries,
    } = options;

    if options.window_size() >= total_pages {
        return pages(1, total_pages).collect();
    }

    // total_pages > 2 * boundaries here, so the subtractions cannot underflow.
    let left_sibling = current_page.saturating_sub(siblings).max(boundaries);
    let right_sibling = current_page
        .saturating_add(siblings)
        .min(total_pages - boundaries);

    let show_left_dots = left_sibling > boundaries + 2;
    let show_right_dots = right_sibling < total_pages - boundaries - 1;

    // Leading and trailing runs are the same length so the current page
    // stays visible when it sits next to the boundary run.
    let edge_run = siblings * 2 + boundaries + 2;

    let mut items = Vec::with_capacity(options.window_size());
    match (show_left_dots, show_right_dots) {
        (false, true) => {
            items.extend(pages(1, edge_run));
            items.push(PageItem::Ellipsis);
            items.extend(pages(total_pages - boundaries + 1, total_pages));
        }
        (true, false) => {
            items.extend(pages(1, boundaries));
            items.push(PageItem::Ellipsis);
            items.extend(pages(total_pages - edge_run + 1, total_pages));
        }
        (true, true) => {
            items.extend(pages(1, boundaries));
            items.push(PageItem::Ellipsis);
            items.extend(pages(left_sibling, right_sibling));
            items.push(PageItem::Ellipsis);
            items.extend(pages(total_pages - boundaries + 1, total_pages));
        }
        (false, false) => items.extend(pages(1, total_pages)),
    }
    items
}

/// Render a range on one line with the current page bracketed.
///
/// ```
/// use clampkit::pagination::{compute_range, render_range};
///
/// let line = render_range(&compute_range(20, 10, 1, 1), 10);
/// assert_eq!(line, "1 … 9 [10] 11 … 20");
/// ```
#[must_use]
pub fn render_range(items: &[PageItem], current_page: usize) -> String {
    let mut out = String::new();
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        match item {
            PageItem::Page(page) if *page == current_page => {
                out.push_str(&format!("[{page}]"));
            }
            other => out.push_str(&other.to_string()),
        }
    }
    out
}

fn pages(first: usize, last: usize) -> impl Iterator<Item = PageItem> {
    (first..=last).map(PageItem::Page)
}
