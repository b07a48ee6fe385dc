//! Pagination ranges and pagination component state.
//!
//! - [`compute_range`]: the pure range algorithm
//! - [`Pagination`]: page count derivation, clamping and change notification
//!
//! # Examples
//!
//! ```
//! use clampkit::pagination::{Pagination, PaginationOptions, render_range};
//!
//! let mut pagination = Pagination::new(200, PaginationOptions::default()).unwrap();
//! pagination.set_page(10);
//! assert_eq!(render_range(&pagination.range(), 10), "1 … 9 [10] 11 … 20");
//! ```

mod controller;
mod range;

pub use controller::{Control, Pagination, PaginationOptions};
pub use range::{PageItem, RangeOptions, compute_range, compute_range_with, render_range};
