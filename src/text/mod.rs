//! Truncatable content, layout measurement and the truncation controller.
//!
//! Key types:
//!
//! - [`TextSpan`] / [`Fragment`]: text mixed with opaque inline nodes
//! - [`TextMeasurer`]: the layout capability the host supplies
//! - [`CellMeasurer`]: a headless measurer for cell-grid hosts
//! - [`Truncator`]: expand/collapse state and the cut-index search
//!
//! # Examples
//!
//! ```
//! use clampkit::text::{CellMeasurer, Phase, TruncateOptions, Truncator, WrapMode};
//!
//! let measurer = CellMeasurer::new().with_wrap_mode(WrapMode::Char);
//! let options = TruncateOptions::default()
//!     .with_rows(2)
//!     .with_expand_label("more")
//!     .with_collapse_label("less");
//! let mut truncator = Truncator::new("x".repeat(50), options, measurer).unwrap();
//!
//! // The host reports its width and renders once per pass
//! truncator.set_container_width(10);
//! while truncator.tick() {}
//! assert_eq!(truncator.phase(), Phase::NeedsEllipsis);
//! assert_eq!(truncator.render().cut_index, Some(14));
//!
//! truncator.toggle();
//! assert!(truncator.is_expanded());
//! ```

mod measure;
mod span;
mod truncate;

pub use measure::{CellMeasurer, Constraints, Measurement, NullMeasurer, TextMeasurer, WrapMode};
pub use span::{Fragment, TextSpan};
pub use truncate::{Phase, RenderPayload, Toggle, TruncateOptions, TruncationState, Truncator};
