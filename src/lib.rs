//! `clampkit` - pagination ranges and measured text truncation
//!
//! The two non-trivial algorithms behind a UI component library's
//! Pagination and ellipsis-capable Typography components, free of any
//! rendering framework: an ellipsis-aware page range builder and a
//! multi-line truncator that binary-searches the cut point against a
//! host-supplied layout measurer.

// Crate-level lint configuration
#![warn(unsafe_code)]
#![allow(clippy::cast_possible_truncation)] // Cell widths fit in u32
#![allow(clippy::module_name_repetitions)] // Allow text::TextSpan etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::format_push_string)] // format! with push_str is fine
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening

pub mod error;
pub mod event;
pub mod pagination;
pub mod text;
pub mod unicode;

// Re-export core types at crate root
pub use error::{Error, Result};
pub use event::{LogLevel, clear_callbacks, emit_event, emit_log, set_event_callback, set_log_callback};

pub use pagination::{
    PageItem, Pagination, PaginationOptions, RangeOptions, compute_range, compute_range_with,
};
pub use text::{
    CellMeasurer, Fragment, Phase, RenderPayload, TextMeasurer, TextSpan, TruncateOptions,
    Truncator,
};
