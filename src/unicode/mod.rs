//! Unicode utilities for grapheme handling and display width.
//!
//! Cut indices produced by the truncator count extended grapheme clusters,
//! so a cut never splits an emoji sequence or a base letter from its
//! combining marks.

mod grapheme;
mod width;

pub use grapheme::{grapheme_count, grapheme_prefix, graphemes, is_whitespace_grapheme};
pub use width::{WidthMethod, display_width, grapheme_width};
