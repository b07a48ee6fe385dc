//! Display width calculation for cell-grid layout.

use unicode_width::UnicodeWidthStr;

/// Width calculation method for ambiguous-width characters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WidthMethod {
    /// POSIX-like wcwidth: ambiguous width = 1.
    #[default]
    WcWidth,
    /// Unicode East Asian Width: ambiguous width = 2.
    Unicode,
}

/// Get the display width of a string in cells.
#[must_use]
pub fn display_width(s: &str, method: WidthMethod) -> usize {
    // ASCII printable text is one cell per byte
    if s.bytes().all(|b| (0x20..0x7f).contains(&b)) {
        return s.len();
    }
    match method {
        WidthMethod::WcWidth => UnicodeWidthStr::width(s),
        WidthMethod::Unicode => UnicodeWidthStr::width_cjk(s),
    }
}

/// Get the display width of one grapheme placed at column `col`.
///
/// Tabs advance to the next multiple of `tab_width`.
#[must_use]
pub fn grapheme_width(grapheme: &str, col: usize, tab_width: usize, method: WidthMethod) -> usize {
    if grapheme == "\t" {
        let tab_width = tab_width.max(1);
        return tab_width - (col % tab_width);
    }
    display_width(grapheme, method)
}
