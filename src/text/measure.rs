//! Text measurement port and a headless cell-grid implementation.
//!
//! The truncator never lays text out itself. It asks a [`TextMeasurer`] two
//! questions: does this content overflow a box clamped to `n` rows, and how
//! tall is this content when left unconstrained. Web hosts answer with an
//! off-screen element; [`CellMeasurer`] answers by wrapping graphemes on a
//! fixed-width cell grid, the way a terminal renders them.

// Wrapping logic reads best as one long loop
#![allow(clippy::too_many_lines)]

use super::span::Fragment;
use crate::error::{Error, Result};
use crate::unicode::{WidthMethod, grapheme_width, graphemes, is_whitespace_grapheme};

/// Layout constraints for one measurement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Constraints {
    /// Available width in the measurer's horizontal unit.
    pub width: u32,
    /// Clamp the box to this many rows, or `None` for natural height.
    pub max_rows: Option<usize>,
}

impl Constraints {
    /// Constraints for a box clamped to `rows` lines.
    #[must_use]
    pub fn clamped(width: u32, rows: usize) -> Self {
        Self {
            width,
            max_rows: Some(rows),
        }
    }

    /// Constraints for an unconstrained-height probe.
    #[must_use]
    pub fn unbounded(width: u32) -> Self {
        Self {
            width,
            max_rows: None,
        }
    }
}

/// Result of one measurement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Measurement {
    /// Natural height exceeds the clamped height. Always `false` when
    /// measured without a row clamp.
    pub overflows: bool,
    /// Rendered height: clamped when `max_rows` was set, natural otherwise.
    pub height: u32,
}

/// Layout measurement capability supplied by the host environment.
pub trait TextMeasurer {
    /// Measure `content` under `constraints`.
    ///
    /// Returns `None` when layout metrics are unavailable (no layout yet,
    /// detached host). Callers treat that as "does not overflow".
    fn measure(&self, content: &[Fragment], constraints: Constraints) -> Option<Measurement>;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, content: &[Fragment], constraints: Constraints) -> Option<Measurement> {
        (**self).measure(content, constraints)
    }
}

/// A measurer for hosts without layout: every measurement is unavailable.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullMeasurer;

impl TextMeasurer for NullMeasurer {
    fn measure(&self, _content: &[Fragment], _constraints: Constraints) -> Option<Measurement> {
        None
    }
}

/// Text wrapping mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WrapMode {
    /// Wrap at grapheme boundaries.
    Char,
    /// Wrap after whitespace, falling back to grapheme boundaries for words
    /// wider than the line.
    #[default]
    Word,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Atom<'a> {
    Grapheme(&'a str),
    Node(u32),
    Newline,
}

impl Atom<'_> {
    fn is_whitespace(self) -> bool {
        matches!(self, Atom::Grapheme(g) if is_whitespace_grapheme(g))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct LineRun {
    start: usize,
    end: usize,
    wrapped: bool,
}

fn atoms(content: &[Fragment]) -> Vec<Atom<'_>> {
    let mut atoms = Vec::new();
    for fragment in content {
        match fragment {
            Fragment::Text(text) => {
                for grapheme in graphemes(text) {
                    if grapheme == "\n" || grapheme == "\r\n" {
                        atoms.push(Atom::Newline);
                    } else {
                        atoms.push(Atom::Grapheme(grapheme));
                    }
                }
            }
            Fragment::Node { width } => atoms.push(Atom::Node(*width)),
        }
    }
    atoms
}

/// Headless layout on a fixed-width cell grid.
///
/// Widths are in cells and heights are `lines * line_height`.
///
/// ```
/// use clampkit::text::{CellMeasurer, Constraints, Fragment, TextMeasurer};
///
/// let measurer = CellMeasurer::new();
/// let content = [Fragment::text("the quick brown fox")];
/// let m = measurer.measure(&content, Constraints::clamped(10, 1)).unwrap();
/// assert!(m.overflows);
/// assert_eq!(m.height, 1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellMeasurer {
    wrap_mode: WrapMode,
    line_height: u32,
    tab_width: usize,
    width_method: WidthMethod,
}

impl Default for CellMeasurer {
    fn default() -> Self {
        Self {
            wrap_mode: WrapMode::Word,
            line_height: 1,
            tab_width: 4,
            width_method: WidthMethod::WcWidth,
        }
    }
}

impl CellMeasurer {
    /// Create a word-wrapping measurer with one-cell lines.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the wrap mode.
    #[must_use]
    pub fn with_wrap_mode(mut self, mode: WrapMode) -> Self {
        self.wrap_mode = mode;
        self
    }

    /// Set the height of one line. Zero is rejected.
    pub fn with_line_height(mut self, line_height: u32) -> Result<Self> {
        if line_height == 0 {
            return Err(Error::InvalidLineHeight(line_height));
        }
        self.line_height = line_height;
        Ok(self)
    }

    /// Set the tab stop width (minimum 1).
    #[must_use]
    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width.max(1);
        self
    }

    /// Set the width method for ambiguous-width characters.
    #[must_use]
    pub fn with_width_method(mut self, method: WidthMethod) -> Self {
        self.width_method = method;
        self
    }

    #[must_use]
    pub fn wrap_mode(&self) -> WrapMode {
        self.wrap_mode
    }

    #[must_use]
    pub fn line_height(&self) -> u32 {
        self.line_height
    }

    /// Number of lines `content` occupies at `width` cells.
    ///
    /// Empty content occupies no lines.
    #[must_use]
    pub fn line_count(&self, content: &[Fragment], width: u32) -> usize {
        let atoms = atoms(content);
        self.wrap(&atoms, width.max(1) as usize).len()
    }

    /// Lay `content` out at `width` cells and return the visual lines.
    ///
    /// Nodes render as spaces of their width; whitespace at soft breaks is
    /// trimmed.
    #[must_use]
    pub fn layout(&self, content: &[Fragment], width: u32) -> Vec<String> {
        let atoms = atoms(content);
        self.wrap(&atoms, width.max(1) as usize)
            .into_iter()
            .map(|run| {
                let mut end = run.end;
                if run.wrapped {
                    while end > run.start && atoms[end - 1].is_whitespace() {
                        end -= 1;
                    }
                }
                let mut line = String::new();
                for atom in &atoms[run.start..end] {
                    match atom {
                        Atom::Grapheme(g) => line.push_str(g),
                        Atom::Node(w) => line.push_str(&" ".repeat(*w as usize)),
                        Atom::Newline => {}
                    }
                }
                line
            })
            .collect()
    }

    fn atom_width(&self, atom: Atom<'_>, col: usize) -> usize {
        match atom {
            Atom::Grapheme(g) => grapheme_width(g, col, self.tab_width, self.width_method),
            Atom::Node(w) => w as usize,
            Atom::Newline => 0,
        }
    }

    fn wrap(&self, atoms: &[Atom<'_>], wrap_width: usize) -> Vec<LineRun> {
        let mut lines = Vec::new();
        if atoms.is_empty() {
            return lines;
        }

        let mut start = 0usize;
        let mut current_width = 0usize;
        let mut last_break: Option<usize> = None; // atom index after whitespace
        let mut i = 0usize;

        while i < atoms.len() {
            let atom = atoms[i];
            if atom == Atom::Newline {
                lines.push(LineRun {
                    start,
                    end: i,
                    wrapped: false,
                });
                i += 1;
                start = i;
                current_width = 0;
                last_break = None;
                continue;
            }

            let a_width = self.atom_width(atom, current_width);
            if self.wrap_mode == WrapMode::Word && atom.is_whitespace() {
                last_break = Some(i + 1);
            }

            if current_width + a_width > wrap_width && current_width > 0 {
                let break_index = match self.wrap_mode {
                    WrapMode::Word => last_break.unwrap_or(i),
                    WrapMode::Char => i,
                };

                lines.push(LineRun {
                    start,
                    end: break_index,
                    wrapped: true,
                });

                i = break_index;
                if self.wrap_mode == WrapMode::Word {
                    while i < atoms.len() && atoms[i].is_whitespace() {
                        i += 1;
                    }
                }
                start = i;
                current_width = 0;
                last_break = None;
                continue;
            }

            current_width += a_width;
            i += 1;
        }

        lines.push(LineRun {
            start,
            end: atoms.len(),
            wrapped: false,
        });
        lines
    }
}

impl TextMeasurer for CellMeasurer {
    fn measure(&self, content: &[Fragment], constraints: Constraints) -> Option<Measurement> {
        if constraints.width == 0 {
            return None;
        }
        let lines = self.line_count(content, constraints.width);
        let natural = u32::try_from(lines)
            .unwrap_or(u32::MAX)
            .saturating_mul(self.line_height);

        let measurement = match constraints.max_rows {
            Some(rows) => {
                let clamp = u32::try_from(rows)
                    .unwrap_or(u32::MAX)
                    .saturating_mul(self.line_height);
                Measurement {
                    overflows: natural > clamp,
                    height: natural.min(clamp),
                }
            }
            None => Measurement {
                overflows: false,
                height: natural,
            },
        };
        Some(measurement)
    }
}
