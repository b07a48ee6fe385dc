//! Measured multi-line truncation with an expand control.
//!
//! A [`Truncator`] decides whether a block of content fits in `rows` lines
//! at the current container width, and if not, finds the longest prefix
//! that still fits once an ellipsis and the expand label are appended.
//!
//! Each measurement forces a layout in a real host, so the work is split
//! into render passes. The host calls [`Truncator::tick`] once per pass
//! (after mounting whatever [`Truncator::render`] asked for) until it
//! returns `false`, or calls [`Truncator::settle`] when layout is
//! synchronous:
//!
//! ```text
//! None ──width>0 && len>0──▶ Prepare ──tick──▶ Start ──overflow──▶ NeedsEllipsis ─┐
//!                                                  └──fits / no metrics──▶ NoEllipsisNeeded
//!                                       binary search, one probe per tick ◀──┘
//! ```
//!
//! # Examples
//!
//! ```
//! use clampkit::text::{CellMeasurer, TruncateOptions, Truncator};
//!
//! let options = TruncateOptions::default().with_rows(1).with_expand_label("more");
//! let mut truncator =
//!     Truncator::new("the quick brown fox jumps", options, CellMeasurer::new()).unwrap();
//! truncator.set_container_width(15);
//! truncator.settle();
//!
//! let payload = truncator.render();
//! assert!(payload.needs_ellipsis);
//! assert_eq!(payload.to_plain_string(), "the quick…");
//! ```

use super::measure::{Constraints, TextMeasurer};
use super::span::{Fragment, TextSpan, plain_string};
use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_event, emit_log, emit_log_with};
use std::fmt;

/// Measurement lifecycle of a collapsed block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Nothing to measure: zero width or empty content.
    #[default]
    None,
    /// Inputs changed; the clamped full-content box mounts this pass.
    Prepare,
    /// The clamped box is laid out and can be measured.
    Start,
    /// Content overflows; searching for (or holding) the cut index.
    NeedsEllipsis,
    /// Content fits, or metrics were unavailable. Render as-is.
    NoEllipsisNeeded,
}

/// Measurement state for one content/width/rows combination.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TruncationState {
    /// Last container width reported by the host, 0 before first layout.
    pub measured_container_width: u32,
    pub phase: Phase,
    /// Binary search window over the cut index, inclusive on both ends.
    pub search_bounds: Option<(usize, usize)>,
    /// Height of the full content clamped to `rows` lines.
    pub baseline_height: u32,
    pub cut_index: Option<usize>,
}

impl TruncationState {
    fn reset(&mut self, phase: Phase) {
        self.phase = phase;
        self.search_bounds = None;
        self.baseline_height = 0;
        self.cut_index = None;
    }
}

/// Truncation configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TruncateOptions {
    /// Maximum number of lines while collapsed.
    pub rows: usize,
    /// Label of the control that expands the block.
    pub expand_label: String,
    /// Label of the control that collapses it again. Without one, expanding
    /// is permanent.
    pub collapse_label: Option<String>,
    /// Marker appended to the cut prefix.
    pub ellipsis: String,
    /// Start expanded.
    pub default_expanded: bool,
}

impl TruncateOptions {
    /// Set the row budget.
    #[must_use]
    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    /// Set the expand label.
    #[must_use]
    pub fn with_expand_label(mut self, label: impl Into<String>) -> Self {
        self.expand_label = label.into();
        self
    }

    /// Set the collapse label, enabling re-collapse.
    #[must_use]
    pub fn with_collapse_label(mut self, label: impl Into<String>) -> Self {
        self.collapse_label = Some(label.into());
        self
    }

    /// Set the ellipsis marker.
    #[must_use]
    pub fn with_ellipsis(mut self, ellipsis: impl Into<String>) -> Self {
        self.ellipsis = ellipsis.into();
        self
    }

    /// Start expanded.
    #[must_use]
    pub fn with_default_expanded(mut self, expanded: bool) -> Self {
        self.default_expanded = expanded;
        self
    }
}

impl Default for TruncateOptions {
    fn default() -> Self {
        Self {
            rows: 1,
            expand_label: "Expand".to_string(),
            collapse_label: None,
            ellipsis: "…".to_string(),
            default_expanded: false,
        }
    }
}

/// The control to render after the content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Toggle {
    Expand(String),
    Collapse(String),
}

impl Toggle {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Expand(label) | Self::Collapse(label) => label,
        }
    }
}

/// What the host should draw for the current pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderPayload {
    /// Content to draw. Ends with the ellipsis fragment when truncated.
    pub display_content: Vec<Fragment>,
    pub needs_ellipsis: bool,
    pub cut_index: Option<usize>,
    /// Clamp the box to this many lines (measurement in progress).
    pub clamp_rows: Option<usize>,
    /// Control to draw after the content, separated by one space.
    pub control: Option<Toggle>,
}

impl RenderPayload {
    /// The display content as a string, nodes rendered as U+FFFC.
    #[must_use]
    pub fn to_plain_string(&self) -> String {
        plain_string(&self.display_content, "\u{FFFC}")
    }
}

type ExpandCallback = Box<dyn FnMut(bool)>;

/// Expand/collapse controller driving the measurement state machine.
pub struct Truncator<M> {
    measurer: M,
    text: TextSpan,
    options: TruncateOptions,
    state: TruncationState,
    expanded: bool,
    on_expand_change: Option<ExpandCallback>,
}

impl<M: TextMeasurer> Truncator<M> {
    /// Create a truncator. A zero row budget is rejected.
    pub fn new(text: impl Into<TextSpan>, options: TruncateOptions, measurer: M) -> Result<Self> {
        if options.rows == 0 {
            return Err(Error::InvalidRows(options.rows));
        }
        let expanded = options.default_expanded;
        Ok(Self {
            measurer,
            text: text.into(),
            options,
            state: TruncationState::default(),
            expanded,
            on_expand_change: None,
        })
    }

    /// Register a callback invoked with the new expanded flag on each change.
    pub fn on_expand_change<F>(&mut self, callback: F)
    where
        F: FnMut(bool) + 'static,
    {
        self.on_expand_change = Some(Box::new(callback));
    }

    #[must_use]
    pub fn state(&self) -> &TruncationState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    #[must_use]
    pub fn text(&self) -> &TextSpan {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &TruncateOptions {
        &self.options
    }

    #[must_use]
    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Replace the content.
    pub fn set_text(&mut self, text: impl Into<TextSpan>) {
        self.text = text.into();
        self.invalidate();
    }

    /// Change the row budget. Zero is rejected and leaves the state alone.
    pub fn set_rows(&mut self, rows: usize) -> Result<()> {
        if rows == 0 {
            return Err(Error::InvalidRows(rows));
        }
        if rows != self.options.rows {
            self.options.rows = rows;
            self.invalidate();
        }
        Ok(())
    }

    /// Resize notification from the host.
    ///
    /// While expanded the width is only recorded; measuring resumes on
    /// collapse.
    pub fn set_container_width(&mut self, width: u32) {
        if width == self.state.measured_container_width {
            return;
        }
        self.state.measured_container_width = width;
        self.invalidate();
    }

    /// Discard any result and measure again from `Prepare`.
    pub fn remeasure(&mut self) {
        let phase = if self.state.measured_container_width > 0 && !self.text.is_empty() {
            Phase::Prepare
        } else {
            Phase::None
        };
        let from = self.state.phase;
        self.state.reset(phase);
        self.announce(from, phase);
    }

    fn invalidate(&mut self) {
        if !self.expanded {
            self.remeasure();
        }
    }

    /// Whether another render pass is needed before the output is final.
    #[must_use]
    pub fn needs_pass(&self) -> bool {
        if self.expanded {
            return false;
        }
        match self.state.phase {
            Phase::Prepare | Phase::Start => true,
            Phase::NeedsEllipsis => self.state.cut_index.is_none(),
            Phase::None | Phase::NoEllipsisNeeded => false,
        }
    }

    /// Advance one render pass. Returns `true` while more passes are needed.
    pub fn tick(&mut self) -> bool {
        if !self.needs_pass() {
            return false;
        }
        match self.state.phase {
            Phase::Prepare => self.transition(Phase::Start),
            Phase::Start => self.measure_clamped(),
            Phase::NeedsEllipsis => self.search_step(),
            Phase::None | Phase::NoEllipsisNeeded => {}
        }
        self.needs_pass()
    }

    /// Tick until no pass is needed. Returns the number of passes run.
    pub fn settle(&mut self) -> usize {
        let mut passes = 0;
        while self.needs_pass() {
            self.tick();
            passes += 1;
        }
        passes
    }

    fn measure_clamped(&mut self) {
        let constraints =
            Constraints::clamped(self.state.measured_container_width, self.options.rows);
        match self.measurer.measure(self.text.fragments(), constraints) {
            Some(m) if m.overflows => {
                self.state.baseline_height = m.height;
                self.state.search_bounds = Some((0, self.text.total_length()));
                self.transition(Phase::NeedsEllipsis);
            }
            Some(_) => self.transition(Phase::NoEllipsisNeeded),
            None => {
                emit_log(
                    LogLevel::Warn,
                    "truncate: measurement unavailable, rendering full text",
                );
                self.transition(Phase::NoEllipsisNeeded);
            }
        }
    }

    fn search_step(&mut self) {
        let Some((low, high)) = self.state.search_bounds else {
            self.transition(Phase::NoEllipsisNeeded);
            return;
        };
        if low == high {
            self.resolve(low);
            return;
        }

        let mid = (low + high).div_ceil(2);
        let probe = self.probe_content(mid);
        let constraints = Constraints::unbounded(self.state.measured_container_width);
        let Some(m) = self.measurer.measure(&probe, constraints) else {
            emit_log(
                LogLevel::Warn,
                "truncate: measurement lost during search, rendering full text",
            );
            self.state.search_bounds = None;
            self.transition(Phase::NoEllipsisNeeded);
            return;
        };

        let baseline = self.state.baseline_height;
        emit_log_with(LogLevel::Debug, || {
            format!(
                "truncate: probe mid={mid} height={} baseline={baseline} bounds=({low}, {high})",
                m.height
            )
        });

        if m.height > baseline {
            if high - low == 1 {
                self.resolve(low);
            } else {
                self.state.search_bounds = Some((low, mid));
            }
        } else if high - low == 1 {
            self.resolve(high);
        } else {
            self.state.search_bounds = Some((mid, high));
        }
    }

    fn resolve(&mut self, cut: usize) {
        self.state.search_bounds = Some((cut, cut));
        self.state.cut_index = Some(cut);
        emit_event("truncate.resolved", &format!("cut={cut}"));
    }

    /// Prefix of `len` units followed by the ellipsis, without the control.
    fn truncated_content(&self, len: usize) -> Vec<Fragment> {
        let mut content = self.text.prefix(len);
        content.push(Fragment::text(self.options.ellipsis.as_str()));
        content
    }

    /// What a resolved cut of `len` would render, control included.
    fn probe_content(&self, len: usize) -> Vec<Fragment> {
        let mut content = self.truncated_content(len);
        content.push(Fragment::text(" "));
        content.push(Fragment::text(self.options.expand_label.as_str()));
        content
    }

    fn transition(&mut self, to: Phase) {
        let from = self.state.phase;
        self.state.phase = to;
        self.announce(from, to);
    }

    fn announce(&self, from: Phase, to: Phase) {
        if from != to {
            emit_event("truncate.phase", &format!("{from:?}->{to:?}"));
        }
    }

    /// The payload for the current pass.
    #[must_use]
    pub fn render(&self) -> RenderPayload {
        let full = || self.text.fragments().to_vec();

        if self.expanded {
            return RenderPayload {
                display_content: full(),
                needs_ellipsis: false,
                cut_index: None,
                clamp_rows: None,
                control: self.options.collapse_label.clone().map(Toggle::Collapse),
            };
        }

        match (self.state.phase, self.state.cut_index) {
            (Phase::NeedsEllipsis, Some(cut)) => RenderPayload {
                display_content: self.truncated_content(cut),
                needs_ellipsis: true,
                cut_index: Some(cut),
                clamp_rows: None,
                control: Some(Toggle::Expand(self.options.expand_label.clone())),
            },
            (Phase::Prepare | Phase::Start | Phase::NeedsEllipsis, _) => RenderPayload {
                display_content: full(),
                needs_ellipsis: false,
                cut_index: None,
                clamp_rows: Some(self.options.rows),
                control: None,
            },
            (Phase::None | Phase::NoEllipsisNeeded, _) => RenderPayload {
                display_content: full(),
                needs_ellipsis: false,
                cut_index: None,
                clamp_rows: None,
                control: None,
            },
        }
    }

    /// Flip between expanded and collapsed.
    ///
    /// Returns `true` if the state changed. Collapsing needs a collapse
    /// label; without one the block stays expanded.
    pub fn toggle(&mut self) -> bool {
        if self.expanded {
            self.collapse()
        } else {
            self.expand()
        }
    }

    /// Expand the block. Returns `true` if it was collapsed.
    pub fn expand(&mut self) -> bool {
        if self.expanded {
            return false;
        }
        self.expanded = true;
        self.notify_expand_change();
        true
    }

    /// Collapse the block and measure again. Returns `true` if it was
    /// expanded and a collapse label is configured.
    pub fn collapse(&mut self) -> bool {
        if !self.expanded || self.options.collapse_label.is_none() {
            return false;
        }
        self.expanded = false;
        self.notify_expand_change();
        self.remeasure();
        true
    }

    fn notify_expand_change(&mut self) {
        let expanded = self.expanded;
        if let Some(callback) = self.on_expand_change.as_mut() {
            callback(expanded);
        }
    }
}

impl<M: fmt::Debug> fmt::Debug for Truncator<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Truncator")
            .field("measurer", &self.measurer)
            .field("text", &self.text)
            .field("options", &self.options)
            .field("state", &self.state)
            .field("expanded", &self.expanded)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::measure::{CellMeasurer, Measurement, NullMeasurer, WrapMode};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn char_measurer() -> CellMeasurer {
        CellMeasurer::new().with_wrap_mode(WrapMode::Char)
    }

    fn options() -> TruncateOptions {
        TruncateOptions::default().with_rows(2).with_expand_label("more")
    }

    /// Wraps a measurer and counts calls.
    #[derive(Debug)]
    struct Counting<M> {
        inner: M,
        calls: Cell<usize>,
    }

    impl<M: TextMeasurer> TextMeasurer for Counting<M> {
        fn measure(&self, content: &[Fragment], constraints: Constraints) -> Option<Measurement> {
            self.calls.set(self.calls.get() + 1);
            self.inner.measure(content, constraints)
        }
    }

    #[test]
    fn test_rejects_zero_rows() {
        let err = Truncator::new("x", TruncateOptions::default().with_rows(0), char_measurer())
            .unwrap_err();
        assert_eq!(err, Error::InvalidRows(0));
    }

    #[test]
    fn test_phase_stays_none_without_width_or_text() {
        let mut truncator = Truncator::new("hello", options(), char_measurer()).unwrap();
        assert_eq!(truncator.phase(), Phase::None);
        assert!(!truncator.tick());

        let mut empty = Truncator::new("", options(), char_measurer()).unwrap();
        empty.set_container_width(40);
        assert_eq!(empty.phase(), Phase::None);
        assert_eq!(empty.settle(), 0);
        assert_eq!(empty.render().clamp_rows, None);
    }

    #[test]
    fn test_phase_walk() {
        // 30 chars at width 10 and 2 rows overflows
        let text = "abcdefghijklmnopqrstuvwxyz0123";
        let mut truncator = Truncator::new(text, options(), char_measurer()).unwrap();
        truncator.set_container_width(10);
        assert_eq!(truncator.phase(), Phase::Prepare);
        assert_eq!(truncator.render().clamp_rows, Some(2));

        assert!(truncator.tick());
        assert_eq!(truncator.phase(), Phase::Start);

        assert!(truncator.tick());
        assert_eq!(truncator.phase(), Phase::NeedsEllipsis);
        assert_eq!(truncator.state().search_bounds, Some((0, 30)));
        assert_eq!(truncator.state().baseline_height, 2);

        truncator.settle();
        // "…" + " more" takes 6 cells, leaving 14 of the 20
        assert_eq!(truncator.state().cut_index, Some(14));
        let payload = truncator.render();
        assert!(payload.needs_ellipsis);
        assert_eq!(payload.to_plain_string(), "abcdefghijklmn…");
        assert_eq!(payload.control, Some(Toggle::Expand("more".to_string())));
        assert_eq!(payload.clamp_rows, None);
    }

    #[test]
    fn test_fitting_text_is_untouched() {
        let mut truncator = Truncator::new("short", options(), char_measurer()).unwrap();
        truncator.set_container_width(10);
        assert_eq!(truncator.settle(), 2);
        assert_eq!(truncator.phase(), Phase::NoEllipsisNeeded);
        let payload = truncator.render();
        assert!(!payload.needs_ellipsis);
        assert_eq!(payload.control, None);
        assert_eq!(payload.to_plain_string(), "short");
    }

    #[test]
    fn test_fail_open_without_metrics() {
        let mut truncator = Truncator::new("a".repeat(500), options(), NullMeasurer).unwrap();
        truncator.set_container_width(10);
        truncator.settle();
        assert_eq!(truncator.phase(), Phase::NoEllipsisNeeded);
        let payload = truncator.render();
        assert!(!payload.needs_ellipsis);
        assert_eq!(payload.display_content, vec![Fragment::text("a".repeat(500))]);
    }

    /// Reports an overflow for the clamped pass, then stops answering.
    struct LosesMetrics {
        calls: Cell<usize>,
    }

    impl TextMeasurer for LosesMetrics {
        fn measure(&self, _content: &[Fragment], constraints: Constraints) -> Option<Measurement> {
            self.calls.set(self.calls.get() + 1);
            match (self.calls.get(), constraints.max_rows) {
                (1, Some(rows)) => Some(Measurement {
                    overflows: true,
                    height: u32::try_from(rows).unwrap(),
                }),
                _ => None,
            }
        }
    }

    #[test]
    fn test_fail_open_when_metrics_lost_mid_search() {
        let measurer = LosesMetrics {
            calls: Cell::new(0),
        };
        let mut truncator = Truncator::new("a".repeat(200), options(), measurer).unwrap();
        truncator.set_container_width(10);

        truncator.tick();
        truncator.tick();
        assert_eq!(truncator.phase(), Phase::NeedsEllipsis);
        assert_eq!(truncator.state().search_bounds, Some((0, 200)));

        assert!(!truncator.tick());
        assert_eq!(truncator.phase(), Phase::NoEllipsisNeeded);
        assert_eq!(truncator.state().search_bounds, None);
        assert_eq!(truncator.state().cut_index, None);
        assert_eq!(truncator.measurer().calls.get(), 2);

        let payload = truncator.render();
        assert!(!payload.needs_ellipsis);
        assert_eq!(payload.control, None);
        assert_eq!(payload.clamp_rows, None);
        assert_eq!(payload.display_content, vec![Fragment::text("a".repeat(200))]);
    }

    #[test]
    fn test_search_is_logarithmic() {
        let measurer = Counting {
            inner: char_measurer(),
            calls: Cell::new(0),
        };
        let mut truncator = Truncator::new("x".repeat(1000), options(), measurer).unwrap();
        truncator.set_container_width(10);
        truncator.settle();
        assert!(truncator.state().cut_index.is_some());
        // One clamped measurement plus at most ceil(log2(1001)) + 1 probes
        assert!(truncator.measurer().calls.get() <= 12);
    }

    #[test]
    fn test_remeasure_is_idempotent() {
        let text = "the quick brown fox jumps over the lazy dog";
        let measurer = CellMeasurer::new();
        let mut truncator = Truncator::new(text, options(), measurer).unwrap();
        truncator.set_container_width(12);
        truncator.settle();
        let first = truncator.state().cut_index;
        assert!(first.is_some());

        truncator.remeasure();
        assert_eq!(truncator.phase(), Phase::Prepare);
        truncator.settle();
        assert_eq!(truncator.state().cut_index, first);
    }

    #[test]
    fn test_expand_only_without_collapse_label() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = Rc::clone(&seen);
        let mut truncator = Truncator::new("x".repeat(100), options(), char_measurer()).unwrap();
        truncator.on_expand_change(move |expanded| seen_clone.borrow_mut().push(expanded));
        truncator.set_container_width(10);
        truncator.settle();

        assert!(truncator.toggle());
        assert!(truncator.is_expanded());
        assert!(!truncator.toggle());
        assert!(truncator.is_expanded());
        assert_eq!(*seen.borrow(), vec![true]);

        let payload = truncator.render();
        assert_eq!(payload.control, None);
        assert!(!payload.needs_ellipsis);
    }

    #[test]
    fn test_collapse_remeasures() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = Rc::clone(&seen);
        let opts = options().with_collapse_label("less");
        let mut truncator = Truncator::new("x".repeat(100), opts, char_measurer()).unwrap();
        truncator.on_expand_change(move |expanded| seen_clone.borrow_mut().push(expanded));
        truncator.set_container_width(10);
        truncator.settle();
        let cut = truncator.state().cut_index;

        truncator.toggle();
        assert_eq!(
            truncator.render().control,
            Some(Toggle::Collapse("less".to_string()))
        );

        // Resizing while expanded only records the width
        truncator.set_container_width(20);
        assert_eq!(truncator.state().cut_index, cut);
        assert!(!truncator.needs_pass());

        assert!(truncator.toggle());
        assert_eq!(truncator.phase(), Phase::Prepare);
        truncator.settle();
        assert_eq!(truncator.state().measured_container_width, 20);
        // 40 cells minus "… more"
        assert_eq!(truncator.state().cut_index, Some(34));
        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn test_default_expanded() {
        let opts = options().with_default_expanded(true);
        let mut truncator = Truncator::new("x".repeat(100), opts, char_measurer()).unwrap();
        truncator.set_container_width(10);
        assert!(truncator.is_expanded());
        assert!(!truncator.needs_pass());
        assert_eq!(truncator.render().display_content.len(), 1);
    }

    #[test]
    fn test_set_rows_validates() {
        let mut truncator = Truncator::new("x".repeat(100), options(), char_measurer()).unwrap();
        truncator.set_container_width(10);
        truncator.settle();
        assert_eq!(truncator.set_rows(0), Err(Error::InvalidRows(0)));
        assert!(truncator.state().cut_index.is_some());

        truncator.set_rows(3).unwrap();
        assert_eq!(truncator.phase(), Phase::Prepare);
        truncator.settle();
        assert_eq!(truncator.state().cut_index, Some(24));
    }

    #[test]
    fn test_nodes_are_kept_whole() {
        let span = TextSpan::new()
            .push_text("abcdefgh")
            .push_node(4)
            .push_text("ijklmnopqrstuvwxyz");
        let mut truncator = Truncator::new(span, options(), char_measurer()).unwrap();
        truncator.set_container_width(10);
        truncator.settle();
        let payload = truncator.render();
        assert!(payload.needs_ellipsis);
        // The node does not fit after "abcdefgh" and opens line two, where
        // it plus "… more" fills all ten cells
        assert_eq!(payload.cut_index, Some(9));
        assert_eq!(payload.to_plain_string(), "abcdefgh\u{FFFC}…");
    }
}
