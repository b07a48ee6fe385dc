//! Mixed text and inline-node content.

use crate::unicode::{grapheme_count, grapheme_prefix};

/// One piece of truncatable content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fragment {
    /// Plain text. Counts one unit per grapheme cluster.
    Text(String),
    /// An opaque inline node (icon, badge, link) of fixed display width.
    /// Counts as one unit and is never split.
    Node { width: u32 },
}

impl Fragment {
    /// Create a text fragment.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create an opaque node fragment.
    #[must_use]
    pub fn node(width: u32) -> Self {
        Self::Node { width }
    }

    /// Length in truncation units.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Text(text) => grapheme_count(text),
            Self::Node { .. } => 1,
        }
    }

    /// Check if this fragment contributes no units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(text) if text.is_empty())
    }
}

impl From<&str> for Fragment {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// An ordered sequence of fragments.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextSpan {
    fragments: Vec<Fragment>,
}

impl TextSpan {
    /// Create an empty span.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text fragment.
    #[must_use]
    pub fn push_text(mut self, text: impl Into<String>) -> Self {
        self.fragments.push(Fragment::text(text));
        self
    }

    /// Append an opaque node.
    #[must_use]
    pub fn push_node(mut self, width: u32) -> Self {
        self.fragments.push(Fragment::node(width));
        self
    }

    /// The fragments in order.
    #[must_use]
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Total length in truncation units.
    #[must_use]
    pub fn total_length(&self) -> usize {
        self.fragments.iter().map(Fragment::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_length() == 0
    }

    /// The fragments covering the first `len` units.
    ///
    /// Text fragments are cut on a grapheme boundary; nodes are kept whole
    /// or dropped. A `len` past the end returns every fragment.
    #[must_use]
    pub fn prefix(&self, len: usize) -> Vec<Fragment> {
        let mut remaining = len;
        let mut out = Vec::new();
        for fragment in &self.fragments {
            if remaining == 0 {
                break;
            }
            let fragment_len = fragment.len();
            if fragment_len <= remaining {
                out.push(fragment.clone());
                remaining -= fragment_len;
                continue;
            }
            // Only text can be longer than one unit.
            if let Fragment::Text(text) = fragment {
                out.push(Fragment::Text(grapheme_prefix(text, remaining).to_string()));
            }
            remaining = 0;
        }
        out
    }

    /// Concatenate the text fragments, rendering each node as `node_marker`.
    #[must_use]
    pub fn to_plain_string(&self, node_marker: &str) -> String {
        plain_string(&self.fragments, node_marker)
    }
}

pub(crate) fn plain_string(fragments: &[Fragment], node_marker: &str) -> String {
    let mut out = String::new();
    for fragment in fragments {
        match fragment {
            Fragment::Text(text) => out.push_str(text),
            Fragment::Node { .. } => out.push_str(node_marker),
        }
    }
    out
}

impl From<&str> for TextSpan {
    fn from(text: &str) -> Self {
        Self::new().push_text(text)
    }
}

impl From<String> for TextSpan {
    fn from(text: String) -> Self {
        Self::new().push_text(text)
    }
}

impl FromIterator<Fragment> for TextSpan {
    fn from_iter<I: IntoIterator<Item = Fragment>>(iter: I) -> Self {
        Self {
            fragments: iter.into_iter().collect(),
        }
    }
}
