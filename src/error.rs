//! Error types for clampkit.
//!
//! The range and truncation algorithms themselves are total; only the
//! constructors that accept configuration can fail.

use std::fmt;

/// Result type alias for clampkit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for clampkit operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Page size of zero items.
    InvalidPageSize(usize),
    /// Row budget of zero lines for a truncated block.
    InvalidRows(usize),
    /// Line height of zero for a measurer.
    InvalidLineHeight(u32),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPageSize(size) => {
                write!(f, "invalid page size: {size} (must be at least 1)")
            }
            Self::InvalidRows(rows) => {
                write!(f, "invalid row count: {rows} (must be at least 1)")
            }
            Self::InvalidLineHeight(height) => {
                write!(f, "invalid line height: {height} (must be at least 1)")
            }
        }
    }
}

impl std::error::Error for Error {}
