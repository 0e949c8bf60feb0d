//! Error types for tagtext.

use std::fmt;

/// Result type alias for tagtext operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for tagtext operations.
///
/// Every operation that returns an error leaves the buffer, the span
/// registry and the cursor exactly as they were, so callers can drop the
/// error and treat the tap or keystroke as ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A tag id that is not present in the catalog.
    UnknownTag(String),
    /// A tag that is already in the buffer while unique tags are enforced.
    DuplicateTag(String),
    /// An offset or range outside the buffer bounds.
    OutOfRange { start: usize, end: usize, len: usize },
    /// A run sequence that violates the buffer invariants.
    MalformedSpan { offset: usize, reason: String },
    /// A catalog that cannot be constructed (duplicate id, bad display text).
    InvalidCatalog(String),
}

impl Error {
    /// Out-of-range error for a single offset.
    #[must_use]
    pub fn offset_out_of_range(offset: usize, len: usize) -> Self {
        Self::OutOfRange {
            start: offset,
            end: offset,
            len,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTag(id) => write!(f, "unknown tag: {id}"),
            Self::DuplicateTag(id) => write!(f, "tag already present: {id}"),
            Self::OutOfRange { start, end, len } => {
                if start == end {
                    write!(f, "offset {start} out of range for buffer of length {len}")
                } else {
                    write!(
                        f,
                        "range {start}..{end} out of range for buffer of length {len}"
                    )
                }
            }
            Self::MalformedSpan { offset, reason } => {
                write!(f, "malformed span at offset {offset}: {reason}")
            }
            Self::InvalidCatalog(reason) => write!(f, "invalid tag catalog: {reason}"),
        }
    }
}

impl std::error::Error for Error {}
