//! Tag span registry derived from a [`TagBuffer`].
//!
//! The registry is never patched in place: after any mutation it is
//! rebuilt by scanning the buffer's runs left to right, so it cannot drift
//! from the buffer it describes.

use crate::catalog::TagId;
use crate::error::{Error, Result};
use crate::text::buffer::TagBuffer;
use crate::text::run::Run;
use std::ops::Range;

/// The offset range occupied by one tag occurrence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagSpan {
    /// Half-open unit range in the buffer.
    pub range: Range<usize>,
    pub tag_id: TagId,
}

impl TagSpan {
    #[must_use]
    pub fn new(range: Range<usize>, tag_id: impl Into<TagId>) -> Self {
        Self {
            range,
            tag_id: tag_id.into(),
        }
    }

    #[must_use]
    pub fn start(&self) -> usize {
        self.range.start
    }

    #[must_use]
    pub fn end(&self) -> usize {
        self.range.end
    }

    /// Get the length in units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.range.end - self.range.start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.range.start >= self.range.end
    }

    /// Check if this span contains a position.
    #[must_use]
    pub fn contains(&self, pos: usize) -> bool {
        self.range.contains(&pos)
    }

    /// Check if this span overlaps with another.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.range.start < other.range.end && other.range.start < self.range.end
    }
}

/// Ordered, non-overlapping list of the tags currently in a buffer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpanRegistry {
    spans: Vec<TagSpan>,
}

impl SpanRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a buffer.
    pub fn rebuild(&mut self, buffer: &TagBuffer) -> Result<()> {
        self.rebuild_from_runs(buffer.runs().map(|(_, run)| run), buffer.len())
    }

    /// Rebuild from a run sequence that should cover `expected_len` units.
    ///
    /// On [`Error::MalformedSpan`] the registry is left empty.
    pub fn rebuild_from_runs<'a, I>(&mut self, runs: I, expected_len: usize) -> Result<()>
    where
        I: IntoIterator<Item = &'a Run>,
    {
        match scan(runs, expected_len) {
            Ok(spans) => {
                self.spans = spans;
                Ok(())
            }
            Err(err) => {
                self.spans.clear();
                Err(err)
            }
        }
    }

    /// The span that starts exactly at `offset`.
    ///
    /// This is not a containment query: a backspace only removes a whole
    /// tag when the caret sits on the tag's leading edge.
    #[must_use]
    pub fn span_starting_at(&self, offset: usize) -> Option<&TagSpan> {
        self.spans
            .binary_search_by_key(&offset, TagSpan::start)
            .ok()
            .map(|idx| &self.spans[idx])
    }

    /// The span whose range contains `offset`.
    #[must_use]
    pub fn span_containing(&self, offset: usize) -> Option<&TagSpan> {
        let idx = self.spans.partition_point(|span| span.end() <= offset);
        self.spans.get(idx).filter(|span| span.contains(offset))
    }

    /// Check whether any span carries `tag_id`.
    #[must_use]
    pub fn contains_tag(&self, tag_id: &str) -> bool {
        self.spans.iter().any(|span| span.tag_id.as_str() == tag_id)
    }

    /// Tag ids in buffer order.
    pub fn tag_ids(&self) -> impl Iterator<Item = &TagId> {
        self.spans.iter().map(|span| &span.tag_id)
    }

    #[must_use]
    pub fn spans(&self) -> &[TagSpan] {
        &self.spans
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

fn scan<'a, I>(runs: I, expected_len: usize) -> Result<Vec<TagSpan>>
where
    I: IntoIterator<Item = &'a Run>,
{
    let mut spans = Vec::new();
    let mut offset = 0;
    for run in runs {
        let units = run.units();
        if units == 0 {
            return Err(Error::MalformedSpan {
                offset,
                reason: "run has no units".to_string(),
            });
        }
        if let Run::Tag(tag) = run {
            spans.push(TagSpan::new(offset..offset + units, tag.tag_id.clone()));
        }
        offset += units;
    }
    if offset != expected_len {
        return Err(Error::MalformedSpan {
            offset,
            reason: format!("runs cover {offset} units but the buffer holds {expected_len}"),
        });
    }
    Ok(spans)
}
