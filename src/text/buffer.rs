//! Run-based buffer of plain text and atomic tags.
//!
//! [`TagBuffer`] stores an ordered sequence of [`Run`]s. Offsets are
//! logical units: one per `char` of plain text and [`TAG_UNITS`] per tag.
//! The buffer keeps itself normalized after every mutation:
//!
//! - no empty plain runs
//! - no two adjacent plain runs (they are merged)
//! - the cached length equals the sum of run units
//!
//! Every mutation validates its offsets first and leaves the buffer
//! untouched when it returns an error.
//!
//! [`TAG_UNITS`]: super::TAG_UNITS

use crate::catalog::TagId;
use crate::error::{Error, Result};
use crate::text::run::{OBJECT_REPLACEMENT, RenderedTag, Run, Unit};
use std::ops::Range;

/// Tagged rich-text buffer.
#[derive(Clone, Debug, Default)]
pub struct TagBuffer {
    runs: Vec<Run>,
    len: usize,
    revision: u64,
}

impl TagBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer holding a single plain run.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self::from_runs([Run::plain(text)])
    }

    /// Create a buffer from runs, normalizing them.
    #[must_use]
    pub fn from_runs(runs: impl IntoIterator<Item = Run>) -> Self {
        let runs: Vec<Run> = runs.into_iter().collect();
        let len = runs.iter().map(Run::units).sum();
        let mut buffer = Self {
            runs,
            len,
            revision: 0,
        };
        buffer.normalize();
        buffer
    }

    /// Length in logical units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of runs.
    #[must_use]
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Get the buffer revision (increments on content changes).
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Iterate over runs with their offset ranges.
    ///
    /// The iterator is lazy and `Clone`, so a consumer can restart a scan
    /// from any point without touching the buffer.
    #[must_use]
    pub fn runs(&self) -> Runs<'_> {
        Runs {
            inner: self.runs.iter(),
            offset: 0,
        }
    }

    /// Content of the unit at `offset`.
    #[must_use]
    pub fn unit_at(&self, offset: usize) -> Option<Unit<'_>> {
        let (range, run) = self.runs().find(|(range, _)| range.contains(&offset))?;
        match run {
            Run::Plain(text) => text.chars().nth(offset - range.start).map(Unit::Char),
            Run::Tag(tag) => Some(Unit::Tag(tag)),
        }
    }

    /// Text as a renderer sees it: prose with U+FFFC for each tag.
    #[must_use]
    pub fn rendered_text(&self) -> String {
        let mut out = String::with_capacity(self.len);
        for run in &self.runs {
            match run {
                Run::Plain(text) => out.push_str(text),
                Run::Tag(_) => out.push(OBJECT_REPLACEMENT),
            }
        }
        out
    }

    /// Insert plain text at `at`.
    pub fn insert_plain(&mut self, text: &str, at: usize) -> Result<()> {
        self.insert_runs(at, [Run::plain(text)])
    }

    /// Insert a single atomic tag at `at`.
    pub fn insert_tag(
        &mut self,
        tag_id: impl Into<TagId>,
        rendered: RenderedTag,
        at: usize,
    ) -> Result<()> {
        self.insert_runs(at, [Run::tag(tag_id, rendered)])
    }

    /// Insert several runs at `at` as one mutation.
    pub fn insert_runs(&mut self, at: usize, runs: impl IntoIterator<Item = Run>) -> Result<()> {
        if at > self.len {
            return Err(Error::offset_out_of_range(at, self.len));
        }
        let runs: Vec<Run> = runs.into_iter().filter(|run| run.units() > 0).collect();
        if runs.is_empty() {
            return Ok(());
        }

        let added: usize = runs.iter().map(Run::units).sum();
        let idx = self.split_at(at);
        self.runs.splice(idx..idx, runs);
        self.len += added;
        self.normalize();
        self.bump_revision();
        Ok(())
    }

    /// Remove `range`, returning the removed runs.
    pub fn delete_range(&mut self, range: Range<usize>) -> Result<Vec<Run>> {
        self.check_range(&range)?;
        if range.is_empty() {
            return Ok(Vec::new());
        }

        let first = self.split_at(range.start);
        let last = self.split_at(range.end);
        let removed: Vec<Run> = self.runs.drain(first..last).collect();
        self.len -= range.len();
        self.normalize();
        self.bump_revision();
        Ok(removed)
    }

    /// Replace `range` with plain text.
    pub fn replace_range(&mut self, range: Range<usize>, text: &str) -> Result<()> {
        self.check_range(&range)?;
        let start = range.start;
        self.delete_range(range)?;
        self.insert_plain(text, start)
    }

    /// Clear all content.
    pub fn clear(&mut self) {
        self.runs.clear();
        self.len = 0;
        self.bump_revision();
    }

    fn check_range(&self, range: &Range<usize>) -> Result<()> {
        if range.start > range.end || range.end > self.len {
            return Err(Error::OutOfRange {
                start: range.start,
                end: range.end,
                len: self.len,
            });
        }
        Ok(())
    }

    /// Make `offset` a run boundary and return the index of the run that
    /// starts there (or `runs.len()` at the end of the buffer).
    fn split_at(&mut self, offset: usize) -> usize {
        let mut acc = 0;
        for idx in 0..self.runs.len() {
            if offset == acc {
                return idx;
            }
            let units = self.runs[idx].units();
            if offset < acc + units {
                if let Run::Plain(text) = &mut self.runs[idx] {
                    let byte = char_to_byte_idx(text, offset - acc);
                    let tail = text.split_off(byte);
                    self.runs.insert(idx + 1, Run::Plain(tail));
                }
                return idx + 1;
            }
            acc += units;
        }
        self.runs.len()
    }

    fn normalize(&mut self) {
        let mut merged: Vec<Run> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            match run {
                Run::Plain(text) if text.is_empty() => {}
                Run::Plain(text) => {
                    if let Some(Run::Plain(prev)) = merged.last_mut() {
                        prev.push_str(&text);
                    } else {
                        merged.push(Run::Plain(text));
                    }
                }
                tag @ Run::Tag(_) => merged.push(tag),
            }
        }
        self.runs = merged;
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    #[cfg(test)]
    pub(crate) fn runs_mut(&mut self) -> &mut Vec<Run> {
        &mut self.runs
    }
}

impl PartialEq for TagBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.runs == other.runs
    }
}

/// Iterator over `(offset range, run)` pairs in offset order.
#[derive(Clone, Debug)]
pub struct Runs<'a> {
    inner: std::slice::Iter<'a, Run>,
    offset: usize,
}

impl<'a> Iterator for Runs<'a> {
    type Item = (Range<usize>, &'a Run);

    fn next(&mut self) -> Option<Self::Item> {
        let run = self.inner.next()?;
        let start = self.offset;
        self.offset += run.units();
        Some((start..self.offset, run))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Runs<'_> {}

fn char_to_byte_idx(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(byte_idx, _)| byte_idx)
}
