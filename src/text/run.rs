//! Runs: the building blocks of a tagged buffer.

use crate::catalog::{TagDefinition, TagId};
use crate::style::Style;
use crate::unicode::{WidthMethod, display_width_with_method};

/// Logical units occupied by one tag.
///
/// Tags are attachments: a single opaque unit whose label is not
/// addressable by the cursor.
pub const TAG_UNITS: usize = 1;

/// Character a renderer shows in place of an attachment.
pub const OBJECT_REPLACEMENT: char = '\u{FFFC}';

/// How a tag is drawn: its label, chip style, and chip width in columns.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedTag {
    pub label: String,
    pub style: Style,
    /// Label width plus padding on both sides.
    pub width: usize,
}

impl RenderedTag {
    #[must_use]
    pub fn new(label: impl Into<String>, style: Style, width: usize) -> Self {
        Self {
            label: label.into(),
            style,
            width,
        }
    }

    /// Render a catalog definition as a chip.
    #[must_use]
    pub fn for_definition(def: &TagDefinition, padding: usize, method: WidthMethod) -> Self {
        let width = display_width_with_method(&def.display_text, method) + padding * 2;
        Self::new(def.display_text.clone(), def.style, width)
    }
}

/// One tag occurrence in the buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct TagRun {
    pub tag_id: TagId,
    pub rendered: RenderedTag,
}

/// A stretch of the buffer with uniform content.
#[derive(Clone, Debug, PartialEq)]
pub enum Run {
    /// Typed prose, one unit per `char`.
    Plain(String),
    /// A single atomic tag.
    Tag(TagRun),
}

impl Run {
    /// Create a plain run.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain(text.into())
    }

    /// Create a tag run.
    #[must_use]
    pub fn tag(tag_id: impl Into<TagId>, rendered: RenderedTag) -> Self {
        Self::Tag(TagRun {
            tag_id: tag_id.into(),
            rendered,
        })
    }

    /// Number of logical units this run occupies.
    #[must_use]
    pub fn units(&self) -> usize {
        match self {
            Self::Plain(text) => text.chars().count(),
            Self::Tag(_) => TAG_UNITS,
        }
    }

    #[must_use]
    pub fn is_tag(&self) -> bool {
        matches!(self, Self::Tag(_))
    }

    #[must_use]
    pub fn as_plain(&self) -> Option<&str> {
        match self {
            Self::Plain(text) => Some(text),
            Self::Tag(_) => None,
        }
    }

    #[must_use]
    pub fn as_tag(&self) -> Option<&TagRun> {
        match self {
            Self::Plain(_) => None,
            Self::Tag(tag) => Some(tag),
        }
    }
}

/// The content of a single logical unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Unit<'a> {
    Char(char),
    Tag(&'a TagRun),
}
