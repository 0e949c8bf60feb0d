//! Tag editing session: insertion at the cursor and atomic tag deletion.
//!
//! [`TagEditor`] owns one buffer, the span registry derived from it, and
//! the cursor. The host forwards taps and raw edits to it and reads back
//! the buffer, the cursor, and the canonical string. Nothing persists
//! between calls except that state; each call runs to completion.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use tagtext::{Rgba, Style, TagCatalog, TagEditor};
//!
//! let catalog = TagCatalog::from_labels(["Tag1", "Tag2"], Style::chip(Rgba::ORANGE)).unwrap();
//! let mut editor = TagEditor::new(Arc::new(catalog)).unwrap();
//!
//! let cursor = editor.apply_edit(0..0, "A").unwrap();
//! let cursor = editor.insert_tag_at_cursor("Tag1", cursor).unwrap();
//! editor.apply_edit(cursor..cursor, "B").unwrap();
//! assert_eq!(editor.canonical(), "A $Tag1$ B");
//!
//! // Backspace on the tag's leading edge removes it with its separator.
//! let tag_start = editor.spans()[0].start();
//! assert!(!editor.intercept_deletion(tag_start..tag_start, ""));
//! assert_eq!(editor.canonical(), "A B");
//! ```

use crate::catalog::{TagCatalog, TagDefinition, TagId};
use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_event, emit_log};
use crate::text::buffer::TagBuffer;
use crate::text::canonical::{DEFAULT_DELIMITER, parse_canonical, to_canonical_string};
use crate::text::registry::{SpanRegistry, TagSpan};
use crate::text::run::{RenderedTag, Run, TAG_UNITS, Unit};
use crate::unicode::WidthMethod;
use std::collections::HashSet;
use std::ops::Range;
use std::sync::Arc;

/// Default separator placed on each side of an inserted tag.
pub const DEFAULT_SEPARATOR: char = ' ';

/// Units added by one tag insertion: separator, tag, separator.
pub const INSERTED_UNITS: usize = TAG_UNITS + 2;

/// Editing session options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditorOptions {
    /// Unit placed before and after each inserted tag.
    pub separator: char,
    /// Delimiter of the canonical string form.
    pub delimiter: char,
    /// Refuse to insert a tag that is already in the buffer.
    pub unique_tags: bool,
    /// Columns added on each side of a chip label.
    pub chip_padding: usize,
    /// Width method for measuring chip labels.
    pub width_method: WidthMethod,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            delimiter: DEFAULT_DELIMITER,
            unique_tags: false,
            chip_padding: 1,
            width_method: WidthMethod::WcWidth,
        }
    }
}

impl EditorOptions {
    #[must_use]
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_unique_tags(mut self, unique: bool) -> Self {
        self.unique_tags = unique;
        self
    }

    #[must_use]
    pub fn with_chip_padding(mut self, padding: usize) -> Self {
        self.chip_padding = padding;
        self
    }

    #[must_use]
    pub fn with_width_method(mut self, method: WidthMethod) -> Self {
        self.width_method = method;
        self
    }
}

/// One editing session over a tagged buffer.
#[derive(Clone, Debug)]
pub struct TagEditor {
    catalog: Arc<TagCatalog>,
    options: EditorOptions,
    buffer: TagBuffer,
    registry: SpanRegistry,
    cursor: usize,
}

impl TagEditor {
    /// Create a session with default options.
    pub fn new(catalog: Arc<TagCatalog>) -> Result<Self> {
        Self::with_options(catalog, EditorOptions::default())
    }

    /// Create a session, rejecting catalogs whose display texts contain
    /// the configured delimiter.
    pub fn with_options(catalog: Arc<TagCatalog>, options: EditorOptions) -> Result<Self> {
        catalog.check_delimiter(options.delimiter)?;
        Ok(Self {
            catalog,
            options,
            buffer: TagBuffer::new(),
            registry: SpanRegistry::new(),
            cursor: 0,
        })
    }

    #[must_use]
    pub fn catalog(&self) -> &TagCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    #[must_use]
    pub fn buffer(&self) -> &TagBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn registry(&self) -> &SpanRegistry {
        &self.registry
    }

    /// Current tag spans, sorted by start.
    #[must_use]
    pub fn spans(&self) -> &[TagSpan] {
        self.registry.spans()
    }

    /// Tag ids in buffer order.
    #[must_use]
    pub fn selected_tags(&self) -> Vec<&TagId> {
        self.registry.tag_ids().collect()
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor, clamped to the buffer.
    pub fn set_cursor(&mut self, offset: usize) {
        self.cursor = offset.min(self.buffer.len());
    }

    /// Insert a tag at `cursor`, bracketed by separators.
    ///
    /// Returns the new cursor, just after the trailing separator. Unknown
    /// tags, duplicate tags (with [`EditorOptions::unique_tags`]) and
    /// out-of-range cursors change nothing.
    pub fn insert_tag_at_cursor(&mut self, tag_id: &str, cursor: usize) -> Result<usize> {
        let catalog = Arc::clone(&self.catalog);
        let def = catalog.lookup(tag_id).inspect_err(|_| {
            emit_log(LogLevel::Debug, &format!("ignoring tap on unknown tag {tag_id}"));
        })?;

        if self.options.unique_tags && self.registry.contains_tag(tag_id) {
            emit_log(
                LogLevel::Debug,
                &format!("ignoring tap on tag {tag_id}, already selected"),
            );
            return Err(Error::DuplicateTag(tag_id.to_string()));
        }

        let separator = self.options.separator.to_string();
        let rendered = self.render(def);
        self.buffer.insert_runs(
            cursor,
            [
                Run::Plain(separator.clone()),
                Run::tag(def.id.clone(), rendered),
                Run::Plain(separator),
            ],
        )?;
        self.on_buffer_changed();
        self.cursor = cursor + INSERTED_UNITS;

        emit_event(
            "tag_inserted",
            &format!("id={tag_id} start={} cursor={}", cursor + 1, self.cursor),
        );
        Ok(self.cursor)
    }

    /// Inspect a raw edit before the host applies it.
    ///
    /// Only a caret backspace (empty `range`, empty `replacement`) engages.
    /// With the caret on a tag's leading edge the tag and its leading
    /// separator are removed at once and `false` is returned so the host
    /// suppresses its own deletion. A backspace that would land inside a
    /// tag is also refused, without changes. Everything else is allowed.
    #[must_use]
    pub fn intercept_deletion(&mut self, range: Range<usize>, replacement: &str) -> bool {
        if !range.is_empty() || !replacement.is_empty() {
            return true;
        }
        let caret = range.start;

        if let Some(span) = self.registry.span_starting_at(caret).cloned() {
            return !self.remove_tag(&span);
        }

        let behind = caret
            .checked_sub(1)
            .and_then(|offset| self.registry.span_containing(offset));
        if let Some(span) = behind {
            emit_log(
                LogLevel::Debug,
                &format!("refusing partial deletion of tag {} at {caret}", span.tag_id),
            );
            return false;
        }
        true
    }

    /// Apply a raw edit from the host: replace `range` with plain `text`.
    ///
    /// Returns the cursor after the inserted text.
    pub fn apply_edit(&mut self, range: Range<usize>, text: &str) -> Result<usize> {
        let start = range.start;
        self.buffer.replace_range(range, text)?;
        self.on_buffer_changed();
        self.cursor = start + text.chars().count();
        Ok(self.cursor)
    }

    /// Intercept and, when allowed, apply a raw edit.
    ///
    /// A caret backspace deletes the unit before the caret. Returns the
    /// cursor after the edit.
    pub fn handle_edit(&mut self, range: Range<usize>, text: &str) -> Result<usize> {
        let revision = self.buffer.revision();
        if !self.intercept_deletion(range.clone(), text) {
            if self.buffer.revision() == revision {
                self.set_cursor(range.start);
            }
            return Ok(self.cursor);
        }

        if range.is_empty() && text.is_empty() {
            return match range.start {
                0 => {
                    self.cursor = 0;
                    Ok(0)
                }
                caret => self.apply_edit(caret - 1..caret, ""),
            };
        }
        self.apply_edit(range, text)
    }

    /// Rebuild the registry after any change to the buffer.
    ///
    /// A malformed buffer is treated as having no tags.
    pub fn on_buffer_changed(&mut self) {
        if let Err(err) = self.registry.rebuild(&self.buffer) {
            emit_log(
                LogLevel::Warn,
                &format!("tag registry rebuild failed, treating buffer as tag-free: {err}"),
            );
        }
        self.cursor = self.cursor.min(self.buffer.len());
        emit_event(
            "buffer_changed",
            &format!("len={} tags={}", self.buffer.len(), self.registry.len()),
        );
    }

    /// Canonical string of the buffer.
    #[must_use]
    pub fn canonical(&self) -> String {
        to_canonical_string(&self.buffer, &self.catalog, self.options.delimiter)
    }

    /// Replace the buffer with a parsed canonical string. The cursor moves
    /// to the end.
    ///
    /// With [`EditorOptions::unique_tags`] only the first occurrence of a
    /// tag is loaded as a tag; repeats stay in the text as `$label$` prose.
    pub fn load_canonical(&mut self, input: &str) {
        let options = self.options;
        let buffer = parse_canonical(input, &self.catalog, options.delimiter, |def| {
            RenderedTag::for_definition(def, options.chip_padding, options.width_method)
        });
        self.buffer = if options.unique_tags {
            demote_repeated_tags(&buffer, options.delimiter)
        } else {
            buffer
        };
        self.cursor = self.buffer.len();
        self.on_buffer_changed();
    }

    /// Remove all content.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.on_buffer_changed();
    }

    fn render(&self, def: &TagDefinition) -> RenderedTag {
        RenderedTag::for_definition(def, self.options.chip_padding, self.options.width_method)
    }

    /// Remove a tag plus its leading separator. When the removal starts at
    /// the beginning of the buffer the trailing separator goes too.
    fn remove_tag(&mut self, span: &TagSpan) -> bool {
        let separator = Unit::Char(self.options.separator);
        let mut start = span.start();
        let mut end = span.end();
        if start > 0 && self.buffer.unit_at(start - 1) == Some(separator) {
            start -= 1;
        }
        if start == 0 && self.buffer.unit_at(end) == Some(separator) {
            end += 1;
        }

        if let Err(err) = self.buffer.delete_range(start..end) {
            emit_log(
                LogLevel::Warn,
                &format!("could not remove tag {}: {err}", span.tag_id),
            );
            return false;
        }
        self.on_buffer_changed();
        self.cursor = start;

        emit_event(
            "tag_removed",
            &format!("id={} start={start} end={end}", span.tag_id),
        );
        true
    }
}

fn demote_repeated_tags(buffer: &TagBuffer, delimiter: char) -> TagBuffer {
    let mut seen = HashSet::new();
    let runs: Vec<Run> = buffer
        .runs()
        .map(|(_, run)| match run {
            Run::Tag(tag) if !seen.insert(&tag.tag_id) => {
                emit_log(
                    LogLevel::Debug,
                    &format!("keeping repeated tag {} as text", tag.tag_id),
                );
                Run::Plain(format!("{delimiter}{}{delimiter}", tag.rendered.label))
            }
            run => run.clone(),
        })
        .collect();
    TagBuffer::from_runs(runs)
}
