//! Canonical string form of a tagged buffer.
//!
//! Tags are written as `$<display text>$` between verbatim prose. A literal
//! delimiter inside prose is doubled (`$$`), which keeps the form
//! unambiguous and lets [`parse_canonical`] rebuild the exact run sequence.

use crate::catalog::{TagCatalog, TagDefinition};
use crate::text::buffer::TagBuffer;
use crate::text::run::{RenderedTag, Run};

/// Default tag delimiter.
pub const DEFAULT_DELIMITER: char = '$';

/// Serialize a buffer to its canonical string.
///
/// The display text comes from the catalog; a tag whose id is no longer
/// in the catalog falls back to its rendered label.
#[must_use]
pub fn to_canonical_string(buffer: &TagBuffer, catalog: &TagCatalog, delimiter: char) -> String {
    let mut out = String::with_capacity(buffer.len());
    for (_, run) in buffer.runs() {
        match run {
            Run::Plain(text) => {
                for ch in text.chars() {
                    if ch == delimiter {
                        out.push(delimiter);
                    }
                    out.push(ch);
                }
            }
            Run::Tag(tag) => {
                let text = catalog
                    .lookup(tag.tag_id.as_str())
                    .map_or(tag.rendered.label.as_str(), |def| def.display_text.as_str());
                out.push(delimiter);
                out.push_str(text);
                out.push(delimiter);
            }
        }
    }
    out
}

/// Parse a canonical string back into a buffer.
///
/// `$$` becomes a literal delimiter and `$text$` becomes a tag when `text`
/// names a catalog display text; anything else is kept as prose. `render`
/// produces the chip for each recognized tag.
pub fn parse_canonical<F>(
    input: &str,
    catalog: &TagCatalog,
    delimiter: char,
    mut render: F,
) -> TagBuffer
where
    F: FnMut(&TagDefinition) -> RenderedTag,
{
    let width = delimiter.len_utf8();
    let mut runs = Vec::new();
    let mut plain = String::new();
    let mut rest = input;

    while let Some(pos) = rest.find(delimiter) {
        plain.push_str(&rest[..pos]);
        let after = &rest[pos + width..];

        if after.starts_with(delimiter) {
            plain.push(delimiter);
            rest = &after[width..];
            continue;
        }

        let tag = after
            .find(delimiter)
            .and_then(|end| catalog.find_by_display_text(&after[..end]).map(|def| (end, def)));
        match tag {
            Some((end, def)) => {
                if !plain.is_empty() {
                    runs.push(Run::Plain(std::mem::take(&mut plain)));
                }
                runs.push(Run::tag(def.id.clone(), render(def)));
                rest = &after[end + width..];
            }
            None => {
                // Not a placeholder: keep the delimiter and rescan after it.
                plain.push(delimiter);
                rest = after;
            }
        }
    }
    plain.push_str(rest);
    if !plain.is_empty() {
        runs.push(Run::Plain(plain));
    }

    TagBuffer::from_runs(runs)
}
