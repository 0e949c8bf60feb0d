//! Tagged text storage and editing.
//!
//! This module holds the synchronization core between a rich buffer of
//! plain runs and atomic tag runs and the ordered list of tag spans derived
//! from it.
//!
//! Key types:
//!
//! - [`TagBuffer`]: Run-based buffer with unit offsets
//! - [`SpanRegistry`]: Tag spans recomputed from the buffer after each edit
//! - [`TagEditor`]: Session object that inserts tags at the cursor and
//!   deletes them atomically
//!
//! # Examples
//!
//! ## Building a buffer by hand
//!
//! ```
//! use tagtext::text::{RenderedTag, SpanRegistry, TagBuffer};
//! use tagtext::Style;
//!
//! let mut buffer = TagBuffer::with_text("A B");
//! buffer.insert_tag("t1", RenderedTag::new("Tag1", Style::NONE, 6), 2).unwrap();
//! buffer.insert_plain(" ", 3).unwrap();
//! assert_eq!(buffer.rendered_text(), "A \u{FFFC} B");
//! assert_eq!(buffer.len(), 5);
//!
//! let mut registry = SpanRegistry::new();
//! registry.rebuild(&buffer).unwrap();
//! assert_eq!(registry.spans()[0].range, 2..3);
//! ```

mod buffer;
mod canonical;
mod editor;
mod registry;
mod run;

pub use buffer::{Runs, TagBuffer};
pub use canonical::{DEFAULT_DELIMITER, parse_canonical, to_canonical_string};
pub use editor::{DEFAULT_SEPARATOR, EditorOptions, INSERTED_UNITS, TagEditor};
pub use registry::{SpanRegistry, TagSpan};
pub use run::{OBJECT_REPLACEMENT, RenderedTag, Run, TAG_UNITS, TagRun, Unit};
