//! `tagtext` - tagged rich-text editing core
//!
//! Keeps a rich buffer of typed prose and atomic tag tokens in sync with
//! the ordered list of tag spans it contains. Hosts (a mobile screen, a
//! terminal UI, a server-side session) forward taps and keystrokes to a
//! [`TagEditor`] and read back the buffer, the cursor, and the canonical
//! `$Tag$` string.

// Crate-level lint configuration
#![allow(clippy::cast_possible_truncation)] // Intentional color channel casts
#![allow(clippy::cast_sign_loss)] // Intentional color channel casts
#![allow(clippy::module_name_repetitions)] // Allow text::TagBuffer etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::suboptimal_flops)] // Standard math notation is clearer than mul_add
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::redundant_clone)] // Clones in tests for clarity are fine

pub mod catalog;
pub mod color;
pub mod error;
pub mod event;
pub mod style;
pub mod text;
pub mod unicode;

// Re-export core types at crate root
pub use catalog::{TagCatalog, TagDefinition, TagId};
pub use color::Rgba;
pub use error::{Error, Result};
pub use event::{
    LogLevel, clear_event_callback, clear_log_callback, emit_event, emit_log, set_event_callback,
    set_log_callback,
};
pub use style::{Style, TextAttributes};

// Re-export commonly used types
pub use text::{
    EditorOptions, RenderedTag, Run, SpanRegistry, TagBuffer, TagEditor, TagRun, TagSpan,
};
pub use unicode::WidthMethod;
