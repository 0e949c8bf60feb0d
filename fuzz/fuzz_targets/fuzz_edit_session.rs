//! Fuzz target for editing sessions.
//!
//! Replays arbitrary taps and edits; the registry must always match a
//! fresh rebuild of the buffer.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use std::sync::Arc;
use tagtext::{SpanRegistry, Style, TagCatalog, TagEditor};

#[derive(Arbitrary, Debug)]
enum Action {
    Tap { tag: u8, at: u16 },
    Type { at: u16, text: String },
    Backspace { at: u16 },
    Delete { start: u16, end: u16 },
    Reload,
}

fuzz_target!(|actions: Vec<Action>| {
    let Ok(catalog) = TagCatalog::from_labels(["Tag1", "Tag2", "嘔吐"], Style::NONE) else {
        return;
    };
    let Ok(mut editor) = TagEditor::new(Arc::new(catalog)) else {
        return;
    };
    let ids = ["Tag1", "Tag2", "嘔吐", "missing"];

    for action in actions.iter().take(64) {
        let len = editor.buffer().len();
        let clamp = |at: u16| usize::from(at) % (len + 1);
        match action {
            Action::Tap { tag, at } => {
                let _ = editor.insert_tag_at_cursor(ids[usize::from(*tag) % ids.len()], clamp(*at));
            }
            Action::Type { at, text } => {
                let at = clamp(*at);
                let _ = editor.handle_edit(at..at, text);
            }
            Action::Backspace { at } => {
                let at = clamp(*at);
                let _ = editor.handle_edit(at..at, "");
            }
            Action::Delete { start, end } => {
                let (a, b) = (clamp(*start), clamp(*end));
                let _ = editor.handle_edit(a.min(b)..a.max(b), "");
            }
            Action::Reload => {
                let text = editor.canonical();
                editor.load_canonical(&text);
            }
        }

        let mut fresh = SpanRegistry::new();
        assert!(fresh.rebuild(editor.buffer()).is_ok());
        assert_eq!(&fresh, editor.registry());
        assert!(editor.cursor() <= editor.buffer().len());
    }
});
