//! Property-based tests for the tag editor.
//!
//! Random editing sessions must keep the span registry in lockstep with the
//! buffer, and the canonical string must reproduce the buffer exactly.

use proptest::prelude::*;
use std::sync::Arc;
use tagtext::text::{
    DEFAULT_DELIMITER, INSERTED_UNITS, TAG_UNITS, Unit, parse_canonical, to_canonical_string,
};
use tagtext::{
    RenderedTag, SpanRegistry, Style, TagBuffer, TagCatalog, TagDefinition, TagEditor, WidthMethod,
};

const TAG_IDS: [&str; 4] = ["t1", "t2", "vomit", "missing"];

fn catalog() -> Arc<TagCatalog> {
    Arc::new(
        TagCatalog::new([
            TagDefinition::new("t1", "Tag1", Style::NONE),
            TagDefinition::new("t2", "Tag2", Style::NONE),
            TagDefinition::new("vomit", "嘔吐", Style::NONE),
        ])
        .unwrap(),
    )
}

fn render(def: &TagDefinition) -> RenderedTag {
    RenderedTag::for_definition(def, 1, WidthMethod::WcWidth)
}

/// Scale a random byte onto `0..=len`.
fn scale(p: u8, len: usize) -> usize {
    len * usize::from(p) / usize::from(u8::MAX)
}

// ============================================================================
// Strategies
// ============================================================================

/// Short prose, including delimiters and wide characters.
fn prose() -> impl Strategy<Value = String> {
    "[a-zA-Z $#日本]{0,6}"
}

#[derive(Clone, Debug)]
enum Op {
    Type(u8, String),
    Tag(u8, usize),
    Backspace(u8),
    Delete(u8, u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<u8>(), prose()).prop_map(|(p, text)| Op::Type(p, text)),
        (any::<u8>(), 0..TAG_IDS.len()).prop_map(|(p, idx)| Op::Tag(p, idx)),
        any::<u8>().prop_map(Op::Backspace),
        (any::<u8>(), any::<u8>()).prop_map(|(a, b)| Op::Delete(a, b)),
    ]
}

fn ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op(), 0..40)
}

fn apply(editor: &mut TagEditor, op: &Op) {
    let len = editor.buffer().len();
    match op {
        Op::Type(p, text) => {
            let at = scale(*p, len);
            let _ = editor.handle_edit(at..at, text);
        }
        Op::Tag(p, idx) => {
            let _ = editor.insert_tag_at_cursor(TAG_IDS[*idx], scale(*p, len));
        }
        Op::Backspace(p) => {
            let at = scale(*p, len);
            let _ = editor.handle_edit(at..at, "");
        }
        Op::Delete(a, b) => {
            let (a, b) = (scale(*a, len), scale(*b, len));
            let _ = editor.handle_edit(a.min(b)..a.max(b), "");
        }
    }
}

fn check_consistent(editor: &TagEditor) -> Result<(), TestCaseError> {
    let buffer = editor.buffer();
    let spans = editor.spans();

    for pair in spans.windows(2) {
        prop_assert!(
            pair[0].end() <= pair[1].start(),
            "spans out of order or overlapping: {:?}",
            pair
        );
    }
    for span in spans {
        prop_assert_eq!(span.len(), TAG_UNITS);
        prop_assert!(span.end() <= buffer.len());
        match buffer.unit_at(span.start()) {
            Some(Unit::Tag(tag)) => {
                prop_assert_eq!(&tag.tag_id, &span.tag_id);
            }
            other => {
                prop_assert!(false, "span {:?} covers {:?}", span, other);
            }
        }
    }

    let tag_runs = buffer.runs().filter(|(_, run)| run.is_tag()).count();
    prop_assert_eq!(spans.len(), tag_runs);
    prop_assert!(editor.cursor() <= buffer.len());
    prop_assert_eq!(buffer.rendered_text().chars().count(), buffer.len());

    let mut fresh = SpanRegistry::new();
    prop_assert!(fresh.rebuild(buffer).is_ok());
    prop_assert_eq!(&fresh, editor.registry());
    Ok(())
}

// ============================================================================
// Registry Properties
// ============================================================================

proptest! {
    /// Spans stay sorted, disjoint and in sync with the buffer after every step.
    #[test]
    fn registry_tracks_buffer(ops in ops()) {
        let mut editor = TagEditor::new(catalog()).unwrap();
        for op in &ops {
            apply(&mut editor, op);
            check_consistent(&editor)?;
        }
    }

    /// Rebuilding twice from the same buffer yields the same registry.
    #[test]
    fn rebuild_is_idempotent(ops in ops()) {
        let mut editor = TagEditor::new(catalog()).unwrap();
        for op in &ops {
            apply(&mut editor, op);
        }
        let mut first = SpanRegistry::new();
        first.rebuild(editor.buffer()).unwrap();
        let mut second = first.clone();
        second.rebuild(editor.buffer()).unwrap();
        prop_assert_eq!(first, second);
    }
}

// ============================================================================
// Insertion and Deletion Properties
// ============================================================================

proptest! {
    /// A successful insert grows the buffer by exactly three units and one span.
    #[test]
    fn insert_adds_one_span(ops in ops(), p in any::<u8>(), idx in 0..3usize) {
        let mut editor = TagEditor::new(catalog()).unwrap();
        for op in &ops {
            apply(&mut editor, op);
        }
        let len = editor.buffer().len();
        let tags = editor.spans().len();
        let at = scale(p, len);

        let cursor = editor.insert_tag_at_cursor(TAG_IDS[idx], at).unwrap();
        prop_assert_eq!(cursor, at + INSERTED_UNITS);
        prop_assert_eq!(editor.buffer().len(), len + INSERTED_UNITS);
        prop_assert_eq!(editor.spans().len(), tags + 1);
        prop_assert!(editor.registry().span_starting_at(at + 1).is_some());
    }

    /// Backspace on a tag's leading edge removes exactly that tag.
    #[test]
    fn leading_edge_backspace_removes_one_tag(ops in ops(), pick in any::<u8>()) {
        let mut editor = TagEditor::new(catalog()).unwrap();
        for op in &ops {
            apply(&mut editor, op);
        }
        prop_assume!(!editor.spans().is_empty());
        let index = scale(pick, editor.spans().len() - 1);
        let span = editor.spans()[index].clone();
        let tags = editor.spans().len();
        let len = editor.buffer().len();

        prop_assert!(!editor.intercept_deletion(span.start()..span.start(), ""));
        prop_assert_eq!(editor.spans().len(), tags - 1);
        let removed = len - editor.buffer().len();
        prop_assert!((TAG_UNITS..=TAG_UNITS + 2).contains(&removed));
        check_consistent(&editor)?;
    }
}

// ============================================================================
// Canonical Round Trip
// ============================================================================

proptest! {
    /// Buffers built from plain and tag inserts survive serialize then parse.
    #[test]
    fn canonical_round_trip(
        pieces in prop::collection::vec((prose(), prop::option::of(0..3usize), any::<u8>()), 0..12)
    ) {
        let catalog = catalog();
        let mut buffer = TagBuffer::new();
        for (text, tag, p) in &pieces {
            let at = scale(*p, buffer.len());
            buffer.insert_plain(text, at).unwrap();
            if let Some(idx) = tag {
                let def = catalog.lookup(TAG_IDS[*idx]).unwrap();
                buffer.insert_tag(def.id.clone(), render(def), at).unwrap();
            }
        }

        let text = to_canonical_string(&buffer, &catalog, DEFAULT_DELIMITER);
        let parsed = parse_canonical(&text, &catalog, DEFAULT_DELIMITER, render);
        prop_assert_eq!(parsed, buffer);
    }

    /// A session reloaded from its canonical string has the same spans.
    #[test]
    fn reload_preserves_spans(ops in ops()) {
        let mut editor = TagEditor::new(catalog()).unwrap();
        for op in &ops {
            apply(&mut editor, op);
        }
        let mut reloaded = TagEditor::new(catalog()).unwrap();
        reloaded.load_canonical(&editor.canonical());
        prop_assert_eq!(reloaded.spans(), editor.spans());
        prop_assert_eq!(reloaded.buffer(), editor.buffer());
        prop_assert_eq!(reloaded.canonical(), editor.canonical());
    }
}
