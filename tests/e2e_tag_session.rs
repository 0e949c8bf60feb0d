//! End-to-end tag session with library logs routed to tracing.
//!
//! Drives a full compose session the way a host would: taps from a tag
//! picker, typed prose, backspaces, and a save/reload through the canonical
//! string. The log and event callbacks are process-global, so the whole
//! session runs inside one test.

#![allow(clippy::uninlined_format_args)]

use std::sync::{Arc, Mutex};
use tagtext::{
    EditorOptions, Error, LogLevel, Rgba, Style, TagCatalog, TagDefinition, TagEditor,
    clear_event_callback, clear_log_callback, set_event_callback, set_log_callback,
};
use tracing::{Level, debug, error, info, warn};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_test_writer()
        .try_init();
}

/// Forward library logs into tracing and collect emitted events.
fn install_bridge() -> (Arc<Mutex<Vec<(LogLevel, String)>>>, Arc<Mutex<Vec<String>>>) {
    let logs = Arc::new(Mutex::new(Vec::new()));
    let events = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&logs);
    set_log_callback(move |level, message| {
        match level {
            LogLevel::Debug => debug!(target: "tagtext", "{message}"),
            LogLevel::Info => info!(target: "tagtext", "{message}"),
            LogLevel::Warn => warn!(target: "tagtext", "{message}"),
            LogLevel::Error => error!(target: "tagtext", "{message}"),
        }
        sink.lock().unwrap().push((level, message.to_string()));
    });

    let sink = Arc::clone(&events);
    set_event_callback(move |name, data| {
        debug!(target: "tagtext::event", event = name, data = data);
        sink.lock().unwrap().push(name.to_string());
    });

    (logs, events)
}

fn catalog() -> Arc<TagCatalog> {
    let chip = Style::chip(Rgba::ORANGE);
    Arc::new(
        TagCatalog::new([
            TagDefinition::new("urgent", "Urgent", chip),
            TagDefinition::new("vomit", "嘔吐", chip),
            TagDefinition::new("fever", "Fever", chip.with_bold()),
        ])
        .unwrap(),
    )
}

#[test]
fn test_e2e_compose_session() {
    init_logging();
    let (logs, events) = install_bridge();

    let options = EditorOptions::default().with_unique_tags(true);
    let mut editor = TagEditor::with_options(catalog(), options).unwrap();
    info!(tags = editor.catalog().len(), "session started");

    // Type, then tap two tags from the picker.
    let cursor = editor.handle_edit(0..0, "Patient reports").unwrap();
    let cursor = editor.insert_tag_at_cursor("vomit", cursor).unwrap();
    let cursor = editor.handle_edit(cursor..cursor, "and").unwrap();
    let cursor = editor.insert_tag_at_cursor("fever", cursor).unwrap();
    assert_eq!(editor.canonical(), "Patient reports $嘔吐$ and $Fever$ ");
    assert_eq!(cursor, editor.buffer().len());
    info!(canonical = %editor.canonical(), "composed");

    // A second tap on a selected tag and a tap on a retired tag are ignored.
    assert!(matches!(
        editor.insert_tag_at_cursor("fever", cursor),
        Err(Error::DuplicateTag(_))
    ));
    assert!(matches!(
        editor.insert_tag_at_cursor("retired", cursor),
        Err(Error::UnknownTag(_))
    ));
    assert_eq!(editor.spans().len(), 2);

    // Backspace from the end: the trailing separator, then a veto right
    // after the chip, then the chip on its leading edge.
    let cursor = editor.handle_edit(cursor..cursor, "").unwrap();
    let vetoed = editor.handle_edit(cursor..cursor, "").unwrap();
    assert_eq!(vetoed, cursor);
    assert_eq!(editor.spans().len(), 2);
    let fever_start = editor.spans()[1].start();
    let cursor = editor.handle_edit(fever_start..fever_start, "").unwrap();
    assert_eq!(cursor, fever_start - 1);
    assert_eq!(editor.canonical(), "Patient reports $嘔吐$ and");
    let selected: Vec<&str> = editor
        .selected_tags()
        .into_iter()
        .map(|id| id.as_str())
        .collect();
    assert_eq!(selected, vec!["vomit"]);

    // Save and reload into a fresh session.
    let saved = editor.canonical();
    let mut reloaded = TagEditor::with_options(catalog(), options).unwrap();
    reloaded.load_canonical(&saved);
    assert_eq!(reloaded.buffer(), editor.buffer());
    assert_eq!(reloaded.spans(), editor.spans());
    assert_eq!(reloaded.cursor(), reloaded.buffer().len());

    clear_log_callback();
    clear_event_callback();

    let logs = logs.lock().unwrap();
    let events = events.lock().unwrap();
    info!(logs = logs.len(), events = events.len(), "session finished");

    assert!(
        logs.iter()
            .any(|(level, msg)| *level == LogLevel::Debug && msg.contains("already selected")),
        "duplicate tap should be logged: {:?}",
        logs
    );
    assert!(logs.iter().any(|(_, msg)| msg.contains("unknown tag retired")));
    assert!(logs.iter().any(|(_, msg)| msg.contains("refusing partial deletion")));
    assert!(logs.iter().all(|(level, _)| *level < LogLevel::Warn));

    assert_eq!(events.iter().filter(|name| *name == "tag_inserted").count(), 2);
    assert_eq!(events.iter().filter(|name| *name == "tag_removed").count(), 1);
    assert!(events.iter().any(|name| name == "buffer_changed"));
}
