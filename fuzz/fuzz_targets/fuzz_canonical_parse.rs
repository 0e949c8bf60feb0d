//! Fuzz target for canonical string parsing.
//!
//! Parsing arbitrary input must never panic, and a parsed buffer must
//! serialize to a string that parses back to the same buffer.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tagtext::text::{DEFAULT_DELIMITER, parse_canonical, to_canonical_string};
use tagtext::{RenderedTag, SpanRegistry, Style, TagCatalog, TagDefinition, WidthMethod};

fn render(def: &TagDefinition) -> RenderedTag {
    RenderedTag::for_definition(def, 1, WidthMethod::WcWidth)
}

fuzz_target!(|data: &str| {
    let Ok(catalog) = TagCatalog::new([
        TagDefinition::new("t1", "Tag1", Style::NONE),
        TagDefinition::new("t2", "a", Style::NONE),
        TagDefinition::new("vomit", "嘔吐", Style::NONE),
    ]) else {
        return;
    };

    let buffer = parse_canonical(data, &catalog, DEFAULT_DELIMITER, render);
    let mut registry = SpanRegistry::new();
    assert!(registry.rebuild(&buffer).is_ok());

    let text = to_canonical_string(&buffer, &catalog, DEFAULT_DELIMITER);
    let reparsed = parse_canonical(&text, &catalog, DEFAULT_DELIMITER, render);
    assert_eq!(reparsed, buffer);
});
