//! Tag catalog: the read-only set of tags a user can insert.
//!
//! The catalog is supplied once when an editing session starts and shared
//! between sessions behind an `Arc`. Lookups by id drive tag insertion;
//! lookups by display text drive parsing of canonical strings.

use crate::error::{Error, Result};
use crate::style::Style;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Identifier of a tag definition.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagId(String);

impl TagId {
    /// Create a tag id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for TagId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TagId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TagId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A tag the user can insert: identity, label, and chip style.
#[derive(Clone, Debug, PartialEq)]
pub struct TagDefinition {
    pub id: TagId,
    pub display_text: String,
    pub style: Style,
}

impl TagDefinition {
    #[must_use]
    pub fn new(id: impl Into<TagId>, display_text: impl Into<String>, style: Style) -> Self {
        Self {
            id: id.into(),
            display_text: display_text.into(),
            style,
        }
    }
}

/// Ordered, immutable collection of tag definitions.
///
/// Definition order is preserved (it is the order hosts lay out their tag
/// buttons in). Ids and display texts are unique; display texts compare after NFC
/// normalization so a value saved from a decomposed-input keyboard still
/// resolves to the same tag.
#[derive(Clone, Debug, Default)]
pub struct TagCatalog {
    definitions: Vec<TagDefinition>,
    by_id: HashMap<TagId, usize>,
    by_text: HashMap<String, usize>,
}

impl TagCatalog {
    /// Build a catalog, rejecting empty display texts and duplicate ids or
    /// display texts. Display texts are compared after NFC normalization;
    /// the canonical string names tags by display text alone.
    pub fn new(definitions: impl IntoIterator<Item = TagDefinition>) -> Result<Self> {
        let mut catalog = Self::default();
        for def in definitions {
            if def.display_text.is_empty() {
                return Err(Error::InvalidCatalog(format!(
                    "tag {} has an empty display text",
                    def.id
                )));
            }
            if catalog.by_id.contains_key(&def.id) {
                return Err(Error::InvalidCatalog(format!("duplicate tag id {}", def.id)));
            }
            let key = normalize(&def.display_text);
            if let Some(&other) = catalog.by_text.get(&key) {
                return Err(Error::InvalidCatalog(format!(
                    "tags {} and {} share the display text {key:?}",
                    catalog.definitions[other].id, def.id
                )));
            }
            let idx = catalog.definitions.len();
            catalog.by_id.insert(def.id.clone(), idx);
            catalog.by_text.insert(key, idx);
            catalog.definitions.push(def);
        }
        Ok(catalog)
    }

    /// Build a catalog where each label is both id and display text.
    pub fn from_labels<I, S>(labels: I, style: Style) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(labels.into_iter().map(|label| {
            let label = label.into();
            TagDefinition::new(label.clone(), label, style)
        }))
    }

    /// Look up a tag by id.
    pub fn lookup(&self, id: &str) -> Result<&TagDefinition> {
        self.by_id
            .get(id)
            .map(|&idx| &self.definitions[idx])
            .ok_or_else(|| Error::UnknownTag(id.to_string()))
    }

    /// Check whether a tag id is known.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Find the tag whose display text matches `text` (NFC-normalized).
    #[must_use]
    pub fn find_by_display_text(&self, text: &str) -> Option<&TagDefinition> {
        self.by_text
            .get(&normalize(text))
            .map(|&idx| &self.definitions[idx])
    }

    /// Reject display texts that contain the canonical delimiter.
    pub fn check_delimiter(&self, delimiter: char) -> Result<()> {
        match self
            .definitions
            .iter()
            .find(|def| def.display_text.contains(delimiter))
        {
            Some(def) => Err(Error::InvalidCatalog(format!(
                "display text of tag {} contains the delimiter {delimiter:?}",
                def.id
            ))),
            None => Ok(()),
        }
    }

    /// Iterate over definitions in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &TagDefinition> {
        self.definitions.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

fn normalize(text: &str) -> String {
    text.nfc().collect()
}
