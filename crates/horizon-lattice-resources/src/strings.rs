//! Theme-independent fallback strings.

use std::collections::HashMap;

use crate::error::Result;
use crate::markup::parse_markup;

/// Flat string id → text table consulted when the locale bundle misses.
///
/// Loads accumulate: a later load overwrites overlapping ids and leaves
/// every other id in place.
#[derive(Debug, Clone, Default)]
pub struct FallbackStrings {
    entries: HashMap<String, String>,
}

impl FallbackStrings {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite one entry.
    pub fn insert(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(id.into(), text.into());
    }

    /// Merge `<string name=".." value=".."/>` entries from a document.
    ///
    /// Returns the number of entries read from the document. A document that
    /// fails to parse merges nothing.
    pub fn merge_markup(&mut self, xml: &str, origin: &str) -> Result<usize> {
        let root = parse_markup(xml, origin)?;
        let mut count = 0;
        for element in root.children_named("string") {
            if let (Some(id), Some(text)) = (element.attribute("name"), element.value_or_text()) {
                self.insert(id, text);
                count += 1;
            }
        }
        Ok(count)
    }

    /// Look up an entry.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
