//! Core data model for parsed WML documents.
//!
//! A parse produces a flat [`ParsedDocument`]: every `[tag] ... [/tag]`
//! occurrence in source order, each with its own attribute bag. Grouping by
//! tag name happens afterwards in [`crate::index`].

use crate::id::TagName;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

// ─── Attributes ──────────────────────────────────────────────────────────

/// The right-hand side of one `key = value` line.
///
/// `value` holds the trimmed text of an unquoted value, or the raw interior
/// of a quoted value with any doubled `""` left exactly as written. Use
/// [`AttributeValue::text`] for the unescaped form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeValue {
    pub value: String,
    /// Set when the value carried a leading `_ ` translation marker.
    pub translatable: bool,
}

impl AttributeValue {
    pub fn new(value: impl Into<String>, translatable: bool) -> Self {
        Self {
            value: value.into(),
            translatable,
        }
    }

    /// A value without the translation marker.
    pub fn plain(value: impl Into<String>) -> Self {
        Self::new(value, false)
    }

    /// A value marked for translation (`_ "..."`).
    pub fn translatable(value: impl Into<String>) -> Self {
        Self::new(value, true)
    }

    /// The value with every doubled `""` collapsed to a single `"`.
    pub fn text(&self) -> Cow<'_, str> {
        if self.value.contains("\"\"") {
            Cow::Owned(self.value.replace("\"\"", "\""))
        } else {
            Cow::Borrowed(&self.value)
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Attribute bag of one tag occurrence. Keys are unique; a repeated key
/// within the same tag keeps the last value.
pub type AttributeMap = HashMap<String, AttributeValue>;

// ─── Documents ───────────────────────────────────────────────────────────

/// Every top-level tag occurrence in encounter order.
/// Same-named tags are separate entries.
pub type ParsedDocument = Vec<(TagName, AttributeMap)>;

/// Tag name → attribute bags of every occurrence of that tag, in encounter
/// order. Built by [`crate::index::root_by_tag_name`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootedDocument {
    pub(crate) tags: HashMap<TagName, Vec<AttributeMap>>,
}

impl RootedDocument {
    /// All occurrences of `name`, or an empty slice if the tag never appeared.
    pub fn get(&self, name: &str) -> &[AttributeMap] {
        TagName::get(name)
            .and_then(|tag| self.tags.get(&tag))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// First occurrence of `name`.
    pub fn first(&self, name: &str) -> Option<&AttributeMap> {
        self.get(name).first()
    }

    pub fn contains(&self, name: &str) -> bool {
        !self.get(name).is_empty()
    }

    /// Distinct tag names present, in no particular order.
    pub fn tag_names(&self) -> impl Iterator<Item = TagName> + '_ {
        self.tags.keys().copied()
    }

    /// Number of distinct tag names.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_collapses_doubled_quotes() {
        let v = AttributeValue::plain(r#"say ""hi"""#);
        assert_eq!(v.text(), r#"say "hi""#);
        assert_eq!(v.value, r#"say ""hi"""#);
    }

    #[test]
    fn text_borrows_when_nothing_to_unescape() {
        let v = AttributeValue::translatable("Loyal");
        assert!(matches!(v.text(), Cow::Borrowed("Loyal")));
        assert!(v.translatable);
    }

    #[test]
    fn empty_rooted_document_lookups() {
        let doc = RootedDocument::default();
        assert!(doc.is_empty());
        assert!(doc.get("side").is_empty());
        assert!(doc.first("side").is_none());
        assert!(!doc.contains("side"));
    }
}
