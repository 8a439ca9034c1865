//! Regroup a flat parse result by tag name.

use crate::model::{ParsedDocument, RootedDocument};

/// Group every tag occurrence under its name.
///
/// Occurrences of the same tag keep their source order; nothing is merged
/// or de-duplicated. The input is left untouched.
#[must_use]
pub fn root_by_tag_name(doc: &ParsedDocument) -> RootedDocument {
    let mut rooted = RootedDocument::default();
    for (name, attributes) in doc {
        rooted
            .tags
            .entry(*name)
            .or_default()
            .push(attributes.clone());
    }
    log::debug!(
        "indexed {} tag occurrence(s) under {} name(s)",
        doc.len(),
        rooted.len()
    );
    rooted
}
