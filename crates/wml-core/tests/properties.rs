//! Property-based tests for the WML grammar and the tilemap differ.
//!
//! Strategies generate well-formed tags and attribute lines from the key /
//! value alphabets, plus arbitrary same-shaped tilemaps.

use proptest::prelude::*;
use std::collections::HashSet;
use wml_core::{
    AttributeMap, AttributeValue, TagName, Tile, Tilemap, diff_tilemaps, parse_document,
    parse_tilemap, root_by_tag_name,
};

/// Tag and key names: `[A-Za-z0-9_]+`.
fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_]{1,12}"
}

/// Unquoted values: no `+`, no newline, at least one non-space character,
/// and not starting with the `_ ` marker or a quote.
fn text_value_strategy() -> impl Strategy<Value = String> {
    "[ \t]{0,3}[A-Za-z0-9./=,:;-][A-Za-z0-9 ./=,:;_-]{0,20}"
}

/// Quoted interiors, possibly containing `""` escapes and line breaks.
fn quoted_interior_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[A-Za-z0-9 .,!?+#\\[\\]]{1,8}",
            Just("\"\"".to_string()),
            Just("\n".to_string()),
        ],
        0..6,
    )
    .prop_map(|parts| parts.concat())
}

fn code_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{0,2}"
}

fn tile_strategy() -> impl Strategy<Value = Tile> {
    (
        code_strategy(),
        prop::option::of(code_strategy()),
        prop::option::of("[1-9]"),
    )
        .prop_map(|(base, misc, player)| Tile {
            base_code: base,
            misc_code: misc,
            player,
        })
}

fn tilemap_strategy(width: usize, height: usize) -> impl Strategy<Value = Tilemap> {
    prop::collection::vec(prop::collection::vec(tile_strategy(), width), height)
        .prop_map(Tilemap::from_rows)
}

/// Two maps of the same random shape.
fn tilemap_pair_strategy() -> impl Strategy<Value = (Tilemap, Tilemap)> {
    (1usize..8, 1usize..8)
        .prop_flat_map(|(w, h)| (tilemap_strategy(w, h), tilemap_strategy(w, h)))
}

proptest! {
    #[test]
    fn single_unquoted_attribute_roundtrips(
        tag in name_strategy(),
        key in name_strategy(),
        value in text_value_strategy(),
    ) {
        let source = format!("[{tag}]\n{key}={value}\n[/{tag}]");
        let doc = parse_document(&source).expect("well-formed tag should parse");

        let mut expected = AttributeMap::new();
        expected.insert(key, AttributeValue::plain(value.trim()));
        prop_assert_eq!(doc, vec![(TagName::intern(&tag), expected)]);
    }

    #[test]
    fn quoted_attribute_keeps_raw_interior(
        tag in name_strategy(),
        key in name_strategy(),
        interior in quoted_interior_strategy(),
        translatable in any::<bool>(),
    ) {
        let marker = if translatable { "_ " } else { "" };
        let source = format!("[{tag}]\n{key} = {marker}\"{interior}\"\n[/{tag}]\n");
        let doc = parse_document(&source).expect("quoted value should parse");

        prop_assert_eq!(doc.len(), 1);
        let value = &doc[0].1[&key];
        prop_assert_eq!(&value.value, &interior);
        prop_assert_eq!(value.translatable, translatable);
        prop_assert_eq!(value.text(), interior.replace("\"\"", "\""));
    }

    #[test]
    fn mismatched_close_tag_always_fails(
        open in name_strategy(),
        close in name_strategy(),
        key in name_strategy(),
        value in text_value_strategy(),
    ) {
        prop_assume!(open != close);
        let source = format!("[{open}]\n{key}={value}\n[/{close}]");
        let failure = parse_document(&source).expect_err("mismatched tags must fail");

        let label = format!("Close tag for [{open}]");
        prop_assert!(failure.expects(&label), "missing {label:?} in {:?}", failure.expected);
        prop_assert!(failure.expects("Tag body"));
    }

    #[test]
    fn every_tag_occurrence_is_indexed(
        tags in prop::collection::vec((name_strategy(), name_strategy(), text_value_strategy()), 0..8),
    ) {
        let source: String = tags
            .iter()
            .map(|(tag, key, value)| format!("[{tag}]\n{key}={value}\n[/{tag}]\n# sep\n"))
            .collect();
        let doc = parse_document(&source).expect("generated document should parse");
        prop_assert_eq!(doc.len(), tags.len());

        let rooted = root_by_tag_name(&doc);
        let distinct: HashSet<&String> = tags.iter().map(|(tag, _, _)| tag).collect();
        prop_assert_eq!(rooted.len(), distinct.len());

        for name in distinct {
            let expected: Vec<&String> = tags
                .iter()
                .filter(|(tag, _, _)| tag == name)
                .map(|(_, key, _)| key)
                .collect();
            let got = rooted.get(name);
            prop_assert_eq!(got.len(), expected.len());
            for (attrs, key) in got.iter().zip(expected) {
                prop_assert!(attrs.contains_key(key));
            }
        }
    }

    #[test]
    fn diff_is_reflexive((map, _) in tilemap_pair_strategy()) {
        prop_assert!(diff_tilemaps(&map, &map).unwrap().is_empty());
    }

    #[test]
    fn diff_is_symmetric((a, b) in tilemap_pair_strategy()) {
        let ab: HashSet<[usize; 2]> = diff_tilemaps(&a, &b).unwrap().into_iter().collect();
        let ba: HashSet<[usize; 2]> = diff_tilemaps(&b, &a).unwrap().into_iter().collect();
        prop_assert_eq!(ab, ba);
    }

    #[test]
    fn tilemap_text_roundtrips((map, _) in tilemap_pair_strategy()) {
        prop_assert_eq!(parse_tilemap(&map.to_string()), map);
    }
}
