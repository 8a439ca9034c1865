//! Terrain code → image lookup, built from `[terrain_type]` tags.

use crate::paint::TileSource;
use std::collections::HashMap;
use wml_core::{ParseFailure, RootedDocument, parse_document, root_by_tag_name};

/// Image stems keyed by terrain code (`Gg`, `Ke`, `^Vh`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerrainCatalog {
    images: HashMap<String, String>,
}

impl TerrainCatalog {
    /// Index every `[terrain_type]` by its `string` attribute.
    ///
    /// The image is `symbol_image`, or `editor_image` when there is none.
    /// Terrain types with neither, or without a `string`, are skipped. A
    /// code defined twice keeps its last definition.
    pub fn from_document(doc: &RootedDocument) -> Self {
        let mut images = HashMap::new();
        for terrain in doc.get("terrain_type") {
            let Some(code) = terrain.get("string") else {
                continue;
            };
            let image = terrain
                .get("symbol_image")
                .or_else(|| terrain.get("editor_image"));
            match image {
                Some(image) => {
                    images.insert(code.value.clone(), image.value.clone());
                }
                None => log::debug!("terrain {} has no image", code.value),
            }
        }
        log::debug!("terrain catalog holds {} code(s)", images.len());
        Self { images }
    }

    /// Parse a terrain config and index it.
    pub fn from_source(source: &str) -> Result<Self, ParseFailure> {
        let doc = parse_document(source)?;
        Ok(Self::from_document(&root_by_tag_name(&doc)))
    }

    /// Image stem for a terrain code.
    pub fn image(&self, code: &str) -> Option<&str> {
        self.images.get(code).map(String::as_str)
    }

    /// Add or replace a single mapping.
    pub fn insert(&mut self, code: impl Into<String>, image: impl Into<String>) {
        self.images.insert(code.into(), image.into());
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl TileSource for TerrainCatalog {
    type Image = String;

    fn get_tile(&self, code: &str) -> Option<String> {
        self.image(code).map(str::to_string)
    }
}
