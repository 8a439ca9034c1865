pub mod diff;
pub mod error;
pub mod id;
pub mod index;
pub mod model;
pub mod parser;
pub mod tilemap;

pub use diff::{DiffSet, diff_tilemaps};
pub use error::{ParseFailure, Shape, TilemapError};
pub use id::TagName;
pub use index::root_by_tag_name;
pub use model::*;
pub use parser::{parse_document, parse_document_strict};
pub use tilemap::{CellVisit, Tile, Tilemap, parse_tilemap, walkthrough};
