//! Tile painting for tilemap diffs.
//!
//! [`TerrainCatalog`] turns a parsed terrain config into a [`TileSource`];
//! [`paint_tilemap`] drives any [`TileCanvas`]; [`SvgCanvas`] is the
//! built-in canvas.

pub mod config;
pub mod paint;
pub mod svg;
pub mod terrain;

pub use config::RenderConfig;
pub use paint::{PaintStats, TileCanvas, TileSource, paint_tilemap};
pub use svg::SvgCanvas;
pub use terrain::TerrainCatalog;

use wml_core::{DiffSet, Tilemap, TilemapError, diff_tilemaps};

/// Diff `old` against `new` and render `new` with every changed cell
/// focused. Returns the SVG text and the diff that was drawn.
pub fn render_diff_svg(
    old: &Tilemap,
    new: &Tilemap,
    catalog: &TerrainCatalog,
    config: &RenderConfig,
) -> Result<(String, DiffSet), TilemapError> {
    let diff = diff_tilemaps(old, new)?;
    let mut canvas = SvgCanvas::new(new.width(), new.height(), config);
    paint_tilemap(&mut canvas, catalog, new, &diff, config);
    Ok((canvas.finish(), diff))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wml_core::parse_tilemap;

    #[test]
    fn render_diff_svg_focuses_changes() {
        let mut catalog = TerrainCatalog::default();
        catalog.insert("Gg", "grass/green");
        catalog.insert("Ww", "water/coast");

        let old = parse_tilemap("Gg, Gg\n");
        let new = parse_tilemap("Gg, Ww\n");
        let (svg, diff) = render_diff_svg(&old, &new, &catalog, &RenderConfig::default()).unwrap();

        assert_eq!(diff, vec![[1, 0]]);
        assert_eq!(svg.matches("<image ").count(), 2);
        assert_eq!(svg.matches("class=\"focus\"").count(), 1);
        assert!(svg.contains("water/coast.png"));
    }

    #[test]
    fn render_diff_svg_rejects_mismatched_shapes() {
        let old = parse_tilemap("Gg\n");
        let new = parse_tilemap("Gg, Gg\n");
        let err = render_diff_svg(&old, &new, &TerrainCatalog::default(), &RenderConfig::default())
            .unwrap_err();
        assert!(matches!(err, TilemapError::RowLengthMismatch { row: 0, .. }));
    }
}
