//! Tilemap + diff → tile drawing commands.
//!
//! Walks the map in row-major order and emits draw operations for base
//! terrain, overlays and side flags, then marks every changed cell.
//! What an "image" is, and how it reaches pixels, is up to the
//! [`TileSource`] and [`TileCanvas`] implementations.

use crate::config::RenderConfig;
use std::collections::BTreeSet;
use wml_core::{DiffSet, Tilemap, walkthrough};

/// Looks up the image for a terrain code.
///
/// Base terrains are requested by their code (`Gg`); overlays by their
/// code with a leading caret (`^Vh`), which is how terrain configs name them.
pub trait TileSource {
    type Image;

    fn get_tile(&self, code: &str) -> Option<Self::Image>;
}

/// Receives drawing operations, in cell coordinates.
pub trait TileCanvas {
    type Image;

    /// Draw a terrain image into cell (`x`, `y`).
    fn draw(&mut self, image: &Self::Image, x: usize, y: usize);

    /// Mark cell (`x`, `y`) as the starting position of `player`.
    fn flag(&mut self, player: &str, x: usize, y: usize);

    /// Highlight cell (`x`, `y`) as changed.
    fn focus(&mut self, x: usize, y: usize);
}

/// What a paint pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaintStats {
    pub tiles_drawn: usize,
    pub flags_drawn: usize,
    pub cells_focused: usize,
    /// Terrain codes the source had no image for.
    pub missing_codes: BTreeSet<String>,
}

/// Paint `map` onto `canvas`, then focus every cell in `diff`.
///
/// Cells are visited row-major; within a cell the order is base, overlay,
/// flag. Focus marks come last, in diff order, so they sit on top.
pub fn paint_tilemap<S, C>(
    canvas: &mut C,
    source: &S,
    map: &Tilemap,
    diff: &DiffSet,
    config: &RenderConfig,
) -> PaintStats
where
    S: TileSource,
    C: TileCanvas<Image = S::Image>,
{
    let mut stats = PaintStats::default();

    let paint_code = |canvas: &mut C, stats: &mut PaintStats, code: &str, x: usize, y: usize| {
        match source.get_tile(code) {
            Some(image) => {
                log::trace!("TILE {code} at ({x}, {y})");
                canvas.draw(&image, x, y);
                stats.tiles_drawn += 1;
            }
            None => {
                if stats.missing_codes.insert(code.to_string()) {
                    log::warn!("no image for terrain code {code}");
                }
            }
        }
    };

    walkthrough(map, |cell| {
        paint_code(&mut *canvas, &mut stats, cell.base_code, cell.x, cell.y);
        if let Some(misc) = cell.misc_code {
            paint_code(&mut *canvas, &mut stats, &format!("^{misc}"), cell.x, cell.y);
        }
        if config.draw_flags
            && let Some(player) = cell.player
        {
            canvas.flag(player, cell.x, cell.y);
            stats.flags_drawn += 1;
        }
    });

    for &[x, y] in diff {
        canvas.focus(x, y);
        stats.cells_focused += 1;
    }

    log::debug!(
        "painted {} tile(s), {} flag(s), {} focus mark(s)",
        stats.tiles_drawn,
        stats.flags_drawn,
        stats.cells_focused
    );
    stats
}
