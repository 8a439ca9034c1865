//! Tilemap text format → grid of terrain tiles.
//!
//! One row per line, cells separated by `", "`. Each cell is
//! `(side ' ')? base ('^' overlay)?`, e.g. `Gg`, `Gg^Vh`, `1 Ke`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;
use winnow::ascii::digit1;
use winnow::combinator::{opt, preceded, terminated};
use winnow::error::ContextError;
use winnow::prelude::*;
use winnow::token::{rest, take_till};

// ─── Model ───────────────────────────────────────────────────────────────

/// One grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Tile {
    /// Terrain base code, the `Gg` in `Gg^Vh`.
    pub base_code: String,
    /// Overlay code, the `Vh` in `Gg^Vh`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub misc_code: Option<String>,
    /// Side number of a starting position, the `1` in `1 Ke`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
}

impl Tile {
    pub fn new(base_code: impl Into<String>) -> Self {
        Self {
            base_code: base_code.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_overlay(mut self, misc_code: impl Into<String>) -> Self {
        self.misc_code = Some(misc_code.into());
        self
    }

    #[must_use]
    pub fn with_player(mut self, player: impl Into<String>) -> Self {
        self.player = Some(player.into());
        self
    }

    /// `base^misc`, or just `base`: the code without the side prefix.
    pub fn terrain_code(&self) -> String {
        match &self.misc_code {
            Some(misc) => format!("{}^{}", self.base_code, misc),
            None => self.base_code.clone(),
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(player) = &self.player {
            write!(f, "{player} ")?;
        }
        f.write_str(&self.base_code)?;
        if let Some(misc) = &self.misc_code {
            write!(f, "^{misc}")?;
        }
        Ok(())
    }
}

/// A grid of tiles indexed `[row][col]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tilemap {
    rows: Vec<Vec<Tile>>,
}

/// A cell as seen by [`walkthrough`]: `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellVisit<'a> {
    pub x: usize,
    pub y: usize,
    pub base_code: &'a str,
    pub misc_code: Option<&'a str>,
    pub player: Option<&'a str>,
}

impl<'a> CellVisit<'a> {
    fn new(x: usize, y: usize, tile: &'a Tile) -> Self {
        Self {
            x,
            y,
            base_code: &tile.base_code,
            misc_code: tile.misc_code.as_deref(),
            player: tile.player.as_deref(),
        }
    }
}

impl Tilemap {
    pub fn from_rows(rows: Vec<Vec<Tile>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Tile>] {
        &self.rows
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Length of the first row (0 for an empty map).
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows have the same length.
    pub fn is_rectangular(&self) -> bool {
        let width = self.width();
        self.rows.iter().all(|row| row.len() == width)
    }

    /// Tile at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> Option<&Tile> {
        self.rows.get(y).and_then(|row| row.get(x))
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellVisit<'_>> {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, tile)| CellVisit::new(x, y, tile))
        })
    }
}

impl Index<usize> for Tilemap {
    type Output = [Tile];

    fn index(&self, row: usize) -> &[Tile] {
        &self.rows[row]
    }
}

/// Re-serialises to the text format, one line per row.
impl fmt::Display for Tilemap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for (i, tile) in row.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{tile}")?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

// ─── Parsing ─────────────────────────────────────────────────────────────

/// Parse tilemap text into a grid.
///
/// Blank lines are skipped and `\r\n` endings are accepted. Cells are split
/// on `,` and trimmed, so alignment padding in hand-edited maps is fine.
/// Row lengths are not checked here; see [`Tilemap::is_rectangular`].
#[must_use]
pub fn parse_tilemap(source: &str) -> Tilemap {
    let rows: Vec<Vec<Tile>> = source
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split(',').map(|cell| parse_cell(cell.trim())).collect())
        .collect();
    let map = Tilemap::from_rows(rows);
    log::debug!("parsed tilemap {}x{}", map.width(), map.height());
    map
}

/// Split one cell into side, base and overlay. Everything after the first
/// `^` is the overlay.
fn parse_cell(cell: &str) -> Tile {
    let mut input = cell;
    let player = opt(side_prefix).parse_next(&mut input).ok().flatten();
    let base_code = take_till::<_, _, ContextError>(0.., '^')
        .parse_next(&mut input)
        .unwrap_or_default();
    let misc_code = opt(overlay).parse_next(&mut input).ok().flatten();
    Tile {
        base_code: base_code.to_string(),
        misc_code: misc_code.map(str::to_string),
        player: player.map(str::to_string),
    }
}

fn side_prefix<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    terminated(digit1, ' ').parse_next(input)
}

fn overlay<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    preceded('^', rest).parse_next(input)
}

// ─── Walkthrough ─────────────────────────────────────────────────────────

/// Visit every cell in row-major order: all columns of row 0, then row 1...
pub fn walkthrough<'a>(map: &'a Tilemap, mut visit: impl FnMut(CellVisit<'a>)) {
    for cell in map.cells() {
        visit(cell);
    }
}
