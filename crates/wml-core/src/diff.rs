//! Cell-by-cell comparison of two tilemaps.

use crate::error::{Shape, TilemapError};
use crate::tilemap::Tilemap;

/// `[x, y]` coordinates of differing cells, in row-major order.
pub type DiffSet = Vec<[usize; 2]>;

/// Coordinates where `left` and `right` differ in base code, overlay code
/// or side.
///
/// Both maps must have the same number of rows and the same length for each
/// row; anything else is a [`TilemapError`] rather than a partial result.
pub fn diff_tilemaps(left: &Tilemap, right: &Tilemap) -> Result<DiffSet, TilemapError> {
    check_shape(left, right)?;

    let diff: DiffSet = left
        .rows()
        .iter()
        .zip(right.rows())
        .enumerate()
        .flat_map(|(y, (l, r))| {
            l.iter()
                .zip(r)
                .enumerate()
                .filter(|(_, (a, b))| a != b)
                .map(move |(x, _)| [x, y])
        })
        .collect();

    log::debug!(
        "{} of {} cell(s) differ",
        diff.len(),
        left.width() * left.height()
    );
    Ok(diff)
}

fn check_shape(left: &Tilemap, right: &Tilemap) -> Result<(), TilemapError> {
    if left.height() != right.height() {
        return Err(TilemapError::RowCountMismatch {
            left: shape_of(left),
            right: shape_of(right),
        });
    }
    for (row, (l, r)) in left.rows().iter().zip(right.rows()).enumerate() {
        if l.len() != r.len() {
            return Err(TilemapError::RowLengthMismatch {
                row,
                left: l.len(),
                right: r.len(),
            });
        }
    }
    Ok(())
}

fn shape_of(map: &Tilemap) -> Shape {
    Shape {
        width: map.width(),
        height: map.height(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tilemap::parse_tilemap;

    #[test]
    fn identical_maps_have_no_diff() {
        let map = parse_tilemap("Gg, Gg^Vh\n1 Ke, Ke\n");
        assert!(diff_tilemaps(&map, &map).unwrap().is_empty());
    }

    #[test]
    fn each_field_counts() {
        let old = parse_tilemap("Gg, Gg^Vh, Ke, Ww\n");
        let new = parse_tilemap("Hh, Gg^Ve, 2 Ke, Ww\n");
        assert_eq!(
            diff_tilemaps(&old, &new).unwrap(),
            vec![[0, 0], [1, 0], [2, 0]]
        );
    }

    #[test]
    fn overlay_added_or_removed() {
        let old = parse_tilemap("Gg, Gg^Vh\n");
        let new = parse_tilemap("Gg^Fp, Gg\n");
        assert_eq!(diff_tilemaps(&old, &new).unwrap(), vec![[0, 0], [1, 0]]);
    }

    #[test]
    fn coordinates_are_x_then_y_in_row_major_order() {
        let old = parse_tilemap("Gg, Gg\nGg, Gg\nGg, Gg\n");
        let new = parse_tilemap("Gg, Gg\nGg, Ww\nWw, Gg\n");
        assert_eq!(diff_tilemaps(&old, &new).unwrap(), vec![[1, 1], [0, 2]]);
    }

    #[test]
    fn ragged_maps_of_equal_shape_compare_every_cell() {
        let old = parse_tilemap("Gg, Gg, Gg\nGg\n");
        let new = parse_tilemap("Gg, Gg, Ww\nWw\n");
        assert_eq!(diff_tilemaps(&old, &new).unwrap(), vec![[2, 0], [0, 1]]);
    }

    #[test]
    fn row_count_mismatch_is_an_error() {
        let old = parse_tilemap("Gg, Gg\n");
        let new = parse_tilemap("Gg, Gg\nGg, Gg\n");
        let err = diff_tilemaps(&old, &new).unwrap_err();
        assert_eq!(
            err,
            TilemapError::RowCountMismatch {
                left: Shape { width: 2, height: 1 },
                right: Shape { width: 2, height: 2 },
            }
        );
        assert_eq!(
            err.to_string(),
            "tilemaps have different row counts (2x1 vs 2x2)"
        );
    }

    #[test]
    fn row_length_mismatch_is_an_error() {
        let old = parse_tilemap("Gg, Gg\nGg, Gg\n");
        let new = parse_tilemap("Gg, Gg\nGg\n");
        assert_eq!(
            diff_tilemaps(&old, &new).unwrap_err(),
            TilemapError::RowLengthMismatch {
                row: 1,
                left: 2,
                right: 1
            }
        );
    }
}
