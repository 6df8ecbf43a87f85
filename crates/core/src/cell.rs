//! Grid cell coordinates on the unbounded tile plane.

use serde::{Deserialize, Serialize};

/// Edge length of one tile in world units.
pub const TILE_SIZE: i32 = 50;

/// Top-left corner of a tile.
///
/// Cells produced by the grid view are always multiples of [`TILE_SIZE`];
/// cells read back from a work file are taken as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell enclosing an arbitrary world-space point.
    ///
    /// Rounds towards negative infinity, so `(-1, -1)` lands in `(-50, -50)`.
    pub fn containing(x: i32, y: i32) -> Self {
        Self {
            x: x.div_euclid(TILE_SIZE) * TILE_SIZE,
            y: y.div_euclid(TILE_SIZE) * TILE_SIZE,
        }
    }

    /// The four corners of the tile quad, in the order they are written to disk:
    /// top-left, top-right, bottom-left, bottom-right.
    ///
    /// Widened to `i64` so tiles at the edge of the `i32` range still encode.
    pub fn corners(self) -> [(i64, i64); 4] {
        let (x, y) = (self.x as i64, self.y as i64);
        let edge = TILE_SIZE as i64;
        [(x, y), (x + edge, y), (x, y + edge), (x + edge, y + edge)]
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}
