//! Painted tiles on the infinite grid.
//!
//! The store is a map from [`Cell`] to [`Color`]: a present key is a painted
//! tile, an absent key is empty. There is no canvas extent; the on-screen grid
//! size only limits which cells can be clicked.
//!
//! Iteration follows insertion order. The codec relies on that order for
//! vertex index numbering, so removals keep the relative order of the
//! remaining tiles.

use indexmap::IndexMap;

use crate::cell::Cell;
use crate::color::Color;

/// Outcome of [`TileStore::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Painted,
    Erased(Color),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileStore {
    tiles: IndexMap<Cell, Color>,
}

impl TileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Erase `cell` if it is painted, otherwise paint it with `color`.
    ///
    /// The color of an existing tile is never updated here.
    pub fn toggle(&mut self, cell: Cell, color: Color) -> Toggle {
        match self.tiles.shift_remove(&cell) {
            Some(previous) => Toggle::Erased(previous),
            None => {
                self.tiles.insert(cell, color);
                Toggle::Painted
            }
        }
    }

    pub fn lookup(&self, cell: Cell) -> Option<Color> {
        self.tiles.get(&cell).copied()
    }

    /// Paint `cell` unconditionally. An existing tile keeps its position in
    /// the iteration order and takes the new color.
    pub fn insert(&mut self, cell: Cell, color: Color) {
        self.tiles.insert(cell, color);
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tiles in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, Color)> + '_ {
        self.tiles.iter().map(|(cell, color)| (*cell, *color))
    }

    /// Smallest and largest tile corners, or `None` for an empty store.
    pub fn bounds(&self) -> Option<(Cell, Cell)> {
        let mut cells = self.tiles.keys();
        let first = *cells.next()?;
        Some(cells.fold((first, first), |(min, max), c| {
            (
                Cell::new(min.x.min(c.x), min.y.min(c.y)),
                Cell::new(max.x.max(c.x), max.y.max(c.y)),
            )
        }))
    }
}

impl FromIterator<(Cell, Color)> for TileStore {
    fn from_iter<I: IntoIterator<Item = (Cell, Color)>>(iter: I) -> Self {
        Self {
            tiles: iter.into_iter().collect(),
        }
    }
}
