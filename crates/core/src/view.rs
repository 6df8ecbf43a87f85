//! Screen space <-> grid space mapping.
//!
//! A [`GridView`] is a throwaway value built from the session's scroll offset
//! and zoom plus the on-screen grid rectangle. It owns no state of its own.
//!
//! World space is measured in tile units of [`TILE_SIZE`]. At the default zoom
//! one world unit is one screen pixel, so mapping a click is: floor the screen
//! position to the lower multiple of the tile edge, then add the offset.

use crate::cell::{Cell, TILE_SIZE};

/// Largest distance the view may scroll away from the origin on either axis.
pub const OFFSET_LIMIT: i32 = 1_000_000 * TILE_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    Up,
    Down,
    Left,
    Right,
}

/// World-space translation of the view. Always a multiple of [`TILE_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollOffset {
    pub x: i32,
    pub y: i32,
}

impl ScrollOffset {
    /// Scroll by one tile. Returns `false` when the offset limit was reached.
    pub fn pan(&mut self, direction: PanDirection) -> bool {
        let (x, y) = match direction {
            PanDirection::Up => (self.x, self.y - TILE_SIZE),
            PanDirection::Down => (self.x, self.y + TILE_SIZE),
            PanDirection::Left => (self.x - TILE_SIZE, self.y),
            PanDirection::Right => (self.x + TILE_SIZE, self.y),
        };
        if x.abs() > OFFSET_LIMIT || y.abs() > OFFSET_LIMIT {
            return false;
        }
        self.x = x;
        self.y = y;
        true
    }
}

/// On-screen size of one tile in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zoom(i32);

impl Zoom {
    pub const MIN: i32 = 20;
    pub const MAX: i32 = 100;
    pub const STEP: i32 = 10;

    /// Clamp an arbitrary pixel size into the zoom range.
    pub fn new(tile_px: i32) -> Self {
        Self(tile_px.clamp(Self::MIN, Self::MAX))
    }

    pub fn tile_px(self) -> i32 {
        self.0
    }

    pub fn zoom_in(&mut self) -> bool {
        self.step_to(self.0 + Self::STEP)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.step_to(self.0 - Self::STEP)
    }

    fn step_to(&mut self, target: i32) -> bool {
        let next = target.clamp(Self::MIN, Self::MAX);
        let changed = next != self.0;
        self.0 = next;
        changed
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self(TILE_SIZE)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GridView {
    offset: ScrollOffset,
    zoom: Zoom,
    viewport: Rect,
}

impl GridView {
    pub fn new(offset: ScrollOffset, zoom: Zoom, viewport: Rect) -> Self {
        Self {
            offset,
            zoom,
            viewport,
        }
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Whether a screen point lies on the grid (as opposed to the side panel
    /// or outside the window).
    pub fn contains(&self, sx: i32, sy: i32) -> bool {
        self.viewport.contains(sx, sy)
    }

    /// Cell under a screen position.
    pub fn screen_to_cell(&self, sx: i32, sy: i32) -> Cell {
        let px = self.zoom.tile_px();
        let col = (sx - self.viewport.x).div_euclid(px);
        let row = (sy - self.viewport.y).div_euclid(px);
        Cell::new(
            col * TILE_SIZE + self.offset.x,
            row * TILE_SIZE + self.offset.y,
        )
    }

    /// Screen rectangle covered by a cell. Not clipped to the viewport.
    pub fn cell_to_screen(&self, cell: Cell) -> Rect {
        let px = self.zoom.tile_px() as i64;
        let to_screen = |world: i32, offset: i32, origin: i32| -> i32 {
            let scaled = (world as i64 - offset as i64) * px / TILE_SIZE as i64;
            (scaled + origin as i64).clamp(i32::MIN as i64, i32::MAX as i64) as i32
        };
        Rect::new(
            to_screen(cell.x, self.offset.x, self.viewport.x),
            to_screen(cell.y, self.offset.y, self.viewport.y),
            self.zoom.tile_px(),
            self.zoom.tile_px(),
        )
    }

    /// Every cell at least partially visible in the viewport, row by row.
    pub fn visible_cells(&self) -> impl Iterator<Item = (Cell, Rect)> + '_ {
        let px = self.zoom.tile_px();
        let cols = (self.viewport.w + px - 1) / px;
        let rows = (self.viewport.h + px - 1) / px;

        (0..rows).flat_map(move |row| {
            (0..cols).map(move |col| {
                let cell = Cell::new(
                    col * TILE_SIZE + self.offset.x,
                    row * TILE_SIZE + self.offset.y,
                );
                let rect = Rect::new(
                    self.viewport.x + col * px,
                    self.viewport.y + row * px,
                    px,
                    px,
                );
                (cell, rect)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRID: Rect = Rect::new(0, 0, 1000, 800);

    fn view_at(x: i32, y: i32) -> GridView {
        GridView::new(ScrollOffset { x, y }, Zoom::default(), GRID)
    }

    #[test]
    fn test_screen_to_cell_floors_to_tile_edge() {
        let view = view_at(0, 0);
        assert_eq!(view.screen_to_cell(0, 0), Cell::new(0, 0));
        assert_eq!(view.screen_to_cell(49, 49), Cell::new(0, 0));
        assert_eq!(view.screen_to_cell(75, 120), Cell::new(50, 100));
        assert_eq!(view.screen_to_cell(999, 799), Cell::new(950, 750));
    }

    #[test]
    fn test_screen_to_cell_adds_offset() {
        let view = view_at(-100, 50);
        assert_eq!(view.screen_to_cell(75, 120), Cell::new(-50, 150));
    }

    #[test]
    fn test_cell_to_screen_is_inverse() {
        let view = view_at(150, -300);
        let cell = view.screen_to_cell(420, 260);
        let rect = view.cell_to_screen(cell);
        assert_eq!(rect, Rect::new(400, 250, 50, 50));
        assert!(rect.contains(420, 260));
    }

    #[test]
    fn test_contains_checks_both_axes() {
        let view = view_at(0, 0);
        assert!(view.contains(0, 0));
        assert!(view.contains(999, 799));
        assert!(!view.contains(1000, 10));
        assert!(!view.contains(-1, 10));
        assert!(!view.contains(10, -1));
        assert!(!view.contains(10, 800));
    }

    #[test]
    fn test_pan_moves_one_tile() {
        let mut offset = ScrollOffset::default();
        assert!(offset.pan(PanDirection::Right));
        assert!(offset.pan(PanDirection::Right));
        assert!(offset.pan(PanDirection::Up));
        assert_eq!(offset, ScrollOffset { x: 100, y: -50 });

        offset.pan(PanDirection::Left);
        offset.pan(PanDirection::Down);
        assert_eq!(offset, ScrollOffset { x: 50, y: 0 });
    }

    #[test]
    fn test_pan_stops_at_limit() {
        let mut offset = ScrollOffset {
            x: OFFSET_LIMIT,
            y: 0,
        };
        assert!(!offset.pan(PanDirection::Right));
        assert_eq!(offset.x, OFFSET_LIMIT);
        assert!(offset.pan(PanDirection::Left));
    }

    #[test]
    fn test_zoom_limits() {
        let mut zoom = Zoom::default();
        assert_eq!(zoom.tile_px(), TILE_SIZE);

        while zoom.zoom_in() {}
        assert_eq!(zoom.tile_px(), Zoom::MAX);

        while zoom.zoom_out() {}
        assert_eq!(zoom.tile_px(), Zoom::MIN);

        assert_eq!(Zoom::new(5).tile_px(), Zoom::MIN);
    }

    #[test]
    fn test_zoomed_mapping_keeps_world_units() {
        let view = GridView::new(ScrollOffset::default(), Zoom::new(100), GRID);
        assert_eq!(view.screen_to_cell(150, 50), Cell::new(50, 0));
        assert_eq!(view.cell_to_screen(Cell::new(50, 0)), Rect::new(100, 0, 100, 100));
    }

    #[test]
    fn test_visible_cells_cover_viewport() {
        let view = view_at(0, 0);
        let cells: Vec<(Cell, Rect)> = view.visible_cells().collect();
        assert_eq!(cells.len(), 20 * 16);
        assert_eq!(cells[0], (Cell::new(0, 0), Rect::new(0, 0, 50, 50)));
        assert_eq!(cells[21].0, Cell::new(50, 50));

        let zoomed = GridView::new(ScrollOffset::default(), Zoom::new(30), GRID);
        assert_eq!(zoomed.visible_cells().count(), 34 * 27);
    }

    #[test]
    fn test_visible_cells_follow_offset() {
        let view = view_at(-50, 100);
        let (first, _) = view.visible_cells().next().unwrap();
        assert_eq!(first, Cell::new(-50, 100));
    }
}
