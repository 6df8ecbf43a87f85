//! Editor session: the state of one editing run and the single place where
//! input events change it.

use log::debug;

use crate::cell::Cell;
use crate::picker::{ColorPicker, PickerLayout};
use crate::tile_store::{TileStore, Toggle};
use crate::view::{GridView, PanDirection, Rect, ScrollOffset, Zoom};
use crate::work_file::{WorkFile, WorkFileError};

/// Frontend-independent input, already decoded from raw key and mouse state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
    /// Left click at a window position.
    Click { x: i32, y: i32 },
    Digit(u8),
    Backspace,
    Enter,
    Escape,
    Pan(PanDirection),
    ZoomIn,
    ZoomOut,
    /// The window was closed.
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Where the grid and the color panel sit in the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorLayout {
    pub grid: Rect,
    pub picker: PickerLayout,
}

impl EditorLayout {
    pub const GRID_WIDTH: i32 = 1000;
    pub const GRID_HEIGHT: i32 = 800;
    pub const PANEL_WIDTH: i32 = 200;

    pub fn panel(&self) -> Rect {
        Rect::new(self.grid.right(), 0, Self::PANEL_WIDTH, self.grid.h)
    }
}

impl Default for EditorLayout {
    fn default() -> Self {
        Self {
            grid: Rect::new(0, 0, Self::GRID_WIDTH, Self::GRID_HEIGHT),
            picker: PickerLayout::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EditorSession {
    store: TileStore,
    offset: ScrollOffset,
    zoom: Zoom,
    picker: ColorPicker,
    layout: EditorLayout,
}

impl EditorSession {
    pub fn new(store: TileStore) -> Self {
        Self::with_layout(store, EditorLayout::default())
    }

    pub fn with_layout(store: TileStore, layout: EditorLayout) -> Self {
        Self {
            store,
            offset: ScrollOffset::default(),
            zoom: Zoom::default(),
            picker: ColorPicker::default(),
            layout,
        }
    }

    pub fn store(&self) -> &TileStore {
        &self.store
    }

    pub fn picker(&self) -> &ColorPicker {
        &self.picker
    }

    pub fn offset(&self) -> ScrollOffset {
        self.offset
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    pub fn layout(&self) -> &EditorLayout {
        &self.layout
    }

    pub fn view(&self) -> GridView {
        GridView::new(self.offset, self.zoom, self.layout.grid)
    }

    pub fn handle(&mut self, event: EditorEvent) -> Flow {
        if event == EditorEvent::Close {
            return Flow::Quit;
        }
        if self.picker.is_editing() {
            self.handle_editing(event);
            Flow::Continue
        } else {
            self.handle_idle(event)
        }
    }

    fn handle_editing(&mut self, event: EditorEvent) {
        match event {
            EditorEvent::Digit(d) => self.picker.push_digit(d),
            EditorEvent::Backspace => self.picker.backspace(),
            EditorEvent::Enter => self.commit_channel(),
            EditorEvent::Escape => self.picker.cancel(),
            EditorEvent::Click { x, y } => {
                let target = self.layout.picker.channel_at(x, y);
                self.commit_channel();
                if let Some(channel) = target {
                    self.picker.begin_edit(channel);
                }
            }
            EditorEvent::Pan(_)
            | EditorEvent::ZoomIn
            | EditorEvent::ZoomOut
            | EditorEvent::Close => {}
        }
    }

    fn handle_idle(&mut self, event: EditorEvent) -> Flow {
        match event {
            EditorEvent::Click { x, y } => self.click(x, y),
            EditorEvent::Pan(direction) => {
                if self.offset.pan(direction) {
                    debug!("Panned {:?} to ({}, {})", direction, self.offset.x, self.offset.y);
                }
            }
            EditorEvent::ZoomIn => {
                if self.zoom.zoom_in() {
                    debug!("Zoom {} px per tile", self.zoom.tile_px());
                }
            }
            EditorEvent::ZoomOut => {
                if self.zoom.zoom_out() {
                    debug!("Zoom {} px per tile", self.zoom.tile_px());
                }
            }
            EditorEvent::Escape | EditorEvent::Close => return Flow::Quit,
            EditorEvent::Digit(_) | EditorEvent::Backspace | EditorEvent::Enter => {}
        }
        Flow::Continue
    }

    fn click(&mut self, x: i32, y: i32) {
        let view = self.view();
        if view.contains(x, y) {
            self.toggle(view.screen_to_cell(x, y));
        } else if let Some(channel) = self.layout.picker.channel_at(x, y) {
            self.picker.begin_edit(channel);
        }
    }

    fn toggle(&mut self, cell: Cell) {
        let color = self.picker.color();
        match self.store.toggle(cell, color) {
            Toggle::Painted => debug!("Painted ({}, {}) with {:?}", cell.x, cell.y, color),
            Toggle::Erased(previous) => {
                debug!("Erased ({}, {}), was {:?}", cell.x, cell.y, previous)
            }
        }
    }

    fn commit_channel(&mut self) {
        if let Some(channel) = self.picker.commit() {
            debug!(
                "Set {:?} channel to {}",
                channel,
                self.picker.color().channel(channel)
            );
        }
    }

    /// Overwrite the work file with the current store.
    pub fn flush_to_disk(&self, work_file: &mut WorkFile) -> Result<(), WorkFileError> {
        work_file.flush(&self.store)
    }
}
