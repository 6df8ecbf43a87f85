//! Status bar rendering at the bottom of the window

use tile_core::{ScrollOffset, Zoom};

use crate::ui_render;

pub const STATUS_BAR_HEIGHT: usize = 20;

/// Status bar information to display
pub struct StatusBar {
    pub message: String,
    pub file_name: String,
    pub tile_count: usize,
    pub offset: ScrollOffset,
    pub zoom: Zoom,
    pub editing: bool,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            message: String::new(),
            file_name: String::new(),
            tile_count: 0,
            offset: ScrollOffset::default(),
            zoom: Zoom::default(),
            editing: false,
        }
    }

    /// Text shown on the right: tile count, view origin and zoom.
    pub fn stats_text(&self) -> String {
        format!(
            "{} tiles  ({}, {})  {}px",
            self.tile_count,
            self.offset.x,
            self.offset.y,
            self.zoom.tile_px()
        )
    }

    /// Render the status bar at the bottom of the buffer
    /// Returns the height of the status bar in pixels
    pub fn render(&self, buffer: &mut [u32], width: usize, height: usize) -> usize {
        if height < STATUS_BAR_HEIGHT {
            return 0;
        }

        let bar_y = height - STATUS_BAR_HEIGHT;
        buffer[bar_y * width..height * width].fill(0xFF1E1E2E);

        // Left: file name, plus a marker while a channel is being typed
        let mut left = self.file_name.clone();
        if self.editing {
            left.push_str("  EDIT");
        }
        if !left.is_empty() {
            ui_render::draw_text(buffer, width, height, &left, 8, bar_y + 6, 0xFFFABD2F);
        }

        // Center: last message
        if !self.message.is_empty() {
            let msg_width = ui_render::text_width(&self.message, 1);
            let msg_x = (width.saturating_sub(msg_width)) / 2;
            ui_render::draw_text(
                buffer,
                width,
                height,
                &self.message,
                msg_x,
                bar_y + 6,
                0xFF8EC07C,
            );
        }

        let right_text = self.stats_text();
        let right_x = width.saturating_sub(ui_render::text_width(&right_text, 1) + 8);
        ui_render::draw_text(
            buffer,
            width,
            height,
            &right_text,
            right_x,
            bar_y + 6,
            0xFFABABAB,
        );

        STATUS_BAR_HEIGHT
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}
