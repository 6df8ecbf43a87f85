//! Frame rendering for an editor session.

use tile_core::{Channel, Color, EditorSession, Rect};

use crate::status_bar::STATUS_BAR_HEIGHT;
use crate::ui_render;

pub const WINDOW_WIDTH: usize = 1200;
/// Grid and color panel height, without the status bar
pub const CANVAS_HEIGHT: usize = 800;
pub const WINDOW_HEIGHT: usize = CANVAS_HEIGHT + STATUS_BAR_HEIGHT;

/// Channel labels use the 8x8 font at twice its size.
pub const LABEL_SCALE: usize = 2;

const BACKGROUND: u32 = Color::WHITISH.to_argb();
const GRID_LINE: u32 = Color::DARK_GREENISH.to_argb();
const HINT_TEXT: u32 = Color::BLACKISH.to_argb();

const HINTS: [&str; 5] = [
    "Click: paint / erase",
    "WASD, arrows: pan",
    "Wheel, E / Q: zoom",
    "Click R G B to edit",
    "Esc: save and quit",
];

fn label_color(channel: Channel) -> Color {
    match channel {
        Channel::Red => Color::DARK_REDDISH,
        Channel::Green => Color::DARK_GREENISH,
        Channel::Blue => Color::DARK_BLUEISH,
    }
}

fn intersect(a: Rect, b: Rect) -> Rect {
    let x = a.x.max(b.x);
    let y = a.y.max(b.y);
    let right = a.right().min(b.right());
    let bottom = a.bottom().min(b.bottom());
    Rect::new(x, y, (right - x).max(0), (bottom - y).max(0))
}

/// Draw the grid and the color panel into the top [`CANVAS_HEIGHT`] rows.
pub fn render_canvas(session: &EditorSession, buffer: &mut [u32], width: usize, height: usize) {
    let canvas_height = height.min(CANVAS_HEIGHT);
    buffer[..canvas_height * width].fill(BACKGROUND);

    let view = session.view();
    let grid = view.viewport();
    for (cell, rect) in view.visible_cells() {
        match session.store().lookup(cell) {
            Some(color) => {
                let rect = intersect(rect, grid);
                ui_render::fill_rect(buffer, width, canvas_height, rect, color.to_argb())
            }
            // Edges past the grid land under the panel, which is drawn next.
            None => ui_render::stroke_rect(buffer, width, canvas_height, rect, GRID_LINE),
        }
    }

    render_panel(session, buffer, width, canvas_height);
}

fn render_panel(session: &EditorSession, buffer: &mut [u32], width: usize, height: usize) {
    let layout = session.layout();
    ui_render::fill_rect(buffer, width, height, layout.panel(), BACKGROUND);

    let picker = session.picker();
    ui_render::fill_rect(
        buffer,
        width,
        height,
        layout.picker.swatch,
        picker.color().to_argb(),
    );

    let text_offset = |rect: Rect| {
        let pad = (rect.h as usize).saturating_sub(ui_render::FONT_HEIGHT * LABEL_SCALE) / 2;
        (rect.x.max(0) as usize, rect.y.max(0) as usize + pad)
    };

    for channel in Channel::ALL {
        let rect = layout.picker.label_rect(channel);
        let color = label_color(channel).to_argb();
        let (x, y) = text_offset(rect);
        ui_render::draw_text_scaled(
            buffer,
            width,
            height,
            &picker.label(channel),
            x,
            y,
            LABEL_SCALE,
            color,
        );
        if picker.editing_channel() == Some(channel) {
            ui_render::stroke_rect(buffer, width, height, rect, color);
        }
    }

    let panel = layout.panel();
    let line_spacing = ui_render::FONT_HEIGHT + 6;
    let hints_y = (panel.bottom() as usize).saturating_sub(HINTS.len() * line_spacing + 8);
    ui_render::draw_text_lines(
        buffer,
        width,
        height,
        &HINTS,
        panel.x as usize + 12,
        hints_y,
        line_spacing,
        HINT_TEXT,
    );
}
