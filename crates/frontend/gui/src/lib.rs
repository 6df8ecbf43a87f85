//! Tile editor desktop frontend
//!
//! Window glue around `tile_core`: settings, input translation and software
//! rendering into a minifb ARGB framebuffer. The binary in `main.rs` owns the
//! window and the main loop.

pub mod canvas;
pub mod input;
pub mod settings;
pub mod status_bar;
pub mod ui_render;
