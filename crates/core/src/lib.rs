//! Core tile editor primitives.
//!
//! Everything here is independent of any windowing library: the tile store and
//! its mutation rules, the on-disk codec, the work file handle, the grid view
//! coordinate mapping and the editor session state machine that the frontends
//! drive with input events.

pub mod cell;
pub mod codec;
pub mod color;
pub mod editor;
pub mod picker;
pub mod tile_store;
pub mod view;
pub mod work_file;

pub use cell::{Cell, TILE_SIZE};
pub use codec::{decode, decode_str, encode, encode_to_string, FormatError};
pub use color::Color;
pub use editor::{EditorEvent, EditorLayout, EditorSession, Flow};
pub use picker::{Channel, ColorPicker, PickerLayout, PickerState};
pub use tile_store::{TileStore, Toggle};
pub use view::{GridView, PanDirection, Rect, ScrollOffset, Zoom};
pub use work_file::{WorkFile, WorkFileError};
