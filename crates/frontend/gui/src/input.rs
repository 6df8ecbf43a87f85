//! Raw window input to editor events.
//!
//! The window is sampled once per frame into an [`InputSnapshot`]; the
//! [`InputTranslator`] turns consecutive snapshots into [`EditorEvent`]s. It
//! keeps the little state needed for that (previous mouse button state and
//! per-direction pan timers) and never touches the window itself, so it can be
//! driven from tests.

use std::time::{Duration, Instant};

use log::warn;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window};
use tile_core::{EditorEvent, PanDirection};

use crate::settings::{string_to_key, KeyMapping};

/// One frame worth of window input.
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    pub window_open: bool,
    /// Cursor position in buffer pixels, `None` when outside the window
    pub mouse_pos: Option<(f32, f32)>,
    pub mouse_down: bool,
    /// Keys that went down since the previous frame
    pub pressed: Vec<Key>,
    /// Keys currently down
    pub held: Vec<Key>,
    /// Vertical wheel movement this frame, positive away from the user
    pub scroll_y: f32,
}

impl InputSnapshot {
    pub fn capture(window: &Window) -> Self {
        Self {
            window_open: window.is_open(),
            mouse_pos: window.get_mouse_pos(MouseMode::Discard),
            mouse_down: window.get_mouse_down(MouseButton::Left),
            pressed: window.get_keys_pressed(KeyRepeat::No),
            held: window.get_keys(),
            scroll_y: window.get_scroll_wheel().map(|(_, y)| y).unwrap_or(0.0),
        }
    }
}

/// Keys resolved from the configured names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    pan: [(PanDirection, Vec<Key>); 4],
    zoom_in: Vec<Key>,
    zoom_out: Vec<Key>,
}

impl KeyBindings {
    pub fn from_mapping(mapping: &KeyMapping) -> Self {
        let with = |name: &str, builtin: &[Key]| -> Vec<Key> {
            let mut keys = builtin.to_vec();
            match string_to_key(name) {
                Some(key) if !keys.contains(&key) => keys.push(key),
                Some(_) => {}
                None => warn!("Unknown key name {:?} in config.json, ignoring", name),
            }
            keys
        };

        Self {
            pan: [
                (PanDirection::Up, with(&mapping.up, &[Key::Up])),
                (PanDirection::Down, with(&mapping.down, &[Key::Down])),
                (PanDirection::Left, with(&mapping.left, &[Key::Left])),
                (PanDirection::Right, with(&mapping.right, &[Key::Right])),
            ],
            zoom_in: with(&mapping.zoom_in, &[Key::Equal, Key::NumPadPlus]),
            zoom_out: with(&mapping.zoom_out, &[Key::Minus, Key::NumPadMinus]),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_mapping(&KeyMapping::default())
    }
}

fn digit_of(key: Key) -> Option<u8> {
    let digit = match key {
        Key::Key0 | Key::NumPad0 => 0,
        Key::Key1 | Key::NumPad1 => 1,
        Key::Key2 | Key::NumPad2 => 2,
        Key::Key3 | Key::NumPad3 => 3,
        Key::Key4 | Key::NumPad4 => 4,
        Key::Key5 | Key::NumPad5 => 5,
        Key::Key6 | Key::NumPad6 => 6,
        Key::Key7 | Key::NumPad7 => 7,
        Key::Key8 | Key::NumPad8 => 8,
        Key::Key9 | Key::NumPad9 => 9,
        _ => return None,
    };
    Some(digit)
}

pub struct InputTranslator {
    bindings: KeyBindings,
    pan_repeat: Duration,
    mouse_was_down: bool,
    last_pan: [Option<Instant>; 4],
}

impl InputTranslator {
    pub fn new(bindings: KeyBindings, pan_repeat: Duration) -> Self {
        Self {
            bindings,
            pan_repeat,
            mouse_was_down: false,
            last_pan: [None; 4],
        }
    }

    /// Events for one frame, in the order the session should see them.
    pub fn translate(&mut self, snapshot: &InputSnapshot, now: Instant) -> Vec<EditorEvent> {
        if !snapshot.window_open {
            return vec![EditorEvent::Close];
        }

        let mut events = Vec::new();

        for &key in &snapshot.pressed {
            if let Some(d) = digit_of(key) {
                events.push(EditorEvent::Digit(d));
            } else if key == Key::Backspace {
                events.push(EditorEvent::Backspace);
            } else if key == Key::Enter || key == Key::NumPadEnter {
                events.push(EditorEvent::Enter);
            } else if key == Key::Escape {
                events.push(EditorEvent::Escape);
            } else if self.bindings.zoom_in.contains(&key) {
                events.push(EditorEvent::ZoomIn);
            } else if self.bindings.zoom_out.contains(&key) {
                events.push(EditorEvent::ZoomOut);
            }
        }

        for (slot, (direction, keys)) in self.bindings.pan.iter().enumerate() {
            let active = keys
                .iter()
                .any(|k| snapshot.held.contains(k) || snapshot.pressed.contains(k));
            if !active {
                self.last_pan[slot] = None;
                continue;
            }
            let due = match self.last_pan[slot] {
                None => true,
                Some(last) => now.saturating_duration_since(last) >= self.pan_repeat,
            };
            if due {
                self.last_pan[slot] = Some(now);
                events.push(EditorEvent::Pan(*direction));
            }
        }

        if snapshot.scroll_y > 0.0 {
            events.push(EditorEvent::ZoomIn);
        } else if snapshot.scroll_y < 0.0 {
            events.push(EditorEvent::ZoomOut);
        }

        let clicked = snapshot.mouse_down && !self.mouse_was_down;
        self.mouse_was_down = snapshot.mouse_down;
        if clicked {
            if let Some((x, y)) = snapshot.mouse_pos {
                events.push(EditorEvent::Click {
                    x: x.floor() as i32,
                    y: y.floor() as i32,
                });
            }
        }

        events
    }
}
