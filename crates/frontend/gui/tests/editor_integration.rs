//! End-to-end editing sessions without a window
//!
//! Input snapshots go through the translator into an editor session, frames
//! are rendered into a plain buffer and the result is persisted through a
//! work file in a temp directory.

use minifb::Key;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tile_core::{Cell, Color, EditorEvent, EditorSession, Flow, TileStore, WorkFile};
use tile_gui::canvas::{render_canvas, WINDOW_HEIGHT, WINDOW_WIDTH};
use tile_gui::input::{InputSnapshot, InputTranslator, KeyBindings};
use tile_gui::status_bar::StatusBar;

fn test_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("tile_gui_test_integration");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    let _ = fs::remove_file(&path);
    path
}

/// Feeds snapshots one frame apart and stops at the first quit.
struct Driver {
    session: EditorSession,
    translator: InputTranslator,
    clock: Instant,
}

impl Driver {
    fn new(store: TileStore) -> Self {
        Self {
            session: EditorSession::new(store),
            translator: InputTranslator::new(KeyBindings::default(), Duration::from_millis(75)),
            clock: Instant::now(),
        }
    }

    fn frame(&mut self, snapshot: InputSnapshot) -> Flow {
        self.clock += Duration::from_millis(16);
        for event in self.translator.translate(&snapshot, self.clock) {
            if self.session.handle(event) == Flow::Quit {
                return Flow::Quit;
            }
        }
        Flow::Continue
    }

    fn idle(&mut self) -> Flow {
        self.frame(InputSnapshot {
            window_open: true,
            ..Default::default()
        })
    }

    fn click(&mut self, x: f32, y: f32) {
        self.frame(InputSnapshot {
            window_open: true,
            mouse_pos: Some((x, y)),
            mouse_down: true,
            ..Default::default()
        });
        self.idle();
    }

    fn press(&mut self, keys: &[Key]) -> Flow {
        self.frame(InputSnapshot {
            window_open: true,
            pressed: keys.to_vec(),
            ..Default::default()
        })
    }
}

#[test]
fn test_paint_save_and_reload() {
    let path = test_path("paint_reload.obj");
    let mut work_file = WorkFile::open_or_create(&path).unwrap();
    let mut driver = Driver::new(work_file.load().unwrap());

    // R := 255, G := 0, B := 0
    driver.click(1060.0, 260.0);
    driver.press(&[Key::Backspace, Key::Backspace, Key::Key2, Key::Key5, Key::Key5]);
    driver.press(&[Key::Enter]);
    driver.click(1060.0, 310.0);
    driver.press(&[Key::Backspace, Key::Backspace, Key::Key0, Key::Enter]);
    driver.click(1060.0, 360.0);
    driver.press(&[Key::Backspace, Key::Backspace, Key::Key0, Key::Enter]);
    assert_eq!(driver.session.picker().color(), Color::rgb(255, 0, 0));

    driver.click(10.0, 10.0);
    driver.click(75.0, 120.0);
    assert_eq!(driver.press(&[Key::Escape]), Flow::Quit);

    driver.session.flush_to_disk(&mut work_file).unwrap();
    drop(work_file);

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("v 0 0 255 0 0\nv 50 0 255 0 0\nv 0 50 255 0 0\nv 50 50 255 0 0\ni 0 1 2\ni 1 2 3\n"));
    assert!(contents.contains("v 50 100 255 0 0\n"));
    assert!(contents.ends_with("i 4 5 6\ni 5 6 7\n"));

    let reloaded = WorkFile::open(&path).unwrap().load().unwrap();
    assert_eq!(reloaded, *driver.session.store());
    assert_eq!(reloaded.len(), 2);

    fs::remove_file(&path).unwrap();
}

#[test]
fn test_held_pan_then_paint() {
    let mut driver = Driver::new(TileStore::new());

    // Held for six 16 ms frames: one immediate step, one after 75 ms.
    for _ in 0..6 {
        driver.frame(InputSnapshot {
            window_open: true,
            held: vec![Key::A],
            ..Default::default()
        });
    }
    driver.idle();
    assert_eq!(driver.session.offset().x, -100);

    driver.click(75.0, 120.0);
    assert_eq!(
        driver.session.store().lookup(Cell::new(-50, 100)),
        Some(Color::BLACKISH)
    );
}

#[test]
fn test_toggle_twice_leaves_file_unchanged() {
    let path = test_path("toggle_twice.obj");
    fs::write(
        &path,
        "v 100 100 1 2 3\nv 150 100 1 2 3\nv 100 150 1 2 3\nv 150 150 1 2 3\ni 0 1 2\ni 1 2 3\n",
    )
    .unwrap();
    let before = fs::read_to_string(&path).unwrap();

    let mut work_file = WorkFile::open(&path).unwrap();
    let mut driver = Driver::new(work_file.load().unwrap());
    driver.click(300.0, 300.0);
    driver.click(310.0, 320.0);
    driver.session.flush_to_disk(&mut work_file).unwrap();
    drop(work_file);

    assert_eq!(fs::read_to_string(&path).unwrap(), before);
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_window_close_while_editing_quits() {
    let mut driver = Driver::new(TileStore::new());
    driver.click(1060.0, 260.0);
    assert!(driver.session.picker().is_editing());

    let flow = driver.frame(InputSnapshot {
        window_open: false,
        ..Default::default()
    });
    assert_eq!(flow, Flow::Quit);
}

#[test]
fn test_full_frame_render() {
    let store: TileStore = [(Cell::new(0, 0), Color::rgb(1, 2, 3))].into_iter().collect();
    let mut session = EditorSession::new(store);
    session.handle(EditorEvent::Click { x: 1060, y: 260 });

    let mut buffer = vec![0u32; WINDOW_WIDTH * WINDOW_HEIGHT];
    render_canvas(&session, &mut buffer, WINDOW_WIDTH, WINDOW_HEIGHT);
    let mut status_bar = StatusBar::new();
    status_bar.tile_count = session.store().len();
    status_bar.editing = session.picker().is_editing();
    status_bar.render(&mut buffer, WINDOW_WIDTH, WINDOW_HEIGHT);

    assert_eq!(buffer[10 * WINDOW_WIDTH + 10], Color::rgb(1, 2, 3).to_argb());
    assert!(buffer.iter().all(|&p| p != 0));
}
