use log::{error, info, warn};
use minifb::{Window, WindowOptions};
use std::env;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tile_core::{EditorSession, Flow, WorkFile};
use tile_gui::canvas::{self, WINDOW_HEIGHT, WINDOW_WIDTH};
use tile_gui::input::{InputSnapshot, InputTranslator, KeyBindings};
use tile_gui::settings::Settings;
use tile_gui::status_bar::StatusBar;

/// Resolve a line typed at the path prompt. Blank input takes the default.
fn choose_path(input: &str, default: Option<&str>) -> Option<String> {
    match input.trim() {
        "" => default.map(str::to_string),
        typed => Some(typed.to_string()),
    }
}

fn prompt_for_path(default: Option<&str>) -> io::Result<Option<String>> {
    let mut stdout = io::stdout();
    match default {
        Some(path) => print!("Enter the file path to add to [{}]: ", path),
        None => print!("Enter the file path to add to: "),
    }
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(choose_path(&line, default))
}

fn display_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

/// Poll, dispatch and draw until the session asks to quit or the window fails.
fn run(session: &mut EditorSession, settings: &Settings, file_path: &str) -> Result<(), minifb::Error> {
    let mut window = Window::new(
        &format!("Tile Editor - {}", file_path),
        WINDOW_WIDTH,
        WINDOW_HEIGHT,
        WindowOptions::default(),
    )?;

    let mut translator = InputTranslator::new(
        KeyBindings::from_mapping(&settings.keyboard),
        Duration::from_millis(settings.pan_repeat_ms),
    );
    let mut buffer = vec![0u32; WINDOW_WIDTH * WINDOW_HEIGHT];
    let mut status_bar = StatusBar::new();
    status_bar.file_name = display_name(file_path);
    let frame_time = Duration::from_millis(settings.frame_time_ms());

    loop {
        let frame_start = Instant::now();

        let snapshot = InputSnapshot::capture(&window);
        for event in translator.translate(&snapshot, frame_start) {
            if session.handle(event) == Flow::Quit {
                return Ok(());
            }
        }

        status_bar.tile_count = session.store().len();
        status_bar.offset = session.offset();
        status_bar.zoom = session.zoom();
        status_bar.editing = session.picker().is_editing();
        status_bar.message = if status_bar.editing {
            "Enter: apply  Esc: cancel".to_string()
        } else {
            String::new()
        };

        canvas::render_canvas(session, &mut buffer, WINDOW_WIDTH, WINDOW_HEIGHT);
        status_bar.render(&mut buffer, WINDOW_WIDTH, WINDOW_HEIGHT);
        window.update_with_buffer(&buffer, WINDOW_WIDTH, WINDOW_HEIGHT)?;

        let frame_dt = frame_start.elapsed();
        if frame_dt < frame_time {
            std::thread::sleep(frame_time - frame_dt);
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut create = false;
    let mut file_path: Option<String> = None;
    for a in env::args().skip(1) {
        if a == "--create" {
            create = true;
            continue;
        }
        if file_path.is_none() {
            file_path = Some(a);
        }
    }

    let mut settings = Settings::load();

    let file_path = match file_path {
        Some(path) => path,
        None => match prompt_for_path(settings.last_file_path.as_deref()) {
            Ok(Some(path)) => path,
            Ok(None) => {
                error!("No work file given");
                return ExitCode::FAILURE;
            }
            Err(e) => {
                error!("Failed to read the work file path: {}", e);
                return ExitCode::FAILURE;
            }
        },
    };

    let opened = if create {
        WorkFile::open_or_create(&file_path)
    } else {
        WorkFile::open(&file_path)
    };
    let mut work_file = match opened {
        Ok(work_file) => work_file,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let store = match work_file.load() {
        Ok(store) => store,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut session = EditorSession::new(store);
    let mut exit = ExitCode::SUCCESS;

    if let Err(e) = run(&mut session, &settings, &file_path) {
        error!("Window error: {}", e);
        exit = ExitCode::FAILURE;
    }

    match session.flush_to_disk(&mut work_file) {
        Ok(()) => info!(
            "Saved {} tile(s) to {}",
            session.store().len(),
            work_file.path().display()
        ),
        Err(e) => {
            error!("{}", e);
            exit = ExitCode::FAILURE;
        }
    }
    drop(work_file);

    settings.last_file_path = Some(file_path);
    if let Err(e) = settings.save() {
        warn!("Failed to save settings: {}", e);
    }

    exit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choose_path() {
        assert_eq!(choose_path("tiles.obj\n", None), Some("tiles.obj".to_string()));
        assert_eq!(
            choose_path("  \n", Some("last.obj")),
            Some("last.obj".to_string())
        );
        assert_eq!(
            choose_path("new.obj\r\n", Some("last.obj")),
            Some("new.obj".to_string())
        );
        assert_eq!(choose_path("", None), None);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("/tmp/levels/one.obj"), "one.obj");
        assert_eq!(display_name("one.obj"), "one.obj");
    }
}
