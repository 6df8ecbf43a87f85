//! The work file: the single on-disk resource of an editing session.
//!
//! The handle is opened once at startup for reading and writing and kept
//! until the [`WorkFile`] is dropped. Every flush rewrites the whole file from
//! the current store; nothing is appended or patched.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

use crate::codec::{self, FormatError};
use crate::tile_store::TileStore;

#[derive(Debug, Error)]
pub enum WorkFileError {
    #[error("cannot open work file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("work file {} is not a valid tile file: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: FormatError,
    },
    #[error("I/O error on work file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug)]
pub struct WorkFile {
    path: PathBuf,
    file: File,
}

impl WorkFile {
    /// Open an existing work file for reading and writing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, WorkFileError> {
        Self::open_with(path.as_ref(), OpenOptions::new().read(true).write(true))
    }

    /// Like [`WorkFile::open`], but create an empty file if it is missing.
    pub fn open_or_create(path: impl AsRef<Path>) -> Result<Self, WorkFileError> {
        Self::open_with(
            path.as_ref(),
            OpenOptions::new().read(true).write(true).create(true),
        )
    }

    fn open_with(path: &Path, options: &OpenOptions) -> Result<Self, WorkFileError> {
        let file = options.open(path).map_err(|source| WorkFileError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Opened work file {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decode the whole file from the start.
    pub fn load(&mut self) -> Result<TileStore, WorkFileError> {
        self.file
            .seek(SeekFrom::Start(0))
            .map_err(|source| self.io_error(source))?;

        let store =
            codec::decode(BufReader::new(&self.file)).map_err(|source| WorkFileError::Decode {
                path: self.path.clone(),
                source,
            })?;

        info!(
            "Loaded {} tile(s) from {}",
            store.len(),
            self.path.display()
        );
        Ok(store)
    }

    /// Replace the file contents with the encoding of `store`.
    pub fn flush(&mut self, store: &TileStore) -> Result<(), WorkFileError> {
        self.rewrite(store).map_err(|source| self.io_error(source))?;
        debug!("Flushed {} tile(s) to {}", store.len(), self.path.display());
        Ok(())
    }

    fn rewrite(&mut self, store: &TileStore) -> io::Result<()> {
        self.file.seek(SeekFrom::Start(0))?;
        self.file.set_len(0)?;
        {
            let mut writer = BufWriter::new(&self.file);
            codec::encode(&mut writer, store)?;
            writer.flush()?;
        }
        self.file.sync_all()
    }

    fn io_error(&self, source: io::Error) -> WorkFileError {
        WorkFileError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::color::Color;
    use std::fs;

    fn test_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("tile_core_test_work_file");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn test_open_missing_file_fails() {
        let path = test_path("missing.obj");
        let err = WorkFile::open(&path).unwrap_err();
        assert!(matches!(err, WorkFileError::Open { .. }));
        assert!(err.to_string().contains("missing.obj"));
    }

    #[test]
    fn test_open_or_create_starts_empty() {
        let path = test_path("created.obj");
        let mut work = WorkFile::open_or_create(&path).unwrap();
        assert!(path.exists());
        assert!(work.load().unwrap().is_empty());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_flush_then_load() {
        let path = test_path("flush_load.obj");
        let mut work = WorkFile::open_or_create(&path).unwrap();

        let mut store = TileStore::new();
        store.toggle(Cell::new(0, 0), Color::rgb(255, 0, 0));
        store.toggle(Cell::new(-50, 50), Color::rgb(0, 255, 0));
        work.flush(&store).unwrap();

        assert_eq!(work.load().unwrap(), store);

        let mut reopened = WorkFile::open(&path).unwrap();
        assert_eq!(reopened.load().unwrap(), store);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_flush_overwrites_previous_contents() {
        let path = test_path("overwrite.obj");
        let mut work = WorkFile::open_or_create(&path).unwrap();

        let mut store = TileStore::new();
        for x in 0..10 {
            store.toggle(Cell::new(x * 50, 0), Color::BLACKISH);
        }
        work.flush(&store).unwrap();

        let small: TileStore = [(Cell::new(0, 0), Color::WHITISH)].into_iter().collect();
        work.flush(&small).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 6);
        assert_eq!(work.load().unwrap(), small);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_reports_decode_error_with_path() {
        let path = test_path("broken.obj");
        fs::write(&path, "v 0 zero 1 2 3\n\n\n\n").unwrap();

        let mut work = WorkFile::open(&path).unwrap();
        let err = work.load().unwrap_err();
        assert!(matches!(
            err,
            WorkFileError::Decode {
                source: FormatError::Malformed { line: 1, .. },
                ..
            }
        ));
        assert!(err.to_string().contains("broken.obj"));
        fs::remove_file(&path).unwrap();
    }
}
