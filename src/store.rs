//! High score persistence.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::error::StoreError;

/// Where the high score survives between processes.
pub trait HighScoreStore: Send + Sync {
    /// Returns the stored high score, or 0 if nothing was stored yet.
    fn load(&self) -> Result<u32, StoreError>;
    fn save(&mut self, high_score: u32) -> Result<(), StoreError>;
}

impl<T: HighScoreStore + ?Sized> HighScoreStore for Arc<Mutex<T>> {
    fn load(&self) -> Result<u32, StoreError> {
        self.lock().load()
    }

    fn save(&mut self, high_score: u32) -> Result<(), StoreError> {
        self.lock().save(high_score)
    }
}

/// Keeps the high score as a decimal number in a text file.
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self) -> Result<u32, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No high score file yet");
                return Ok(0);
            }
            Err(e) => return Err(e.into()),
        };

        let trimmed = contents.trim();
        trimmed.parse().map_err(|_| StoreError::Corrupt(trimmed.to_string()))
    }

    fn save(&mut self, high_score: u32) -> Result<(), StoreError> {
        fs::write(&self.path, high_score.to_string())?;
        debug!(path = %self.path.display(), high_score, "High score saved");
        Ok(())
    }
}

/// In-process store, useful for tests and runs without a writable disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    pub high_score: u32,
    /// Number of successful saves.
    pub saves: usize,
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self) -> Result<u32, StoreError> {
        Ok(self.high_score)
    }

    fn save(&mut self, high_score: u32) -> Result<(), StoreError> {
        self.high_score = high_score;
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use speculoos::prelude::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("pacman-rounds-{}-{name}", std::process::id()))
    }

    #[test]
    fn missing_file_loads_as_zero() {
        let store = FileHighScoreStore::new(temp_path("missing"));
        assert_that(&store.load().unwrap()).is_equal_to(0);
    }

    #[test]
    fn save_then_load() {
        let path = temp_path("roundtrip");
        let mut store = FileHighScoreStore::new(&path);
        store.save(4_250).unwrap();

        assert_that(&FileHighScoreStore::new(&path).load().unwrap()).is_equal_to(4_250);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn garbage_is_reported_as_corrupt() {
        let path = temp_path("corrupt");
        fs::write(&path, "lots").unwrap();

        let result = FileHighScoreStore::new(&path).load();
        assert!(matches!(result, Err(StoreError::Corrupt(ref s)) if s == "lots"));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn unwritable_path_is_an_io_error() {
        let mut store = FileHighScoreStore::new(temp_path("no-such-dir").join("score.txt"));
        assert!(matches!(store.save(10), Err(StoreError::Io(_))));
    }
}
