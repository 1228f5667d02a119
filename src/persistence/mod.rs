//! High-score persistence
//!
//! The only thing this game saves is a single non-negative integer. Storage
//! sits behind [`ScoreStore`] so the engine and its tests never touch disk.

use std::cell::Cell;
use std::fs;
use std::path::PathBuf;

use crate::error::StoreError;

/// Default file name for the persisted best score
pub const DEFAULT_HIGH_SCORE_FILE: &str = "highscore.txt";

/// Key-value style capability holding the best score
pub trait ScoreStore {
    fn load(&self) -> Result<u64, StoreError>;
    fn save(&self, score: u64) -> Result<(), StoreError>;
}

/// Plain-text file holding one integer
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for FileScoreStore {
    fn default() -> Self {
        Self::new(DEFAULT_HIGH_SCORE_FILE)
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> Result<u64, StoreError> {
        let contents = fs::read_to_string(&self.path)?;
        parse_score(&contents)
    }

    fn save(&self, score: u64) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, score.to_string())?;
        Ok(())
    }
}

fn parse_score(contents: &str) -> Result<u64, StoreError> {
    let trimmed = contents.trim();
    trimmed.parse().map_err(|_| StoreError::Malformed {
        contents: trimmed.to_string(),
    })
}

/// In-process store for tests and headless runs
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    value: Cell<Option<u64>>,
}

impl MemoryScoreStore {
    pub fn with_score(score: u64) -> Self {
        Self {
            value: Cell::new(Some(score)),
        }
    }

    /// Last value written (or seeded), if any
    pub fn stored(&self) -> Option<u64> {
        self.value.get()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> Result<u64, StoreError> {
        self.value.get().ok_or_else(|| {
            StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no score stored",
            ))
        })
    }

    fn save(&self, score: u64) -> Result<(), StoreError> {
        self.value.set(Some(score));
        Ok(())
    }
}

impl<S: ScoreStore + ?Sized> ScoreStore for &S {
    fn load(&self) -> Result<u64, StoreError> {
        (**self).load()
    }

    fn save(&self, score: u64) -> Result<(), StoreError> {
        (**self).save(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("space-dodger-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_score("  42\n").unwrap(), 42);
        assert_eq!(parse_score("0").unwrap(), 0);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_score("abc"),
            Err(StoreError::Malformed { .. })
        ));
        assert!(parse_score("-3").is_err());
        assert!(parse_score("").is_err());
    }

    #[test]
    fn test_file_store_round_trip() {
        let path = scratch_path("round_trip.txt");
        let store = FileScoreStore::new(&path);
        store.save(123).unwrap();
        assert_eq!(store.load().unwrap(), 123);
        assert_eq!(fs::read_to_string(&path).unwrap(), "123");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_file_store_missing_file() {
        let store = FileScoreStore::new(scratch_path("never_written.txt"));
        let err = store.load().unwrap_err();
        assert!(err.is_missing());
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryScoreStore::default();
        assert!(store.load().unwrap_err().is_missing());
        store.save(9).unwrap();
        assert_eq!(store.load().unwrap(), 9);
        assert_eq!(store.stored(), Some(9));
    }
}
