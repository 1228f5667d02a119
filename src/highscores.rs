//! Best-score tracking
//!
//! Persisted through a [`ScoreStore`]; a missing or unreadable store simply
//! means the best score starts at zero.

use crate::persistence::ScoreStore;

/// Best score seen across sessions, backed by a store
#[derive(Debug)]
pub struct HighScores<S: ScoreStore> {
    store: S,
    best: u64,
}

impl<S: ScoreStore> HighScores<S> {
    /// Read the stored best score, defaulting to zero
    pub fn load(store: S) -> Self {
        let best = match store.load() {
            Ok(score) => {
                log::info!("Loaded high score {}", score);
                score
            }
            Err(e) if e.is_missing() => {
                log::info!("No high score saved yet, starting at 0");
                0
            }
            Err(e) => {
                log::warn!("Ignoring stored high score: {}", e);
                0
            }
        };
        Self { store, best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Record a finished session's score. Returns true (and writes through the
    /// store) only when it beats the current best.
    pub fn submit(&mut self, score: u64) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        match self.store.save(score) {
            Ok(()) => log::info!("New high score {} saved", score),
            Err(e) => log::warn!("Failed to save high score {}: {}", score, e),
        }
        true
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::persistence::MemoryScoreStore;

    struct BrokenStore;

    impl ScoreStore for BrokenStore {
        fn load(&self) -> Result<u64, StoreError> {
            Err(StoreError::Malformed {
                contents: "not a number".to_string(),
            })
        }

        fn save(&self, _score: u64) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("read-only")))
        }
    }

    #[test]
    fn test_missing_store_starts_at_zero() {
        let scores = HighScores::load(MemoryScoreStore::default());
        assert_eq!(scores.best(), 0);
    }

    #[test]
    fn test_loads_existing_best() {
        let scores = HighScores::load(MemoryScoreStore::with_score(77));
        assert_eq!(scores.best(), 77);
    }

    #[test]
    fn test_submit_only_writes_when_beaten() {
        let mut scores = HighScores::load(MemoryScoreStore::with_score(10));

        assert!(!scores.submit(5));
        assert!(!scores.submit(10));
        assert_eq!(scores.store().stored(), Some(10));

        assert!(scores.submit(11));
        assert_eq!(scores.best(), 11);
        assert_eq!(scores.store().stored(), Some(11));
    }

    #[test]
    fn test_broken_store_is_not_fatal() {
        let mut scores = HighScores::load(BrokenStore);
        assert_eq!(scores.best(), 0);
        assert!(scores.submit(3));
        assert_eq!(scores.best(), 3);
    }
}
