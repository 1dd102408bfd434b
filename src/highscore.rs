//! Best score, persisted as a single integer in text form

use crate::platform::KeyValueStore;

/// Storage key (file name natively)
pub const HIGHSCORE_KEY: &str = "highscore.txt";

/// Best score seen so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    best: u32,
}

impl HighScore {
    pub fn new(best: u32) -> Self {
        Self { best }
    }

    /// Parse the stored text; anything unreadable counts as zero
    pub fn parse(text: &str) -> u32 {
        text.trim().parse().unwrap_or(0)
    }

    /// Load from storage, defaulting to zero on any failure
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.read(HIGHSCORE_KEY) {
            Ok(Some(text)) => {
                let best = Self::parse(&text);
                log::info!("Loaded highscore {}", best);
                Self { best }
            }
            Ok(None) => {
                log::info!("No highscore found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to load highscore: {}", e);
                Self::default()
            }
        }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// True if `score` would replace the current best
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.best
    }

    /// Record a finished run's score
    ///
    /// The stored value is re-read first so a value written by another
    /// session is never lowered. Returns true if `score` is a new best.
    pub fn submit(&mut self, score: u32, store: &mut dyn KeyValueStore) -> bool {
        let stored = match store.read(HIGHSCORE_KEY) {
            Ok(Some(text)) => Self::parse(&text),
            Ok(None) => 0,
            Err(e) => {
                log::warn!("Failed to re-read highscore: {}", e);
                0
            }
        };
        self.best = self.best.max(stored);

        if !self.qualifies(score) {
            return false;
        }

        self.best = score;
        match store.write(HIGHSCORE_KEY, &score.to_string()) {
            Ok(()) => log::info!("New highscore {} saved", score),
            Err(e) => log::warn!("Failed to save highscore {}: {}", score, e),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{MemoryStore, StorageError};

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("broken".into()))
        }

        fn write(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Rejected {
                key: key.into(),
                reason: "read-only".into(),
            })
        }
    }

    #[test]
    fn test_parse_tolerates_garbage() {
        assert_eq!(HighScore::parse("17\n"), 17);
        assert_eq!(HighScore::parse("  3 "), 3);
        assert_eq!(HighScore::parse("abc"), 0);
        assert_eq!(HighScore::parse(""), 0);
        assert_eq!(HighScore::parse("-4"), 0);
    }

    #[test]
    fn test_load_missing_is_zero() {
        let store = MemoryStore::new();
        assert_eq!(HighScore::load(&store).best(), 0);
    }

    #[test]
    fn test_submit_only_overwrites_when_higher() {
        let mut store = MemoryStore::new();
        let mut hs = HighScore::load(&store);

        assert!(hs.submit(10, &mut store));
        assert_eq!(store.read(HIGHSCORE_KEY).unwrap().as_deref(), Some("10"));

        assert!(!hs.submit(10, &mut store));
        assert!(!hs.submit(4, &mut store));
        assert_eq!(store.read(HIGHSCORE_KEY).unwrap().as_deref(), Some("10"));

        assert!(hs.submit(11, &mut store));
        assert_eq!(HighScore::load(&store).best(), 11);
    }

    #[test]
    fn test_submit_respects_external_value() {
        let mut store = MemoryStore::new();
        let mut hs = HighScore::load(&store);
        store.write(HIGHSCORE_KEY, "50").unwrap();
        assert!(!hs.submit(20, &mut store));
        assert_eq!(hs.best(), 50);
        assert_eq!(store.read(HIGHSCORE_KEY).unwrap().as_deref(), Some("50"));
    }

    #[test]
    fn test_broken_store_degrades() {
        let mut store = BrokenStore;
        let mut hs = HighScore::load(&store);
        assert_eq!(hs.best(), 0);
        assert!(hs.submit(5, &mut store));
        assert_eq!(hs.best(), 5);
    }
}
