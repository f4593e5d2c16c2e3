use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::ScoreError;

const APP_DIR_NAME: &str = "grid-snake";
const SCORE_FILE_NAME: &str = "high_score.json";

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScoreFile {
    high_score: u32,
}

/// Durable storage for the single best score.
pub trait HighScoreStore {
    /// Reads the persisted high score. Missing or unreadable records count
    /// as 0.
    fn load(&mut self) -> u32;

    /// Replaces the persisted high score with `high_score`.
    fn save(&mut self, high_score: u32) -> Result<(), ScoreError>;
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn default_scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

/// High score kept as a small JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at [`default_scores_path`].
    #[must_use]
    pub fn at_default_location() -> Self {
        Self::new(default_scores_path())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the high score, keeping the reason when the record is unusable.
    ///
    /// Returns `Ok(0)` when the file does not exist yet (first run).
    pub fn try_load(&self) -> Result<u32, ScoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(source) if source.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(source) => {
                return Err(ScoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str::<ScoreFile>(&raw)
            .map(|file| file.high_score)
            .map_err(|source| ScoreError::Format {
                path: self.path.clone(),
                source,
            })
    }

    fn io_error(&self, source: io::Error) -> ScoreError {
        ScoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| SCORE_FILE_NAME.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&mut self) -> u32 {
        match self.try_load() {
            Ok(score) => score,
            Err(error) => {
                warn!("treating high score as 0: {error}");
                0
            }
        }
    }

    /// Writes to a sibling file first and renames it over the record, so a
    /// crash mid-write never leaves a truncated score behind.
    fn save(&mut self, high_score: u32) -> Result<(), ScoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let payload = ScoreFile { high_score };
        let json = serde_json::to_string_pretty(&payload).map_err(|source| ScoreError::Format {
            path: self.path.clone(),
            source,
        })?;

        let staging = self.staging_path();
        fs::write(&staging, json).map_err(|e| self.io_error(e))?;
        fs::rename(&staging, &self.path).map_err(|e| {
            let _ = fs::remove_file(&staging);
            self.io_error(e)
        })?;

        info!("saved high score {high_score} to {}", self.path.display());
        Ok(())
    }
}

/// Volatile store for headless hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    high_score: u32,
    saves: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn with_high_score(high_score: u32) -> Self {
        Self {
            high_score,
            saves: 0,
        }
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Number of times `save` has been called.
    #[must_use]
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> u32 {
        self.high_score
    }

    fn save(&mut self, high_score: u32) -> Result<(), ScoreError> {
        self.high_score = high_score;
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{HighScoreStore, JsonFileStore, MemoryStore};
    use crate::error::ScoreError;

    #[test]
    fn saved_score_is_loaded_back() {
        let path = unique_test_path("saved");
        let mut store = JsonFileStore::new(&path);

        store.save(42).expect("score save should succeed");

        assert_eq!(store.load(), 42);
        assert!(!store.staging_path().exists(), "staging file is renamed away");
        cleanup_test_path(&path);
    }

    #[test]
    fn missing_score_file_returns_zero() {
        let path = unique_test_path("missing");
        let mut store = JsonFileStore::new(&path);

        assert_eq!(store.try_load().expect("missing file is not an error"), 0);
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn existing_record_is_read() {
        let path = unique_test_path("existing");
        write_raw(&path, r#"{"high_score": 100}"#);

        assert_eq!(JsonFileStore::new(&path).load(), 100);
        cleanup_test_path(&path);
    }

    #[test]
    fn malformed_score_file_loads_as_zero() {
        let path = unique_test_path("malformed");
        write_raw(&path, "not-json");
        let mut store = JsonFileStore::new(&path);

        assert!(matches!(store.try_load(), Err(ScoreError::Format { .. })));
        assert_eq!(store.load(), 0);

        cleanup_test_path(&path);
    }

    #[test]
    fn save_overwrites_previous_record() {
        let path = unique_test_path("overwrite");
        write_raw(&path, r#"{"high_score": 100}"#);
        let mut store = JsonFileStore::new(&path);

        store.save(200).expect("score save should succeed");

        let raw = fs::read_to_string(&path).expect("record exists");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("record is json");
        assert_eq!(value["high_score"], 200);
        cleanup_test_path(&path);
    }

    #[test]
    fn memory_store_counts_saves() {
        let mut store = MemoryStore::with_high_score(5);

        assert_eq!(store.load(), 5);
        store.save(9).expect("memory save cannot fail");

        assert_eq!(store.high_score(), 9);
        assert_eq!(store.saves(), 1);
    }

    fn write_raw(path: &PathBuf, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(path, contents).expect("test file write should succeed");
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("grid-snake-score-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
