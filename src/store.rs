//! Key-value persistence for the high score.

use anyhow::{Context, Result};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

/// Key the high score is stored under
pub const HIGH_SCORE_KEY: &str = "snakeHighScore";

/// Small integer key-value store
pub trait ScoreStore {
    fn get(&self, key: &str) -> Result<Option<u32>>;
    fn set(&mut self, key: &str, value: u32) -> Result<()>;
}

/// Values kept for the life of the process only
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<u32>> {
        Ok(self.values.get(key).copied())
    }

    fn set(&mut self, key: &str, value: u32) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Values kept as a JSON object in a single file.
///
/// A missing file reads as empty; every `set` rewrites the whole file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<BTreeMap<String, u32>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read scores from {:?}", self.path))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse scores in {:?}", self.path))
    }
}

impl ScoreStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<u32>> {
        Ok(self.read_all()?.get(key).copied())
    }

    fn set(&mut self, key: &str, value: u32) -> Result<()> {
        // A corrupt file is replaced rather than blocking every future save
        let mut values = self.read_all().unwrap_or_default();
        values.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }

        let json = serde_json::to_string_pretty(&values).context("Failed to serialize scores")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write scores to {:?}", self.path))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get(HIGH_SCORE_KEY).unwrap(), None);

        store.set(HIGH_SCORE_KEY, 12).unwrap();
        assert_eq!(store.get(HIGH_SCORE_KEY).unwrap(), Some(12));
    }

    #[test]
    fn test_file_store_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("scores.json"));
        assert_eq!(store.get(HIGH_SCORE_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_store_persists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("scores.json");

        let mut store = JsonFileStore::new(&path);
        store.set(HIGH_SCORE_KEY, 42).unwrap();
        store.set("other", 1).unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get(HIGH_SCORE_KEY).unwrap(), Some(42));
        assert_eq!(reopened.get("other").unwrap(), Some(1));
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("scores.json");
        std::fs::write(&path, "not json").unwrap();

        let mut store = JsonFileStore::new(&path);
        assert!(store.get(HIGH_SCORE_KEY).is_err());

        store.set(HIGH_SCORE_KEY, 3).unwrap();
        assert_eq!(store.get(HIGH_SCORE_KEY).unwrap(), Some(3));
    }
}
