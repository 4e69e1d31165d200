// src/history.rs
use crate::error::SearchError;
use crate::search::Source;
use dirs::data_dir;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::PathBuf;

/// Most recent searches kept
pub const MAX_ENTRIES: usize = 5;

/// Storage key; the file store uses it as the file stem
pub const HISTORY_KEY: &str = "recent_searches";

const APP_DIR: &str = "productScout";

/// A search that completed successfully
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHistoryEntry {
    pub keyword: String,
    pub source: Source,
}

impl SearchHistoryEntry {
    pub fn new(keyword: &str, source: Source) -> Self {
        SearchHistoryEntry {
            keyword: keyword.trim().to_string(),
            source,
        }
    }
}

/// Where recent searches live between runs
pub trait HistoryStore {
    fn load(&self) -> Result<Vec<SearchHistoryEntry>, SearchError>;

    fn persist(&self, entries: &[SearchHistoryEntry]) -> Result<(), SearchError>;

    /// Move `entry` to the front, dropping any older copy of the same
    /// (keyword, source) pair and anything past `MAX_ENTRIES`.
    fn append(&self, entry: SearchHistoryEntry) -> Result<Vec<SearchHistoryEntry>, SearchError> {
        let mut entries = self.load()?;
        entries.retain(|existing| existing != &entry);
        entries.insert(0, entry);
        entries.truncate(MAX_ENTRIES);
        self.persist(&entries)?;
        Ok(entries)
    }
}

/// JSON file in the user's data directory
#[derive(Debug, Clone)]
pub struct FileHistoryStore {
    path: PathBuf,
}

impl FileHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileHistoryStore { path: path.into() }
    }

    /// Store at `<data dir>/productScout/recent_searches.json`
    pub fn in_data_dir() -> Result<Self, SearchError> {
        let dir = data_dir()
            .ok_or_else(|| SearchError::InvalidInput("no data directory available".to_string()))?
            .join(APP_DIR);
        Ok(Self::new(dir.join(format!("{}.json", HISTORY_KEY))))
    }
}

impl HistoryStore for FileHistoryStore {
    fn load(&self) -> Result<Vec<SearchHistoryEntry>, SearchError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut file = File::open(&self.path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        match serde_json::from_str::<Vec<SearchHistoryEntry>>(&contents) {
            Ok(mut entries) => {
                entries.truncate(MAX_ENTRIES);
                Ok(entries)
            }
            Err(e) => {
                // A corrupt file shouldn't block searching; it gets rewritten on the next append
                log::warn!("Ignoring unreadable history at {:?}: {}", self.path, e);
                Ok(Vec::new())
            }
        }
    }

    fn persist(&self, entries: &[SearchHistoryEntry]) -> Result<(), SearchError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let encoded = serde_json::to_string(entries)?;
        let mut file = File::create(&self.path)?;
        file.write_all(encoded.as_bytes())?;
        log::trace!("Persisted {} history entries to {:?}", entries.len(), self.path);
        Ok(())
    }
}

/// In-process store for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    entries: std::cell::RefCell<Vec<SearchHistoryEntry>>,
}

#[cfg(test)]
impl HistoryStore for MemoryHistoryStore {
    fn load(&self) -> Result<Vec<SearchHistoryEntry>, SearchError> {
        Ok(self.entries.borrow().clone())
    }

    fn persist(&self, entries: &[SearchHistoryEntry]) -> Result<(), SearchError> {
        *self.entries.borrow_mut() = entries.to_vec();
        Ok(())
    }
}
