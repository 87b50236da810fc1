// ABOUTME: The aggregate metadata index: the authoritative record of which stories exist locally.
// ABOUTME: Holds StoryInfo entries in insertion order and persists them as one versioned JSON file.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storyloom_core::{StoryId, StoryInfo};
use thiserror::Error;

/// Format version stamped into the index file. Increment on breaking
/// changes to the index schema.
pub const INDEX_FORMAT_VERSION: u32 = 1;

/// Errors that can occur while persisting the index.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk shape of the index file.
#[derive(Debug, Serialize, Deserialize)]
struct IndexFile {
    format_version: u32,
    saved_at: DateTime<Utc>,
    entries: Vec<StoryInfo>,
}

/// In-memory metadata index. Entries keep insertion order, which is the
/// tie-break when listings are sorted by title.
#[derive(Debug, Default)]
pub struct StoryIndex {
    entries: Vec<StoryInfo>,
}

impl StoryIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the index from `path`. A missing file means an empty library and
    /// is persisted immediately so the file exists from then on; an
    /// unreadable or corrupt file is logged and reinitialized as empty.
    pub fn load_or_init(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let index = Self::new();
                if let Err(e) = index.save(path) {
                    tracing::error!("failed to persist new empty index at {path:?}: {e}");
                }
                return index;
            }
            Err(e) => {
                tracing::warn!("unreadable index file at {path:?}, reinitializing empty: {e}");
                return Self::new();
            }
        };

        match serde_json::from_str::<IndexFile>(&contents) {
            Ok(file) if file.format_version <= INDEX_FORMAT_VERSION => Self {
                entries: file.entries,
            },
            Ok(file) => {
                tracing::warn!(
                    "index format version {} is newer than supported {}, reinitializing empty",
                    file.format_version,
                    INDEX_FORMAT_VERSION
                );
                Self::new()
            }
            Err(e) => {
                tracing::warn!("corrupt index file at {path:?}, reinitializing empty: {e}");
                Self::new()
            }
        }
    }

    /// Persist the index to `path` with an atomic write.
    pub fn save(&self, path: &Path) -> Result<(), IndexError> {
        let file = IndexFile {
            format_version: INDEX_FORMAT_VERSION,
            saved_at: Utc::now(),
            entries: self.entries.clone(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        crate::atomic::write_atomic(path, json.as_bytes())?;
        Ok(())
    }

    /// True when the id is present.
    pub fn contains(&self, id: StoryId) -> bool {
        self.entries.iter().any(|info| info.id == id)
    }

    /// Look up the info entry for an id.
    pub fn get(&self, id: StoryId) -> Option<&StoryInfo> {
        self.entries.iter().find(|info| info.id == id)
    }

    /// Insert or replace the entry for `info.id`. A replacement keeps the
    /// entry's original position; a new id is appended.
    pub fn upsert(&mut self, info: StoryInfo) {
        match self.entries.iter_mut().find(|entry| entry.id == info.id) {
            Some(entry) => *entry = info,
            None => self.entries.push(info),
        }
    }

    /// Remove the entry for an id. Returns false when the id was absent.
    pub fn remove(&mut self, id: StoryId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|info| info.id != id);
        self.entries.len() != before
    }

    /// All entries sorted by title ascending. The sort is stable, so entries
    /// with equal titles keep their insertion order.
    pub fn sorted_infos(&self) -> Vec<StoryInfo> {
        let mut infos = self.entries.clone();
        infos.sort_by(|a, b| a.title.cmp(&b.title));
        infos
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the index has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
