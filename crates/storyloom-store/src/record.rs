// ABOUTME: Per-story record files: one versioned JSON envelope per story id.
// ABOUTME: Records hold the full fragment graph; the index decides whether a story exists.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storyloom_core::{Story, StoryId};
use thiserror::Error;

/// Format version stamped into every record envelope. Increment on breaking
/// changes to the story schema.
pub const RECORD_FORMAT_VERSION: u32 = 1;

/// Errors that can occur while reading or writing story records.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no record file for story {0}")]
    NotFound(StoryId),

    #[error("record format version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}

/// On-disk shape of a story record.
#[derive(Debug, Serialize, Deserialize)]
struct StoryRecord {
    format_version: u32,
    saved_at: DateTime<Utc>,
    story: Story,
}

/// Path of the record file for a story id.
pub fn record_path(dir: &Path, id: StoryId) -> PathBuf {
    dir.join(format!("{id}.json"))
}

/// Write the record for a story with an atomic write, creating the records
/// directory if needed.
pub fn save_record(dir: &Path, id: StoryId, story: &Story) -> Result<(), RecordError> {
    fs::create_dir_all(dir)?;

    let record = StoryRecord {
        format_version: RECORD_FORMAT_VERSION,
        saved_at: Utc::now(),
        story: story.clone(),
    };
    let json = serde_json::to_string_pretty(&record)?;
    crate::atomic::write_atomic(&record_path(dir, id), json.as_bytes())?;

    Ok(())
}

/// Load the record for a story id. A missing file is `RecordError::NotFound`;
/// an envelope from a future format version is refused rather than guessed at.
pub fn load_record(dir: &Path, id: StoryId) -> Result<Story, RecordError> {
    let path = record_path(dir, id);
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(RecordError::NotFound(id));
        }
        Err(e) => return Err(RecordError::Io(e)),
    };

    let record: StoryRecord = serde_json::from_str(&contents)?;
    if record.format_version > RECORD_FORMAT_VERSION {
        return Err(RecordError::UnsupportedVersion {
            found: record.format_version,
            supported: RECORD_FORMAT_VERSION,
        });
    }

    Ok(record.story)
}

/// Delete the record file for a story id.
pub fn delete_record(dir: &Path, id: StoryId) -> Result<(), RecordError> {
    fs::remove_file(record_path(dir, id))?;
    Ok(())
}
