// ABOUTME: Type-segmented blob storage for image, video, and sound media files.
// ABOUTME: Blobs are reused by source file name when present, otherwise copied under a fresh ULID.

use std::fs;
use std::path::{Path, PathBuf};

use storyloom_core::MediaKind;
use thiserror::Error;
use ulid::Ulid;

/// Errors that can occur while storing media blobs.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("source path has no file name: {0}")]
    InvalidSource(PathBuf),
}

/// Blob storage rooted at `<home>/media`, with one subfolder per media kind.
#[derive(Debug)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    /// Create a media store rooted at the given directory, creating it if
    /// it does not exist.
    pub fn new(root: PathBuf) -> Result<Self, MediaError> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Copy a source file into the store and return the stored reference.
    ///
    /// If a blob named after the source file already exists in the kind's
    /// folder, that name is returned without copying. Reuse is by name only,
    /// never by content. Otherwise the blob is stored under a fresh ULID.
    pub fn save_blob(&self, source: &Path, kind: MediaKind) -> Result<String, MediaError> {
        let folder = self.root.join(kind.folder_name());
        fs::create_dir_all(&folder)?;

        let source_name = source
            .file_name()
            .ok_or_else(|| MediaError::InvalidSource(source.to_path_buf()))?;
        let existing = folder.join(source_name);
        if existing.exists() {
            let name = source_name.to_string_lossy().into_owned();
            tracing::debug!("media blob {name} already stored for kind {kind}, reusing");
            return Ok(name);
        }

        let name = Ulid::new().to_string();
        fs::copy(source, folder.join(&name))?;
        tracing::debug!("stored {kind} blob from {source:?} as {name}");
        Ok(name)
    }

    /// Resolve a stored reference to its path on disk.
    pub fn blob_path(&self, kind: MediaKind, name: &str) -> PathBuf {
        self.root.join(kind.folder_name()).join(name)
    }

    /// True when a stored reference resolves to an existing blob.
    pub fn contains(&self, kind: MediaKind, name: &str) -> bool {
        self.blob_path(kind, name).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_store() -> (TempDir, MediaStore, PathBuf) {
        let dir = TempDir::new().unwrap();
        let store = MediaStore::new(dir.path().join("media")).unwrap();
        let source_dir = dir.path().join("incoming");
        fs::create_dir_all(&source_dir).unwrap();
        (dir, store, source_dir)
    }

    #[test]
    fn save_blob_copies_under_fresh_name() {
        let (_dir, store, source_dir) = make_store();
        let source = source_dir.join("door.png");
        fs::write(&source, b"png bytes").unwrap();

        let name = store.save_blob(&source, MediaKind::Image).unwrap();

        assert_ne!(name, "door.png");
        assert!(store.contains(MediaKind::Image, &name));
        assert_eq!(
            fs::read(store.blob_path(MediaKind::Image, &name)).unwrap(),
            b"png bytes"
        );
    }

    #[test]
    fn save_blob_segments_by_kind() {
        let (_dir, store, source_dir) = make_store();
        let source = source_dir.join("clip.ogg");
        fs::write(&source, b"ogg bytes").unwrap();

        let name = store.save_blob(&source, MediaKind::Sound).unwrap();

        assert!(store
            .blob_path(MediaKind::Sound, &name)
            .to_string_lossy()
            .contains("/sound/"));
        assert!(!store.contains(MediaKind::Image, &name));
    }

    #[test]
    fn save_blob_reuses_existing_source_name() {
        let (_dir, store, source_dir) = make_store();
        let source = source_dir.join("door.png");
        fs::write(&source, b"original").unwrap();

        // Seed a blob under the source's own name.
        let folder = store.blob_path(MediaKind::Image, "door.png");
        fs::create_dir_all(folder.parent().unwrap()).unwrap();
        fs::write(&folder, b"already stored").unwrap();

        let name = store.save_blob(&source, MediaKind::Image).unwrap();

        // Reuse is by name, not content: the stored bytes stay untouched.
        assert_eq!(name, "door.png");
        assert_eq!(
            fs::read(store.blob_path(MediaKind::Image, &name)).unwrap(),
            b"already stored"
        );
    }

    #[test]
    fn save_blob_rejects_nameless_source() {
        let (_dir, store, _source_dir) = make_store();

        let result = store.save_blob(Path::new("/"), MediaKind::Video);
        assert!(matches!(result, Err(MediaError::InvalidSource(_))));
    }

    #[test]
    fn save_blob_fails_on_missing_source() {
        let (_dir, store, source_dir) = make_store();

        let result = store.save_blob(&source_dir.join("ghost.png"), MediaKind::Image);
        assert!(matches!(result, Err(MediaError::Io(_))));
    }
}
