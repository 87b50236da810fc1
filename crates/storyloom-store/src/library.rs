// ABOUTME: The Library facade: durable storage and metadata indexing for locally owned stories.
// ABOUTME: The index is the source of truth for existence; I/O failures are logged and surfaced as Option/bool.

use std::fs;
use std::path::{Path, PathBuf};

use storyloom_core::{MediaKind, Story, StoryId, StoryInfo};
use thiserror::Error;
use ulid::Ulid;

use crate::index::StoryIndex;
use crate::media::{MediaError, MediaStore};
use crate::record;

/// Suffix appended to a mirrored story's title.
pub const MIRROR_SUFFIX: &str = " (Mirror)";

/// Errors that can occur while opening a library. Once open, operations
/// report failure through their return values instead of errors.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("media store error: {0}")]
    Media(#[from] MediaError),
}

/// The local story library. Owns the on-disk layout under a home directory:
///
/// ```text
/// <home>/index.json            aggregate metadata index
/// <home>/stories/<id>.json     one record per story
/// <home>/media/<kind>/<name>   media blobs, type-segmented
/// ```
///
/// Every operation runs to completion on the calling thread. Mutators take
/// `&mut self`, so the index's check-then-insert windows are exclusive by
/// construction.
#[derive(Debug)]
pub struct Library {
    home: PathBuf,
    index: StoryIndex,
    media: MediaStore,
}

impl Library {
    /// Open the library rooted at `home`, creating the directory layout on
    /// first use. A missing or corrupt index file means an empty library.
    pub fn open(home: PathBuf) -> Result<Self, LibraryError> {
        fs::create_dir_all(home.join("stories"))?;
        let media = MediaStore::new(home.join("media"))?;
        let index = StoryIndex::load_or_init(&home.join("index.json"));
        Ok(Self { home, index, media })
    }

    /// The library's home directory.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Load the full story for an id. Returns None when the id is not in the
    /// index, regardless of whether a record file happens to exist, and when
    /// the record fails to load.
    pub fn get(&self, id: StoryId) -> Option<Story> {
        if !self.index.contains(id) {
            return None;
        }
        match record::load_record(&self.stories_dir(), id) {
            Ok(story) => Some(story),
            Err(e) => {
                tracing::error!("failed to load story record {id}: {e}");
                None
            }
        }
    }

    /// Metadata-only lookup; never touches the record file.
    pub fn get_info(&self, id: StoryId) -> Option<StoryInfo> {
        self.index.get(id).cloned()
    }

    /// All known stories sorted by title ascending, ties in insertion order.
    pub fn list_info(&self) -> Vec<StoryInfo> {
        self.index.sorted_infos()
    }

    /// Add a story under a fresh id. The info entry and both files are
    /// persisted; persistence failures are logged, and the assigned id is
    /// returned either way so the caller can retry a save.
    pub fn add(&mut self, story: &Story) -> StoryId {
        let id = Ulid::new();
        self.index.upsert(StoryInfo::from_story(id, story));
        self.persist_index();
        self.persist_record(id, story);
        tracing::info!("added story {id} ({:?})", story.title);
        id
    }

    /// Save a story under an existing or new id, re-deriving and
    /// re-persisting its info entry even when unchanged. Returns false when
    /// the record write fails.
    pub fn save(&mut self, id: StoryId, story: &Story) -> bool {
        self.index.upsert(StoryInfo::from_story(id, story));
        self.persist_index();
        self.persist_record(id, story)
    }

    /// Remove a story. Returns false when the id is absent. The index update
    /// is authoritative; deleting the record file afterwards is best-effort.
    pub fn remove(&mut self, id: StoryId) -> bool {
        if !self.index.remove(id) {
            return false;
        }
        self.persist_index();
        if let Err(e) = record::delete_record(&self.stories_dir(), id) {
            tracing::warn!("failed to delete record file for removed story {id}: {e}");
        }
        true
    }

    /// Remove several stories, each independently. No atomicity across the
    /// set and no early exit when one id is absent.
    pub fn remove_many(&mut self, ids: &[StoryId]) {
        for id in ids {
            self.remove(*id);
        }
    }

    /// Duplicate a story under a new id with " (Mirror)" appended to its
    /// title. The source story is untouched. Returns None when the source id
    /// is absent or its record cannot be loaded.
    pub fn mirror(&mut self, id: StoryId) -> Option<StoryId> {
        let mut copy = self.get(id)?;
        copy.title.push_str(MIRROR_SUFFIX);
        Some(self.add(&copy))
    }

    /// Copy a media source file into type-segmented storage and return the
    /// stored reference, or None on failure. A blob already stored under the
    /// source's file name is reused as-is.
    pub fn save_media(&mut self, source: &Path, kind: MediaKind) -> Option<String> {
        match self.media.save_blob(source, kind) {
            Ok(name) => Some(name),
            Err(e) => {
                tracing::error!("failed to store {kind} media from {source:?}: {e}");
                None
            }
        }
    }

    /// Resolve a stored media reference to its path on disk.
    pub fn media_path(&self, kind: MediaKind, name: &str) -> PathBuf {
        self.media.blob_path(kind, name)
    }

    /// Number of stories in the library.
    pub fn story_count(&self) -> usize {
        self.index.len()
    }

    fn stories_dir(&self) -> PathBuf {
        self.home.join("stories")
    }

    fn persist_index(&self) {
        if let Err(e) = self.index.save(&self.home.join("index.json")) {
            tracing::error!("failed to persist story index: {e}");
        }
    }

    fn persist_record(&self, id: StoryId, story: &Story) -> bool {
        match record::save_record(&self.stories_dir(), id, story) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("failed to persist record for story {id}: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyloom_core::{FragmentId, Media, StoryFragment};
    use tempfile::TempDir;

    fn make_library() -> (TempDir, Library) {
        let dir = TempDir::new().unwrap();
        let library = Library::open(dir.path().join("loom")).unwrap();
        (dir, library)
    }

    fn make_story(title: &str) -> Story {
        let mut story = Story::new();
        story.title = title.to_string();
        story.author = "Tester".to_string();
        story.description = format!("About {title}");

        let start = story.add_fragment(StoryFragment::new("Start", "The first page"));
        let end = story.add_fragment(StoryFragment::new("End", "The last page"));
        story.fragment_mut(start).unwrap().add_content(Media::Text {
            text: "Once upon a time.".to_string(),
        });
        story.fragment_mut(start).unwrap().add_choice("Continue", end);
        story.set_first_page(Some(start));
        story
    }

    #[test]
    fn open_creates_layout() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("loom");

        let library = Library::open(home.clone()).unwrap();

        assert!(home.join("stories").exists());
        assert!(home.join("media").exists());
        assert!(home.join("index.json").exists());
        assert_eq!(library.home(), &home);
        assert_eq!(library.story_count(), 0);
    }

    #[test]
    fn add_then_get_round_trips() {
        let (_dir, mut library) = make_library();
        let story = make_story("The Locked Door");

        let id = library.add(&story);
        let loaded = library.get(id).expect("story should load");

        assert_eq!(loaded, story);
        let info = library.get_info(id).expect("info should exist");
        assert_eq!(info.title, story.title);
        assert_eq!(info.author, story.author);
        assert_eq!(info.description, story.description);
    }

    #[test]
    fn absent_ids_fail_without_mutation() {
        let (_dir, mut library) = make_library();
        library.add(&make_story("Keeper"));
        let ghost = Ulid::new();

        assert!(library.get(ghost).is_none());
        assert!(library.get_info(ghost).is_none());
        assert!(!library.remove(ghost));
        assert!(library.mirror(ghost).is_none());
        assert_eq!(library.story_count(), 1);
    }

    #[test]
    fn get_ignores_stray_record_files() {
        let (_dir, mut library) = make_library();
        let story = make_story("Stray");
        let id = library.add(&story);
        library.remove(id);

        // Re-create the record file behind the index's back. The index is
        // the source of truth, so the story still does not exist.
        record::save_record(&library.stories_dir(), id, &story).unwrap();
        assert!(library.get(id).is_none());
    }

    #[test]
    fn list_info_sorts_by_title() {
        let (_dir, mut library) = make_library();
        let id_b = library.add(&make_story("Beta"));
        let id_a = library.add(&make_story("Alpha"));

        let infos = library.list_info();
        assert_eq!(infos.len(), 2);
        assert_eq!(infos[0].id, id_a);
        assert_eq!(infos[0].title, "Alpha");
        assert_eq!(infos[1].id, id_b);

        // Idempotent without mutation in between.
        assert_eq!(library.list_info(), infos);
    }

    #[test]
    fn save_updates_record_and_info() {
        let (_dir, mut library) = make_library();
        let mut story = make_story("Draft");
        let id = library.add(&story);

        story.title = "Final".to_string();
        assert!(library.save(id, &story));

        assert_eq!(library.get(id).unwrap().title, "Final");
        assert_eq!(library.get_info(id).unwrap().title, "Final");
    }

    #[test]
    fn save_under_new_id_inserts() {
        let (_dir, mut library) = make_library();
        let story = make_story("Imported");
        let id = Ulid::new();

        assert!(library.save(id, &story));
        assert_eq!(library.get(id).unwrap(), story);
    }

    #[test]
    fn remove_then_get_is_gone() {
        let (_dir, mut library) = make_library();
        let id = library.add(&make_story("Doomed"));

        assert!(library.remove(id));
        assert!(library.get(id).is_none());
        assert!(library.get_info(id).is_none());
        assert!(!record::record_path(&library.stories_dir(), id).exists());
    }

    #[test]
    fn remove_many_skips_absent_ids() {
        let (_dir, mut library) = make_library();
        let id_a = library.add(&make_story("A"));
        let id_b = library.add(&make_story("B"));

        library.remove_many(&[id_a, Ulid::new(), id_b]);
        assert_eq!(library.story_count(), 0);
    }

    #[test]
    fn mirror_duplicates_under_new_id() {
        let (_dir, mut library) = make_library();
        let story = make_story("The Locked Door");
        let id = library.add(&story);

        let mirror_id = library.mirror(id).expect("mirror should succeed");

        assert_ne!(mirror_id, id);
        let mirrored = library.get(mirror_id).unwrap();
        assert_eq!(mirrored.title, "The Locked Door (Mirror)");
        assert_eq!(mirrored.fragment_count(), story.fragment_count());

        // The source story is unmodified.
        assert_eq!(library.get(id).unwrap(), story);
        assert_eq!(
            library.get_info(mirror_id).unwrap().title,
            "The Locked Door (Mirror)"
        );
    }

    #[test]
    fn library_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("loom");
        let story = make_story("Persistent");

        let id = {
            let mut library = Library::open(home.clone()).unwrap();
            library.add(&story)
        };

        let library = Library::open(home).unwrap();
        assert_eq!(library.story_count(), 1);
        assert_eq!(library.get(id).unwrap(), story);
    }

    #[test]
    fn corrupt_index_reinitializes_and_library_stays_usable() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("loom");
        {
            let mut library = Library::open(home.clone()).unwrap();
            library.add(&make_story("Lost"));
        }
        fs::write(home.join("index.json"), "definitely not json").unwrap();

        let mut library = Library::open(home).unwrap();
        assert_eq!(library.story_count(), 0);

        let id = library.add(&make_story("Recovered"));
        assert!(library.get(id).is_some());
    }

    #[test]
    fn save_media_stores_and_resolves() {
        let (dir, mut library) = make_library();
        let source = dir.path().join("door.png");
        fs::write(&source, b"png bytes").unwrap();

        let name = library
            .save_media(&source, MediaKind::Image)
            .expect("media save should succeed");

        let stored = library.media_path(MediaKind::Image, &name);
        assert_eq!(fs::read(stored).unwrap(), b"png bytes");

        // Second save from the same source name reuses the seeded blob name.
        fs::write(library.media_path(MediaKind::Image, "door.png"), b"seeded").unwrap();
        let reused = library.save_media(&source, MediaKind::Image).unwrap();
        assert_eq!(reused, "door.png");
    }

    #[test]
    fn save_media_failure_is_none() {
        let (dir, mut library) = make_library();

        let missing = dir.path().join("ghost.png");
        assert!(library.save_media(&missing, MediaKind::Image).is_none());
    }

    #[test]
    fn scenario_add_list_remove_mirror() {
        let (_dir, mut library) = make_library();

        let id1 = library.add(&make_story("A"));
        let id2 = library.add(&make_story("B"));

        let infos = library.list_info();
        assert_eq!(
            infos.iter().map(|i| (i.title.as_str(), i.id)).collect::<Vec<_>>(),
            vec![("A", id1), ("B", id2)]
        );

        assert!(library.remove(id1));
        let infos = library.list_info();
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].id, id2);

        let id3 = library.mirror(id2).unwrap();
        assert_eq!(library.get_info(id3).unwrap().title, "B (Mirror)");
    }

    #[test]
    fn reader_walks_a_loaded_story() {
        use storyloom_core::StoryReader;

        let (_dir, mut library) = make_library();
        let id = library.add(&make_story("Walkable"));

        let story = library.get(id).unwrap();
        let mut reader = StoryReader::open(story, None).unwrap();
        assert_eq!(reader.current().title, "Start");

        reader.advance(0).unwrap();
        assert_eq!(reader.current().title, "End");
        assert_eq!(reader.current_id(), FragmentId(1));
    }
}
