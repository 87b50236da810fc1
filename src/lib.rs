// ABOUTME: Application context for storyloom: wires the local library and an active reading session.
// ABOUTME: Services are explicitly constructed and owned here rather than held as process-wide statics.

pub mod config;

use std::path::Path;

use storyloom_core::{FragmentId, ReaderError, Story, StoryFragment, StoryId, StoryReader};
use storyloom_remote::HttpRemoteLibrary;
use storyloom_store::{Library, LibraryError};
use thiserror::Error;

pub use config::LoomConfig;
pub use storyloom_core::{Media, MediaKind, StoryInfo};
pub use storyloom_remote::{RemoteError, RemoteLibrary};

/// Errors from application-level flows.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("library error: {0}")]
    Library(#[from] LibraryError),

    #[error("story {0} is not in the local library")]
    UnknownStory(StoryId),

    #[error(transparent)]
    Reader(#[from] ReaderError),
}

/// The application context: one local library, an optional client for a
/// remote story service, and, while a story is being read, one reading
/// session. Consumers receive this by reference instead of reaching for
/// globals, and its lifetime bounds every service it owns.
pub struct App {
    library: Library,
    remote: Option<HttpRemoteLibrary>,
    reader: Option<StoryReader>,
}

impl App {
    /// Open the application context against the configured library home. A
    /// remote client is constructed only when a remote URL is configured.
    pub fn open(config: &LoomConfig) -> Result<Self, AppError> {
        let library = Library::open(config.home.clone())?;
        let remote = config.remote_url.as_deref().map(HttpRemoteLibrary::new);
        tracing::info!("opened story library at {:?}", library.home());
        Ok(Self {
            library,
            remote,
            reader: None,
        })
    }

    /// The remote story service client, when one is configured.
    pub fn remote(&self) -> Option<&HttpRemoteLibrary> {
        self.remote.as_ref()
    }

    /// The local story library.
    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Mutable access to the local story library.
    pub fn library_mut(&mut self) -> &mut Library {
        &mut self.library
    }

    /// Add a brand-new empty story to the library and return its id, for
    /// authoring flows that fill it in afterwards.
    pub fn create_story(&mut self) -> StoryId {
        self.library.add(&Story::new())
    }

    /// Load a story from the library and open a reading session on it,
    /// replacing any session already active. `entry` overrides the story's
    /// designated first page.
    pub fn begin_reading(
        &mut self,
        id: StoryId,
        entry: Option<FragmentId>,
    ) -> Result<&StoryFragment, AppError> {
        let story = self.library.get(id).ok_or(AppError::UnknownStory(id))?;
        let reader = StoryReader::open(story, entry)?;
        Ok(self.reader.insert(reader).current())
    }

    /// The active reading session, if any.
    pub fn reader(&self) -> Option<&StoryReader> {
        self.reader.as_ref()
    }

    /// Mutable access to the active reading session.
    pub fn reader_mut(&mut self) -> Option<&mut StoryReader> {
        self.reader.as_mut()
    }

    /// Persist the story held by the active reading session under the given
    /// id. False when no session is active or the save fails.
    pub fn save_open_story(&mut self, id: StoryId) -> bool {
        match &self.reader {
            Some(reader) => {
                let story = reader.story().clone();
                self.library.save(id, &story)
            }
            None => false,
        }
    }

    /// End the active reading session, handing back its story.
    pub fn finish_reading(&mut self) -> Option<Story> {
        self.reader.take().map(StoryReader::into_story)
    }

    /// The library's home directory.
    pub fn home(&self) -> &Path {
        self.library.home()
    }
}
