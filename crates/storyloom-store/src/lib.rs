// ABOUTME: Persistence layer for storyloom, handling the local story library on disk.
// ABOUTME: Provides the metadata index, per-story JSON records, media blob storage, and the Library facade.

mod atomic;
pub mod index;
pub mod library;
pub mod media;
pub mod record;

pub use index::{IndexError, StoryIndex, INDEX_FORMAT_VERSION};
pub use library::{Library, LibraryError, MIRROR_SUFFIX};
pub use media::{MediaError, MediaStore};
pub use record::{RecordError, RECORD_FORMAT_VERSION};
