// ABOUTME: Core library for storyloom, containing the story data model and reading navigator.
// ABOUTME: This crate defines the shared types used across the local library and remote client.

pub mod fragment;
pub mod info;
pub mod media;
pub mod reader;
pub mod story;

pub use fragment::{Choice, FragmentId, StoryFragment};
pub use info::{StoryId, StoryInfo};
pub use media::{Media, MediaKind};
pub use reader::{ReaderError, StoryReader};
pub use story::Story;
