// ABOUTME: Defines StoryInfo, the lightweight metadata projection of a story.
// ABOUTME: Used for list display and the library index without loading the full graph.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::story::Story;

/// Identifier for a story in a library. ULIDs are collision-resistant random
/// 128-bit values, so fresh ids never need an existence check.
pub type StoryId = Ulid;

/// Metadata projection of a story for list display. Derived from the story
/// on every create, save, and mirror so it never drifts from the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryInfo {
    pub id: StoryId,
    pub title: String,
    pub author: String,
    pub description: String,
}

impl StoryInfo {
    /// Derive the projection for a story stored under the given id.
    pub fn from_story(id: StoryId, story: &Story) -> Self {
        Self {
            id,
            title: story.title.clone(),
            author: story.author.clone(),
            description: story.description.clone(),
        }
    }
}
