// ABOUTME: Defines StoryFragment, one page of a story, plus Choice edges and FragmentId.
// ABOUTME: Fragments hold ordered content and annotation media and the outgoing choice list.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::media::Media;

/// Identifier for a fragment within a single story. Ids are assigned
/// sequentially by the owning story and are not unique across stories.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct FragmentId(pub u32);

impl fmt::Display for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A labeled edge from one fragment to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub text: String,
    pub destination: FragmentId,
}

/// One page of a story. Content is what the page shows; annotations are
/// reader-facing margin media. A fragment with no choices is a terminal page,
/// which is a valid resting state rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryFragment {
    pub title: String,
    pub description: String,
    pub content: Vec<Media>,
    pub annotations: Vec<Media>,
    pub choices: Vec<Choice>,
}

impl StoryFragment {
    /// Create an empty fragment with the given title and description.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            content: Vec::new(),
            annotations: Vec::new(),
            choices: Vec::new(),
        }
    }

    /// Append a media item to the page content.
    pub fn add_content(&mut self, media: Media) {
        self.content.push(media);
    }

    /// Append a media item to the annotations.
    pub fn add_annotation(&mut self, media: Media) {
        self.annotations.push(media);
    }

    /// Append an outgoing choice edge.
    pub fn add_choice(&mut self, text: impl Into<String>, destination: FragmentId) {
        self.choices.push(Choice {
            text: text.into(),
            destination,
        });
    }

    /// True when the fragment has no outgoing choices.
    pub fn is_terminal(&self) -> bool {
        self.choices.is_empty()
    }
}
