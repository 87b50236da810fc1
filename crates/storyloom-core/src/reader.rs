// ABOUTME: StoryReader walks a story's choice graph, keeping a back-history stack.
// ABOUTME: Forward moves push history, backward moves pop it, and resets clear it.

use thiserror::Error;

use crate::fragment::{FragmentId, StoryFragment};
use crate::story::Story;

/// Errors raised by reading navigation. Bad input is reported rather than
/// silently ignored; the reader's position never changes on failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReaderError {
    #[error("story has no designated first page and no entry point was given")]
    NoEntryPoint,

    #[error("fragment {0} does not exist in this story")]
    MissingFragment(FragmentId),

    #[error("choice index {index} is out of range for a fragment with {count} choices")]
    ChoiceOutOfRange { index: usize, count: usize },
}

/// A reading session over one story. Owns the story for the duration of the
/// session; `into_story` hands it back when the session ends.
#[derive(Debug, Clone)]
pub struct StoryReader {
    story: Story,
    start: FragmentId,
    current: FragmentId,
    history: Vec<FragmentId>,
}

impl StoryReader {
    /// Open a reading session positioned at `entry`, or at the story's
    /// designated first page when no entry is given.
    pub fn open(story: Story, entry: Option<FragmentId>) -> Result<Self, ReaderError> {
        let start = entry
            .or_else(|| story.first_page())
            .ok_or(ReaderError::NoEntryPoint)?;
        if story.fragment(start).is_none() {
            return Err(ReaderError::MissingFragment(start));
        }
        Ok(Self {
            story,
            start,
            current: start,
            history: Vec::new(),
        })
    }

    /// The fragment the reader is positioned on.
    pub fn current(&self) -> &StoryFragment {
        // Every id assigned to `current` is checked against the graph before
        // the move, and the story is not mutable while the session holds it.
        self.story
            .fragment(self.current)
            .expect("current fragment id was validated on navigation")
    }

    /// The id of the current fragment.
    pub fn current_id(&self) -> FragmentId {
        self.current
    }

    /// Follow the indexed choice of the current fragment. On success the
    /// previous position is pushed onto history and the destination fragment
    /// is returned.
    pub fn advance(&mut self, choice_index: usize) -> Result<&StoryFragment, ReaderError> {
        let choices = &self.current().choices;
        let count = choices.len();
        let choice = choices
            .get(choice_index)
            .ok_or(ReaderError::ChoiceOutOfRange {
                index: choice_index,
                count,
            })?;
        let destination = choice.destination;

        if self.story.fragment(destination).is_none() {
            return Err(ReaderError::MissingFragment(destination));
        }

        self.history.push(self.current);
        self.current = destination;
        Ok(self.current())
    }

    /// Step back to the previously visited fragment. A no-op when the
    /// history is already empty.
    pub fn to_previous(&mut self) -> &StoryFragment {
        if let Some(previous) = self.history.pop() {
            self.current = previous;
        }
        self.current()
    }

    /// Clear history and reset to the story's designated first page, falling
    /// back to the session's opening entry when none is designated.
    pub fn to_beginning(&mut self) -> &StoryFragment {
        self.history.clear();
        self.current = self.story.first_page().unwrap_or(self.start);
        self.current()
    }

    /// Number of entries on the back-history stack.
    pub fn history_depth(&self) -> usize {
        self.history.len()
    }

    /// The story this session is reading.
    pub fn story(&self) -> &Story {
        &self.story
    }

    /// End the session and hand the story back.
    pub fn into_story(self) -> Story {
        self.story
    }
}
