// ABOUTME: Defines the Story aggregate: metadata, the fragment graph, and the first page.
// ABOUTME: Fragment ids are assigned sequentially; removal prunes choices that pointed at the page.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::fragment::{FragmentId, StoryFragment};

/// A complete branching story: title, author, description, the fragment
/// graph, and the designated first page. Cloning a story is the deep copy
/// used by mirroring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub title: String,
    pub author: String,
    pub description: String,
    first_page: Option<FragmentId>,
    fragments: BTreeMap<FragmentId, StoryFragment>,
    next_fragment_id: u32,
}

impl Default for Story {
    fn default() -> Self {
        Self::new()
    }
}

impl Story {
    /// Create an empty story with no fragments and no first page.
    pub fn new() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            description: String::new(),
            first_page: None,
            fragments: BTreeMap::new(),
            next_fragment_id: 0,
        }
    }

    /// Add a fragment to the story, assigning it the next free id.
    pub fn add_fragment(&mut self, fragment: StoryFragment) -> FragmentId {
        let id = FragmentId(self.next_fragment_id);
        self.next_fragment_id += 1;
        self.fragments.insert(id, fragment);
        id
    }

    /// Look up a fragment by id.
    pub fn fragment(&self, id: FragmentId) -> Option<&StoryFragment> {
        self.fragments.get(&id)
    }

    /// Mutable lookup, for authoring flows.
    pub fn fragment_mut(&mut self, id: FragmentId) -> Option<&mut StoryFragment> {
        self.fragments.get_mut(&id)
    }

    /// Remove a fragment from the story. Choices in other fragments that
    /// pointed at the removed page are pruned, and the first page is cleared
    /// if it was the removed fragment. Returns the removed fragment, or None
    /// if the id was unknown.
    pub fn remove_fragment(&mut self, id: FragmentId) -> Option<StoryFragment> {
        let removed = self.fragments.remove(&id)?;
        for fragment in self.fragments.values_mut() {
            fragment.choices.retain(|choice| choice.destination != id);
        }
        if self.first_page == Some(id) {
            self.first_page = None;
        }
        Some(removed)
    }

    /// The designated starting fragment, if one has been set.
    pub fn first_page(&self) -> Option<FragmentId> {
        self.first_page
    }

    /// Designate (or clear) the starting fragment. Setting an id that is not
    /// in the graph is rejected and returns false.
    pub fn set_first_page(&mut self, id: Option<FragmentId>) -> bool {
        if let Some(id) = id
            && !self.fragments.contains_key(&id)
        {
            return false;
        }
        self.first_page = id;
        true
    }

    /// Iterate fragments in id order.
    pub fn fragments(&self) -> impl Iterator<Item = (FragmentId, &StoryFragment)> {
        self.fragments.iter().map(|(id, frag)| (*id, frag))
    }

    /// Number of fragments in the story.
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }
}
