// ABOUTME: Contract for a network-hosted story library: the RemoteLibrary trait and its types.
// ABOUTME: Mirrors the local library surface, plus paginated listing, search, and a random pick.

pub mod client;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use storyloom_core::{Story, StoryId, StoryInfo};
use thiserror::Error;

pub use client::HttpRemoteLibrary;

/// Errors from a remote library backend.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("remote api error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// One bounded page of story metadata. `next_offset` carries the cursor for
/// the following page and is absent on the last one; ordering is stable
/// across pages for an unchanging underlying set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoPage {
    pub entries: Vec<StoryInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_offset: Option<usize>,
}

/// A metadata search. Absent fields do not constrain the match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub offset: usize,
}

/// A story library hosted somewhere else. Identifier and not-found semantics
/// match the local library: absent ids are `Ok(None)` or `Ok(false)`, never
/// an error.
#[async_trait]
pub trait RemoteLibrary: Send + Sync {
    /// Fetch the full story for an id.
    async fn get(&self, id: StoryId) -> Result<Option<Story>, RemoteError>;

    /// Metadata-only lookup for an id.
    async fn get_info(&self, id: StoryId) -> Result<Option<StoryInfo>, RemoteError>;

    /// One page of all known stories, starting at `offset`.
    async fn list_info(&self, offset: usize) -> Result<InfoPage, RemoteError>;

    /// Upload a new story; the server assigns and returns its id.
    async fn add(&self, story: &Story) -> Result<StoryId, RemoteError>;

    /// Save a story under an existing id. False when the id is absent.
    async fn save(&self, id: StoryId, story: &Story) -> Result<bool, RemoteError>;

    /// Delete a story. False when the id is absent.
    async fn remove(&self, id: StoryId) -> Result<bool, RemoteError>;

    /// One page of stories matching the query.
    async fn search(&self, query: &SearchQuery) -> Result<InfoPage, RemoteError>;

    /// A server-chosen random story, or None when the store is empty.
    async fn random_story(&self) -> Result<Option<Story>, RemoteError>;
}
