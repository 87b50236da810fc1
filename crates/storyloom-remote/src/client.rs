// ABOUTME: HTTP client for a remote story library, implementing the RemoteLibrary trait.
// ABOUTME: Defines the JSON wire shape and maps 404 responses to absent-id results.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use storyloom_core::{Story, StoryId, StoryInfo};

use crate::{InfoPage, RemoteError, RemoteLibrary, SearchQuery};

/// Page size the server is expected to serve for listings and searches.
pub const PAGE_SIZE: usize = 25;

/// Remote library backed by a JSON-over-HTTP story service:
///
/// ```text
/// GET    /stories?offset=N     one page of metadata
/// GET    /stories/{id}         full story
/// GET    /stories/{id}/info    metadata only
/// GET    /stories/random       server-chosen story
/// POST   /stories              upload, returns assigned id
/// PUT    /stories/{id}         save under an existing id
/// DELETE /stories/{id}         delete
/// POST   /stories/search       paged metadata search
/// ```
pub struct HttpRemoteLibrary {
    client: reqwest::Client,
    base_url: String,
}

/// Wire envelope for a full story.
#[derive(Debug, Serialize, Deserialize)]
struct StoryEnvelope {
    id: StoryId,
    story: Story,
}

/// Wire response for an upload.
#[derive(Debug, Serialize, Deserialize)]
struct AddResponse {
    id: StoryId,
}

impl HttpRemoteLibrary {
    /// Create a client for the service at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Create a client from the `STORYLOOM_REMOTE_URL` environment variable.
    pub fn from_env() -> Result<Self, RemoteError> {
        let base_url = std::env::var("STORYLOOM_REMOTE_URL")
            .map_err(|_| RemoteError::Config("STORYLOOM_REMOTE_URL not set".to_string()))?;
        Ok(Self::new(base_url))
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check a response status, turning non-success into `RemoteError::Api`
    /// and handing 404 back to the caller as the absent-id signal.
    async fn check(
        response: reqwest::Response,
    ) -> Result<Option<reqwest::Response>, RemoteError> {
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(Some(response))
    }
}

/// Parse a story envelope out of a response body.
fn parse_story(value: Value) -> Result<Story, RemoteError> {
    let envelope: StoryEnvelope = serde_json::from_value(value)
        .map_err(|e| RemoteError::InvalidResponse(format!("bad story envelope: {e}")))?;
    Ok(envelope.story)
}

/// Parse a metadata page out of a response body.
fn parse_info_page(value: Value) -> Result<InfoPage, RemoteError> {
    serde_json::from_value(value)
        .map_err(|e| RemoteError::InvalidResponse(format!("bad info page: {e}")))
}

/// Parse the assigned id out of an upload response body.
fn parse_assigned_id(value: Value) -> Result<StoryId, RemoteError> {
    let response: AddResponse = serde_json::from_value(value)
        .map_err(|e| RemoteError::InvalidResponse(format!("bad add response: {e}")))?;
    Ok(response.id)
}

#[async_trait]
impl RemoteLibrary for HttpRemoteLibrary {
    async fn get(&self, id: StoryId) -> Result<Option<Story>, RemoteError> {
        let response = self.client.get(self.url(&format!("/stories/{id}"))).send().await?;
        match Self::check(response).await? {
            Some(response) => Ok(Some(parse_story(response.json().await?)?)),
            None => Ok(None),
        }
    }

    async fn get_info(&self, id: StoryId) -> Result<Option<StoryInfo>, RemoteError> {
        let response = self
            .client
            .get(self.url(&format!("/stories/{id}/info")))
            .send()
            .await?;
        match Self::check(response).await? {
            Some(response) => {
                let info: StoryInfo = serde_json::from_value(response.json().await?)
                    .map_err(|e| RemoteError::InvalidResponse(format!("bad story info: {e}")))?;
                Ok(Some(info))
            }
            None => Ok(None),
        }
    }

    async fn list_info(&self, offset: usize) -> Result<InfoPage, RemoteError> {
        let response = self
            .client
            .get(self.url("/stories"))
            .query(&[("offset", offset)])
            .send()
            .await?;
        match Self::check(response).await? {
            Some(response) => parse_info_page(response.json().await?),
            None => Err(RemoteError::InvalidResponse(
                "listing endpoint returned 404".to_string(),
            )),
        }
    }

    async fn add(&self, story: &Story) -> Result<StoryId, RemoteError> {
        let response = self
            .client
            .post(self.url("/stories"))
            .json(story)
            .send()
            .await?;
        match Self::check(response).await? {
            Some(response) => parse_assigned_id(response.json().await?),
            None => Err(RemoteError::InvalidResponse(
                "upload endpoint returned 404".to_string(),
            )),
        }
    }

    async fn save(&self, id: StoryId, story: &Story) -> Result<bool, RemoteError> {
        let response = self
            .client
            .put(self.url(&format!("/stories/{id}")))
            .json(story)
            .send()
            .await?;
        Ok(Self::check(response).await?.is_some())
    }

    async fn remove(&self, id: StoryId) -> Result<bool, RemoteError> {
        let response = self
            .client
            .delete(self.url(&format!("/stories/{id}")))
            .send()
            .await?;
        Ok(Self::check(response).await?.is_some())
    }

    async fn search(&self, query: &SearchQuery) -> Result<InfoPage, RemoteError> {
        let response = self
            .client
            .post(self.url("/stories/search"))
            .json(query)
            .send()
            .await?;
        match Self::check(response).await? {
            Some(response) => parse_info_page(response.json().await?),
            None => Err(RemoteError::InvalidResponse(
                "search endpoint returned 404".to_string(),
            )),
        }
    }

    async fn random_story(&self) -> Result<Option<Story>, RemoteError> {
        let response = self.client.get(self.url("/stories/random")).send().await?;
        match Self::check(response).await? {
            Some(response) => Ok(Some(parse_story(response.json().await?)?)),
            None => Ok(None),
        }
    }
}
