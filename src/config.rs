// ABOUTME: Configuration loading for storyloom applications.
// ABOUTME: Reads the library home and optional remote service URL from environment variables.

use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct LoomConfig {
    pub home: PathBuf,
    pub remote_url: Option<String>,
}

impl LoomConfig {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// Environment variables:
    /// - STORYLOOM_HOME: library data directory (default: ~/.storyloom)
    /// - STORYLOOM_REMOTE_URL: base URL of a remote story service (optional)
    pub fn from_env() -> Self {
        let home = std::env::var("STORYLOOM_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                std::env::var("HOME")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("/tmp"))
                    .join(".storyloom")
            });

        let remote_url = std::env::var("STORYLOOM_REMOTE_URL")
            .ok()
            .filter(|url| !url.is_empty());

        Self { home, remote_url }
    }

    /// Configuration rooted at an explicit home directory, with no remote.
    pub fn at(home: PathBuf) -> Self {
        Self {
            home,
            remote_url: None,
        }
    }
}
