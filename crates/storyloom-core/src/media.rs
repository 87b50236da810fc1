// ABOUTME: Defines the Media sum type used for fragment content and annotations.
// ABOUTME: Text carries its content inline; image, video, and sound reference stored blobs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Discriminant for the four media variants. Doubles as the name of the
/// subfolder a blob of that kind is stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Text,
    Image,
    Video,
    Sound,
}

impl MediaKind {
    /// Folder name for type-segmented blob storage.
    pub fn folder_name(&self) -> &'static str {
        match self {
            MediaKind::Text => "text",
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Sound => "sound",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.folder_name())
    }
}

/// A single piece of media inside a fragment. The serialized form carries an
/// explicit `type` tag, checked at decode time, so the tag can never disagree
/// with the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Media {
    Text { text: String },
    Image { resource: String },
    Video { resource: String },
    Sound { resource: String },
}

impl Media {
    /// The kind tag for this media.
    pub fn kind(&self) -> MediaKind {
        match self {
            Media::Text { .. } => MediaKind::Text,
            Media::Image { .. } => MediaKind::Image,
            Media::Video { .. } => MediaKind::Video,
            Media::Sound { .. } => MediaKind::Sound,
        }
    }

    /// The stored-blob reference, if this variant carries one. Text content
    /// lives inline and has no resource.
    pub fn resource(&self) -> Option<&str> {
        match self {
            Media::Text { .. } => None,
            Media::Image { resource } | Media::Video { resource } | Media::Sound { resource } => {
                Some(resource)
            }
        }
    }
}
