use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Asset manifest describing the textures, music and videos the host
/// loads for the scene. Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Surface textures keyed by asset name.
    #[serde(default)]
    pub textures: HashMap<String, TextureDescriptor>,
    /// Background music tracks.
    #[serde(default)]
    pub music: HashMap<String, AudioDescriptor>,
    /// Videos shown on the corridor panels.
    #[serde(default)]
    pub videos: HashMap<String, VideoDescriptor>,
}

/// Describes a texture and the body that wears it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextureDescriptor {
    /// Relative path to the image file (e.g., "textures/mars.jpg").
    pub path: String,
    /// Name of the planet this texture belongs to, if any.
    #[serde(default)]
    pub body: Option<String>,
}

/// Describes an audio track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioDescriptor {
    pub path: String,
    #[serde(default = "default_true")]
    pub looped: bool,
}

/// Describes a panel video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoDescriptor {
    pub path: String,
    /// Name of the panel that shows this video.
    #[serde(default)]
    pub panel: Option<String>,
}

fn default_true() -> bool {
    true
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Total number of assets the host is expected to report on.
    pub fn len(&self) -> usize {
        self.textures.len() + self.music.len() + self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
