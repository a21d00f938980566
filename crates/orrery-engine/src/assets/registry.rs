use std::collections::HashMap;

use log::{info, warn};

use crate::assets::manifest::AssetManifest;
use crate::error::AssetError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Texture,
    Music,
    Video,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssetStatus {
    #[default]
    Pending,
    Loaded,
    Failed,
}

#[derive(Debug, Clone)]
struct AssetEntry {
    kind: AssetKind,
    status: AssetStatus,
    /// Planet or panel the asset is attached to.
    owner: Option<String>,
}

/// Load state of every manifest asset. The host reports completions in
/// any order; a failure is final for the session.
#[derive(Debug, Default)]
pub struct AssetTracker {
    entries: HashMap<String, AssetEntry>,
}

impl AssetTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tracker with every manifest asset pending.
    pub fn from_manifest(manifest: &AssetManifest) -> Self {
        let mut entries = HashMap::with_capacity(manifest.len());
        for (name, tex) in &manifest.textures {
            entries.insert(name.clone(), AssetEntry {
                kind: AssetKind::Texture,
                status: AssetStatus::Pending,
                owner: tex.body.clone(),
            });
        }
        for name in manifest.music.keys() {
            entries.insert(name.clone(), AssetEntry {
                kind: AssetKind::Music,
                status: AssetStatus::Pending,
                owner: None,
            });
        }
        for (name, video) in &manifest.videos {
            entries.insert(name.clone(), AssetEntry {
                kind: AssetKind::Video,
                status: AssetStatus::Pending,
                owner: video.panel.clone(),
            });
        }
        info!("tracking {} assets", entries.len());
        Self { entries }
    }

    pub fn mark_loaded(&mut self, name: &str) -> Result<(), AssetError> {
        let entry = self
            .entries
            .get_mut(name)
            .ok_or_else(|| AssetError::Unknown(name.to_string()))?;
        if entry.status == AssetStatus::Failed {
            warn!("asset `{name}` reported loaded after failing; keeping it failed");
            return Ok(());
        }
        entry.status = AssetStatus::Loaded;
        Ok(())
    }

    /// Record a failure. Returns the error to surface, or `Unknown` if the
    /// name is not in the manifest.
    pub fn mark_failed(&mut self, name: &str, reason: &str) -> Result<AssetError, AssetError> {
        let entry = self
            .entries
            .get_mut(name)
            .ok_or_else(|| AssetError::Unknown(name.to_string()))?;
        entry.status = AssetStatus::Failed;
        Ok(AssetError::LoadFailed {
            name: name.to_string(),
            reason: reason.to_string(),
        })
    }

    pub fn status(&self, name: &str) -> Option<AssetStatus> {
        self.entries.get(name).map(|e| e.status)
    }

    pub fn kind(&self, name: &str) -> Option<AssetKind> {
        self.entries.get(name).map(|e| e.kind)
    }

    /// The planet (for textures) or panel (for videos) an asset belongs to.
    pub fn owner(&self, name: &str) -> Option<&str> {
        self.entries.get(name).and_then(|e| e.owner.as_deref())
    }

    pub fn count(&self, status: AssetStatus) -> usize {
        self.entries.values().filter(|e| e.status == status).count()
    }

    /// True once nothing is pending.
    pub fn is_settled(&self) -> bool {
        self.count(AssetStatus::Pending) == 0
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
