//! # Scene Errors

use serpentine_mesh::MeshError;
use thiserror::Error;

/// The cap asset could not be loaded.
///
/// Cloneable so the cached failure can be reported again without reloading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to load asset '{asset}': {message}")]
pub struct AssetLoadError {
    pub asset: String,
    pub message: String,
}

impl AssetLoadError {
    pub fn new(asset: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            asset: asset.into(),
            message: message.into(),
        }
    }
}

/// Errors that can stop a rebuild from publishing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    /// Geometry kernel failure, including the recoverable degenerate layout.
    #[error(transparent)]
    Mesh(#[from] MeshError),

    /// Cap asset failure.
    #[error(transparent)]
    Asset(#[from] AssetLoadError),
}

impl SceneError {
    /// Returns true when the requested length was too short to build.
    pub fn is_degenerate_layout(&self) -> bool {
        matches!(self, Self::Mesh(err) if err.is_degenerate_layout())
    }
}
