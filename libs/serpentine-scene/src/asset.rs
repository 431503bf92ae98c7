//! # Cap Asset
//!
//! The two end caps are cloned from a template loaded once from outside
//! (an OBJ fetched by the host). Loading is asynchronous: the manager asks a
//! [`CapAssetSource`] to start it and the host later reports the result
//! through [`crate::LifecycleManager::resolve_cap_load`].
//!
//! ```text
//! Empty ──start_load──▶ Pending(handle) ──resolve Ok──▶ Ready(template)
//!                              │
//!                              └──resolve Err──▶ Failed(error)
//! ```
//!
//! The slot never returns to `Empty`, so the load is issued at most once.

use config::constants::CAP_ASSET_NAME;
use serpentine_mesh::Mesh;
use std::rc::Rc;

use crate::error::AssetLoadError;
use crate::handles::{GeometryId, HandleAllocator, LoadHandle};

/// Starts asynchronous asset loads.
pub trait CapAssetSource {
    /// Begins loading `asset` and returns the handle its completion will
    /// carry.
    fn start_load(&mut self, asset: &str) -> LoadHandle;
}

/// Single-slot cache for one asynchronously loaded asset.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetSlot<T> {
    Empty,
    Pending(LoadHandle),
    Ready(Rc<T>),
    Failed(AssetLoadError),
}

impl<T> Default for AssetSlot<T> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<T> AssetSlot<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// The cached value, if loaded.
    pub fn ready(&self) -> Option<&Rc<T>> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// Handle of the outstanding load, if any.
    pub fn pending_handle(&self) -> Option<LoadHandle> {
        match self {
            Self::Pending(handle) => Some(*handle),
            _ => None,
        }
    }
}

/// Parsed cap asset as delivered by the host: one mesh per part.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CapAsset {
    pub parts: Vec<Mesh>,
}

impl CapAsset {
    pub fn new(parts: Vec<Mesh>) -> Self {
        Self { parts }
    }

    /// Single-part asset from raw position and index buffers.
    ///
    /// # Errors
    ///
    /// [`AssetLoadError`] for the cap asset when the buffers are malformed.
    pub fn from_buffers(positions: &[f64], indices: &[u32]) -> Result<Self, AssetLoadError> {
        let mesh = Mesh::from_buffers(positions, indices)
            .map_err(|err| AssetLoadError::new(CAP_ASSET_NAME, err.to_string()))?;
        Ok(Self::new(vec![mesh]))
    }
}

/// One template part with the geometry id all its clones share.
#[derive(Debug, Clone)]
pub struct TemplatePart {
    pub geometry: GeometryId,
    pub mesh: Rc<Mesh>,
}

/// Cached cap template.
#[derive(Debug, Clone)]
pub struct CapTemplate {
    parts: Vec<TemplatePart>,
}

impl CapTemplate {
    /// Adopts a loaded asset, giving each non-empty part a geometry id.
    ///
    /// # Errors
    ///
    /// [`AssetLoadError`] naming the first part whose buffers are malformed;
    /// no ids are allocated in that case.
    pub fn from_asset(asset: CapAsset, ids: &mut HandleAllocator) -> Result<Self, AssetLoadError> {
        let meshes: Vec<Mesh> = asset
            .parts
            .into_iter()
            .filter(|mesh| !mesh.is_empty())
            .collect();
        for (index, mesh) in meshes.iter().enumerate() {
            mesh.check_buffers().map_err(|err| {
                AssetLoadError::new(CAP_ASSET_NAME, format!("part {index}: {err}"))
            })?;
        }

        let parts = meshes
            .into_iter()
            .map(|mut mesh| {
                if mesh.normals().is_none() {
                    mesh.compute_normals();
                }
                TemplatePart {
                    geometry: ids.geometry(),
                    mesh: Rc::new(mesh),
                }
            })
            .collect();
        Ok(Self { parts })
    }

    pub fn parts(&self) -> &[TemplatePart] {
        &self.parts
    }

    pub fn geometries(&self) -> impl Iterator<Item = GeometryId> + '_ {
        self.parts.iter().map(|part| part.geometry)
    }
}

/// Source that only records requests; the host resolves them later.
#[derive(Debug, Default)]
pub struct DeferredAssetSource {
    next: u64,
    requests: Vec<(LoadHandle, String)>,
}

impl DeferredAssetSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every load requested so far, oldest first.
    pub fn requests(&self) -> &[(LoadHandle, String)] {
        &self.requests
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<LoadHandle> {
        self.requests.last().map(|(handle, _)| *handle)
    }
}

impl CapAssetSource for DeferredAssetSource {
    fn start_load(&mut self, asset: &str) -> LoadHandle {
        self.next += 1;
        let handle = LoadHandle(self.next);
        tracing::debug!(%handle, asset, "cap asset load requested");
        self.requests.push((handle, asset.to_owned()));
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_accessors() {
        let slot: AssetSlot<u8> = AssetSlot::Pending(LoadHandle(4));
        assert!(slot.is_pending());
        assert_eq!(slot.pending_handle(), Some(LoadHandle(4)));
        assert!(slot.ready().is_none());

        let slot = AssetSlot::Ready(Rc::new(7u8));
        assert_eq!(slot.ready().map(|v| **v), Some(7));
        assert_eq!(AssetSlot::<u8>::default(), AssetSlot::Empty);
    }

    #[test]
    fn test_template_drops_empty_parts() {
        let mut ids = HandleAllocator::new();
        let asset = CapAsset::new(vec![
            Mesh::new(),
            Mesh::from_buffers(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0], &[0, 1, 2]).unwrap(),
        ]);
        let template = CapTemplate::from_asset(asset, &mut ids).unwrap();
        assert_eq!(template.parts().len(), 1);
        assert!(template.parts()[0].mesh.normals().is_some());
    }

    #[test]
    fn test_cap_asset_rejects_dangling_index() {
        let err = CapAsset::from_buffers(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0], &[0, 1, 7])
            .unwrap_err();
        assert_eq!(err.asset, CAP_ASSET_NAME);
        assert!(err.message.contains("vertex 7"));
    }

    #[test]
    fn test_template_rejects_malformed_part_without_allocating() {
        let mut bad = Mesh::new();
        bad.add_vertex(glam::DVec3::ZERO);
        bad.add_triangle(0, 1, 2);
        let asset = CapAsset::new(vec![bad]);

        let mut ids = HandleAllocator::new();
        let err = CapTemplate::from_asset(asset, &mut ids).unwrap_err();
        assert!(err.message.starts_with("part 0:"));
        assert_eq!(ids.geometry(), HandleAllocator::new().geometry());
    }

    #[test]
    fn test_deferred_source_hands_out_fresh_handles() {
        let mut source = DeferredAssetSource::new();
        let a = source.start_load("a.obj");
        let b = source.start_load("b.obj");
        assert_ne!(a, b);
        assert_eq!(source.last_request(), Some(b));
        assert_eq!(source.requests()[0].1, "a.obj");
    }
}
