//! # Serpentine Scene
//!
//! Resource lifecycle for the serpentine tube viewer. Turns each parameter
//! change into a new generation of scene nodes, explicitly frees the
//! previous one, and places the externally loaded end caps.
//!
//! ## Architecture
//!
//! ```text
//! control change → LifecycleManager::rebuild ─→ serpentine_mesh
//!                          │
//!                          ├─ SceneSink      (attach / detach / release)
//!                          └─ CapAssetSource (one load, resolved later)
//! ```
//!
//! The manager never talks to a renderer directly. Hosts implement
//! [`SceneSink`]; [`MemorySink`] keeps the scene in memory for the wasm
//! bridge and for tests.
//!
//! ## Usage
//!
//! ```rust
//! use serpentine_scene::{CapAsset, DeferredAssetSource, LifecycleManager, MemorySink};
//!
//! let mut manager = LifecycleManager::init(MemorySink::new(), DeferredAssetSource::new());
//! manager.rebuild(85.75, 0.7, 0.5);
//!
//! let handle = manager.pending_cap_load().unwrap();
//! let cap = CapAsset::from_buffers(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0], &[0, 1, 2]);
//! assert!(manager.resolve_cap_load(handle, cap));
//! assert_eq!(manager.export_groups().non_empty().len(), 4);
//! ```

pub mod asset;
pub mod caps;
pub mod error;
pub mod export;
pub mod handles;
pub mod lifecycle;
pub mod material;
pub mod node;
pub mod sink;
mod trace;

pub use asset::{AssetSlot, CapAsset, CapAssetSource, CapTemplate, DeferredAssetSource};
pub use caps::CapInstance;
pub use error::{AssetLoadError, SceneError};
pub use export::{ExportGroup, ExportGroups};
pub use handles::{GenerationId, GeometryId, LoadHandle, MaterialId, NodeId};
pub use lifecycle::{CapStatus, LifecycleManager, LifecycleState, RebuildOutcome};
pub use material::{MaterialSpec, SharedMaterial};
pub use node::{NodeKind, SceneNode, Transform};
pub use sink::{MemorySink, SceneSink, SinkEvent};
