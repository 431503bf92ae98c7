//! # Geometry Lifecycle
//!
//! Owns every resource the viewer shows and rebuilds them on each parameter
//! change. One rebuild produces a *generation*: six tube nodes and the
//! shared material they use. A generation is released as a whole at the
//! start of the next rebuild.
//!
//! ## Rebuild order
//!
//! ```text
//! detach caps → release old generation → sanitize → derive layout
//!     → curves → profiles → sweep → attach tubes → place caps → Published
//!                    │
//!                    └─ degenerate layout → Aborted (scene stays empty)
//! ```
//!
//! Caps are detached before the old material is released so they never
//! reference a freed material. The cap template is loaded at most once; a
//! rebuild that finds the load still pending registers itself as the
//! waiter and the caps are placed when [`LifecycleManager::resolve_cap_load`]
//! completes it.

#[cfg(test)]
mod tests;

use config::constants::{PipelineConfig, CAP_ASSET_NAME};
use serde::{Deserialize, Serialize};
use serpentine_mesh::assembly::{build_profiles, check_tubes, sweep_all};
use serpentine_mesh::curve::CenterlineSet;
use serpentine_mesh::params::{derive_layout, sanitize};
use serpentine_mesh::{DerivedLayout, GeometryParameters};
use std::rc::Rc;

use crate::asset::{AssetSlot, CapAsset, CapAssetSource, CapTemplate};
use crate::caps::{cap_transforms, CapInstance, CAP_COUNT};
use crate::error::{AssetLoadError, SceneError};
use crate::export::ExportGroups;
use crate::handles::{GenerationId, HandleAllocator, LoadHandle};
use crate::material::{MaterialSpec, SharedMaterial};
use crate::node::{NodeKind, SceneNode, Transform};
use crate::sink::SceneSink;
use crate::trace::RebuildTimer;

/// Where the last rebuild got to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleState {
    Idle,
    Sanitizing,
    LayoutDeriving,
    Aborted,
    CurveBuilding,
    ProfileBuilding,
    Sweeping,
    CapPlacing,
    Published,
}

/// Whether the caps of a generation are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapStatus {
    /// Both caps are attached.
    Placed,
    /// The template is still loading; caps follow on completion.
    Loading,
    /// The template failed to load; no caps this session.
    Unavailable,
}

/// Result of [`LifecycleManager::rebuild`]. Rebuilding never fails outright.
#[derive(Debug, Clone, PartialEq)]
pub enum RebuildOutcome {
    Published {
        generation: GenerationId,
        tubes: usize,
        caps: CapStatus,
    },
    /// Nothing was published; the scene holds no tubes or caps.
    Aborted { error: SceneError },
}

impl RebuildOutcome {
    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published { .. })
    }

    pub fn generation(&self) -> Option<GenerationId> {
        match self {
            Self::Published { generation, .. } => Some(*generation),
            Self::Aborted { .. } => None,
        }
    }
}

/// The six tubes and shared material of one rebuild.
#[derive(Debug)]
struct Generation {
    id: GenerationId,
    parameters: GeometryParameters,
    layout: DerivedLayout,
    material: SharedMaterial,
    tubes: Vec<SceneNode>,
}

/// Rebuilds, publishes and releases the tube geometry.
///
/// # Example
///
/// ```rust
/// use serpentine_scene::{DeferredAssetSource, LifecycleManager, MemorySink};
///
/// let mut manager = LifecycleManager::init(MemorySink::new(), DeferredAssetSource::new());
/// let outcome = manager.rebuild(85.75, f64::NAN, 0.5);
/// assert!(outcome.is_published());
/// assert_eq!(manager.published_tube_count(), 6);
///
/// let sink = manager.teardown();
/// assert_eq!(sink.node_count(), 0);
/// ```
#[derive(Debug)]
pub struct LifecycleManager<S, A> {
    sink: S,
    source: A,
    config: PipelineConfig,
    ids: HandleAllocator,
    state: LifecycleState,
    generation: Option<Generation>,
    template: AssetSlot<CapTemplate>,
    cap_waiter: Option<GenerationId>,
    caps: Option<[CapInstance; CAP_COUNT]>,
}

impl<S: SceneSink, A: CapAssetSource> LifecycleManager<S, A> {
    /// Creates a manager with the default pipeline configuration.
    pub fn init(sink: S, source: A) -> Self {
        Self::with_config(sink, source, PipelineConfig::default())
    }

    pub fn with_config(sink: S, source: A, config: PipelineConfig) -> Self {
        Self {
            sink,
            source,
            config,
            ids: HandleAllocator::new(),
            state: LifecycleState::Idle,
            generation: None,
            template: AssetSlot::Empty,
            cap_waiter: None,
            caps: None,
        }
    }

    /// Replaces the previous generation with one built from raw input.
    ///
    /// Any `f64` is accepted; unusable values fall back to defaults.
    pub fn rebuild(&mut self, raw_length: f64, raw_face: f64, raw_hole: f64) -> RebuildOutcome {
        let timer = RebuildTimer::start(raw_length, raw_face, raw_hole);
        let outcome = timer.in_scope(|| self.run_rebuild(raw_length, raw_face, raw_hole));

        if let RebuildOutcome::Published {
            generation,
            tubes,
            caps,
        } = &outcome
        {
            let vertices: usize = self
                .tubes()
                .iter()
                .map(|node| node.mesh.vertex_count())
                .sum();
            timer.in_scope(|| {
                tracing::info!(
                    %generation,
                    tubes,
                    vertices,
                    caps = ?caps,
                    elapsed_ms = timer.elapsed_ms(),
                    "published generation"
                )
            });
        }
        outcome
    }

    fn run_rebuild(&mut self, raw_length: f64, raw_face: f64, raw_hole: f64) -> RebuildOutcome {
        self.detach_caps();
        self.release_generation();

        self.state = LifecycleState::Sanitizing;
        let parameters = sanitize(raw_length, raw_face, raw_hole);

        self.state = LifecycleState::LayoutDeriving;
        let layout = match derive_layout(&parameters, self.config.desired_surface_gap) {
            Ok(layout) => layout,
            Err(err) => return self.abort(err.into()),
        };

        self.state = LifecycleState::CurveBuilding;
        let centerlines = match CenterlineSet::from_layout(&layout, self.config.arc_segments) {
            Ok(centerlines) => centerlines,
            Err(err) => return self.abort(err.into()),
        };

        self.state = LifecycleState::ProfileBuilding;
        let profiles = build_profiles(&parameters, self.config.profile_arc_segments);

        self.state = LifecycleState::Sweeping;
        let swept = match sweep_all(&centerlines, &profiles, self.config.sweep_steps)
            .and_then(|tubes| check_tubes(&tubes, self.config.tolerance).map(|()| tubes))
        {
            Ok(tubes) => tubes,
            Err(err) => return self.abort(err.into()),
        };

        let material = SharedMaterial {
            id: self.ids.material(),
            spec: MaterialSpec::tube(),
        };
        self.sink.register_material(material.id, &material.spec);

        let mut tubes = Vec::with_capacity(swept.len());
        for tube in swept {
            let node = SceneNode {
                id: self.ids.node(),
                kind: NodeKind::Tube(tube.key),
                geometry: self.ids.geometry(),
                material: material.id,
                mesh: Rc::new(tube.mesh),
                transform: Transform::IDENTITY,
                cast_shadow: true,
                receive_shadow: false,
            };
            self.sink.attach(&node);
            tubes.push(node);
        }

        let id = self.ids.generation();
        let tube_count = tubes.len();
        self.generation = Some(Generation {
            id,
            parameters,
            layout,
            material,
            tubes,
        });

        self.state = LifecycleState::CapPlacing;
        let caps = self.ensure_caps(id);

        self.state = LifecycleState::Published;
        RebuildOutcome::Published {
            generation: id,
            tubes: tube_count,
            caps,
        }
    }

    fn abort(&mut self, error: SceneError) -> RebuildOutcome {
        if error.is_degenerate_layout() {
            tracing::warn!(%error, "rebuild aborted, length too short for the bends");
        } else {
            tracing::error!(%error, "rebuild failed");
        }
        self.state = LifecycleState::Aborted;
        RebuildOutcome::Aborted { error }
    }

    /// Shows the caps for generation `id`, or arranges for them to follow.
    fn ensure_caps(&mut self, id: GenerationId) -> CapStatus {
        match &self.template {
            AssetSlot::Ready(template) => {
                let template = Rc::clone(template);
                self.place_caps(&template);
                CapStatus::Placed
            }
            AssetSlot::Empty => {
                let handle = self.source.start_load(CAP_ASSET_NAME);
                tracing::debug!(%handle, generation = %id, "cap template load started");
                self.template = AssetSlot::Pending(handle);
                self.cap_waiter = Some(id);
                CapStatus::Loading
            }
            AssetSlot::Pending(handle) => {
                tracing::debug!(%handle, generation = %id, "cap template still loading");
                self.cap_waiter = Some(id);
                CapStatus::Loading
            }
            AssetSlot::Failed(_) => {
                tracing::debug!(generation = %id, "cap template unavailable, skipping caps");
                CapStatus::Unavailable
            }
        }
    }

    /// Clones the caps on first use, then places and attaches them for the
    /// current generation.
    fn place_caps(&mut self, template: &CapTemplate) {
        let Some(generation) = &self.generation else {
            return;
        };
        let transforms = cap_transforms(&generation.layout, &generation.parameters);
        let material = generation.material.id;

        let ids = &mut self.ids;
        let caps = self.caps.get_or_insert_with(|| {
            [0, 1].map(|index| CapInstance::from_template(template, index, material, ids))
        });

        for (cap, transform) in caps.iter_mut().zip(transforms) {
            cap.place(transform, material);
            for node in cap.nodes() {
                self.sink.attach(node);
            }
            cap.set_attached(true);
        }
    }

    fn detach_caps(&mut self) {
        let Some(caps) = &mut self.caps else {
            return;
        };
        for cap in caps.iter_mut().filter(|cap| cap.is_attached()) {
            for node in cap.nodes() {
                self.sink.detach(node.id);
            }
            cap.set_attached(false);
        }
    }

    /// Detaches and releases every tube of the current generation, then its
    /// material.
    fn release_generation(&mut self) {
        self.cap_waiter = None;
        let Some(generation) = self.generation.take() else {
            return;
        };
        for node in &generation.tubes {
            self.sink.detach(node.id);
            self.sink.release_geometry(node.geometry);
        }
        self.sink.release_material(generation.material.id);
        tracing::debug!(generation = %generation.id, "released generation");
    }

    /// Completes the cap template load started by a rebuild.
    ///
    /// Returns true when the caps were placed. Results for any handle other
    /// than the outstanding one are ignored. An asset with malformed buffers
    /// fails the load like a transport error.
    pub fn resolve_cap_load(
        &mut self,
        handle: LoadHandle,
        result: Result<CapAsset, AssetLoadError>,
    ) -> bool {
        if self.template.pending_handle() != Some(handle) {
            tracing::debug!(%handle, "ignoring stale cap load result");
            return false;
        }

        match result.and_then(|asset| CapTemplate::from_asset(asset, &mut self.ids)) {
            Ok(template) => {
                let template = Rc::new(template);
                self.template = AssetSlot::Ready(Rc::clone(&template));

                let current = self.generation.as_ref().map(|generation| generation.id);
                let waiter = self.cap_waiter.take();
                if waiter.is_some() && waiter == current {
                    self.place_caps(&template);
                    tracing::debug!(generation = ?current, "caps placed after load");
                    true
                } else {
                    tracing::debug!("cap template cached, no generation waiting");
                    false
                }
            }
            Err(error) => {
                tracing::error!(%error, "cap template failed to load, caps disabled");
                self.template = AssetSlot::Failed(error);
                self.cap_waiter = None;
                false
            }
        }
    }

    /// Detaches and releases everything, including the cached template, and
    /// hands back the sink.
    pub fn teardown(mut self) -> S {
        self.detach_caps();
        self.release_generation();
        if let AssetSlot::Ready(template) = &self.template {
            for geometry in template.geometries() {
                self.sink.release_geometry(geometry);
            }
        }
        tracing::debug!("lifecycle manager torn down");
        self.sink
    }

    /// Published scene grouped into the four printable bodies.
    pub fn export_groups(&self) -> ExportGroups<'_> {
        let caps = self
            .caps
            .iter()
            .flatten()
            .filter(|cap| cap.is_attached())
            .flat_map(|cap| cap.nodes());
        ExportGroups::collect(self.tubes().iter().chain(caps))
    }

    pub fn published_tube_count(&self) -> usize {
        self.tubes().len()
    }

    /// Tube nodes of the current generation.
    pub fn tubes(&self) -> &[SceneNode] {
        self.generation
            .as_ref()
            .map_or(&[], |generation| generation.tubes.as_slice())
    }

    /// Caps, once cloned.
    pub fn caps(&self) -> Option<&[CapInstance; CAP_COUNT]> {
        self.caps.as_ref()
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn generation_id(&self) -> Option<GenerationId> {
        self.generation.as_ref().map(|generation| generation.id)
    }

    pub fn parameters(&self) -> Option<&GeometryParameters> {
        self.generation.as_ref().map(|generation| &generation.parameters)
    }

    pub fn layout(&self) -> Option<&DerivedLayout> {
        self.generation.as_ref().map(|generation| &generation.layout)
    }

    /// Handle of the outstanding cap load, if one is in flight.
    pub fn pending_cap_load(&self) -> Option<LoadHandle> {
        self.template.pending_handle()
    }

    pub fn cap_template(&self) -> &AssetSlot<CapTemplate> {
        &self.template
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn source(&self) -> &A {
        &self.source
    }
}
