//! # Scene Sink
//!
//! The boundary to the renderer. The lifecycle manager tells the sink which
//! nodes to show and which GPU resources it may free; the sink never calls
//! back.
//!
//! [`MemorySink`] keeps everything in memory. The wasm bridge serves meshes
//! to JavaScript from it, and tests use it to check for leaks. Only a sink
//! built with [`MemorySink::recording`] keeps the call log and the set of
//! released geometries; a plain one holds live state only, so its memory
//! stays flat across any number of rebuilds.

use std::collections::{BTreeMap, BTreeSet};

use crate::handles::{GeometryId, MaterialId, NodeId};
use crate::material::MaterialSpec;
use crate::node::SceneNode;

/// Receiver of scene changes.
pub trait SceneSink {
    /// A new material instance exists.
    fn register_material(&mut self, id: MaterialId, spec: &MaterialSpec);

    /// Shows `node`. Attaching an already attached id replaces it.
    fn attach(&mut self, node: &SceneNode);

    /// Hides a node. Its resources stay alive until released.
    fn detach(&mut self, node: NodeId);

    /// Frees the buffers of one geometry.
    fn release_geometry(&mut self, geometry: GeometryId);

    /// Frees one material instance.
    fn release_material(&mut self, material: MaterialId);
}

/// One call received by a [`MemorySink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkEvent {
    RegisterMaterial(MaterialId),
    Attach(NodeId),
    Detach(NodeId),
    ReleaseGeometry(GeometryId),
    ReleaseMaterial(MaterialId),
}

/// In-memory scene: attached nodes, live resources and an optional call log.
#[derive(Debug, Default)]
pub struct MemorySink {
    nodes: BTreeMap<NodeId, SceneNode>,
    materials: BTreeMap<MaterialId, MaterialSpec>,
    geometries: BTreeSet<GeometryId>,
    released_count: usize,
    recording: bool,
    released_geometries: BTreeSet<GeometryId>,
    events: Vec<SinkEvent>,
}

impl MemorySink {
    /// Sink that tracks live state only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink that also logs every call and remembers released geometries.
    pub fn recording() -> Self {
        Self {
            recording: true,
            ..Self::default()
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Attached nodes in attach-id order.
    pub fn nodes(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.values()
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Geometries seen on an attached node and not yet released.
    pub fn live_geometries(&self) -> &BTreeSet<GeometryId> {
        &self.geometries
    }

    /// Registered materials not yet released.
    pub fn live_materials(&self) -> impl Iterator<Item = (&MaterialId, &MaterialSpec)> {
        self.materials.iter()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// True once `geometry` was released. Always false unless recording.
    pub fn is_released(&self, geometry: GeometryId) -> bool {
        self.released_geometries.contains(&geometry)
    }

    /// Number of geometry releases received, recording or not.
    pub fn released_count(&self) -> usize {
        self.released_count
    }

    /// Every call received, oldest first. Empty unless recording.
    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    fn record(&mut self, event: SinkEvent) {
        if self.recording {
            self.events.push(event);
        }
    }
}

impl SceneSink for MemorySink {
    fn register_material(&mut self, id: MaterialId, spec: &MaterialSpec) {
        self.record(SinkEvent::RegisterMaterial(id));
        self.materials.insert(id, spec.clone());
    }

    fn attach(&mut self, node: &SceneNode) {
        self.record(SinkEvent::Attach(node.id));
        if !self.materials.contains_key(&node.material) {
            tracing::warn!(node = %node.id, material = %node.material, "attached node uses unknown material");
        }
        if self.released_geometries.contains(&node.geometry) {
            tracing::warn!(node = %node.id, geometry = %node.geometry, "attached node uses released geometry");
        }
        self.geometries.insert(node.geometry);
        self.nodes.insert(node.id, node.clone());
    }

    fn detach(&mut self, node: NodeId) {
        self.record(SinkEvent::Detach(node));
        self.nodes.remove(&node);
    }

    fn release_geometry(&mut self, geometry: GeometryId) {
        self.record(SinkEvent::ReleaseGeometry(geometry));
        self.geometries.remove(&geometry);
        self.released_count += 1;
        if self.recording {
            self.released_geometries.insert(geometry);
        }
    }

    fn release_material(&mut self, material: MaterialId) {
        self.record(SinkEvent::ReleaseMaterial(material));
        self.materials.remove(&material);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;

    fn node(id: u64, geometry: u64) -> SceneNode {
        SceneNode {
            id: NodeId(id),
            kind: NodeKind::CapPart { cap: 0, part: 0 },
            geometry: GeometryId(geometry),
            material: MaterialId(1),
            mesh: Default::default(),
            transform: Default::default(),
            cast_shadow: true,
            receive_shadow: false,
        }
    }

    fn churn(sink: &mut MemorySink, rounds: u64) {
        for round in 0..rounds {
            sink.register_material(MaterialId(round), &MaterialSpec::default());
            sink.attach(&node(round, round));
            if round > 0 {
                sink.detach(NodeId(round - 1));
                sink.release_geometry(GeometryId(round - 1));
                sink.release_material(MaterialId(round - 1));
            }
        }
    }

    #[test]
    fn test_plain_sink_keeps_live_state_only() {
        let mut sink = MemorySink::new();
        churn(&mut sink, 500);

        assert!(!sink.is_recording());
        assert!(sink.events().is_empty());
        assert!(!sink.is_released(GeometryId(0)));
        assert_eq!(sink.released_count(), 499);
        assert_eq!(sink.node_count(), 1);
        assert_eq!(sink.material_count(), 1);
        assert_eq!(sink.live_geometries().len(), 1);
    }

    #[test]
    fn test_recording_sink_logs_calls() {
        let mut sink = MemorySink::recording();
        churn(&mut sink, 3);

        assert!(sink.is_released(GeometryId(1)));
        assert!(!sink.is_released(GeometryId(2)));
        assert_eq!(sink.events()[0], SinkEvent::RegisterMaterial(MaterialId(0)));
        assert_eq!(sink.events().len(), 3 * 2 + 2 * 3);

        sink.clear_events();
        assert!(sink.events().is_empty());
        assert_eq!(sink.released_count(), 2);
    }
}
