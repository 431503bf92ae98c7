//! # Scene Nodes
//!
//! What the lifecycle manager hands to the scene sink: a mesh, the ids of
//! its GPU resources, a transform and shadow flags.

use glam::{DMat4, DQuat, DVec3};
use serpentine_mesh::{Mesh, TubeKey};
use std::rc::Rc;

use crate::handles::{GeometryId, MaterialId, NodeId};

/// Translation, rotation and scale of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: DVec3,
    pub rotation: DQuat,
    pub scale: DVec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: DVec3::ZERO,
        rotation: DQuat::IDENTITY,
        scale: DVec3::ONE,
    };

    /// Local-to-world matrix (scale, then rotate, then translate).
    pub fn matrix(&self) -> DMat4 {
        DMat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// What a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// One of the six half tubes.
    Tube(TubeKey),
    /// Part `part` of cap `cap` (0 or 1).
    CapPart { cap: usize, part: usize },
}

/// A renderable mesh with its resource ids.
///
/// The mesh is reference-counted: cap parts share the template's geometry
/// instead of copying it.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub geometry: GeometryId,
    pub material: MaterialId,
    pub mesh: Rc<Mesh>,
    pub transform: Transform,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl SceneNode {
    /// The node's mesh moved into world space.
    pub fn world_mesh(&self) -> Mesh {
        if self.transform == Transform::IDENTITY {
            return (*self.mesh).clone();
        }
        self.mesh.transformed(&self.transform.matrix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serpentine_mesh::{CurveRole, ProfileSide};

    fn node(transform: Transform) -> SceneNode {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::X);
        SceneNode {
            id: NodeId(1),
            kind: NodeKind::Tube(TubeKey {
                role: CurveRole::Top,
                side: ProfileSide::Left,
            }),
            geometry: GeometryId(2),
            material: MaterialId(3),
            mesh: Rc::new(mesh),
            transform,
            cast_shadow: true,
            receive_shadow: false,
        }
    }

    #[test]
    fn test_identity_world_mesh_is_a_copy() {
        let node = node(Transform::IDENTITY);
        assert_eq!(node.world_mesh().vertex(0), DVec3::X);
    }

    #[test]
    fn test_world_mesh_applies_transform() {
        let node = node(Transform {
            translation: DVec3::new(0.0, 1.0, 0.0),
            rotation: DQuat::IDENTITY,
            scale: DVec3::splat(2.0),
        });
        let world = node.world_mesh();
        assert!((world.vertex(0) - DVec3::new(2.0, 1.0, 0.0)).length() < 1e-12);
    }
}
