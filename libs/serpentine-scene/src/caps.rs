//! # End Caps
//!
//! Two clones of the cap template close the open ends of the tube. They are
//! cloned once, then only re-placed and re-materialed on every rebuild.

use config::constants::CAP_SCALE_PER_HOLE;
use glam::{DQuat, DVec3};
use serpentine_mesh::{DerivedLayout, GeometryParameters};
use std::f64::consts::FRAC_PI_2;
use std::rc::Rc;

use crate::asset::CapTemplate;
use crate::handles::{HandleAllocator, MaterialId};
use crate::node::{NodeKind, SceneNode, Transform};

/// Number of caps.
pub const CAP_COUNT: usize = 2;

/// Transforms of both caps for one layout.
///
/// Cap 1 sits at `(−L/2, vertical_gap/2, 0)`, cap 2 at `(−L/2, −vertical_gap, 0)`.
/// Both are turned by Euler XYZ `(π/2, 0, π/2)` and scaled uniformly by
/// `0.2 · hole_diameter`.
///
/// # Example
///
/// ```rust
/// use serpentine_mesh::params::{derive_layout, sanitize};
/// use serpentine_scene::caps::cap_transforms;
///
/// let params = sanitize(85.75, 0.7, 0.5);
/// let layout = derive_layout(&params, 1.0).unwrap();
/// let [first, second] = cap_transforms(&layout, &params);
/// assert!((first.translation.y - 1.7).abs() < 1e-12);
/// assert!((second.translation.y + 3.4).abs() < 1e-12);
/// ```
pub fn cap_transforms(layout: &DerivedLayout, parameters: &GeometryParameters) -> [Transform; CAP_COUNT] {
    let x = -layout.line_segment_length / 2.0;
    // Euler XYZ applies X outermost: Rx · Ry · Rz
    let rotation = DQuat::from_rotation_x(FRAC_PI_2) * DQuat::from_rotation_z(FRAC_PI_2);
    let scale = DVec3::splat(CAP_SCALE_PER_HOLE * parameters.hole_diameter);

    [
        DVec3::new(x, layout.vertical_gap / 2.0, 0.0),
        DVec3::new(x, -layout.vertical_gap, 0.0),
    ]
    .map(|translation| Transform {
        translation,
        rotation,
        scale,
    })
}

/// One placed clone of the cap template.
#[derive(Debug, Clone)]
pub struct CapInstance {
    index: usize,
    nodes: Vec<SceneNode>,
    attached: bool,
}

impl CapInstance {
    /// Clones `template`. Parts share the template's geometry.
    pub fn from_template(
        template: &CapTemplate,
        index: usize,
        material: MaterialId,
        ids: &mut HandleAllocator,
    ) -> Self {
        let nodes = template
            .parts()
            .iter()
            .enumerate()
            .map(|(part, source)| SceneNode {
                id: ids.node(),
                kind: NodeKind::CapPart { cap: index, part },
                geometry: source.geometry,
                material,
                mesh: Rc::clone(&source.mesh),
                transform: Transform::IDENTITY,
                cast_shadow: true,
                receive_shadow: true,
            })
            .collect();
        Self {
            index,
            nodes,
            attached: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub(crate) fn set_attached(&mut self, attached: bool) {
        self.attached = attached;
    }

    /// Moves every part and assigns `material`.
    pub(crate) fn place(&mut self, transform: Transform, material: MaterialId) {
        for node in &mut self.nodes {
            node.transform = transform;
            node.material = material;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::CapAsset;
    use approx::assert_relative_eq;
    use serpentine_mesh::params::{derive_layout, sanitize};
    use serpentine_mesh::Mesh;

    #[test]
    fn test_cap_rotation_maps_x_to_z() {
        let params = sanitize(85.75, 0.7, 0.5);
        let layout = derive_layout(&params, 1.0).unwrap();
        let [first, _] = cap_transforms(&layout, &params);
        let turned = first.rotation * DVec3::X;
        assert_relative_eq!(turned.z, 1.0, epsilon = 1e-12);
        assert_relative_eq!(first.scale.x, 0.1, epsilon = 1e-12);
        assert_relative_eq!(first.translation.x, -layout.line_segment_length / 2.0);
    }

    #[test]
    fn test_clones_share_template_geometry() {
        let mut ids = HandleAllocator::new();
        let asset = CapAsset::new(vec![
            Mesh::from_buffers(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0], &[0, 1, 2]).unwrap(),
            Mesh::from_buffers(&[0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 1.0, 1.0], &[0, 1, 2]).unwrap(),
        ]);
        let template = CapTemplate::from_asset(asset, &mut ids).unwrap();
        let a = CapInstance::from_template(&template, 0, MaterialId(99), &mut ids);
        let b = CapInstance::from_template(&template, 1, MaterialId(99), &mut ids);

        assert_eq!(a.nodes().len(), 2);
        assert_eq!(a.nodes()[1].geometry, b.nodes()[1].geometry);
        assert_ne!(a.nodes()[1].id, b.nodes()[1].id);
        assert!(a.nodes().iter().all(|n| n.cast_shadow && n.receive_shadow));
    }

    #[test]
    fn test_place_updates_every_part() {
        let mut ids = HandleAllocator::new();
        let asset =
            CapAsset::from_buffers(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0], &[0, 1, 2])
                .unwrap();
        let template = CapTemplate::from_asset(asset, &mut ids).unwrap();
        let mut cap = CapInstance::from_template(&template, 0, MaterialId(1), &mut ids);

        let transform = Transform {
            translation: DVec3::ONE,
            ..Transform::IDENTITY
        };
        cap.place(transform, MaterialId(2));
        assert!(cap.nodes().iter().all(|n| n.material == MaterialId(2) && n.transform == transform));
    }
}
