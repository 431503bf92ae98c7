//! # Export Groups
//!
//! Read-only view of the published scene split into the four printable
//! bodies: both tube halves and each cap. Writing a file format is left to
//! the host.

use serpentine_mesh::{Mesh, ProfileSide};

use crate::node::{NodeKind, SceneNode};

/// Download names for the four bodies.
pub const LEFT_HALF_FILE: &str = "handaxe_left_half.stl";
pub const RIGHT_HALF_FILE: &str = "handaxe_right_half.stl";
pub const CAP1_FILE: &str = "handaxe_cap1.stl";
pub const CAP2_FILE: &str = "handaxe_cap2.stl";

/// Nodes that make up one exported body.
#[derive(Debug, Clone, Copy)]
pub struct ExportGroup<'a> {
    pub file_name: &'static str,
    pub nodes: &'a [&'a SceneNode],
}

impl ExportGroup<'_> {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes of the group flattened into one world-space mesh.
    pub fn merged_mesh(&self) -> Mesh {
        let mut merged = Mesh::new();
        for node in self.nodes {
            merged.merge(&node.world_mesh());
        }
        merged
    }
}

/// The published scene grouped for export.
#[derive(Debug, Clone, Default)]
pub struct ExportGroups<'a> {
    left: Vec<&'a SceneNode>,
    right: Vec<&'a SceneNode>,
    caps: [Vec<&'a SceneNode>; 2],
}

impl<'a> ExportGroups<'a> {
    /// Sorts `nodes` into halves and caps.
    pub fn collect(nodes: impl IntoIterator<Item = &'a SceneNode>) -> Self {
        let mut groups = Self::default();
        for node in nodes {
            match node.kind {
                NodeKind::Tube(key) => match key.side {
                    ProfileSide::Left => groups.left.push(node),
                    ProfileSide::Right => groups.right.push(node),
                },
                NodeKind::CapPart { cap, .. } => {
                    if let Some(group) = groups.caps.get_mut(cap) {
                        group.push(node);
                    }
                }
            }
        }
        groups
    }

    pub fn left(&self) -> ExportGroup<'_> {
        ExportGroup {
            file_name: LEFT_HALF_FILE,
            nodes: &self.left,
        }
    }

    pub fn right(&self) -> ExportGroup<'_> {
        ExportGroup {
            file_name: RIGHT_HALF_FILE,
            nodes: &self.right,
        }
    }

    pub fn cap1(&self) -> ExportGroup<'_> {
        ExportGroup {
            file_name: CAP1_FILE,
            nodes: &self.caps[0],
        }
    }

    pub fn cap2(&self) -> ExportGroup<'_> {
        ExportGroup {
            file_name: CAP2_FILE,
            nodes: &self.caps[1],
        }
    }

    /// Non-empty groups in download order.
    pub fn non_empty(&self) -> Vec<ExportGroup<'_>> {
        [self.left(), self.right(), self.cap1(), self.cap2()]
            .into_iter()
            .filter(|group| !group.is_empty())
            .collect()
    }
}
