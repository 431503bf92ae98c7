//! # Resource Handles
//!
//! Opaque ids the scene sink uses to track GPU-side resources. Ids are never
//! reused within one manager, so a stale id can never alias a live resource.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

handle!(
    /// Vertex/index buffers of one mesh.
    GeometryId,
    "geometry"
);
handle!(
    /// One shared material instance.
    MaterialId,
    "material"
);
handle!(
    /// One node in the scene graph.
    NodeId,
    "node"
);
handle!(
    /// One pending asset load.
    LoadHandle,
    "load"
);
handle!(
    /// One rebuild's set of tubes and material.
    GenerationId,
    "generation"
);

/// Monotonic id source shared by all handle kinds.
#[derive(Debug, Default)]
pub struct HandleAllocator {
    next: u64,
}

impl HandleAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    fn bump(&mut self) -> u64 {
        self.next += 1;
        self.next
    }

    pub fn geometry(&mut self) -> GeometryId {
        GeometryId(self.bump())
    }

    pub fn material(&mut self) -> MaterialId {
        MaterialId(self.bump())
    }

    pub fn node(&mut self) -> NodeId {
        NodeId(self.bump())
    }

    pub fn generation(&mut self) -> GenerationId {
        GenerationId(self.bump())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_across_kinds() {
        let mut ids = HandleAllocator::new();
        let geometry = ids.geometry();
        let material = ids.material();
        let node = ids.node();
        assert_ne!(geometry.0, material.0);
        assert_ne!(material.0, node.0);
        assert_eq!(node.to_string(), format!("node#{}", node.0));
    }
}
